//! `poe`: export every project language from POEditor and write ARB files.

use std::fs::File;

use anyhow::{bail, Context, Result};
use arbcodec::convert::poe_to_arb::{Converter, ConverterOptions};
use arbcodec::Locale;
use tracing::info;

use crate::flutter_config::FlutterConfig;
use crate::options::PoeOptions;
use crate::poeditor::{Client, Language};
use crate::PoeArgs;

pub fn run(args: &PoeArgs) -> Result<()> {
    info!("loading options");
    let working_dir = std::env::current_dir()?;
    let config = FlutterConfig::from_directory(&working_dir)?;
    let options = PoeOptions::select(args, &config)?;

    let client = Client::new(&options.token);

    info!("fetching project languages");
    let languages = export_languages(&client, &options)?;

    if !options.output_dir.exists() {
        info!(directory = %options.output_dir.display(), "creating output directory");
        std::fs::create_dir_all(&options.output_dir)?;
    }

    for language in &languages {
        let locale: Locale = language
            .code
            .parse()
            .with_context(|| format!("parsing {} language code", language.code))?;
        let template = options.template_locale == locale;

        export_language(&client, &options, language, &locale, template).with_context(|| {
            format!("exporting {} ({}) language", language.name, language.code)
        })?;
    }

    info!("done");
    Ok(())
}

/// The project's languages, narrowed by `--langs` when given.
fn export_languages(client: &Client, options: &PoeOptions) -> Result<Vec<Language>> {
    let languages = client.project_languages(&options.project_id)?;

    if options.override_langs.is_empty() {
        return Ok(languages);
    }

    let filtered: Vec<Language> = languages
        .iter()
        .filter(|language| {
            options
                .override_langs
                .iter()
                .any(|code| code.eq_ignore_ascii_case(&language.code))
        })
        .cloned()
        .collect();

    if filtered.is_empty() {
        let available: Vec<&str> = languages.iter().map(|l| l.code.as_str()).collect();
        bail!(
            "--langs specified {} lang(s), but none of them were available in the POEditor \
             project. Available langs: {}",
            options.override_langs.len(),
            available.join(", ")
        );
    }

    Ok(filtered)
}

fn export_language(
    client: &Client,
    options: &PoeOptions,
    language: &Language,
    locale: &Locale,
    template: bool,
) -> Result<()> {
    info!(
        "fetching JSON export for {} ({})",
        language.name, language.code
    );
    let url = client.export_url(&options.project_id, &language.code)?;
    let export = client.download(&url)?;

    let file_path = options
        .output_dir
        .join(format!("{}{}.arb", options.arb_prefix, locale));
    let file = File::create(&file_path)
        .with_context(|| format!("creating ARB file {}", file_path.display()))?;

    info!("converting JSON to ARB");
    let converter = Converter::new(ConverterOptions {
        locale: locale.clone(),
        template,
        require_resource_attributes: options.require_resource_attributes,
        term_prefix: options.term_prefix.clone(),
    });
    converter.convert(&export, file)?;

    info!(path = %file_path.display(), "saved");
    Ok(())
}
