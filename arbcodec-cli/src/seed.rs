//! `seed`: upload local ARB files to an empty POEditor project.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use arbcodec::convert::arb_to_poe::Converter;
use arbcodec::Error;
use tracing::{info, warn};

use crate::flutter_config::FlutterConfig;
use crate::options::PoeOptions;
use crate::poeditor::{
    ApiError, Client, FREE_ACCOUNT_UPLOAD_RATE_LIMIT, PAID_ACCOUNT_UPLOAD_RATE_LIMIT,
    RATE_LIMIT_ERROR_CODE,
};
use crate::PoeArgs;

pub fn run(args: &PoeArgs) -> Result<()> {
    info!("loading options");
    let working_dir = std::env::current_dir()?;
    let config = FlutterConfig::from_directory(&working_dir)?;
    let options = PoeOptions::select(args, &config)?;

    info!(directory = %options.output_dir.display(), "reading ARB files");
    let files = arb_files(&options)?;
    if files.is_empty() {
        bail!("no ARB files found");
    }
    info!("found {} ARB files", files.len());

    let client = Client::new(&options.token);
    let available_langs = client
        .project_languages(&options.project_id)
        .context("failed fetching languages")?;

    let mut first = true;
    let mut free_account_rate_limit = false;

    for path in &files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("seeding {file_name}");

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;

        let converter = Converter::new(options.template_locale.clone(), &options.term_prefix);
        let mut terms_json = Vec::new();
        let locale = match converter.convert(&contents, &mut terms_json) {
            Ok(locale) => locale,
            Err(Error::NoTerms) => {
                info!("no terms to convert");
                continue;
            }
            Err(error) => {
                return Err(error).with_context(|| format!("converting {file_name}"));
            }
        };
        let lang = locale.to_hyphen_lowercase();

        if !options.override_langs.is_empty()
            && !options
                .override_langs
                .iter()
                .any(|code| code.eq_ignore_ascii_case(&lang))
        {
            info!("skipping language {lang}");
            continue;
        }

        let lang_available = available_langs
            .iter()
            .any(|available| available.code.eq_ignore_ascii_case(&lang));
        if !lang_available {
            info!("adding language {lang} to project");
            client.add_language(&options.project_id, &lang)?;
        }

        if !first {
            let (timeout, account) = if free_account_rate_limit {
                (FREE_ACCOUNT_UPLOAD_RATE_LIMIT, "free account")
            } else {
                (PAID_ACCOUNT_UPLOAD_RATE_LIMIT, "paid account")
            };
            info!("waiting {timeout:?} ({account}) to avoid rate limiting");
            std::thread::sleep(timeout);
        }

        info!("uploading JSON to POEditor");
        loop {
            match client.upload(&options.project_id, &lang, terms_json.clone()) {
                Ok(()) => break,
                Err(error) => {
                    let rate_limited = error
                        .downcast_ref::<ApiError>()
                        .is_some_and(|api| api.code == RATE_LIMIT_ERROR_CODE);

                    if rate_limited && !free_account_rate_limit {
                        // The paid-account delay was not enough. Retry once
                        // with the free-account delay, waiting the full
                        // timeout again rather than just the difference.
                        free_account_rate_limit = true;
                        warn!(
                            "paid account rate limit was not enough, retrying with free \
                             account rate limit ({FREE_ACCOUNT_UPLOAD_RATE_LIMIT:?})"
                        );
                        std::thread::sleep(FREE_ACCOUNT_UPLOAD_RATE_LIMIT);
                        continue;
                    }

                    return Err(error.context(format!("uploading {file_name}")));
                }
            }
        }
        info!("done");

        first = false;
    }

    Ok(())
}

/// ARB files in the output directory matching the configured prefix,
/// in name order.
fn arb_files(options: &PoeOptions) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(&options.output_dir)
        .with_context(|| format!("reading {}", options.output_dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(&options.arb_prefix) && name.ends_with(".arb") {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}
