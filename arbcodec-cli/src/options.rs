//! Resolution of POEditor command options from their sources.
//!
//! Precedence is command-line flag, then environment (the token's
//! `POEDITOR_TOKEN` is wired through clap), then `l10n.yaml`.

use std::path::PathBuf;

use anyhow::{bail, Result};
use arbcodec::Locale;
use lazy_static::lazy_static;
use regex::Regex;

use crate::flutter_config::FlutterConfig;
use crate::PoeArgs;

lazy_static! {
    static ref TERM_PREFIX_RE: Regex = Regex::new(r"^[a-zA-Z]*$").unwrap();
}

const DEFAULT_ARB_PREFIX: &str = "app_";

#[derive(Debug, Clone)]
pub struct PoeOptions {
    pub project_id: String,
    pub token: String,
    pub term_prefix: String,
    pub output_dir: PathBuf,
    pub arb_prefix: String,
    pub template_locale: Locale,
    pub require_resource_attributes: bool,
    pub override_langs: Vec<String>,
}

impl PoeOptions {
    /// Resolves and validates options from flags and the project config.
    /// All validation failures are reported at once.
    pub fn select(flags: &PoeArgs, config: &FlutterConfig) -> Result<PoeOptions> {
        let l10n = &config.l10n;

        let project_id = flags
            .project_id
            .clone()
            .unwrap_or_else(|| l10n.poeditor_project_id.clone());
        let token = flags.token.clone().unwrap_or_default();
        let term_prefix = flags
            .term_prefix
            .clone()
            .unwrap_or_else(|| l10n.poeditor_term_prefix.clone());

        let mut problems = Vec::new();
        if project_id.is_empty() {
            problems.push("no POEditor project id provided");
        }
        if token.is_empty() {
            problems.push("no POEditor API token provided");
        }
        if !TERM_PREFIX_RE.is_match(&term_prefix) {
            problems.push("term prefix must contain only letters or be empty");
        }
        if !problems.is_empty() {
            bail!("{}", problems.join("\n"));
        }

        let output_dir = match &flags.output_dir {
            Some(dir) => dir.clone(),
            None => config.root_dir.join(&l10n.arb_dir),
        };

        let arb_prefix = flags
            .arb_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_ARB_PREFIX.to_string());

        let template_locale = template_locale(&l10n.template_arb_file, &arb_prefix)?;

        let override_langs = if !flags.langs.is_empty() {
            flags.langs.clone()
        } else {
            l10n.poeditor_langs.clone().unwrap_or_default()
        };

        Ok(PoeOptions {
            project_id,
            token,
            term_prefix,
            output_dir,
            arb_prefix,
            template_locale,
            require_resource_attributes: l10n.required_resource_attributes,
            override_langs,
        })
    }
}

/// Derives the template locale from the template ARB file name, e.g.
/// `app_en.arb` with prefix `app_` yields `en`.
fn template_locale(template_arb_file: &str, arb_prefix: &str) -> Result<Locale> {
    let Some(name) = template_arb_file.strip_suffix(".arb") else {
        bail!("template ARB file {template_arb_file} does not end with .arb");
    };
    let Some(tag) = name.strip_prefix(arb_prefix) else {
        bail!("template ARB file {template_arb_file} does not start with ARB prefix {arb_prefix}");
    };

    Ok(tag.parse()?)
}
