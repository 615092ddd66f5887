//! Flutter project configuration discovery.
//!
//! The project root is wherever `pubspec.yaml` lives, searching upwards
//! from the working directory. An `l10n.yaml` next to it configures
//! gen-l10n and, through extension keys, this tool.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// The `l10n.yaml` configuration, gen-l10n keys plus our extension keys.
///
/// Key reference: <https://docs.flutter.dev/ui/accessibility-and-internationalization/internationalization#configuring-the-l10nyaml-file>
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct L10n {
    pub arb_dir: String,
    pub template_arb_file: String,
    pub required_resource_attributes: bool,

    // extension keys
    pub poeditor_project_id: String,
    pub poeditor_langs: Option<Vec<String>>,
    pub poeditor_term_prefix: String,
}

impl Default for L10n {
    fn default() -> Self {
        L10n {
            arb_dir: "lib/l10n".to_string(),
            template_arb_file: "app_en.arb".to_string(),
            required_resource_attributes: false,
            poeditor_project_id: String::new(),
            poeditor_langs: None,
            poeditor_term_prefix: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlutterConfig {
    pub root_dir: PathBuf,
    pub l10n: L10n,
}

impl FlutterConfig {
    /// Finds the enclosing Flutter project of `dir` and loads its
    /// localization configuration. Missing `l10n.yaml` means defaults.
    pub fn from_directory(dir: &Path) -> Result<FlutterConfig> {
        let Some(root_dir) = walk_up_for_pubspec(dir) else {
            bail!("no pubspec.yaml found in the current or any parent directory");
        };

        let l10n_path = root_dir.join("l10n.yaml");
        let l10n = if l10n_path.exists() {
            let contents = std::fs::read_to_string(&l10n_path)
                .with_context(|| format!("failure reading {}", l10n_path.display()))?;
            serde_yaml::from_str(&contents).context("failure decoding l10n.yaml")?
        } else {
            L10n::default()
        };

        Ok(FlutterConfig { root_dir, l10n })
    }
}

fn walk_up_for_pubspec(dir: &Path) -> Option<PathBuf> {
    let mut dir = dir;
    loop {
        if dir.join("pubspec.yaml").is_file() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
