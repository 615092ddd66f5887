//! Simplified locale identifiers: language plus optional script and region.
//!
//! This is deliberately not full BCP-47. POEditor language codes and ARB
//! `@@locale` values only ever carry a language, an optional script from a
//! small known set, and an optional region, in either underscore or hyphen
//! convention.

use std::{fmt::Display, str::FromStr};

use crate::error::Error;

/// The scripts POEditor knows about.
///
/// See <https://poeditor.com/docs/languages>. Latin is not in the docs but
/// shows up in real projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Cyrl,
    Hans,
    Hant,
    Latn,
}

impl Script {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "cyrl" => Some(Script::Cyrl),
            "hans" => Some(Script::Hans),
            "hant" => Some(Script::Hant),
            "latn" => Some(Script::Latn),
            _ => None,
        }
    }

    /// Titlecase form used in ARB locale keys (`zh_Hans`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Cyrl => "Cyrl",
            Script::Hans => "Hans",
            Script::Hant => "Hant",
            Script::Latn => "Latn",
        }
    }

    /// Lowercase form used in POEditor language codes (`zh-hans`).
    pub fn as_lowercase_str(&self) -> &'static str {
        match self {
            Script::Cyrl => "cyrl",
            Script::Hans => "hans",
            Script::Hant => "hant",
            Script::Latn => "latn",
        }
    }
}

impl Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed locale identifier.
///
/// Fields are normalized at parse time (language lowercased, region
/// uppercased, script Titlecase), so the derived equality is the
/// case-insensitive comparison callers expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub language: String,
    pub script: Option<Script>,
    pub region: Option<String>,
}

impl Locale {
    pub fn new(language: &str) -> Self {
        Locale {
            language: language.to_lowercase(),
            script: None,
            region: None,
        }
    }

    /// Hyphen-separated, fully lowercased form used as a POEditor language
    /// code (`zh-hans-cn`).
    pub fn to_hyphen_lowercase(&self) -> String {
        let mut locale = self.language.clone();
        if let Some(script) = self.script {
            locale.push('-');
            locale.push_str(script.as_lowercase_str());
        }
        if let Some(region) = &self.region {
            locale.push('-');
            locale.push_str(&region.to_lowercase());
        }
        locale
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(['_', '-'])
            .filter(|part| !part.is_empty())
            .collect();

        match parts[..] {
            [language] => Ok(Locale::new(language)),
            [language, tail] => {
                let mut locale = Locale::new(language);
                match Script::from_tag(tail) {
                    Some(script) => locale.script = Some(script),
                    None => locale.region = Some(tail.to_uppercase()),
                }
                Ok(locale)
            }
            [language, script, region] => {
                let script =
                    Script::from_tag(script).ok_or_else(|| Error::InvalidScript(script.into()))?;
                Ok(Locale {
                    language: language.to_lowercase(),
                    script: Some(script),
                    region: Some(region.to_uppercase()),
                })
            }
            _ => Err(Error::InvalidLocale(s.into())),
        }
    }
}

impl Display for Locale {
    /// Underscore-separated form used in ARB `@@locale` keys and file names
    /// (`zh_Hans_CN`).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = self.script {
            write!(f, "_{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "_{region}")?;
        }
        Ok(())
    }
}
