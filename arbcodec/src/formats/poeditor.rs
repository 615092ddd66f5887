//! The POEditor side of the conversion.
//!
//! A POEditor export is a JSON array of term objects. The `definition`
//! field is polymorphic: a string for singular terms, an object of plural
//! categories for plural terms, or null for a term with no translation yet.
//! `context`, `reference` and `comment` fields are ignored on read.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// One term of a POEditor export or import file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoeTerm {
    pub term: String,

    #[serde(default)]
    pub term_plural: String,

    pub definition: TermDefinition,
}

/// The polymorphic `definition` value of a term.
#[derive(Debug, Clone, PartialEq)]
pub enum TermDefinition {
    Singular(String),
    Plural(PluralDefinition),
}

impl TermDefinition {
    pub fn is_plural(&self) -> bool {
        matches!(self, TermDefinition::Plural(_))
    }
}

impl Serialize for TermDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TermDefinition::Singular(text) => text.serialize(serializer),
            TermDefinition::Plural(plural) => plural.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TermDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Inspect the JSON shape before dispatching: string and null mean
        // singular, an object means a plural category set.
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(text) => Ok(TermDefinition::Singular(text)),
            serde_json::Value::Null => Ok(TermDefinition::Singular(String::new())),
            serde_json::Value::Object(_) => serde_json::from_value(value)
                .map(TermDefinition::Plural)
                .map_err(de::Error::custom),
            _ => Err(de::Error::custom("invalid definition type")),
        }
    }
}

/// Up to six plural category slots. `other` is the required fallback; the
/// rest are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluralDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub few: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub many: Option<String>,

    #[serde(default)]
    pub other: String,
}

impl PluralDefinition {
    /// Applies `mapper` to every present category, preserving which
    /// categories were present and propagating the first error.
    pub fn map<E>(
        &self,
        mut mapper: impl FnMut(&str) -> Result<String, E>,
    ) -> Result<PluralDefinition, E> {
        let mut map_opt = |category: &Option<String>| -> Result<Option<String>, E> {
            category.as_deref().map(&mut mapper).transpose()
        };

        Ok(PluralDefinition {
            zero: map_opt(&self.zero)?,
            one: map_opt(&self.one)?,
            two: map_opt(&self.two)?,
            few: map_opt(&self.few)?,
            many: map_opt(&self.many)?,
            other: mapper(&self.other)?,
        })
    }

    /// Renders the category set as an ICU plural message. Exact cardinals
    /// are used for zero/one/two, matching what gen-l10n expects.
    pub fn to_icu_message_format(&self) -> String {
        use fmt::Write;

        let mut message = String::from("{count, plural,");
        if let Some(zero) = &self.zero {
            let _ = write!(message, " =0 {{{zero}}}");
        }
        if let Some(one) = &self.one {
            let _ = write!(message, " =1 {{{one}}}");
        }
        if let Some(two) = &self.two {
            let _ = write!(message, " =2 {{{two}}}");
        }
        if let Some(few) = &self.few {
            let _ = write!(message, " few {{{few}}}");
        }
        if let Some(many) = &self.many {
            let _ = write!(message, " many {{{many}}}");
        }
        let _ = write!(message, " other {{{}}}}}", self.other);

        message
    }
}
