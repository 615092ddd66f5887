//! Typed placeholder collection.
//!
//! While a translation's text is scanned, every `{name}` occurrence is
//! recorded here in first-seen order, and every `{name,Type}` or
//! `{name,Type,format}` occurrence defines its type. The table enforces the
//! gen-l10n typing rules and fills in fallbacks for placeholders that were
//! only ever seen untyped.

use std::fmt;

use thiserror::Error;

use crate::formats::arb::{ArbMessageAttributes, ArbPlaceholder};
use crate::ordered_map::OrderedMap;

/// Name of the implicit numeric placeholder of plural messages.
pub const COUNT_PLACEHOLDER: &str = "count";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlaceholderError {
    #[error("placeholder type can only be defined once")]
    DuplicateDefinition,

    #[error("invalid count placeholder type. Supported types: num, int")]
    InvalidCountType,

    #[error("format is required for int plural placeholders")]
    CountFormatRequired,

    #[error("format is not supported for {0} placeholders")]
    FormatNotSupported(String),

    #[error("format is required for DateTime placeholders")]
    FormatRequired,

    #[error("unknown placeholder type {0}. Supported types: String, Object, DateTime, num, int, double")]
    UnknownType(String),
}

/// All placeholder errors found in a single translation, keyed by
/// placeholder name. One translation can fail in several places at once and
/// all of them should be reported together.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TranslationErrors {
    errors: Vec<(String, PlaceholderError)>,
}

impl TranslationErrors {
    pub fn add(&mut self, name: impl Into<String>, error: PlaceholderError) {
        self.errors.push((name.into(), error));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for TranslationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("some errors occurred while parsing translation:")?;
        for (name, error) in &self.errors {
            write!(f, "\n  - {name}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TranslationErrors {}

/// Placeholder table of one translation under parse.
///
/// `None` marks a placeholder that has been seen but not typed yet.
#[derive(Debug)]
pub struct PlaceholderTable {
    plural: bool,
    params: OrderedMap<Option<ArbPlaceholder>>,
}

impl PlaceholderTable {
    pub fn new(plural: bool) -> Self {
        PlaceholderTable {
            plural,
            params: OrderedMap::new(),
        }
    }

    /// Records a bare `{name}` occurrence. Keeps any type defined earlier.
    pub fn observe(&mut self, name: &str) {
        if !self.params.contains_key(name) {
            self.params.insert(name, None);
        }
    }

    /// Records a `{name,Type}` or `{name,Type,format}` occurrence.
    pub fn define(
        &mut self,
        name: &str,
        placeholder_type: &str,
        format: &str,
    ) -> Result<(), PlaceholderError> {
        if matches!(self.params.get(name), Some(Some(_))) {
            return Err(PlaceholderError::DuplicateDefinition);
        }

        if self.plural && name == COUNT_PLACEHOLDER {
            match placeholder_type {
                "num" => {}
                "int" => {
                    if format.is_empty() {
                        return Err(PlaceholderError::CountFormatRequired);
                    }
                }
                _ => return Err(PlaceholderError::InvalidCountType),
            }
        } else {
            match placeholder_type {
                "String" | "Object" => {
                    if !format.is_empty() {
                        return Err(PlaceholderError::FormatNotSupported(
                            placeholder_type.to_string(),
                        ));
                    }
                }
                "DateTime" => {
                    if format.is_empty() {
                        return Err(PlaceholderError::FormatRequired);
                    }
                }
                "num" | "int" | "double" => {}
                _ => {
                    return Err(PlaceholderError::UnknownType(placeholder_type.to_string()));
                }
            }
        }

        self.params.insert(
            name,
            Some(ArbPlaceholder {
                r#type: placeholder_type.to_string(),
                format: format.to_string(),
            }),
        );
        Ok(())
    }

    /// Consumes the table into message attributes, resolving fallbacks.
    ///
    /// A plural message always carries an untyped `count` placeholder even
    /// if the text never mentions it; every other placeholder left untyped
    /// defaults to `String`.
    pub fn into_attributes(mut self) -> ArbMessageAttributes {
        if self.plural && !self.params.contains_key(COUNT_PLACEHOLDER) {
            self.params.insert(COUNT_PLACEHOLDER, None);
        }

        let mut placeholders = OrderedMap::new();
        let plural = self.plural;
        for (name, slot) in self.params.iter() {
            let placeholder = match slot {
                Some(placeholder) => placeholder.clone(),
                None if plural && name == COUNT_PLACEHOLDER => ArbPlaceholder::default(),
                None => ArbPlaceholder {
                    r#type: "String".to_string(),
                    format: String::new(),
                },
            };
            placeholders.insert(name.clone(), placeholder);
        }

        ArbMessageAttributes {
            description: String::new(),
            placeholders: if placeholders.is_empty() {
                None
            } else {
                Some(placeholders)
            },
        }
    }
}
