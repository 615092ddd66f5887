//! Conversion from POEditor's JSON export to Flutter's ARB.

use std::io::Write;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::convert::split_prefixed;
use crate::error::Error;
use crate::formats::arb::{ArbDocument, ArbMessage};
use crate::formats::poeditor::{PoeTerm, TermDefinition};
use crate::locale::Locale;
use crate::natural::natural_cmp;
use crate::placeholder::{PlaceholderTable, TranslationErrors};

lazy_static! {
    static ref MESSAGE_NAME_RE: Regex = Regex::new(r"^[a-z][a-zA-Z_\d]*$").unwrap();
    static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"\{([a-zA-Z][a-zA-Z_\d]*)(?:,([a-zA-Z]+)(?:,([a-zA-Z]+))?)?\}").unwrap();
}

/// Normalizes a term name into a valid gen-l10n message name.
///
/// The first letter is lowercased (gen-l10n rejects leading uppercase) and
/// dots become underscores.
pub fn parse_name(name: &str) -> Result<String, Error> {
    let mut chars = name.chars();
    let name = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    let name = name.replace('.', "_");

    if !MESSAGE_NAME_RE.is_match(&name) {
        return Err(Error::InvalidName);
    }

    Ok(name)
}

/// Scans one translation's text for placeholders, accumulating them into a
/// typed table and normalizing every occurrence to the bare `{name}` form.
struct TranslationParser {
    table: PlaceholderTable,
}

impl TranslationParser {
    fn new(plural: bool) -> Self {
        TranslationParser {
            table: PlaceholderTable::new(plural),
        }
    }

    /// Strips type annotations without recording or validating anything.
    /// Used for non-template terms, whose definitions are never emitted.
    fn parse_dummy(&self, translation: &str) -> String {
        PLACEHOLDER_RE.replace_all(translation, "{$1}").into_owned()
    }

    fn parse(&mut self, translation: &str) -> Result<String, Error> {
        let mut errors = TranslationErrors::default();

        let replaced = PLACEHOLDER_RE.replace_all(translation, |caps: &Captures| {
            let name = &caps[1];
            let placeholder_type = caps.get(2).map_or("", |m| m.as_str());
            let format = caps.get(3).map_or("", |m| m.as_str());

            if placeholder_type.is_empty() {
                self.table.observe(name);
            } else if let Err(error) = self.table.define(name, placeholder_type, format) {
                errors.add(name, error);
            }

            format!("{{{name}}}")
        });

        if !errors.is_empty() {
            return Err(Error::Translation(errors));
        }

        Ok(replaced.into_owned())
    }
}

#[derive(Debug, Clone)]
pub struct ConverterOptions {
    pub locale: Locale,
    pub template: bool,
    pub require_resource_attributes: bool,
    pub term_prefix: String,
}

/// Converts a whole POEditor export into one ARB document.
pub struct Converter {
    options: ConverterOptions,
}

impl Converter {
    pub fn new(options: ConverterOptions) -> Self {
        Converter { options }
    }

    /// Runs the conversion, writing the ARB document to `output`.
    ///
    /// Terms that fail to convert do not abort the run: every term that
    /// converts cleanly is still written, and the failures are reported
    /// together as one [`Error::Aggregate`] afterwards.
    pub fn convert<W: Write>(&self, input: &str, output: W) -> Result<(), Error> {
        let mut terms: Vec<PoeTerm> = serde_json::from_str(input)?;

        // POEditor's own ordering: natural sort on the prefix-stripped key.
        terms.sort_by(|a, b| {
            natural_cmp(split_prefixed(&a.term).1, split_prefixed(&b.term).1)
        });

        let mut document = ArbDocument::new(&self.options.locale);
        let mut errors: Vec<Error> = Vec::new();

        for term in &terms {
            let (prefix, key) = split_prefixed(&term.term);
            if prefix != self.options.term_prefix {
                continue;
            }

            let message = match self.parse_term(key, &term.definition) {
                Ok(message) => message,
                Err(error) => {
                    errors.push(Error::for_term(key, error));
                    continue;
                }
            };
            let Some(message) = message else {
                continue;
            };

            // Terms untranslated in this language stay out of non-template
            // files, so gen-l10n falls back to the template.
            if !self.options.template && message.translation.is_empty() {
                continue;
            }

            document.insert_translation(&message.name, message.translation);

            if self.options.template {
                if let Some(attributes) = message.attributes {
                    if self.options.require_resource_attributes || !attributes.is_empty() {
                        document.insert_attributes(&message.name, attributes);
                    }
                }
            }
        }

        document.to_writer(output)?;

        if !errors.is_empty() {
            return Err(Error::Aggregate(errors));
        }
        Ok(())
    }

    fn parse_term(
        &self,
        name: &str,
        definition: &TermDefinition,
    ) -> Result<Option<ArbMessage>, Error> {
        let mut parser = TranslationParser::new(definition.is_plural());
        let name = parse_name(name)?;

        let translation = match definition {
            TermDefinition::Singular(text) => self.parse_translation(&mut parser, text)?,
            TermDefinition::Plural(plural) => {
                let plural = plural.map(|text| self.parse_translation(&mut parser, text))?;

                if plural.other.is_empty() {
                    if self.options.template {
                        return Err(Error::MissingOtherCategory);
                    } else {
                        // An untranslated plural carries no information in a
                        // non-template file. Drop it without complaint.
                        return Ok(None);
                    }
                }

                plural.to_icu_message_format()
            }
        };

        Ok(Some(ArbMessage {
            name,
            translation,
            attributes: Some(parser.table.into_attributes()),
        }))
    }

    fn parse_translation(
        &self,
        parser: &mut TranslationParser,
        translation: &str,
    ) -> Result<String, Error> {
        if self.options.template {
            parser.parse(translation)
        } else {
            Ok(parser.parse_dummy(translation))
        }
    }
}
