//! The ARB (Application Resource Bundle) side of the conversion.
//!
//! An ARB file is a JSON object: the mandatory `@@locale` key, then one
//! string entry per message, each optionally followed by an `@<name>`
//! metadata sibling carrying a description and typed placeholders.
//!
//! Encoding is deliberately byte-stable: `@@locale` first, messages in the
//! order they were inserted with their `@` entry immediately after, 4-space
//! indentation and a trailing newline. HTML-unsafe characters pass through
//! unescaped; ARB consumers expect raw text.

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::{error::Error, locale::Locale, ordered_map::OrderedMap};

pub const LOCALE_KEY: &str = "@@locale";

/// A single message pulled out of (or destined for) an ARB document.
#[derive(Debug, Clone, PartialEq)]
pub struct ArbMessage {
    pub name: String,
    pub translation: String,
    pub attributes: Option<ArbMessageAttributes>,
}

/// The `@<name>` metadata sibling of a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArbMessageAttributes {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholders: Option<OrderedMap<ArbPlaceholder>>,
}

impl ArbMessageAttributes {
    pub fn is_empty(&self) -> bool {
        self.description.is_empty()
            && self
                .placeholders
                .as_ref()
                .is_none_or(|placeholders| placeholders.is_empty())
    }
}

/// A typed placeholder. The name is the key of the enclosing map, so it is
/// not part of the serialized value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbPlaceholder {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub r#type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum ArbValue {
    Text(String),
    Attributes(ArbMessageAttributes),
}

/// An ARB document under construction, keyed in output order.
#[derive(Debug, Clone, Serialize)]
pub struct ArbDocument(OrderedMap<ArbValue>);

impl ArbDocument {
    pub fn new(locale: &Locale) -> Self {
        let mut entries = OrderedMap::new();
        entries.insert(LOCALE_KEY, ArbValue::Text(locale.to_string()));
        ArbDocument(entries)
    }

    pub fn insert_translation(&mut self, name: &str, translation: String) {
        self.0.insert(name, ArbValue::Text(translation));
    }

    pub fn insert_attributes(&mut self, name: &str, attributes: ArbMessageAttributes) {
        self.0.insert(format!("@{name}"), ArbValue::Attributes(attributes));
    }

    /// Number of entries including the locale key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Writes the document as 4-space-indented JSON with a trailing newline.
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Parses an ARB document into its locale and messages, in document order.
///
/// Every non-`@`-prefixed key must hold a string. An `@<name>` sibling that
/// is a JSON object is decoded as the message's attributes; siblings of any
/// other shape are ignored.
pub fn parse_arb(input: &str) -> Result<(Locale, Vec<ArbMessage>), Error> {
    let raw: OrderedMap<Box<RawValue>> = serde_json::from_str(input)?;

    let locale_value = raw.get(LOCALE_KEY).ok_or(Error::MissingLocaleKey)?;
    let locale_tag: String =
        serde_json::from_str(locale_value.get()).map_err(|_| Error::MissingLocaleKey)?;
    let locale: Locale = locale_tag.parse()?;

    let mut messages = Vec::new();
    for (key, value) in raw.iter() {
        if key.starts_with('@') {
            continue;
        }

        let translation: String = serde_json::from_str(value.get())
            .map_err(|_| Error::InvalidTranslationValue(key.clone()))?;

        let attributes = match raw.get(&format!("@{key}")) {
            Some(attrs) if attrs.get().trim_start().starts_with('{') => Some(
                serde_json::from_str::<ArbMessageAttributes>(attrs.get()).map_err(|source| {
                    Error::Attributes {
                        term: key.clone(),
                        source,
                    }
                })?,
            ),
            _ => None,
        };

        messages.push(ArbMessage {
            name: key.clone(),
            translation,
            attributes,
        });
    }

    Ok((locale, messages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_empty_document_encoding() {
        let locale: Locale = "en".parse().unwrap();
        let document = ArbDocument::new(&locale);

        let mut buffer = Vec::new();
        document.to_writer(&mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "{\n    \"@@locale\": \"en\"\n}\n"
        );
    }

    #[test]
    fn test_document_encoding_order_and_indent() {
        let locale: Locale = "pl".parse().unwrap();
        let mut document = ArbDocument::new(&locale);
        document.insert_translation("greeting", "Cześć {name}".to_string());

        let mut placeholders = OrderedMap::new();
        placeholders.insert(
            "name",
            ArbPlaceholder {
                r#type: "String".to_string(),
                format: String::new(),
            },
        );
        document.insert_attributes(
            "greeting",
            ArbMessageAttributes {
                description: String::new(),
                placeholders: Some(placeholders),
            },
        );

        let mut buffer = Vec::new();
        document.to_writer(&mut buffer).unwrap();
        let expected = indoc! {r#"
            {
                "@@locale": "pl",
                "greeting": "Cześć {name}",
                "@greeting": {
                    "placeholders": {
                        "name": {
                            "type": "String"
                        }
                    }
                }
            }
        "#};
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn test_html_unsafe_characters_pass_through() {
        let locale: Locale = "en".parse().unwrap();
        let mut document = ArbDocument::new(&locale);
        document.insert_translation("html", "<b>a & b</b>".to_string());

        let mut buffer = Vec::new();
        document.to_writer(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("<b>a & b</b>"));
    }

    #[test]
    fn test_parse_arb_preserves_document_order() {
        let input = indoc! {r#"
            {
                "@@locale": "en",
                "zebra": "Zebra",
                "apple": "Apple"
            }
        "#};

        let (locale, messages) = parse_arb(input).unwrap();
        assert_eq!(locale.to_string(), "en");
        let names: Vec<&str> = messages.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["zebra", "apple"]);
    }

    #[test]
    fn test_parse_arb_decodes_attributes() {
        let input = indoc! {r#"
            {
                "@@locale": "en",
                "greeting": "Hello {name} on {date}",
                "@greeting": {
                    "description": "Greets the user",
                    "placeholders": {
                        "name": {"type": "String"},
                        "date": {"type": "DateTime", "format": "yMd"}
                    }
                }
            }
        "#};

        let (_, messages) = parse_arb(input).unwrap();
        let attributes = messages[0].attributes.as_ref().unwrap();
        assert_eq!(attributes.description, "Greets the user");

        let placeholders = attributes.placeholders.as_ref().unwrap();
        let names: Vec<&String> = placeholders.keys().collect();
        assert_eq!(names, ["name", "date"]);
        assert_eq!(placeholders.get("date").unwrap().format, "yMd");
    }

    #[test]
    fn test_parse_arb_missing_locale_key() {
        assert!(matches!(
            parse_arb(r#"{"hello": "Hello"}"#),
            Err(Error::MissingLocaleKey)
        ));
    }

    #[test]
    fn test_parse_arb_non_string_locale_is_missing() {
        assert!(matches!(
            parse_arb(r#"{"@@locale": 42}"#),
            Err(Error::MissingLocaleKey)
        ));
    }

    #[test]
    fn test_parse_arb_rejects_non_string_translation() {
        let input = r#"{"@@locale": "en", "count": 3}"#;
        assert!(matches!(
            parse_arb(input),
            Err(Error::InvalidTranslationValue(key)) if key == "count"
        ));
    }

    #[test]
    fn test_parse_arb_ignores_non_object_attribute_sibling() {
        let input = r#"{"@@locale": "en", "hello": "Hello", "@hello": "not metadata"}"#;
        let (_, messages) = parse_arb(input).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].attributes.is_none());
    }

    #[test]
    fn test_attributes_is_empty() {
        assert!(ArbMessageAttributes::default().is_empty());

        let with_empty_placeholders = ArbMessageAttributes {
            description: String::new(),
            placeholders: Some(OrderedMap::new()),
        };
        assert!(with_empty_placeholders.is_empty());

        let with_description = ArbMessageAttributes {
            description: "foo".to_string(),
            placeholders: None,
        };
        assert!(!with_description.is_empty());

        let mut placeholders = OrderedMap::new();
        placeholders.insert("foo", ArbPlaceholder::default());
        let with_placeholders = ArbMessageAttributes {
            description: String::new(),
            placeholders: Some(placeholders),
        };
        assert!(!with_placeholders.is_empty());
    }
}
