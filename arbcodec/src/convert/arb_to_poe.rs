//! Conversion from Flutter's ARB to POEditor's JSON import format.

use std::io::Write;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;
use crate::formats::arb::{parse_arb, ArbMessage};
use crate::formats::poeditor::{PluralDefinition, PoeTerm, TermDefinition};
use crate::locale::Locale;
use crate::natural::natural_cmp;

lazy_static! {
    static ref PLURAL_RE: Regex = Regex::new(r"^\{count,\s*plural,\s*(.+)\}$").unwrap();
    static ref PLURAL_CATEGORY_RE: Regex =
        Regex::new(r"^\s*(=0|=1|=2|zero|one|two|few|many|other)\s*\{").unwrap();
}

/// Converts one ARB file into a POEditor term list.
pub struct Converter {
    template_locale: Locale,
    term_prefix: String,
}

impl Converter {
    pub fn new(template_locale: Locale, term_prefix: impl Into<String>) -> Self {
        Converter {
            template_locale,
            term_prefix: term_prefix.into(),
        }
    }

    /// Runs the conversion and returns the locale the ARB file declared.
    ///
    /// Placeholder definitions are only reinserted when the file's locale is
    /// the template locale; other locales carry translated text only. A file
    /// with no messages yields [`Error::NoTerms`], which callers should
    /// treat as "skip this file", not as a failure.
    pub fn convert<W: Write>(&self, input: &str, mut output: W) -> Result<Locale, Error> {
        let (locale, mut messages) = parse_arb(input)?;

        let template = self.template_locale == locale;

        messages.sort_by(|a, b| natural_cmp(&a.name, &b.name));

        let mut terms = Vec::with_capacity(messages.len());
        for message in &messages {
            let term = message_to_term(message, !template, &self.term_prefix)
                .map_err(|error| Error::for_term(&message.name, error))?;
            terms.push(term);
        }

        if terms.is_empty() {
            return Err(Error::NoTerms);
        }

        serde_json::to_writer(&mut output, &terms)?;
        output.write_all(b"\n")?;

        Ok(locale)
    }
}

/// Builds one POEditor term from an ARB message.
///
/// With `skip_placeholder_definitions` unset, each placeholder's type and
/// format are reinserted into the first occurrence of its `{name}` in the
/// text. Only the first: defining the same parameter twice is illegal.
fn message_to_term(
    message: &ArbMessage,
    skip_placeholder_definitions: bool,
    term_prefix: &str,
) -> Result<PoeTerm, Error> {
    let mut translation = message.translation.clone();

    if !skip_placeholder_definitions {
        let placeholders = message
            .attributes
            .as_ref()
            .and_then(|attributes| attributes.placeholders.as_ref());

        if let Some(placeholders) = placeholders {
            for (name, placeholder) in placeholders.iter() {
                let mut annotation = String::new();
                if !placeholder.r#type.is_empty() {
                    annotation.push(',');
                    annotation.push_str(&placeholder.r#type);
                }
                if !placeholder.format.is_empty() {
                    annotation.push(',');
                    annotation.push_str(&placeholder.format);
                }
                if annotation.is_empty() {
                    continue;
                }

                if let Some(found) = translation.find(&format!("{{{name}}}")) {
                    translation.insert_str(found + 1 + name.len(), &annotation);
                }
            }
        }
    }

    let definition = match PLURAL_RE.captures(&translation) {
        Some(caps) => {
            let body = caps.get(1).map_or("", |m| m.as_str());
            TermDefinition::Plural(parse_plural_body(body)?)
        }
        None => TermDefinition::Singular(translation.clone()),
    };

    let term_plural = if definition.is_plural() { "." } else { "" };

    let term = if term_prefix.is_empty() {
        message.name.clone()
    } else {
        format!("{term_prefix}:{}", message.name)
    };

    Ok(PoeTerm {
        term,
        term_plural: term_plural.to_string(),
        definition,
    })
}

/// Parses the inside of an ICU `{count, plural, ...}` wrapper into plural
/// categories. `=0`/`=1`/`=2` are folded into `zero`/`one`/`two`.
fn parse_plural_body(body: &str) -> Result<PluralDefinition, Error> {
    let mut definition = PluralDefinition::default();
    let mut has_other = false;
    let mut rest = body;

    loop {
        let Some(caps) = PLURAL_CATEGORY_RE.captures(rest) else {
            break;
        };
        let header_len = caps[0].len();
        let category = match caps.get(1).map_or("", |m| m.as_str()) {
            "=0" | "zero" => "zero",
            "=1" | "one" => "one",
            "=2" | "two" => "two",
            "few" => "few",
            "many" => "many",
            _ => "other",
        };

        rest = &rest[header_len..];
        let end = category_body_end(rest, category)?;
        let text = rest[..end].to_string();
        rest = &rest[end + 1..];

        let slot = match category {
            "zero" => &mut definition.zero,
            "one" => &mut definition.one,
            "two" => &mut definition.two,
            "few" => &mut definition.few,
            "many" => &mut definition.many,
            _ => {
                if has_other {
                    return Err(Error::DuplicateCategory("other"));
                }
                has_other = true;
                definition.other = text;
                continue;
            }
        };

        if slot.is_some() {
            return Err(Error::DuplicateCategory(category));
        }
        *slot = Some(text);
    }

    Ok(definition)
}

/// Finds the closing brace of a category body opened just before `text`,
/// counting brace depth and skipping backslash-escaped characters. Bodies
/// may contain nested placeholder braces and literal `\{`/`\}`.
fn category_body_end(text: &str, category: &'static str) -> Result<usize, Error> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    Err(Error::UnbalancedBraces(category))
}
