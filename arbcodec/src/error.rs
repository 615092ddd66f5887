//! All error types for the arbcodec crate.
//!
//! These are returned from all fallible operations (parsing, serialization, conversion).

use thiserror::Error;

use crate::placeholder::TranslationErrors;

#[derive(Error, Debug)]
pub enum Error {
    #[error("decoding json failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid locale: {0}")]
    InvalidLocale(String),

    #[error("invalid script: {0}")]
    InvalidScript(String),

    #[error("missing locale key")]
    MissingLocaleKey,

    #[error("invalid translation value for {0}")]
    InvalidTranslationValue(String),

    #[error("failed to decode attributes for {term}: {source}")]
    Attributes {
        term: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "term name must start with lowercase letter followed by any number of anycase letter, digit or underscore"
    )]
    InvalidName,

    #[error("{0}")]
    Translation(#[from] TranslationErrors),

    #[error(r#"missing "other" plural category"#)]
    MissingOtherCategory,

    #[error("multiple definitions for plural category {0}")]
    DuplicateCategory(&'static str),

    #[error("unbalanced braces in plural category {0}")]
    UnbalancedBraces(&'static str),

    #[error("decoding term \"{term}\" failed: {source}")]
    Term {
        term: String,
        #[source]
        source: Box<Error>,
    },

    /// Combined report of all per-term failures from an aggregate conversion.
    /// The successfully converted terms have already been written.
    #[error("{}", format_aggregate(.0))]
    Aggregate(Vec<Error>),

    /// Not a failure: the input contained nothing to convert. Callers are
    /// expected to special-case this and skip the file.
    #[error("no terms to convert")]
    NoTerms,
}

impl Error {
    /// Wraps an error with the name of the term it occurred in.
    pub(crate) fn for_term(term: impl Into<String>, source: Error) -> Self {
        Error::Term {
            term: term.into(),
            source: Box::new(source),
        }
    }
}

fn format_aggregate(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_error_display() {
        let error = Error::for_term("appTitle", Error::InvalidName);
        assert_eq!(
            error.to_string(),
            "decoding term \"appTitle\" failed: term name must start with lowercase letter \
             followed by any number of anycase letter, digit or underscore"
        );
    }

    #[test]
    fn test_aggregate_joins_with_newlines() {
        let error = Error::Aggregate(vec![
            Error::for_term("a", Error::MissingOtherCategory),
            Error::for_term("b", Error::InvalidName),
        ]);
        let display = error.to_string();
        let lines: Vec<&str> = display.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("decoding term \"a\" failed:"));
        assert!(lines[1].starts_with("decoding term \"b\" failed:"));
    }

    #[test]
    fn test_missing_other_category_display() {
        assert_eq!(
            Error::MissingOtherCategory.to_string(),
            r#"missing "other" plural category"#
        );
    }

    #[test]
    fn test_no_terms_display() {
        assert_eq!(Error::NoTerms.to_string(), "no terms to convert");
    }
}
