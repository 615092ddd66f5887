//! Bidirectional conversion between POEditor's JSON export format and
//! Flutter's ARB resource bundles.
//!
//! The interesting work happens per message: ICU plural syntax and
//! `{name,Type,format}` placeholder annotations are parsed out of (or
//! reinserted into) translation strings, with a typed placeholder table
//! accumulated along the way. Everything is an in-memory transformation;
//! callers hand in a string and a writer.
//!
//! # Examples
//!
//! ```
//! use arbcodec::convert::poe_to_arb::{Converter, ConverterOptions};
//!
//! let input = r#"[{"term": "hello", "definition": "Hello, {name}!"}]"#;
//! let options = ConverterOptions {
//!     locale: "en".parse()?,
//!     template: true,
//!     require_resource_attributes: false,
//!     term_prefix: String::new(),
//! };
//!
//! let mut output = Vec::new();
//! Converter::new(options).convert(input, &mut output)?;
//! assert!(String::from_utf8(output)?.contains("\"hello\": \"Hello, {name}!\""));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub mod convert;
pub mod error;
pub mod formats;
pub mod locale;
pub mod natural;
pub mod ordered_map;
pub mod placeholder;

pub use error::Error;
pub use locale::{Locale, Script};
