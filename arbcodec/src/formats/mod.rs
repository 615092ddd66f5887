//! Serialization formats: POEditor JSON exports and Flutter ARB bundles.

pub mod arb;
pub mod poeditor;
