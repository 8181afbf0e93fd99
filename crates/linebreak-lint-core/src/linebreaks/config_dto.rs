//! TOML deserialization types for the `statements` option.
//!
//! Shape only: names are checked by the loader.

use serde::Deserialize;

/// Option key holding the rule list.
pub const STATEMENTS_KEY: &str = "statements";

/// One element of a `[requirement, prev, next]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SpecDto {
    /// A single name, e.g. `"const"` or `"*"`.
    Name(String),
    /// A list of names, e.g. `["const", "let", "var"]`.
    Names(Vec<String>),
}

/// Raw `statements` option: a list of `[requirement, prev, next]` entries.
pub type StatementsDto = Vec<Vec<SpecDto>>;
