//! # linebreak-lint-js
//!
//! Tree-sitter powered JavaScript support for linebreak-lint.
//!
//! [`JavaScriptParser`] implements [`SourceParser`](linebreak_lint_core::SourceParser):
//! it produces the flat token stream (comments included, with the owner of
//! every body-closing brace) and the statement tree the engine walks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod parser;

pub use parser::JavaScriptParser;
