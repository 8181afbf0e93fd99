//! # linebreak-lint-core
//!
//! Statement-adjacency linebreak policy engine.
//!
//! Given a parsed source file, the engine checks the layout between every
//! pair of adjacent statements against an ordered list of user rules and
//! proposes a minimal text edit for each violation. It includes:
//!
//! - [`source`]: the language-neutral source model and the [`SourceParser`] trait
//! - [`linebreaks`]: classification, line break counting, policy resolution,
//!   fixes and traversal, plus the [`LinebreakRule`]
//! - [`Analyzer`] for discovering files and running rules
//! - [`apply_replacements`] for writing fixes back
//!
//! ## Example
//!
//! ```ignore
//! use linebreak_lint_core::{linebreaks, Analyzer, Config};
//!
//! let config = Config::from_file("linebreak-lint.toml".as_ref())?;
//! let mut builder = Analyzer::builder()
//!     .root("./src")
//!     .parser(MyParser::new())
//!     .config(config.clone());
//! for rule in linebreaks::rules_from_config(&config)? {
//!     builder = builder.rule_box(rule);
//! }
//!
//! let result = builder.build()?.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod fixes;
mod rule;
mod types;

pub mod linebreaks;
pub mod source;

#[cfg(test)]
mod testing;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use fixes::{apply_replacements, FixOutcome};
pub use linebreaks::{LinebreakRule, LoadError};
pub use rule::{Rule, RuleBox, RuleError};
pub use source::{ParseError, SourceFile, SourceParser};
pub use types::{
    LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
