//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::source::{NodeId, SourceFile};
use crate::types::{Severity, Violation};

/// Structural defects found in a source model while a rule runs.
///
/// These point at a broken parser adapter, not at the linted code, and abort
/// the analysis.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A node id does not belong to the syntax tree.
    #[error("node {0} is not part of the syntax tree")]
    DanglingNode(NodeId),

    /// A statement span contains no tokens.
    #[error("statement {node} at {line}:{column} has no tokens")]
    MissingToken {
        /// The offending node.
        node: NodeId,
        /// Line number (1-indexed).
        line: usize,
        /// Column number (0-indexed).
        column: usize,
    },

    /// A labeled statement without a statement body.
    #[error("labeled statement {0} has no body")]
    MissingLabelBody(NodeId),

    /// A statement was visited while no scope was open.
    #[error("statement {0} visited outside of any statement list")]
    NoScope(NodeId),
}

/// A per-file lint rule over the parsed source model.
///
/// # Example
///
/// ```ignore
/// use linebreak_lint_core::{FileContext, Rule, RuleError, SourceFile, Violation};
///
/// pub struct NoEmptyFile;
///
/// impl Rule for NoEmptyFile {
///     fn name(&self) -> &'static str { "no-empty-file" }
///     fn code(&self) -> &'static str { "LB100" }
///
///     fn check(&self, ctx: &FileContext, source: &SourceFile) -> Result<Vec<Violation>, RuleError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "linebreak-between-statements").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "LB001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Errors
    ///
    /// Returns an error if the source model is structurally broken.
    fn check(&self, ctx: &FileContext, source: &SourceFile) -> Result<Vec<Violation>, RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
