//! Linebreak requirements and rule resolution.

use std::fmt;
use std::str::FromStr;

use crate::rule::RuleError;
use crate::source::{NodeId, SourceFile};

use super::classify::{unwrap_labels, StatementType};
use super::count::MAX_LINEBREAKS;

/// What the layout between two statements must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// No constraint.
    Any,
    /// Both statements on the same line.
    Never,
    /// At least one line break.
    Always,
    /// At least one blank line.
    BlankLine,
}

impl Requirement {
    /// All requirements.
    pub const ALL: [Self; 4] = [Self::Any, Self::Never, Self::Always, Self::BlankLine];

    /// Configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Never => "never",
            Self::Always => "always",
            Self::BlankLine => "blankline",
        }
    }

    /// Message reported when the requirement is not met.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Any => "Any linebreaks are allowed before this statement.",
            Self::Never => "Unexpected linebreaks before this statement.",
            Self::Always => "Expected one or more linebreaks before this statement.",
            Self::BlankLine => "Expected one or more blank lines before this statement.",
        }
    }

    /// Help text attached to the violation.
    #[must_use]
    pub const fn help(self) -> &'static str {
        match self {
            Self::Any => "no change needed",
            Self::Never => "join this statement with the previous one",
            Self::Always => "insert a linebreak before this statement",
            Self::BlankLine => "insert a blank line before this statement",
        }
    }

    /// Tests a line break count produced by
    /// [`count_linebreaks`](super::count::count_linebreaks).
    #[must_use]
    pub const fn is_satisfied_by(self, linebreaks: u8) -> bool {
        match self {
            Self::Any => true,
            Self::Never => linebreaks == 0,
            Self::Always => linebreaks >= 1,
            Self::BlankLine => linebreaks >= MAX_LINEBREAKS,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unknown requirement name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown requirement `{0}`, expected: any, never, always, blankline")]
pub struct UnknownRequirement(pub String);

impl FromStr for Requirement {
    type Err = UnknownRequirement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| UnknownRequirement(s.to_string()))
    }
}

/// Statement side of a rule: one type or any of several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// A single statement type.
    Single(StatementType),
    /// Matches when any listed type matches.
    AnyOf(Vec<StatementType>),
}

impl TypeSpec {
    /// Tests the statement `id`, looking through labels first.
    ///
    /// # Errors
    ///
    /// Returns an error if the node or a label body is missing.
    pub fn matches(&self, source: &SourceFile, id: NodeId) -> Result<bool, RuleError> {
        let inner = unwrap_labels(source, id)?;
        match self {
            Self::Single(ty) => ty.matches(source, inner),
            Self::AnyOf(types) => {
                for ty in types {
                    if ty.matches(source, inner)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

impl From<StatementType> for TypeSpec {
    fn from(ty: StatementType) -> Self {
        Self::Single(ty)
    }
}

/// One configured rule: `requirement` applies between `prev` and `next`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRule {
    /// Required layout.
    pub requirement: Requirement,
    /// Matcher for the earlier statement.
    pub prev: TypeSpec,
    /// Matcher for the later statement.
    pub next: TypeSpec,
}

impl PolicyRule {
    /// Creates a rule.
    #[must_use]
    pub fn new(requirement: Requirement, prev: impl Into<TypeSpec>, next: impl Into<TypeSpec>) -> Self {
        Self {
            requirement,
            prev: prev.into(),
            next: next.into(),
        }
    }
}

/// Ordered rule list. Later rules take precedence over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    rules: Vec<PolicyRule>,
}

impl Policy {
    /// Creates a policy from rules in declaration order.
    #[must_use]
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// Rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    /// Whether the policy has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the requirement of the last declared rule matching the pair,
    /// or [`Requirement::Any`] when none does.
    ///
    /// # Errors
    ///
    /// Returns an error if a node or a label body is missing.
    pub fn resolve(
        &self,
        source: &SourceFile,
        prev: NodeId,
        next: NodeId,
    ) -> Result<Requirement, RuleError> {
        for rule in self.rules.iter().rev() {
            if rule.prev.matches(source, prev)? && rule.next.matches(source, next)? {
                return Ok(rule.requirement);
            }
        }
        Ok(Requirement::Any)
    }
}
