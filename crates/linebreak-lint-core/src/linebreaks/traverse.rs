//! Document-order walk over statement lists.

use tracing::{debug, trace};

use crate::rule::RuleError;
use crate::source::{NodeId, SourceFile};
use crate::types::Replacement;

use super::classify::node;
use super::count::count_linebreaks;
use super::fix::propose;
use super::policy::{Policy, Requirement};

/// A statement whose layout relative to its predecessor violates the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The statement before `node` in the same list.
    pub previous: NodeId,
    /// The offending statement.
    pub node: NodeId,
    /// The requirement that failed.
    pub requirement: Requirement,
    /// Edit making the pair compliant, if one is safe.
    pub fix: Option<Replacement>,
}

impl Report {
    /// Message describing the violation.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.requirement.message()
    }
}

#[derive(Debug, Default)]
struct ScopeFrame {
    previous: Option<NodeId>,
}

struct Walker<'a> {
    policy: &'a Policy,
    source: &'a SourceFile,
    frames: Vec<ScopeFrame>,
    reports: Vec<Report>,
}

/// Checks every adjacent statement pair of `source` against `policy`.
///
/// Reports come out in document order.
///
/// # Errors
///
/// Returns an error if the syntax tree or token stream is malformed. Such
/// errors abort the whole walk.
pub fn check(policy: &Policy, source: &SourceFile) -> Result<Vec<Report>, RuleError> {
    if policy.is_empty() {
        return Ok(Vec::new());
    }

    let mut walker = Walker {
        policy,
        source,
        frames: Vec::new(),
        reports: Vec::new(),
    };
    walker.walk(source.tree().root())?;
    debug_assert!(walker.frames.is_empty());
    Ok(walker.reports)
}

impl Walker<'_> {
    fn walk(&mut self, id: NodeId) -> Result<(), RuleError> {
        let current = node(self.source, id)?;

        // A statement is checked against its siblings before its own body is entered.
        if current.kind.is_verifiable() {
            self.visit(id)?;
        }

        let opens_scope = current.kind.is_statement_list();
        if opens_scope {
            trace!(node = %id, depth = self.frames.len(), "enter scope");
            self.frames.push(ScopeFrame::default());
        }
        for &child in &current.children {
            self.walk(child)?;
        }
        if opens_scope {
            self.frames.pop();
        }
        Ok(())
    }

    fn visit(&mut self, id: NodeId) -> Result<(), RuleError> {
        let Some(parent) = node(self.source, id)?.parent else {
            return Ok(());
        };
        if !node(self.source, parent)?.kind.is_statement_list() {
            return Ok(());
        }

        let frame = self.frames.last_mut().ok_or(RuleError::NoScope(id))?;
        let Some(previous) = frame.previous.replace(id) else {
            return Ok(());
        };

        let requirement = self.policy.resolve(self.source, previous, id)?;
        let linebreaks = count_linebreaks(self.source, previous, id)?;
        if requirement.is_satisfied_by(linebreaks) {
            return Ok(());
        }

        let fix = propose(requirement, self.source, previous, id)?;
        debug!(
            node = %id,
            %requirement,
            linebreaks,
            fixable = fix.is_some(),
            "statement layout violates policy"
        );
        self.reports.push(Report {
            previous,
            node: id,
            requirement,
            fix,
        });
        Ok(())
    }
}
