//! Statement classification.
//!
//! Every configurable statement type is a variant of [`StatementType`]; names
//! are resolved once when the configuration is loaded.

use std::fmt;
use std::str::FromStr;

use crate::rule::RuleError;
use crate::source::{Node, NodeId, NodeKind, SourceFile, StatementKind};

/// Statements identified by their first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `break`
    Break,
    /// `case`
    Case,
    /// `class`
    Class,
    /// `const`
    Const,
    /// `continue`
    Continue,
    /// `debugger`
    Debugger,
    /// `default`
    Default,
    /// `do`
    Do,
    /// `export`
    Export,
    /// `for`
    For,
    /// `function`
    Function,
    /// `if`
    If,
    /// `import`
    Import,
    /// `let`
    Let,
    /// `return`
    Return,
    /// `switch`
    Switch,
    /// `throw`
    Throw,
    /// `try`
    Try,
    /// `var`
    Var,
    /// `while`
    While,
    /// `with`
    With,
}

impl Keyword {
    /// All keywords, in alphabetical order.
    pub const ALL: [Self; 21] = [
        Self::Break,
        Self::Case,
        Self::Class,
        Self::Const,
        Self::Continue,
        Self::Debugger,
        Self::Default,
        Self::Do,
        Self::Export,
        Self::For,
        Self::Function,
        Self::If,
        Self::Import,
        Self::Let,
        Self::Return,
        Self::Switch,
        Self::Throw,
        Self::Try,
        Self::Var,
        Self::While,
        Self::With,
    ];

    /// Source spelling of the keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Break => "break",
            Self::Case => "case",
            Self::Class => "class",
            Self::Const => "const",
            Self::Continue => "continue",
            Self::Debugger => "debugger",
            Self::Default => "default",
            Self::Do => "do",
            Self::Export => "export",
            Self::For => "for",
            Self::Function => "function",
            Self::If => "if",
            Self::Import => "import",
            Self::Let => "let",
            Self::Return => "return",
            Self::Switch => "switch",
            Self::Throw => "throw",
            Self::Try => "try",
            Self::Var => "var",
            Self::While => "while",
            Self::With => "with",
        }
    }
}

/// A named statement category usable in rule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementType {
    /// `*`: every statement.
    Any,
    /// `block`: a bare block statement.
    Block,
    /// `block-like`: ends with the closing brace of a block, switch or class body.
    BlockLike,
    /// `multiline-block-like`: block-like and spanning several lines.
    MultilineBlockLike,
    /// `directive`: a string literal expression statement, such as `"use strict";`.
    Directive,
    /// `empty`: an empty statement.
    Empty,
    /// `expression`: any expression statement.
    Expression,
    /// A statement whose first token is the keyword.
    Keyword(Keyword),
}

impl StatementType {
    /// Every statement type, in the order `list-types` shows them.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut all = vec![
            Self::Any,
            Self::Block,
            Self::BlockLike,
            Self::MultilineBlockLike,
            Self::Directive,
            Self::Empty,
            Self::Expression,
        ];
        all.extend(Keyword::ALL.into_iter().map(Self::Keyword));
        all
    }

    /// Configuration name of this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "*",
            Self::Block => "block",
            Self::BlockLike => "block-like",
            Self::MultilineBlockLike => "multiline-block-like",
            Self::Directive => "directive",
            Self::Empty => "empty",
            Self::Expression => "expression",
            Self::Keyword(keyword) => keyword.as_str(),
        }
    }

    /// Short description for listings.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Any => "every statement",
            Self::Block => "bare block statements",
            Self::BlockLike => "statements ending with a block, switch or class body",
            Self::MultilineBlockLike => "block-like statements spanning several lines",
            Self::Directive => "string literal statements such as \"use strict\"",
            Self::Empty => "empty statements",
            Self::Expression => "expression statements",
            Self::Keyword(_) => "statements starting with this keyword",
        }
    }

    /// Tests whether the statement `id` belongs to this category.
    ///
    /// Labels are not looked through here; see [`unwrap_labels`].
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not part of the tree.
    pub fn matches(self, source: &SourceFile, id: NodeId) -> Result<bool, RuleError> {
        let node = node(source, id)?;
        Ok(match self {
            Self::Any => true,
            Self::Block => node.kind == NodeKind::Statement(StatementKind::Block),
            Self::BlockLike => is_block_like(source, node),
            Self::MultilineBlockLike => {
                is_block_like(source, node) && node.span.start_pos.line != end_line(source, node)
            }
            Self::Directive => {
                node.kind
                    == NodeKind::Statement(StatementKind::Expression {
                        string_literal: true,
                    })
            }
            Self::Empty => node.kind == NodeKind::Statement(StatementKind::Empty),
            Self::Expression => matches!(
                node.kind,
                NodeKind::Statement(StatementKind::Expression { .. })
            ),
            Self::Keyword(keyword) => source
                .tokens()
                .first_in(&node.span)
                .is_some_and(|i| source.tokens()[i].text == keyword.as_str()),
        })
    }
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unknown statement type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown statement type `{0}`")]
pub struct UnknownStatementType(pub String);

impl FromStr for StatementType {
    type Err = UnknownStatementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownStatementType(s.to_string()))
    }
}

/// Follows labeled statements down to the statement they label.
///
/// # Errors
///
/// Returns an error if a node is missing or a label has no body.
pub fn unwrap_labels(source: &SourceFile, mut id: NodeId) -> Result<NodeId, RuleError> {
    loop {
        let node = node(source, id)?;
        if node.kind != NodeKind::Statement(StatementKind::Labeled) {
            return Ok(id);
        }
        id = node
            .children
            .iter()
            .copied()
            .find(|&child| {
                source
                    .tree()
                    .node(child)
                    .is_some_and(|n| matches!(n.kind, NodeKind::Statement(_)))
            })
            .ok_or(RuleError::MissingLabelBody(id))?;
    }
}

pub(crate) fn node(source: &SourceFile, id: NodeId) -> Result<&Node, RuleError> {
    source.tree().node(id).ok_or(RuleError::DanglingNode(id))
}

fn is_block_like(source: &SourceFile, node: &Node) -> bool {
    let tokens = source.tokens();
    tokens
        .last_in(&node.span, |t| !t.is_semicolon())
        .is_some_and(|i| tokens[i].text == "}" && tokens[i].closes.is_some())
}

fn end_line(source: &SourceFile, node: &Node) -> usize {
    let tokens = source.tokens();
    tokens
        .last_in(&node.span, |_| true)
        .map_or(node.span.end_pos.line, |i| tokens[i].span.end_pos.line)
}
