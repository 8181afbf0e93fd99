//! Text edits that bring a statement pair into compliance.

use crate::rule::RuleError;
use crate::source::{NodeId, NodeKind, SourceFile, StatementKind};
use crate::types::Replacement;

use super::classify::{node, unwrap_labels};
use super::count::{actual_last_token, first_token};
use super::policy::Requirement;

/// Proposes an edit for `requirement` between `prev` and `current`.
///
/// `Ok(None)` means the violation cannot be fixed safely and is reported
/// as is.
///
/// # Errors
///
/// Returns an error if either statement has no tokens.
pub fn propose(
    requirement: Requirement,
    source: &SourceFile,
    prev: NodeId,
    current: NodeId,
) -> Result<Option<Replacement>, RuleError> {
    match requirement {
        Requirement::Any => Ok(None),
        Requirement::Never => join(source, prev, current),
        Requirement::Always => {
            let last = actual_last_token(source, prev)?;
            Ok(Some(Replacement::insert(
                source.tokens()[last].span.end,
                line_break(source.text()),
            )))
        }
        Requirement::BlankLine => {
            let tokens = source.tokens();
            let last = actual_last_token(source, prev)?;
            let end = &tokens[last].span;
            let same_line = tokens
                .after(last, true)
                .map_or(true, |next| tokens[next].span.start_pos.line == end.end_pos.line);
            let eol = line_break(source.text());
            let text = if same_line { eol.repeat(2) } else { eol.to_string() };
            Ok(Some(Replacement::insert(end.end, text)))
        }
    }
}

/// Line terminator of the file, taken from its first line break.
fn line_break(text: &str) -> &'static str {
    match text.find('\n') {
        Some(i) if text[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

fn join(source: &SourceFile, prev: NodeId, current: NodeId) -> Result<Option<Replacement>, RuleError> {
    let tokens = source.tokens();
    let last = actual_last_token(source, prev)?;
    let first = first_token(source, current)?;

    if tokens.between(last, first, true).any(|t| t.is_comment()) {
        return Ok(None);
    }
    if !ends_explicitly(source, prev, last)? {
        return Ok(None);
    }

    Ok(Some(Replacement::remove(
        tokens[last].span.end,
        tokens[first].span.start,
    )))
}

// Joining is only safe after a `;` or after the body brace of a statement
// that cannot continue on the next token.
fn ends_explicitly(source: &SourceFile, prev: NodeId, last: usize) -> Result<bool, RuleError> {
    let token = &source.tokens()[last];
    if token.is_semicolon() {
        return Ok(true);
    }
    if token.text != "}" || token.closes.is_none() {
        return Ok(false);
    }

    let inner = unwrap_labels(source, prev)?;
    Ok(matches!(
        node(source, inner)?.kind,
        NodeKind::Statement(
            StatementKind::Block
                | StatementKind::If
                | StatementKind::For
                | StatementKind::ForIn
                | StatementKind::While
                | StatementKind::Switch
                | StatementKind::Try
                | StatementKind::With
                | StatementKind::FunctionDeclaration
                | StatementKind::ClassDeclaration
        )
    ))
}
