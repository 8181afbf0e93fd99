//! Counting line breaks between adjacent statements.

use crate::rule::RuleError;
use crate::source::{NodeId, SourceFile};

use super::classify::node;

/// Counts are capped here: only 0, 1 and "at least one blank line" matter.
pub const MAX_LINEBREAKS: u8 = 2;

/// Index of the token that really ends the statement `id`.
///
/// A trailing `;` written at the start of the following line (semicolon-less
/// style, e.g. `foo()\n;[1, 2].forEach(bar)`) is skipped in favour of the
/// token before it.
///
/// # Errors
///
/// Returns an error if the statement has no tokens.
pub fn actual_last_token(source: &SourceFile, id: NodeId) -> Result<usize, RuleError> {
    let node = node(source, id)?;
    let tokens = source.tokens();
    let last = tokens
        .last_in(&node.span, |_| true)
        .ok_or_else(|| missing_token(id, node.span.start_pos))?;

    let semi = &tokens[last];
    if !semi.is_semicolon() {
        return Ok(last);
    }

    let (Some(prev), Some(next)) = (tokens.before(last, false), tokens.after(last, false)) else {
        return Ok(last);
    };
    let (prev_token, next_token) = (&tokens[prev], &tokens[next]);
    let semicolon_less = prev_token.span.start >= node.span.start
        && semi.span.start_pos.line != prev_token.span.end_pos.line
        && semi.span.end_pos.line == next_token.span.start_pos.line;

    Ok(if semicolon_less { prev } else { last })
}

/// Index of the first token of the statement `id`.
///
/// # Errors
///
/// Returns an error if the statement has no tokens.
pub fn first_token(source: &SourceFile, id: NodeId) -> Result<usize, RuleError> {
    let node = node(source, id)?;
    source
        .tokens()
        .first_in(&node.span)
        .ok_or_else(|| missing_token(id, node.span.start_pos))
}

/// Counts line breaks between `prev` and `next`, capped at [`MAX_LINEBREAKS`].
///
/// A line only counts as blank when no comment sits on it: for
/// `foo();\n// note\nbar();` the result is 1, not 2.
///
/// # Errors
///
/// Returns an error if either statement has no tokens.
pub fn count_linebreaks(source: &SourceFile, prev: NodeId, next: NodeId) -> Result<u8, RuleError> {
    let tokens = source.tokens();
    let last = actual_last_token(source, prev)?;
    let first = first_token(source, next)?;

    let end_line = tokens[last].span.end_pos.line;
    let start_line = tokens[first].span.start_pos.line;
    if start_line <= end_line {
        return Ok(0);
    }
    if start_line - end_line == 1 {
        return Ok(1);
    }

    let target = tokens[first].span.start;
    let mut current = last;
    while let Some(following) = tokens.after(current, true) {
        let gap = tokens[following]
            .span
            .start_pos
            .line
            .saturating_sub(tokens[current].span.end_pos.line);
        if gap >= 2 {
            return Ok(MAX_LINEBREAKS);
        }
        if tokens[following].span.start >= target {
            break;
        }
        current = following;
    }
    Ok(1)
}

fn missing_token(node: NodeId, at: crate::source::Position) -> RuleError {
    RuleError::MissingToken {
        node,
        line: at.line,
        column: at.column,
    }
}
