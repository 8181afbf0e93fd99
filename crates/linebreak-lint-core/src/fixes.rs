//! Applying replacements to source text.

use tracing::warn;

use crate::types::Replacement;

/// Result of [`apply_replacements`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The rewritten text.
    pub text: String,
    /// Number of replacements applied.
    pub applied: usize,
    /// Number of replacements skipped because they overlapped an applied
    /// one or did not fit the text.
    pub skipped: usize,
}

impl FixOutcome {
    /// Whether the text changed.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.applied > 0
    }
}

/// Applies non-overlapping replacements to `text` in a single pass.
///
/// Replacements are taken in start order. One that overlaps an already
/// accepted replacement, or whose range is out of bounds or not on a char
/// boundary, is skipped. Two insertions at the same offset count as
/// overlapping.
#[must_use]
pub fn apply_replacements(text: &str, replacements: &[Replacement]) -> FixOutcome {
    let mut ordered: Vec<&Replacement> = replacements.iter().collect();
    ordered.sort_by_key(|r| (r.start, r.end));

    let mut accepted: Vec<&Replacement> = Vec::with_capacity(ordered.len());
    let mut skipped = 0;
    for replacement in ordered {
        let fits = replacement.start <= replacement.end
            && replacement.end <= text.len()
            && text.is_char_boundary(replacement.start)
            && text.is_char_boundary(replacement.end);
        if !fits {
            warn!(
                start = replacement.start,
                end = replacement.end,
                "skipping replacement outside of the source text"
            );
            skipped += 1;
            continue;
        }

        let overlaps = accepted.last().is_some_and(|prev| {
            replacement.start < prev.end || replacement.start == prev.start
        });
        if overlaps {
            warn!(
                start = replacement.start,
                end = replacement.end,
                "skipping overlapping replacement"
            );
            skipped += 1;
            continue;
        }
        accepted.push(replacement);
    }

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for replacement in &accepted {
        output.push_str(&text[cursor..replacement.start]);
        output.push_str(&replacement.new_text);
        cursor = replacement.end;
    }
    output.push_str(&text[cursor..]);

    FixOutcome {
        text: output,
        applied: accepted.len(),
        skipped,
    }
}
