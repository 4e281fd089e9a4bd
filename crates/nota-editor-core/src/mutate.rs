//! Pure splice operations for inserting and replacing math spans.
//!
//! Both operators take the buffer by reference and return a new string;
//! nothing is mutated in place. Any `MathSpan` computed against the old
//! buffer is stale after a splice — callers re-scan before reusing
//! offsets.

use crate::span::{MathKind, MathSpan};

/// Result of an insertion: the new buffer and where the caret lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathInsertion {
    pub text: String,
    /// Char offset immediately after the inserted construct.
    pub cursor: usize,
}

/// Insert a new delimiter-wrapped expression at `position` (char offset).
///
/// Inline expressions are spliced in with no surrounding whitespace;
/// display expressions get their own lines. Out-of-range positions clamp
/// to the end of the buffer rather than fault.
pub fn insert_math(buffer: &str, position: usize, latex: &str, kind: MathKind) -> MathInsertion {
    let position = position.min(buffer.chars().count());
    let inserted = wrap_math(latex, kind);
    let at = byte_offset(buffer, position);

    let mut text = String::with_capacity(buffer.len() + inserted.len());
    text.push_str(&buffer[..at]);
    text.push_str(&inserted);
    text.push_str(&buffer[at..]);

    MathInsertion {
        text,
        cursor: position + inserted.chars().count(),
    }
}

/// Replace an existing span's content, leaving everything outside
/// `span.char_range()` untouched.
///
/// Inline spans stay inline. Display spans are normalized onto the
/// three-line `$$ / latex / $$` form regardless of the original's
/// internal whitespace.
pub fn replace_math(buffer: &str, span: &MathSpan, new_latex: &str) -> String {
    let replacement = rewrap_math(new_latex, span.kind);
    let start = byte_offset(buffer, span.start);
    let end = byte_offset(buffer, span.end.max(span.start));

    let mut text = String::with_capacity(buffer.len() + replacement.len());
    text.push_str(&buffer[..start]);
    text.push_str(&replacement);
    text.push_str(&buffer[end..]);
    text
}

/// Delimiter wrapping for a brand-new insertion.
pub(crate) fn wrap_math(latex: &str, kind: MathKind) -> String {
    match kind {
        MathKind::Inline => format!("${latex}$"),
        MathKind::Display => format!("\n$$\n{latex}\n$$\n"),
    }
}

/// Delimiter wrapping for an in-place replacement. Display form drops the
/// outer newlines so the original's surroundings stay exactly as written.
pub(crate) fn rewrap_math(latex: &str, kind: MathKind) -> String {
    match kind {
        MathKind::Inline => format!("${latex}$"),
        MathKind::Display => format!("$$\n{latex}\n$$"),
    }
}

fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}
