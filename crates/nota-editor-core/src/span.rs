//! Math span scanning and position lookup.
//!
//! A note's raw text embeds math between dollar delimiters: `$…$` for
//! inline expressions, `$$…$$` for display blocks. The scanner resolves
//! every such span with shortest-match pairing, display delimiters taking
//! precedence over any single delimiters they enclose. All offsets are
//! char offsets (Unicode scalar values), never bytes.

use std::ops::Range;

use smol_str::SmolStr;

/// The marker character that opens and closes a math span.
pub const MATH_DELIMITER: char = '$';

/// Whether an expression sits in the text flow or stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MathKind {
    /// Single-delimiter span, typeset in the flow of text.
    #[default]
    Inline,
    /// Double-delimiter span, typeset standalone.
    Display,
}

impl MathKind {
    pub fn is_inline(self) -> bool {
        matches!(self, MathKind::Inline)
    }
}

/// A located math sub-expression within a text buffer.
///
/// `start..end` is the half-open char range covering the span *including*
/// its delimiters; `latex` is the trimmed payload between them. Spans are
/// produced fresh on every scan and are invalidated by any buffer
/// mutation — re-scan before trusting offsets again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    /// Trimmed content between the delimiters. Opaque text, not parsed.
    pub latex: SmolStr,
    /// Char offset of the opening delimiter.
    pub start: usize,
    /// Char offset one past the closing delimiter.
    pub end: usize,
    /// Inline or display.
    pub kind: MathKind,
}

impl MathSpan {
    pub fn char_range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_inline(&self) -> bool {
        self.kind.is_inline()
    }

    /// Whether `offset` falls on this span, *both* boundaries inclusive.
    ///
    /// A cursor sitting exactly on a delimiter character still counts as
    /// inside, so a double-click on the boundary glyph opens the editor.
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// The exact source text this span covers, delimiters included.
    pub fn raw_text(&self, buffer: &str) -> String {
        buffer
            .chars()
            .skip(self.start)
            .take(self.end.saturating_sub(self.start))
            .collect()
    }
}

/// Scan `text` for all math spans, ascending by start offset.
///
/// Display spans are resolved first; an inline candidate whose range lies
/// entirely inside a display span is dropped (the double delimiters
/// swallow any single delimiters they contain). Unterminated delimiters
/// produce no span. Never fails, for any input.
pub fn scan_math_spans(text: &str) -> Vec<MathSpan> {
    if text.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let display = find_display_spans(&chars);
    let mut spans: Vec<MathSpan> = find_inline_spans(&chars)
        .into_iter()
        .filter(|s| {
            !display
                .iter()
                .any(|d| d.start <= s.start && s.end <= d.end)
        })
        .collect();
    spans.extend(display);
    spans.sort_by_key(|s| s.start);

    tracing::trace!(count = spans.len(), "scanned math spans");
    spans
}

/// Find the span (if any) containing `offset`.
///
/// Returns the first scanned span whose inclusive range covers the
/// offset. Most offsets are not inside math; `None` is the common case,
/// not an error.
pub fn locate_math_span(text: &str, offset: usize) -> Option<MathSpan> {
    scan_math_spans(text)
        .into_iter()
        .find(|s| s.contains_offset(offset))
}

/// Shortest-match `$$…$$` pairs. Payload must be non-empty and may span
/// newlines.
fn find_display_spans(chars: &[char]) -> Vec<MathSpan> {
    let mut spans = Vec::new();
    let mut i = 0;
    while i + 1 < chars.len() {
        if !(chars[i] == MATH_DELIMITER && chars[i + 1] == MATH_DELIMITER) {
            i += 1;
            continue;
        }
        match find_double_delimiter(chars, i + 3) {
            Some(close) => {
                let latex: String = chars[i + 2..close].iter().collect();
                spans.push(MathSpan {
                    latex: latex.trim().into(),
                    start: i,
                    end: close + 2,
                    kind: MathKind::Display,
                });
                i = close + 2;
            }
            // No closing pair ahead: not a span. Re-anchor one character
            // later, the way a non-greedy matcher retries.
            None => i += 1,
        }
    }
    spans
}

fn find_double_delimiter(chars: &[char], from: usize) -> Option<usize> {
    let mut j = from;
    while j + 1 < chars.len() {
        if chars[j] == MATH_DELIMITER && chars[j + 1] == MATH_DELIMITER {
            return Some(j);
        }
        j += 1;
    }
    None
}

/// Shortest-match `$…$` pairs. Payload must be non-empty and cannot cross
/// a newline.
fn find_inline_spans(chars: &[char]) -> Vec<MathSpan> {
    let len = chars.len();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < len {
        if chars[i] != MATH_DELIMITER {
            i += 1;
            continue;
        }
        if i + 2 >= len {
            // No room left for payload + closer.
            break;
        }
        if chars[i + 1] == '\n' {
            i += 1;
            continue;
        }
        let mut close = None;
        let mut k = i + 2;
        while k < len {
            if chars[k] == '\n' {
                break;
            }
            if chars[k] == MATH_DELIMITER {
                close = Some(k);
                break;
            }
            k += 1;
        }
        match close {
            Some(k) => {
                let latex: String = chars[i + 1..k].iter().collect();
                spans.push(MathSpan {
                    latex: latex.trim().into(),
                    start: i,
                    end: k + 1,
                    kind: MathKind::Inline,
                });
                i = k + 1;
            }
            None => i += 1,
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        assert!(scan_math_spans("").is_empty());
    }

    #[test]
    fn test_no_math() {
        assert!(scan_math_spans("plain prose, no delimiters here").is_empty());
    }

    #[test]
    fn test_single_inline_span() {
        let text = "Euler: $e^{i\\pi} + 1 = 0$ wow";
        let spans = scan_math_spans(text);
        assert_eq!(spans.len(), 1);
        let s = &spans[0];
        assert_eq!(s.kind, MathKind::Inline);
        assert_eq!(s.latex, "e^{i\\pi} + 1 = 0");
        assert_eq!(s.raw_text(text), "$e^{i\\pi} + 1 = 0$");
    }

    #[test]
    fn test_single_display_span() {
        let text = "before\n$$\n\\sum_{i=0}^{n} i\n$$\nafter";
        let spans = scan_math_spans(text);
        assert_eq!(spans.len(), 1);
        let s = &spans[0];
        assert_eq!(s.kind, MathKind::Display);
        assert_eq!(s.latex, "\\sum_{i=0}^{n} i");
        // Raw keeps the delimiters and internal whitespace.
        assert_eq!(s.raw_text(text), "$$\n\\sum_{i=0}^{n} i\n$$");
    }

    #[test]
    fn test_display_swallows_inner_inline() {
        let spans = scan_math_spans("text $$a + $b$ + c$$ end");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, MathKind::Display);
        assert_eq!(spans[0].latex, "a + $b$ + c");
    }

    #[test]
    fn test_inline_outside_display_survives() {
        let spans = scan_math_spans("$a$ then $$b$$ then $c$");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].latex, "a");
        assert_eq!(spans[0].kind, MathKind::Inline);
        assert_eq!(spans[1].latex, "b");
        assert_eq!(spans[1].kind, MathKind::Display);
        assert_eq!(spans[2].latex, "c");
        assert_eq!(spans[2].kind, MathKind::Inline);
    }

    #[test]
    fn test_spans_ordered_by_start() {
        let spans = scan_math_spans("$x$ $$y$$ $z$ and $$w$$");
        for pair in spans.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
    }

    #[test]
    fn test_unterminated_delimiters() {
        assert!(scan_math_spans("costs $5 and nothing closes").is_empty());
        assert!(scan_math_spans("$$ dangling display").is_empty());
        assert!(scan_math_spans("$").is_empty());
    }

    #[test]
    fn test_inline_cannot_cross_newline() {
        assert!(scan_math_spans("$a\nb$").is_empty());
        // A pair on the second line still matches.
        let spans = scan_math_spans("$a\n$b$");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].latex, "b");
        assert_eq!(spans[0].start, 3);
    }

    #[test]
    fn test_payload_trimmed_raw_untrimmed() {
        let text = "$  x + y  $";
        let spans = scan_math_spans(text);
        assert_eq!(spans[0].latex, "x + y");
        assert_eq!(spans[0].raw_text(text), "$  x + y  $");
    }

    #[test]
    fn test_adjacent_spans_independent() {
        let spans = scan_math_spans("$a$$b$");
        // `$a$` matches first, leaving `$b$` to match after it.
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].latex, "a");
        assert_eq!(spans[1].latex, "b");
    }

    #[test]
    fn test_unicode_offsets_are_char_based() {
        let text = "héllo $α + β$ wörld";
        let spans = scan_math_spans(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 6);
        assert_eq!(spans[0].end, 13);
        assert_eq!(spans[0].raw_text(text), "$α + β$");
    }

    #[test]
    fn test_locate_hit_and_miss() {
        let text = "pre $x^2$ post";
        let span = locate_math_span(text, 6).expect("offset inside span");
        assert_eq!(span.latex, "x^2");
        assert!(locate_math_span(text, 0).is_none());
        assert!(locate_math_span(text, text.chars().count()).is_none());
    }

    #[test]
    fn test_locate_boundaries_inclusive() {
        let text = "pre $x^2$ post";
        let spans = scan_math_spans(text);
        let s = &spans[0];
        assert_eq!(locate_math_span(text, s.start).as_ref(), Some(s));
        assert_eq!(locate_math_span(text, s.end).as_ref(), Some(s));
    }

    #[test]
    fn test_locate_out_of_range_offset() {
        assert!(locate_math_span("$x$", 9999).is_none());
    }
}
