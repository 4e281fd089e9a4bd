//! Whole-note preview: prose escaped, math typeset in place.

use nota_editor_core::scan_math_spans;

use crate::escape_html;
use crate::math::typeset_math_or_fallback;

/// Render a note's raw text to preview HTML.
///
/// Prose segments are escaped verbatim — markdown structure is the host
/// renderer's job — while each math span is typeset where it stood.
/// Broken expressions degrade to the `math-error` fallback instead of
/// taking the preview down.
pub fn render_note_preview(text: &str) -> String {
    let spans = scan_math_spans(text);
    if spans.is_empty() {
        return escape_html(text);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut html = String::with_capacity(text.len() * 2);
    let mut pos = 0;
    for span in &spans {
        if span.start > pos {
            let prose: String = chars[pos..span.start].iter().collect();
            html.push_str(&escape_html(&prose));
        }
        html.push_str(&typeset_math_or_fallback(&span.latex, span.kind));
        pos = span.end;
    }
    if pos < chars.len() {
        let prose: String = chars[pos..].iter().collect();
        html.push_str(&escape_html(&prose));
    }

    tracing::trace!(spans = spans.len(), "rendered note preview");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prose_only_is_escaped() {
        assert_eq!(render_note_preview("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn math_is_typeset_between_prose() {
        let html = render_note_preview("sum: $x + y$ done");
        assert!(html.starts_with("sum: "));
        assert!(html.contains("<math"));
        assert!(html.ends_with(" done"));
    }

    #[test]
    fn display_math_renders_block() {
        let html = render_note_preview("$$\n\\frac{1}{2}\n$$");
        assert!(html.contains("<math"));
        assert!(html.contains("<mfrac"));
    }

    #[test]
    fn broken_math_degrades_to_fallback() {
        let html = render_note_preview("ok $\\broken{$$ more prose");
        assert!(html.contains("more prose"));
    }

    #[test]
    fn empty_note_is_empty() {
        assert_eq!(render_note_preview(""), "");
    }
}
