//! LaTeX math typesetting via pulldown-latex → MathML.

use nota_editor_core::MathKind;
use pulldown_latex::{Parser, Storage, config::DisplayMode, config::RenderConfig, mathml::push_mathml};

use crate::escape_html;

/// The LaTeX source failed to parse or render.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to typeset math: {message}")]
pub struct TypesetError {
    pub message: String,
}

/// Typeset one expression to MathML.
///
/// `latex` is the bare source, without `$`/`$$` delimiters; `kind` picks
/// between inline and block display mode.
pub fn typeset_math(latex: &str, kind: MathKind) -> Result<String, TypesetError> {
    let storage = Storage::new();
    let parser = Parser::new(latex, &storage);
    let config = RenderConfig {
        display_mode: match kind {
            MathKind::Display => DisplayMode::Block,
            MathKind::Inline => DisplayMode::Inline,
        },
        ..Default::default()
    };

    // Collect events first so parse errors surface before writing output.
    let events: Vec<_> = parser.collect();
    let errors: Vec<String> = events
        .iter()
        .filter_map(|e| e.as_ref().err().map(|err| err.to_string()))
        .collect();
    if !errors.is_empty() {
        return Err(TypesetError {
            message: errors.join("; "),
        });
    }

    let mut mathml = String::new();
    push_mathml(&mut mathml, events.into_iter(), config).map_err(|e| TypesetError {
        message: e.to_string(),
    })?;
    Ok(mathml)
}

/// Typeset with an HTML fallback for broken input: instead of failing the
/// whole preview, the source is echoed in a `math-error` element with the
/// error message in its tooltip.
pub fn typeset_math_or_fallback(latex: &str, kind: MathKind) -> String {
    match typeset_math(latex, kind) {
        Ok(mathml) => mathml,
        Err(err) => {
            tracing::debug!(error = %err, "math typesetting failed, emitting fallback");
            error_fallback_html(latex, &err.message, kind)
        }
    }
}

fn error_fallback_html(latex: &str, error: &str, kind: MathKind) -> String {
    let mode_class = match kind {
        MathKind::Display => "math-display",
        MathKind::Inline => "math-inline",
    };
    format!(
        r#"<span class="math math-error {mode_class}" title="{}"><code>{}</code></span>"#,
        escape_html(error),
        escape_html(latex),
    )
}
