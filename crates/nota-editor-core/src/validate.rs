//! Structural pre-commit checks for math expressions.
//!
//! Deliberately shallow: a fast sanity pass the editor UI runs before
//! letting a commit through, not a LaTeX grammar. It must never reject a
//! balanced, delimiter-free expression. The mutation operators do not
//! consult it — committing an invalid payload verbatim is the caller's
//! prerogative.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::span::MATH_DELIMITER;

/// A `\command{` left dangling at the end of an expression.
static TRAILING_COMMAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+\{[^}]*$").unwrap());

/// Why an expression failed validation. First failure wins; the checks
/// run in the order the variants are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MathSyntaxError {
    #[error("empty expression")]
    EmptyExpression,
    #[error("unmatched opening brace")]
    UnmatchedOpeningBrace,
    #[error("unmatched closing brace")]
    UnmatchedClosingBrace,
    #[error("invalid syntax")]
    InvalidSyntax,
}

/// Check a candidate expression for structural well-formedness.
pub fn validate_latex(latex: &str) -> Result<(), MathSyntaxError> {
    if latex.trim().is_empty() {
        return Err(MathSyntaxError::EmptyExpression);
    }

    let mut depth: i32 = 0;
    for ch in latex.chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err(MathSyntaxError::UnmatchedClosingBrace);
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(MathSyntaxError::UnmatchedOpeningBrace);
    }

    // Structural smells: a trailing command that never closes its brace,
    // or a bare span delimiter inside the payload (the scanner would pair
    // it with the surrounding delimiters and split the expression).
    if TRAILING_COMMAND_RE.is_match(latex) || contains_unescaped_delimiter(latex) {
        return Err(MathSyntaxError::InvalidSyntax);
    }

    Ok(())
}

fn contains_unescaped_delimiter(latex: &str) -> bool {
    let mut prev = None;
    for ch in latex.chars() {
        if ch == MATH_DELIMITER && prev != Some('\\') {
            return true;
        }
        prev = Some(ch);
    }
    false
}
