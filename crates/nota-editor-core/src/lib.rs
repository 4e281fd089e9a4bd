//! nota-editor-core: math-span tracking and round-trip editing.
//!
//! The engine behind the note editor's embedded math: it finds `$…$` and
//! `$$…$$` spans in raw text, maps caret/click offsets back to the span
//! that produced a rendered element, and commits edited expressions back
//! into the host buffer without disturbing anything outside the span.
//!
//! - [`scan_math_spans`] / [`locate_math_span`] — span discovery
//! - [`validate_latex`] — shallow structural checks before a commit
//! - [`insert_math`] / [`replace_math`] — pure buffer splices
//! - [`MathEditSession`] — the edit-in-progress state machine
//! - [`TextBuffer`] / [`RopeBuffer`] / [`NoteDocument`] — host document
//!   plumbing

pub mod announce;
pub mod document;
pub mod mutate;
pub mod session;
pub mod span;
pub mod text;
pub mod validate;

pub use announce::{Announcer, Priority, SilentAnnouncer};
pub use document::NoteDocument;
pub use mutate::{MathInsertion, insert_math, replace_math};
pub use session::{AnchorPoint, MathEditSession};
pub use smol_str::SmolStr;
pub use span::{MATH_DELIMITER, MathKind, MathSpan, locate_math_span, scan_math_spans};
pub use text::{RopeBuffer, TextBuffer};
pub use validate::{MathSyntaxError, validate_latex};
