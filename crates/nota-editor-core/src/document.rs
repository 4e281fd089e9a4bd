//! Host-side note document: a buffer plus a caret, wired to the math
//! engine.
//!
//! The surrounding editor owns the document text; this holder is the
//! narrow collaborator the engine talks to. Generic over [`TextBuffer`]
//! so hosts can swap storage backends.

use crate::announce::Announcer;
use crate::mutate::{rewrap_math, wrap_math};
use crate::session::MathEditSession;
use crate::span::{MathKind, MathSpan, locate_math_span, scan_math_spans};
use crate::text::{RopeBuffer, TextBuffer};

pub struct NoteDocument<T: TextBuffer> {
    buffer: T,
    cursor: usize,
}

impl NoteDocument<RopeBuffer> {
    pub fn from_str(content: &str) -> Self {
        Self::new(RopeBuffer::from_str(content))
    }
}

impl<T: TextBuffer> NoteDocument<T> {
    pub fn new(buffer: T) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn buffer(&self) -> &T {
        &self.buffer
    }

    pub fn content_string(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the caret, clamped to the buffer length.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.buffer.len_chars());
    }

    /// All math spans in the current content, ascending by start.
    pub fn math_spans(&self) -> Vec<MathSpan> {
        scan_math_spans(&self.content_string())
    }

    /// The span under `offset`, if any.
    pub fn math_at(&self, offset: usize) -> Option<MathSpan> {
        locate_math_span(&self.content_string(), offset)
    }

    /// Insert a new expression at the caret; the caret lands right after
    /// the inserted construct.
    pub fn insert_math(&mut self, latex: &str, kind: MathKind) {
        let inserted = wrap_math(latex, kind);
        self.buffer.insert(self.cursor, &inserted);
        self.cursor += inserted.chars().count();
    }

    /// Replace an existing span in place; the caret lands after the
    /// replacement. `span` must come from a scan of the *current*
    /// content — spans from before any mutation are stale.
    pub fn replace_math(&mut self, span: &MathSpan, new_latex: &str) {
        let replacement = rewrap_math(new_latex, span.kind);
        self.buffer.replace(span.char_range(), &replacement);
        self.cursor = span.start + replacement.chars().count();
    }

    /// Route a session commit back into the buffer.
    ///
    /// The engine hands back a whole new buffer; hosts with finer-grained
    /// storage reconcile however they like, this one swaps the content
    /// and clamps the caret.
    pub fn commit_math<A: Announcer>(
        &mut self,
        session: &mut MathEditSession<A>,
        new_latex: &str,
    ) {
        let content = self.content_string();
        let updated = session.commit(&content, new_latex);
        if updated != content {
            let len = self.buffer.len_chars();
            self.buffer.replace(0..len, &updated);
        }
        self.cursor = self.cursor.min(self.buffer.len_chars());
    }
}
