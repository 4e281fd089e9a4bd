//! Editing-session state machine for math expressions.
//!
//! One session is meaningful per document view. It idles until the user
//! activates a rendered expression (or a toolbar "insert math" action),
//! holds the live latex value while an edit surface is open, and on
//! commit splices the result back into the host buffer — replacing the
//! original span when one was located, appending otherwise. The session
//! never retains the buffer; every operation takes it as an argument.

use crate::announce::{Announcer, Priority, SilentAnnouncer};
use crate::mutate::{replace_math, wrap_math};
use crate::span::{MathKind, MathSpan, locate_math_span};

/// 2D display coordinate for positioning the edit surface. Opaque to the
/// engine: supplied by the caller, handed back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

impl AnchorPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// State holder for one in-progress math edit.
///
/// `original` is `Some` exactly when the session started on a located
/// existing span; committing such a session replaces that span in place.
/// Sessions without an original append at the end of the buffer — the
/// degraded path for callers with no buffer context.
pub struct MathEditSession<A: Announcer = SilentAnnouncer> {
    editing: bool,
    latex: String,
    anchor: AnchorPoint,
    kind: MathKind,
    original: Option<MathSpan>,
    announcer: A,
}

impl MathEditSession {
    /// Session with no announcer wired up.
    pub fn new() -> Self {
        Self::with_announcer(SilentAnnouncer)
    }
}

impl Default for MathEditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Announcer> MathEditSession<A> {
    pub fn with_announcer(announcer: A) -> Self {
        Self {
            editing: false,
            latex: String::new(),
            anchor: AnchorPoint::default(),
            kind: MathKind::Inline,
            original: None,
            announcer,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The live value being edited.
    pub fn latex(&self) -> &str {
        &self.latex
    }

    pub fn kind(&self) -> MathKind {
        self.kind
    }

    pub fn anchor(&self) -> AnchorPoint {
        self.anchor
    }

    /// The span a commit will replace, when the session started on one.
    pub fn original_expression(&self) -> Option<&MathSpan> {
        self.original.as_ref()
    }

    pub fn announcer(&self) -> &A {
        &self.announcer
    }

    /// Start editing with no buffer context (toolbar "new expression"
    /// flow). Caller-supplied values are used verbatim and a commit will
    /// append. Starting over an active session discards its uncommitted
    /// state — last start wins.
    pub fn start(&mut self, latex: &str, anchor: AnchorPoint, kind: MathKind) {
        if self.editing {
            tracing::debug!("restarting math session, discarding uncommitted value");
        }
        self.editing = true;
        self.latex = latex.to_owned();
        self.anchor = anchor;
        self.kind = kind;
        self.original = None;
    }

    /// Start editing at a buffer position. A math span under `offset` is
    /// authoritative: its latex and kind replace the caller's hints and
    /// the span is captured for replacement on commit. With no span at
    /// the offset this behaves exactly like [`start`](Self::start).
    pub fn start_at(
        &mut self,
        buffer: &str,
        offset: usize,
        latex: &str,
        anchor: AnchorPoint,
        kind: MathKind,
    ) {
        self.start(latex, anchor, kind);
        if let Some(span) = locate_math_span(buffer, offset) {
            tracing::debug!(start = span.start, end = span.end, "editing existing math span");
            self.latex = span.latex.to_string();
            self.kind = span.kind;
            self.original = Some(span);
        }
    }

    /// Replace the live value. Ignored while idle.
    pub fn update(&mut self, latex: &str) {
        if !self.editing {
            tracing::debug!("update with no active math session, ignored");
            return;
        }
        self.latex = latex.to_owned();
    }

    /// Commit `new_latex` into `buffer`, returning the updated text and
    /// resetting the session to idle.
    ///
    /// The payload is committed verbatim — validation is the caller's
    /// gate, run before invoking this. Offsets computed against the old
    /// buffer are stale afterwards; re-scan before reusing them.
    /// Committing while idle returns the buffer unchanged.
    pub fn commit(&mut self, buffer: &str, new_latex: &str) -> String {
        if !self.editing {
            tracing::debug!("commit with no active math session, buffer unchanged");
            return buffer.to_owned();
        }

        let (updated, message) = match self.original.take() {
            Some(span) => (
                replace_math(buffer, &span, new_latex),
                "Math expression updated",
            ),
            None => {
                // Degraded path: nothing located to replace, append at the
                // end of the buffer.
                let mut text = buffer.to_owned();
                text.push_str(&wrap_math(new_latex, self.kind));
                (text, "Math expression inserted")
            }
        };

        self.reset();
        self.announcer.announce(message, Priority::Polite);
        updated
    }

    /// Abandon the edit, discarding the live value and any captured span.
    /// Safe to call while idle; the buffer is never touched.
    pub fn cancel(&mut self) {
        if !self.editing {
            return;
        }
        self.reset();
        self.announcer.announce("Math edit cancelled", Priority::Polite);
    }

    fn reset(&mut self) {
        self.editing = false;
        self.latex.clear();
        self.anchor = AnchorPoint::default();
        self.kind = MathKind::Inline;
        self.original = None;
    }
}
