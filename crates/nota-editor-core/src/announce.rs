//! Screen-reader announcement seam.
//!
//! The surrounding editor surfaces state changes through an assistive-tech
//! live region. The engine only knows this trait; the host injects the
//! real implementation and tests inject a recorder, so no ambient state
//! leaks into the core.

/// Politeness level for a live-region announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// Queued behind current speech (`aria-live="polite"`).
    #[default]
    Polite,
    /// Interrupts current speech (`aria-live="assertive"`).
    Assertive,
}

pub trait Announcer {
    fn announce(&mut self, message: &str, priority: Priority);
}

/// Default announcer that drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&mut self, _message: &str, _priority: Priority) {}
}
