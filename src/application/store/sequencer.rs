//! Last-issued-wins sequencing for responses that may complete out of order.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued request of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic request counter for a single view.
///
/// A response may only be applied if its ticket is still the most recently
/// issued one; anything older has been superseded and must be dropped.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket that supersedes every previously issued one.
    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Supersedes all in-flight requests without issuing a new one.
    pub fn invalidate(&self) {
        self.issued.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_current() {
        let seq = RequestSequencer::new();
        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn test_invalidate_supersedes_everything() {
        let seq = RequestSequencer::new();
        let ticket = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(ticket));
    }

    #[test]
    fn test_default_ticket_is_never_current_after_issue() {
        let seq = RequestSequencer::new();
        seq.issue();
        assert!(!seq.is_current(Ticket::default()));
    }
}
