use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out increasing tickets so that only the most recently issued request
/// gets its result applied. Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct LatestRequest(Arc<AtomicU64>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl LatestRequest {
    pub fn issue(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.0.load(Ordering::SeqCst) == ticket.0
    }
}
