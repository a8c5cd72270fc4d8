use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Generation counter owned by a mounted view.
///
/// Each fetch takes a [`Ticket`]; a response may only be applied while its
/// ticket is current. Starting a newer fetch or dropping the scope makes all
/// outstanding tickets stale.
#[derive(Debug, Default)]
pub struct ViewScope {
    generation: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    scope: Weak<AtomicU64>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        Ticket {
            generation,
            scope: Arc::downgrade(&self.generation),
        }
    }

    /// Marks every outstanding ticket stale without starting a new fetch.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.scope
            .upgrade()
            .map(|generation| generation.load(Ordering::Acquire) == self.generation)
            .unwrap_or(false)
    }
}
