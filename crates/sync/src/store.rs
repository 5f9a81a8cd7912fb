//! Shared home of the current [`SyncState`]
//!
//! Transitions are applied under the channel's lock and published as one
//! value, so observers never see a half-applied update.

use tokio::sync::watch;

use crate::state::{SyncState, Transition};

/// Result of applying one transition
#[derive(Debug, Clone)]
pub struct Applied {
    pub previous: SyncState,
    pub current: SyncState,
}

#[derive(Debug)]
pub struct StateStore {
    tx: watch::Sender<SyncState>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(SyncState::default())
    }
}

impl StateStore {
    #[must_use]
    pub fn new(initial: SyncState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Apply `transition` atomically and notify subscribers
    pub fn apply(&self, transition: Transition) -> Applied {
        let mut applied = Applied {
            previous: SyncState::default(),
            current: SyncState::default(),
        };
        self.tx.send_modify(|state| {
            let next = state.apply(transition);
            applied.previous = std::mem::replace(state, next.clone());
            applied.current = next;
        });
        applied
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> SyncState {
        self.tx.borrow().clone()
    }

    /// Receiver that wakes on every applied transition
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.tx.subscribe()
    }
}
