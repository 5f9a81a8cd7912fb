use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Clip list synchronisation events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClipsEvent {
    Refreshed { count: usize },

    FetchFailed { failure: FailureContext },
}
