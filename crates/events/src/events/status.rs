use clipper_types::PipelineState;
use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Pipeline status reconciliation events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatusEvent {
    /// A fresh snapshot replaced the previous one
    Refreshed {
        state: PipelineState,
        progress: u8,
        completed_steps: usize,
        total_steps: usize,
        summary: String,
    },

    /// The overall state changed between two observed snapshots
    StateChanged {
        from: Option<PipelineState>,
        to: PipelineState,
    },

    /// The fetch failed; the previous snapshot is kept
    FetchFailed { failure: FailureContext },
}
