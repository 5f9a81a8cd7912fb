use serde::{Deserialize, Serialize};

/// Why the status poller stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStopReason {
    /// The pipeline left the processing state
    LeftProcessing,
    /// The engine was shut down or dropped
    Teardown,
}

/// Status poller lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PollerEvent {
    Started { interval_ms: u64 },

    Tick { sequence: u64 },

    Stopped { reason: PollStopReason, ticks: u64 },
}
