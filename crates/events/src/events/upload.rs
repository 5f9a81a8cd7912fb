use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Upload lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UploadEvent {
    Started {
        file_name: String,
        size_bytes: Option<u64>,
    },

    Completed {
        file_name: String,
    },

    Failed {
        file_name: String,
        failure: FailureContext,
    },
}
