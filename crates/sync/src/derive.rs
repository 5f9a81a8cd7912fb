//! Pure transforms from a status snapshot to what the user sees
//!
//! Nothing here holds state. Running a transform twice on the same snapshot
//! gives the same answer.

use clipper_types::{PipelineState, PipelineStatus, Step, StepState};

/// Shown before the first status fetch resolves
pub const WAITING_TEXT: &str = "Waiting for status...";
/// Shown while the pipeline is running
pub const PROCESSING_TEXT: &str = "Processing video...";
/// Shown when nothing is running and no summary applies
pub const IDLE_TEXT: &str = "No video processing yet.";
/// Shown for a failed run that carries no reason
pub const FAILED_TEXT: &str = "Processing failed.";

/// Completion metrics for a step list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// 0..=100
    pub percent: u8,
    pub completed: usize,
    pub total: usize,
}

/// `round(100 * completed / total)`, 0 for an empty list. Halves round up.
#[must_use]
pub fn derive_progress(steps: &[Step]) -> Progress {
    let total = steps.len();
    let completed = steps.iter().filter(|s| s.is_completed()).count();
    Progress {
        percent: percent(completed, total),
        completed,
        total,
    }
}

fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * completed + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// One-line summary, by priority: completed with a summary, failure,
/// processing, anything else. `None` means no status has been fetched yet.
#[must_use]
pub fn compose_summary(status: Option<&PipelineStatus>) -> String {
    let Some(status) = status else {
        return WAITING_TEXT.to_string();
    };

    if let Some(summary) = status.completed_summary() {
        return summary.to_string();
    }

    match status.state {
        PipelineState::Error => status.failure_reason().unwrap_or(FAILED_TEXT).to_string(),
        PipelineState::Processing => PROCESSING_TEXT.to_string(),
        PipelineState::Idle | PipelineState::Completed | PipelineState::Unknown => {
            IDLE_TEXT.to_string()
        }
    }
}

/// Display form of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub id: String,
    pub icon: &'static str,
    pub label: String,
    pub state: StepState,
}

#[must_use]
pub fn step_icon(state: StepState) -> &'static str {
    match state {
        StepState::Pending => "○",
        StepState::InProgress => "◐",
        StepState::Completed => "●",
        StepState::Failed => "✕",
        StepState::Unknown => "?",
    }
}

/// Icon and label for every step, in pipeline order
#[must_use]
pub fn present_steps(steps: &[Step]) -> Vec<StepView> {
    steps
        .iter()
        .map(|step| StepView {
            id: step.id.clone(),
            icon: step_icon(step.state),
            label: match step.detail() {
                Some(detail) => format!("{} ({detail})", step.label),
                None => step.label.clone(),
            },
            state: step.state,
        })
        .collect()
}
