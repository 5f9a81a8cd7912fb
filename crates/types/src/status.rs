//! Pipeline status snapshots as reported by `GET /status`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Step ids and default labels the backend reports, in execution order.
pub const KNOWN_STEPS: &[(&str, &str)] = &[
    ("upload", "Upload received"),
    ("extract_audio", "Extract audio"),
    ("detect_highlights", "Detect highlights"),
    ("cut_clips", "Create clips"),
    ("generate_subtitles", "Transcribe clips"),
];

/// Overall pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Processing,
    Completed,
    Error,
    /// Any value this client does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

impl PipelineState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn is_processing(self) -> bool {
        matches!(self, Self::Processing)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a single pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Pending,
    InProgress,
    Completed,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StepState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stage of the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub state: StepState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Step {
    pub fn new(id: impl Into<String>, label: impl Into<String>, state: StepState) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            state,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Progress note, treating the backend's empty string as absent
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref().filter(|d| !d.trim().is_empty())
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state == StepState::Completed
    }
}

/// Snapshot of the remote pipeline. Replaced wholesale on every poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PipelineStatus {
    #[serde(default)]
    pub state: PipelineState,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Name of the file the current run was started from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl PipelineStatus {
    pub fn new(state: PipelineState, steps: Vec<Step>) -> Self {
        Self {
            state,
            steps,
            ..Self::default()
        }
    }

    /// The status the backend reports before anything was uploaded
    #[must_use]
    pub fn idle_with_known_steps() -> Self {
        let steps = KNOWN_STEPS
            .iter()
            .map(|(id, label)| Step::new(*id, *label, StepState::Pending))
            .collect();
        Self::new(PipelineState::Idle, steps)
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Summary text, only meaningful for a completed run
    #[must_use]
    pub fn completed_summary(&self) -> Option<&str> {
        match self.state {
            PipelineState::Completed => non_blank(self.summary.as_deref()),
            _ => None,
        }
    }

    /// Failure reason, only meaningful for a failed run
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match self.state {
            PipelineState::Error => non_blank(self.error.as_deref()),
            _ => None,
        }
    }

    /// Parsed `updated_at`; `None` when absent or not RFC 3339
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_states_fall_back() {
        let status: PipelineStatus = serde_json::from_str(
            r#"{"state":"paused","steps":[{"id":"a","label":"A","state":"queued"}]}"#,
        )
        .unwrap();
        assert_eq!(status.state, PipelineState::Unknown);
        assert_eq!(status.steps[0].state, StepState::Unknown);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let status: PipelineStatus = serde_json::from_str("{}").unwrap();
        assert_eq!(status.state, PipelineState::Unknown);
        assert!(status.steps.is_empty());
        assert!(status.summary.is_none());
    }

    #[test]
    fn test_empty_detail_is_absent() {
        let step: Step =
            serde_json::from_str(r#"{"id":"upload","label":"Upload","state":"pending","detail":""}"#)
                .unwrap();
        assert_eq!(step.detail(), None);

        let step = step.with_detail("42%");
        assert_eq!(step.detail(), Some("42%"));
    }

    #[test]
    fn test_summary_only_for_completed() {
        let status = PipelineStatus::new(PipelineState::Processing, vec![]).with_summary("3 clips");
        assert_eq!(status.completed_summary(), None);

        let status = PipelineStatus::new(PipelineState::Completed, vec![]).with_summary("3 clips");
        assert_eq!(status.completed_summary(), Some("3 clips"));
    }

    #[test]
    fn test_updated_at_parses_backend_timestamps() {
        let status = PipelineStatus {
            updated_at: Some("2024-05-01T12:30:00.123456Z".into()),
            ..PipelineStatus::default()
        };
        assert!(status.updated_at().is_some());

        let status = PipelineStatus {
            updated_at: Some("yesterday".into()),
            ..PipelineStatus::default()
        };
        assert!(status.updated_at().is_none());
    }
}
