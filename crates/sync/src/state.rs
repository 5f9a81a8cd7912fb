//! The single state record and its reducer
//!
//! `SyncState` is never edited in place by callers. Every operation settles
//! by handing a [`Transition`] to [`SyncState::apply`], which returns the next
//! record. Derived fields are recomputed there and nowhere else.

use clipper_errors::{SyncError, SyncErrorKind};
use clipper_types::{ClipId, PipelineState, PipelineStatus};

use crate::derive::{compose_summary, derive_progress, Progress};

/// One discrete change to the state record
#[derive(Debug, Clone)]
pub enum Transition {
    /// An upload was submitted
    UploadStarted,
    /// The backend accepted the upload
    UploadSucceeded,
    UploadFailed(SyncError),
    /// The upload attempt is over, whatever its outcome
    UploadFinished,
    StatusFetched(PipelineStatus),
    StatusFetchFailed(SyncError),
    ClipsFetched(Vec<ClipId>),
    ClipsFetchFailed(SyncError),
}

/// Everything the front end renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncState {
    status: Option<PipelineStatus>,
    clips: Vec<ClipId>,
    is_uploading: bool,
    error: Option<SyncError>,
    progress: Progress,
    summary_line: String,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            status: None,
            clips: Vec::new(),
            is_uploading: false,
            error: None,
            progress: Progress::default(),
            summary_line: compose_summary(None),
        }
    }
}

impl SyncState {
    /// Produce the next state. `self` is left untouched.
    #[must_use]
    pub fn apply(&self, transition: Transition) -> Self {
        let mut next = self.clone();
        match transition {
            Transition::UploadStarted => {
                next.is_uploading = true;
                next.error = None;
            }
            Transition::UploadSucceeded => next.clear_error(SyncErrorKind::Upload),
            Transition::UploadFailed(err)
            | Transition::StatusFetchFailed(err)
            | Transition::ClipsFetchFailed(err) => next.error = Some(err),
            Transition::UploadFinished => next.is_uploading = false,
            Transition::StatusFetched(status) => {
                next.progress = derive_progress(&status.steps);
                next.summary_line = compose_summary(Some(&status));
                next.status = Some(status);
                next.clear_error(SyncErrorKind::StatusFetch);
            }
            Transition::ClipsFetched(clips) => {
                next.clips = clips;
                next.clear_error(SyncErrorKind::ClipFetch);
            }
        }
        next
    }

    fn clear_error(&mut self, kind: SyncErrorKind) {
        if self.error.as_ref().is_some_and(|e| e.kind() == kind) {
            self.error = None;
        }
    }

    /// Latest snapshot, `None` until the first fetch succeeds
    #[must_use]
    pub fn status(&self) -> Option<&PipelineStatus> {
        self.status.as_ref()
    }

    /// Overall state of the latest snapshot
    #[must_use]
    pub fn pipeline_state(&self) -> Option<PipelineState> {
        self.status.as_ref().map(|s| s.state)
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.pipeline_state()
            .is_some_and(PipelineState::is_processing)
    }

    #[must_use]
    pub fn clips(&self) -> &[ClipId] {
        &self.clips
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    #[must_use]
    pub fn error(&self) -> Option<&SyncError> {
        self.error.as_ref()
    }

    /// Text for the message slot
    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(SyncError::fixed_message)
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[must_use]
    pub fn summary_line(&self) -> &str {
        &self.summary_line
    }
}
