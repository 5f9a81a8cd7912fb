//! Errors raised by the status-reconciliation engine
//!
//! Each variant names the operation that failed. The engine never propagates
//! these past the operation; it turns them into the single message slot shown
//! to the user. `user_message` therefore returns the fixed user-facing text,
//! while `Display` keeps the underlying cause for logs.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Shown when the upload call fails for any reason.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";
/// Shown when a status poll fails.
pub const STATUS_FETCH_FAILED_MESSAGE: &str = "Could not fetch pipeline status.";
/// Shown when the clip list cannot be loaded.
pub const CLIP_FETCH_FAILED_MESSAGE: &str = "Could not load clips.";

/// Operation category a [`SyncError`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncErrorKind {
    Upload,
    StatusFetch,
    ClipFetch,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("upload failed: {reason}")]
    Upload { reason: String },

    #[error("status fetch failed: {reason}")]
    StatusFetch { reason: String },

    #[error("clip list fetch failed: {reason}")]
    ClipFetch { reason: String },
}

impl SyncError {
    pub fn upload(reason: impl Into<String>) -> Self {
        Self::Upload {
            reason: reason.into(),
        }
    }

    pub fn status_fetch(reason: impl Into<String>) -> Self {
        Self::StatusFetch {
            reason: reason.into(),
        }
    }

    pub fn clip_fetch(reason: impl Into<String>) -> Self {
        Self::ClipFetch {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> SyncErrorKind {
        match self {
            Self::Upload { .. } => SyncErrorKind::Upload,
            Self::StatusFetch { .. } => SyncErrorKind::StatusFetch,
            Self::ClipFetch { .. } => SyncErrorKind::ClipFetch,
        }
    }

    /// The fixed text the user sees for this failure
    #[must_use]
    pub fn fixed_message(&self) -> &'static str {
        match self.kind() {
            SyncErrorKind::Upload => UPLOAD_FAILED_MESSAGE,
            SyncErrorKind::StatusFetch => STATUS_FETCH_FAILED_MESSAGE,
            SyncErrorKind::ClipFetch => CLIP_FETCH_FAILED_MESSAGE,
        }
    }

    /// Underlying cause as reported by the transport.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::Upload { reason } | Self::StatusFetch { reason } | Self::ClipFetch { reason } => {
                reason
            }
        }
    }
}

impl UserFacingError for SyncError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.fixed_message())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Upload { .. } => Some("Pick the video again to retry the upload."),
            Self::StatusFetch { .. } => None,
            Self::ClipFetch { .. } => Some("Refresh the clip list once the backend is reachable."),
        }
    }

    fn is_retryable(&self) -> bool {
        true
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::Upload { .. } => "sync.upload",
            Self::StatusFetch { .. } => "sync.status_fetch",
            Self::ClipFetch { .. } => "sync.clip_fetch",
        })
    }
}
