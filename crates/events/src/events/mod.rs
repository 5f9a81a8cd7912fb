use serde::{Deserialize, Serialize};

use clipper_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Underlying cause, for logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E>(error: &E) -> Self
    where
        E: UserFacingError + std::fmt::Display + ?Sized,
    {
        Self {
            code: error.user_code().map(Into::into),
            message: error.user_message().into_owned(),
            cause: Some(error.to_string()),
            hint: error.user_hint().map(Into::into),
            retryable: error.is_retryable(),
        }
    }
}

pub mod clips;
pub mod general;
pub mod poller;
pub mod status;
pub mod upload;

pub use clips::*;
pub use general::*;
pub use poller::*;
pub use status::*;
pub use upload::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Upload lifecycle
    Upload(UploadEvent),

    /// Pipeline status snapshots and transitions
    Status(StatusEvent),

    /// Clip list refreshes
    Clips(ClipsEvent),

    /// Polling timer lifecycle
    Poller(PollerEvent),
}

impl AppEvent {
    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            // Error-level events
            Self::General(GeneralEvent::Error { .. })
            | Self::Upload(UploadEvent::Failed { .. }) => Level::ERROR,

            // Fetch failures are recoverable on the next poll or refresh
            Self::General(GeneralEvent::Warning { .. })
            | Self::Status(StatusEvent::FetchFailed { .. })
            | Self::Clips(ClipsEvent::FetchFailed { .. }) => Level::WARN,

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Status(StatusEvent::Refreshed { .. })
            | Self::Poller(PollerEvent::Tick { .. }) => Level::DEBUG,

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "clipper::events::general",
            Self::Upload(_) => "clipper::events::upload",
            Self::Status(_) => "clipper::events::status",
            Self::Clips(_) => "clipper::events::clips",
            Self::Poller(_) => "clipper::events::poller",
        }
    }
}
