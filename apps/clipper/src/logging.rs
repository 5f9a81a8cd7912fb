//! Structured logging integration for events
//!
//! Every event coming off the channel is also written to `tracing` with its
//! fields broken out, so debug log files carry the full sync history.

use clipper_events::{
    AppEvent, ClipsEvent, FailureContext, GeneralEvent, PollerEvent, StatusEvent, UploadEvent,
};
use tracing::{debug, error, info, warn};

/// Log an `AppEvent` at its level with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    match event {
        AppEvent::General(general) => log_general(general),
        AppEvent::Upload(upload) => log_upload(upload),
        AppEvent::Status(status) => log_status(status),
        AppEvent::Clips(clips) => match clips {
            ClipsEvent::Refreshed { count } => {
                info!(target: "clipper::events::clips", count, "Clip list refreshed");
            }
            ClipsEvent::FetchFailed { failure } => {
                log_fetch_failure(event.log_target(), failure, "Clip list fetch failed");
            }
        },
        AppEvent::Poller(poller) => match poller {
            PollerEvent::Started { interval_ms } => {
                info!(target: "clipper::events::poller", interval_ms, "Status polling started");
            }
            PollerEvent::Tick { sequence } => {
                debug!(target: "clipper::events::poller", sequence, "Status poll tick");
            }
            PollerEvent::Stopped { reason, ticks } => {
                info!(
                    target: "clipper::events::poller",
                    reason = ?reason,
                    ticks,
                    "Status polling stopped"
                );
            }
        },
    }
}

fn log_general(event: &GeneralEvent) {
    match event {
        GeneralEvent::Warning { message, context } => {
            warn!(target: "clipper::events::general", context = ?context, "{message}");
        }
        GeneralEvent::Error { message, details } => {
            error!(target: "clipper::events::general", details = ?details, "{message}");
        }
        GeneralEvent::DebugLog { message, context } => {
            debug!(target: "clipper::events::general", context = ?context, "{message}");
        }
        GeneralEvent::OperationStarted { operation } => {
            info!(target: "clipper::events::general", operation = %operation, "Operation started");
        }
        GeneralEvent::OperationCompleted { operation, success } => {
            info!(
                target: "clipper::events::general",
                operation = %operation,
                success,
                "Operation completed"
            );
        }
    }
}

fn log_upload(event: &UploadEvent) {
    match event {
        UploadEvent::Started {
            file_name,
            size_bytes,
        } => {
            info!(
                target: "clipper::events::upload",
                file = %file_name,
                size_bytes = ?size_bytes,
                "Upload started"
            );
        }
        UploadEvent::Completed { file_name } => {
            info!(target: "clipper::events::upload", file = %file_name, "Upload completed");
        }
        UploadEvent::Failed { file_name, failure } => {
            error!(
                target: "clipper::events::upload",
                file = %file_name,
                retryable = failure.retryable,
                code = ?failure.code,
                message = %failure.message,
                cause = ?failure.cause,
                "Upload failed"
            );
        }
    }
}

fn log_status(event: &StatusEvent) {
    match event {
        StatusEvent::Refreshed {
            state,
            progress,
            completed_steps,
            total_steps,
            summary,
        } => {
            debug!(
                target: "clipper::events::status",
                state = %state,
                progress,
                completed_steps,
                total_steps,
                summary = %summary,
                "Status refreshed"
            );
        }
        StatusEvent::StateChanged { from, to } => {
            info!(
                target: "clipper::events::status",
                from = ?from,
                to = %to,
                "Pipeline state changed"
            );
        }
        StatusEvent::FetchFailed { failure } => {
            log_fetch_failure("clipper::events::status", failure, "Status fetch failed");
        }
    }
}

/// Fetch failures recover on the next refresh, so they stay at WARN
fn log_fetch_failure(domain: &str, failure: &FailureContext, what: &str) {
    warn!(
        domain,
        retryable = failure.retryable,
        code = ?failure.code,
        message = %failure.message,
        cause = ?failure.cause,
        "{what}"
    );
}
