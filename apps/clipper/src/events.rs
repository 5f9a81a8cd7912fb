//! Event handling and terminal feedback

use clipper_events::{
    AppEvent, ClipsEvent, GeneralEvent, PollStopReason, PollerEvent, StatusEvent, UploadEvent,
};
use console::{style, Term};

/// Turns sync events into one-line status updates on stderr
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
    /// Progress percent last shown, to skip identical lines while polling
    last_progress: Option<u8>,
    term: Term,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(colors_enabled: bool, debug_enabled: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
            last_progress: None,
            term: Term::stderr(),
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        crate::logging::log_event_with_tracing(&event);

        match event {
            AppEvent::General(general) => self.handle_general(general),
            AppEvent::Upload(upload) => self.handle_upload(upload),
            AppEvent::Status(status) => self.handle_status(status),
            AppEvent::Clips(ClipsEvent::Refreshed { count }) => {
                self.show_status(&format!("Found {count} clip(s)"));
            }
            AppEvent::Clips(ClipsEvent::FetchFailed { failure }) => {
                self.show_warning(&failure.message);
            }
            AppEvent::Poller(poller) => self.handle_poller(&poller),
        }
    }

    fn handle_general(&self, event: GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, context } => match context {
                Some(context) => self.show_warning(&format!("{message} ({context})")),
                None => self.show_warning(&message),
            },
            GeneralEvent::Error { message, details } => {
                self.show_error(&message);
                if let Some(details) = details {
                    self.show_error(&format!("  {details}"));
                }
            }
            GeneralEvent::DebugLog { message, .. } => {
                if self.debug_enabled {
                    self.show_status(&message);
                }
            }
            GeneralEvent::OperationStarted { .. } | GeneralEvent::OperationCompleted { .. } => {}
        }
    }

    fn handle_upload(&self, event: UploadEvent) {
        match event {
            UploadEvent::Started {
                file_name,
                size_bytes,
            } => {
                let size = size_bytes.map(format_size).unwrap_or_default();
                self.show_status(&format!("Uploading {file_name} {size}"));
            }
            UploadEvent::Completed { file_name } => {
                self.show_success(&format!("Uploaded {file_name}"));
            }
            UploadEvent::Failed { failure, .. } => {
                self.show_error(&failure.message);
                if let Some(cause) = failure.cause.filter(|_| self.debug_enabled) {
                    self.show_error(&format!("  {cause}"));
                }
            }
        }
    }

    fn handle_status(&mut self, event: StatusEvent) {
        match event {
            StatusEvent::Refreshed {
                progress,
                completed_steps,
                total_steps,
                summary,
                ..
            } => {
                if self.last_progress == Some(progress) {
                    return;
                }
                self.last_progress = Some(progress);
                self.show_status(&format!(
                    "{progress:>3}% ({completed_steps}/{total_steps} steps) {summary}"
                ));
            }
            StatusEvent::StateChanged { from: Some(from), to } => {
                self.show_status(&format!("Pipeline {from} -> {to}"));
            }
            StatusEvent::StateChanged { from: None, .. } => {}
            StatusEvent::FetchFailed { failure } => self.show_warning(&failure.message),
        }
    }

    fn handle_poller(&self, event: &PollerEvent) {
        match event {
            PollerEvent::Started { interval_ms } if self.debug_enabled => {
                self.show_status(&format!("Polling every {interval_ms} ms"));
            }
            PollerEvent::Stopped {
                reason: PollStopReason::LeftProcessing,
                ticks,
            } if self.debug_enabled => {
                self.show_status(&format!("Polling stopped after {ticks} poll(s)"));
            }
            _ => {}
        }
    }

    fn show_status(&self, message: &str) {
        let _ = self.term.write_line(message);
    }

    fn show_success(&self, message: &str) {
        let line = if self.colors_enabled {
            style(message).green().to_string()
        } else {
            message.to_string()
        };
        let _ = self.term.write_line(&line);
    }

    fn show_warning(&self, message: &str) {
        let line = if self.colors_enabled {
            style(format!("warning: {message}")).yellow().to_string()
        } else {
            format!("warning: {message}")
        };
        let _ = self.term.write_line(&line);
    }

    fn show_error(&self, message: &str) {
        let line = if self.colors_enabled {
            style(message).red().bold().to_string()
        } else {
            message.to_string()
        };
        let _ = self.term.write_line(&line);
    }
}

/// Human-readable byte size, e.g. `(12.5 MB)`
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("({bytes} B)")
    } else {
        format!("({size:.1} {})", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "(512 B)");
        assert_eq!(format_size(1536), "(1.5 KB)");
        assert_eq!(format_size(5 * 1024 * 1024), "(5.0 MB)");
    }
}
