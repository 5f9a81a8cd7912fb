//! Integration tests for events

#[cfg(test)]
mod tests {
    use clipper_errors::SyncError;
    use clipper_events::*;
    use clipper_types::PipelineState;

    #[tokio::test]
    async fn test_event_emitter_helpers() {
        let (tx, mut rx) = channel();

        tx.emit_error("test error");
        tx.emit_debug("test debug");

        let event1 = rx.recv().await.unwrap();
        assert!(matches!(
            event1,
            AppEvent::General(GeneralEvent::Error { .. })
        ));

        let event2 = rx.recv().await.unwrap();
        assert!(matches!(
            event2,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning("ignored");
    }

    #[test]
    fn test_detached_emitter_is_silent() {
        let detached: Option<EventSender> = None;
        detached.emit_warning("nobody listens");
    }

    #[test]
    fn test_failure_context_keeps_fixed_message_and_cause() {
        let failure = FailureContext::from_error(&SyncError::status_fetch("HTTP error 502"));
        assert_eq!(failure.message, "Could not fetch pipeline status.");
        assert_eq!(failure.code.as_deref(), Some("sync.status_fetch"));
        assert!(failure.cause.unwrap().contains("502"));
        assert!(failure.retryable);
    }

    #[test]
    fn test_log_levels() {
        let failed = AppEvent::Upload(UploadEvent::Failed {
            file_name: "vod.mp4".into(),
            failure: FailureContext::from_error(&SyncError::upload("reset")),
        });
        assert_eq!(failed.log_level(), tracing::Level::ERROR);

        let refreshed = AppEvent::Status(StatusEvent::Refreshed {
            state: PipelineState::Processing,
            progress: 40,
            completed_steps: 2,
            total_steps: 5,
            summary: "Processing video...".into(),
        });
        assert_eq!(refreshed.log_level(), tracing::Level::DEBUG);
        assert_eq!(refreshed.log_target(), "clipper::events::status");
    }

    #[test]
    fn test_event_serialization_shape() {
        let event = AppEvent::Poller(PollerEvent::Stopped {
            reason: PollStopReason::LeftProcessing,
            ticks: 3,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "poller");
        assert_eq!(json["event"]["type"], "Stopped");
        assert_eq!(json["event"]["reason"], "left_processing");
    }
}
