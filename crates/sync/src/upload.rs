//! Upload submission

use std::sync::Arc;

use clipper_errors::SyncError;
use clipper_events::{AppEvent, EventEmitter, FailureContext, UploadEvent};
use clipper_net::UploadFile;
use tracing::{debug, error, info};

use crate::backend::PipelineBackend;
use crate::poller::StatusPoller;
use crate::shared::Shared;
use crate::state::Transition;
use crate::store::StateStore;

/// Clears the uploading flag however the upload future ends
struct UploadingGuard<'a> {
    store: &'a StateStore,
}

impl Drop for UploadingGuard<'_> {
    fn drop(&mut self) {
        self.store.apply(Transition::UploadFinished);
    }
}

pub struct UploadCoordinator<B> {
    shared: Arc<Shared<B>>,
    poller: StatusPoller<B>,
}

impl<B> Clone for UploadCoordinator<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            poller: self.poller.clone(),
        }
    }
}

impl<B: PipelineBackend + 'static> UploadCoordinator<B> {
    pub(crate) fn new(shared: Arc<Shared<B>>, poller: StatusPoller<B>) -> Self {
        Self { shared, poller }
    }

    /// Submit `file`, then refresh the status whatever the outcome
    ///
    /// `None` is a no-op. The uploading flag is set for the whole call,
    /// including the follow-up status refresh, and is cleared even when the
    /// future is dropped part way.
    pub async fn upload(&self, file: Option<&UploadFile>) {
        let Some(file) = file else {
            debug!("no file selected, skipping upload");
            return;
        };

        self.shared.store.apply(Transition::UploadStarted);
        let _uploading = UploadingGuard {
            store: &self.shared.store,
        };

        let file_name = file.file_name().to_string();
        info!(file = %file_name, size = file.size(), "upload started");
        self.shared.emit(AppEvent::Upload(UploadEvent::Started {
            file_name: file_name.clone(),
            size_bytes: Some(file.size()),
        }));

        match self.shared.backend.upload(file).await {
            Ok(()) => {
                self.shared.store.apply(Transition::UploadSucceeded);
                self.shared
                    .emit(AppEvent::Upload(UploadEvent::Completed { file_name }));
            }
            Err(e) => {
                let err = SyncError::upload(e.to_string());
                error!(file = %file_name, error = %e, "upload failed");
                self.shared.emit(AppEvent::Upload(UploadEvent::Failed {
                    file_name,
                    failure: FailureContext::from_error(&err),
                }));
                self.shared.store.apply(Transition::UploadFailed(err));
            }
        }

        self.poller.refresh_status().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clips::ClipListSynchronizer;
    use crate::test_support::ScriptedBackend;
    use clipper_errors::UPLOAD_FAILED_MESSAGE;
    use clipper_types::{PipelineState, PipelineStatus};
    use std::time::Duration;

    async fn video(dir: &tempfile::TempDir) -> UploadFile {
        let path = dir.path().join("talk.mp4");
        tokio::fs::write(&path, b"not really a video").await.unwrap();
        UploadFile::from_path(&path).await.unwrap()
    }

    fn coordinator(backend: ScriptedBackend) -> UploadCoordinator<ScriptedBackend> {
        let shared = Arc::new(Shared::new(backend, None));
        let clips = ClipListSynchronizer::new(Arc::clone(&shared));
        let poller = StatusPoller::new(Arc::clone(&shared), clips, Duration::from_millis(1500));
        UploadCoordinator::new(shared, poller)
    }

    #[tokio::test]
    async fn test_no_file_is_a_no_op() {
        let uploads = coordinator(ScriptedBackend::new());
        let before = uploads.shared.store.snapshot();

        uploads.upload(None).await;

        assert_eq!(uploads.shared.store.snapshot(), before);
        assert_eq!(uploads.shared.backend.upload_calls(), 0);
        assert_eq!(uploads.shared.backend.status_calls(), 0);
    }

    #[tokio::test]
    async fn test_success_clears_flag_and_refreshes_status() {
        let dir = tempfile::tempdir().unwrap();
        let file = video(&dir).await;
        let backend = ScriptedBackend::new();
        backend.push_status(Ok(PipelineStatus::new(PipelineState::Idle, vec![])));
        let uploads = coordinator(backend);

        uploads.upload(Some(&file)).await;

        let state = uploads.shared.store.snapshot();
        assert!(!state.is_uploading());
        assert!(state.error().is_none());
        assert_eq!(uploads.shared.backend.upload_calls(), 1);
        assert_eq!(uploads.shared.backend.status_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_sets_message_and_still_refreshes() {
        let dir = tempfile::tempdir().unwrap();
        let file = video(&dir).await;
        let backend = ScriptedBackend::new();
        backend.set_upload(Err(()));
        backend.push_status(Ok(PipelineStatus::new(PipelineState::Idle, vec![])));
        let uploads = coordinator(backend);

        uploads.upload(Some(&file)).await;

        let state = uploads.shared.store.snapshot();
        assert!(!state.is_uploading());
        assert_eq!(state.error_message(), Some(UPLOAD_FAILED_MESSAGE));
        assert_eq!(state.pipeline_state(), Some(PipelineState::Idle));
        assert_eq!(uploads.shared.backend.status_calls(), 1);
    }

    #[tokio::test]
    async fn test_upload_clears_previous_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = video(&dir).await;
        let backend = ScriptedBackend::new();
        backend.push_status(Ok(PipelineStatus::new(PipelineState::Idle, vec![])));
        let uploads = coordinator(backend);
        uploads
            .shared
            .store
            .apply(Transition::ClipsFetchFailed(SyncError::clip_fetch("offline")));

        uploads.upload(Some(&file)).await;

        assert!(uploads.shared.store.snapshot().error().is_none());
    }
}
