//! Keeps the held clip list in step with `GET /clips`

use std::sync::Arc;

use clipper_errors::SyncError;
use clipper_events::{AppEvent, ClipsEvent, EventEmitter, FailureContext};
use tracing::{debug, warn};

use crate::backend::PipelineBackend;
use crate::shared::Shared;
use crate::state::Transition;

pub struct ClipListSynchronizer<B> {
    shared: Arc<Shared<B>>,
}

impl<B> Clone for ClipListSynchronizer<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<B: PipelineBackend> ClipListSynchronizer<B> {
    pub(crate) fn new(shared: Arc<Shared<B>>) -> Self {
        Self { shared }
    }

    /// Fetch the clip ids and replace the held list wholesale
    ///
    /// On failure the previous list is kept and the clip error is shown.
    pub async fn refresh(&self) {
        match self.shared.backend.fetch_clips().await {
            Ok(clips) => {
                let count = clips.len();
                debug!(count, "clip list refreshed");
                self.shared.store.apply(Transition::ClipsFetched(clips));
                self.shared
                    .emit(AppEvent::Clips(ClipsEvent::Refreshed { count }));
            }
            Err(e) => {
                let err = SyncError::clip_fetch(e.to_string());
                warn!(error = %e, "clip list fetch failed");
                self.shared.emit(AppEvent::Clips(ClipsEvent::FetchFailed {
                    failure: FailureContext::from_error(&err),
                }));
                self.shared.store.apply(Transition::ClipsFetchFailed(err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedBackend;
    use clipper_errors::CLIP_FETCH_FAILED_MESSAGE;
    use clipper_types::ClipId;

    fn synchronizer(backend: ScriptedBackend) -> ClipListSynchronizer<ScriptedBackend> {
        ClipListSynchronizer::new(Arc::new(Shared::new(backend, None)))
    }

    #[tokio::test]
    async fn test_refresh_replaces_list_in_order() {
        let backend = ScriptedBackend::new();
        backend.set_clips(Ok(vec![ClipId::new("b"), ClipId::new("a")]));
        let sync = synchronizer(backend);

        sync.refresh().await;

        let state = sync.shared.store.snapshot();
        assert_eq!(state.clips(), &[ClipId::new("b"), ClipId::new("a")]);
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_list() {
        let backend = ScriptedBackend::new();
        backend.set_clips(Ok(vec![ClipId::new("a")]));
        let sync = synchronizer(backend);
        sync.refresh().await;

        sync.shared.backend.set_clips(Err(()));
        sync.refresh().await;

        let state = sync.shared.store.snapshot();
        assert_eq!(state.clips(), &[ClipId::new("a")]);
        assert_eq!(state.error_message(), Some(CLIP_FETCH_FAILED_MESSAGE));
        assert_eq!(sync.shared.backend.clip_calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let backend = ScriptedBackend::new();
        backend.set_clips(Ok(vec![ClipId::new("x"), ClipId::new("y")]));
        let sync = synchronizer(backend);

        sync.refresh().await;
        let first = sync.shared.store.snapshot();
        sync.refresh().await;

        assert_eq!(sync.shared.store.snapshot(), first);
    }
}
