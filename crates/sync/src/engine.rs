//! Front-end facing entry point

use std::sync::Arc;
use std::time::Duration;

use clipper_events::{EventEmitter, EventSender};
use clipper_net::UploadFile;
use tokio::sync::watch;

use crate::backend::PipelineBackend;
use crate::clips::ClipListSynchronizer;
use crate::poller::StatusPoller;
use crate::shared::Shared;
use crate::state::SyncState;
use crate::upload::UploadCoordinator;

/// Default time between status polls while processing
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Construction options for [`SyncEngine`]
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub poll_interval: Duration,
    pub event_sender: Option<EventSender>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            event_sender: None,
        }
    }
}

impl EngineOptions {
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }
}

/// Owns the shared state and the three components acting on it
///
/// Must be created and used inside a tokio runtime. Dropping the engine
/// stops the polling timer.
pub struct SyncEngine<B: PipelineBackend + 'static> {
    shared: Arc<Shared<B>>,
    clips: ClipListSynchronizer<B>,
    poller: StatusPoller<B>,
    uploads: UploadCoordinator<B>,
}

impl<B: PipelineBackend + 'static> SyncEngine<B> {
    #[must_use]
    pub fn new(backend: B, options: EngineOptions) -> Self {
        let shared = Arc::new(Shared::new(backend, options.event_sender));
        let clips = ClipListSynchronizer::new(Arc::clone(&shared));
        let poller = StatusPoller::new(Arc::clone(&shared), clips.clone(), options.poll_interval);
        let uploads = UploadCoordinator::new(Arc::clone(&shared), poller.clone());
        Self {
            shared,
            clips,
            poller,
            uploads,
        }
    }

    /// Initial load: clip list and status, fetched concurrently
    pub async fn mount(&self) {
        self.shared.emit_operation_started("mount");
        tokio::join!(self.clips.refresh(), self.poller.refresh_status());
        self.shared.emit_operation_completed("mount", true);
    }

    pub async fn upload(&self, file: Option<&UploadFile>) {
        self.uploads.upload(file).await;
    }

    pub async fn refresh_status(&self) {
        self.poller.refresh_status().await;
    }

    pub async fn refresh_clips(&self) {
        self.clips.refresh().await;
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> SyncState {
        self.shared.store.snapshot()
    }

    /// Receiver notified after every state transition
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.shared.store.subscribe()
    }

    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poller.is_polling()
    }

    /// Receiver tracking whether the timer runs
    #[must_use]
    pub fn subscribe_polling(&self) -> watch::Receiver<bool> {
        self.poller.subscribe_active()
    }

    /// Resolve once the timer is not running, after any clip refresh
    /// triggered by leaving `processing`
    pub async fn settled(&self) {
        let mut active = self.poller.subscribe_active();
        // The sender lives as long as the poller, so this only errs on drop
        let _ = active.wait_for(|running| !*running).await;
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poller.interval()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.shared.backend
    }

    /// Stop polling for good. Also happens on drop.
    pub fn shutdown(&self) {
        self.poller.shutdown();
    }
}

impl<B: PipelineBackend + 'static> Drop for SyncEngine<B> {
    fn drop(&mut self) {
        self.poller.shutdown();
    }
}
