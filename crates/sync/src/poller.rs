//! Status refresh and the polling timer
//!
//! The poller is a spawned task that exists only while the last observed
//! pipeline state is `processing`. Its lifetime is bounded by a
//! [`CancellationToken`] owned by the engine: leaving `processing`, calling
//! [`StatusPoller::shutdown`] or dropping the engine cancels it. The task
//! itself only holds a weak reference, so it never keeps the engine alive.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use clipper_errors::SyncError;
use clipper_events::{
    AppEvent, EventEmitter, FailureContext, PollStopReason, PollerEvent, StatusEvent,
};
use clipper_types::PipelineState;
use tokio::sync::watch;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::backend::PipelineBackend;
use crate::clips::ClipListSynchronizer;
use crate::shared::Shared;
use crate::store::Applied;
use crate::state::Transition;

/// Handle to a running poll loop. Dropping it stops the loop.
#[derive(Debug)]
struct PollTask {
    token: CancellationToken,
    ticks: Arc<AtomicU64>,
}

impl PollTask {
    fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

struct PollerInner<B> {
    shared: Arc<Shared<B>>,
    clips: ClipListSynchronizer<B>,
    interval: Duration,
    task: Mutex<Option<PollTask>>,
    active: watch::Sender<bool>,
    shut_down: AtomicBool,
}

impl<B> PollerInner<B> {
    fn task_slot(&self) -> MutexGuard<'_, Option<PollTask>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct StatusPoller<B> {
    inner: Arc<PollerInner<B>>,
}

impl<B> Clone for StatusPoller<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: PipelineBackend + 'static> StatusPoller<B> {
    pub(crate) fn new(
        shared: Arc<Shared<B>>,
        clips: ClipListSynchronizer<B>,
        interval: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(PollerInner {
                shared,
                clips,
                interval: interval.max(Duration::from_millis(1)),
                task: Mutex::new(None),
                active: watch::channel(false).0,
                shut_down: AtomicBool::new(false),
            }),
        }
    }

    /// Fetch the status once and settle the result into the shared state
    ///
    /// A success replaces the snapshot, starts or stops the timer to match
    /// the new state, and refreshes the clip list when the pipeline just
    /// left `processing`. A failure keeps the previous snapshot.
    pub async fn refresh_status(&self) {
        let shared = &self.inner.shared;
        match shared.backend.fetch_status().await {
            Ok(status) => {
                let applied = shared.store.apply(Transition::StatusFetched(status));
                self.report(&applied);

                let now = applied.current.pipeline_state();
                let was_processing = applied
                    .previous
                    .pipeline_state()
                    .is_some_and(PipelineState::is_processing);
                if was_processing && !now.is_some_and(PipelineState::is_processing) {
                    debug!("pipeline left processing, refreshing clips");
                    self.inner.clips.refresh().await;
                }

                // After the clip refresh, so "not polling" means settled
                self.reconcile_polling(now);
            }
            Err(e) => {
                let err = SyncError::status_fetch(e.to_string());
                warn!(error = %e, "status fetch failed");
                shared.emit(AppEvent::Status(StatusEvent::FetchFailed {
                    failure: FailureContext::from_error(&err),
                }));
                shared.store.apply(Transition::StatusFetchFailed(err));
            }
        }
    }

    /// Whether the timer is currently running
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.inner.task_slot().is_some()
    }

    /// Receiver tracking whether the timer runs
    ///
    /// Flips to `false` only once the refresh that stopped the timer has
    /// settled, including its clip refresh.
    #[must_use]
    pub fn subscribe_active(&self) -> watch::Receiver<bool> {
        self.inner.active.subscribe()
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Cancel the timer for good; later refreshes never restart it
    pub fn shutdown(&self) {
        self.inner.shut_down.store(true, Ordering::SeqCst);
        let task = self.inner.task_slot().take();
        if let Some(task) = task {
            self.inner.active.send_replace(false);
            self.stopped(&task, PollStopReason::Teardown);
        }
    }

    fn report(&self, applied: &Applied) {
        let shared = &self.inner.shared;
        let current = &applied.current;
        let Some(state) = current.pipeline_state() else {
            return;
        };

        let from = applied.previous.pipeline_state();
        if from != Some(state) {
            shared.emit(AppEvent::Status(StatusEvent::StateChanged { from, to: state }));
        }

        let progress = current.progress();
        shared.emit(AppEvent::Status(StatusEvent::Refreshed {
            state,
            progress: progress.percent,
            completed_steps: progress.completed,
            total_steps: progress.total,
            summary: current.summary_line().to_string(),
        }));
    }

    fn reconcile_polling(&self, state: Option<PipelineState>) {
        let processing = state.is_some_and(PipelineState::is_processing);
        let mut slot = self.inner.task_slot();

        if processing {
            if slot.is_none() && !self.inner.shut_down.load(Ordering::SeqCst) {
                *slot = Some(self.start_task());
                drop(slot);
                self.inner.active.send_replace(true);
                let interval_ms =
                    u64::try_from(self.inner.interval.as_millis()).unwrap_or(u64::MAX);
                debug!(interval_ms, "status polling started");
                self.inner
                    .shared
                    .emit(AppEvent::Poller(PollerEvent::Started { interval_ms }));
            }
        } else if let Some(task) = slot.take() {
            drop(slot);
            self.inner.active.send_replace(false);
            self.stopped(&task, PollStopReason::LeftProcessing);
        }
    }

    fn start_task(&self) -> PollTask {
        let token = CancellationToken::new();
        let ticks = Arc::new(AtomicU64::new(0));
        let period = self.inner.interval;
        // First tick one full interval after the fetch that started polling
        let ticker = time::interval_at(Instant::now() + period, period);
        tokio::spawn(poll_loop(
            Arc::downgrade(&self.inner),
            token.clone(),
            Arc::clone(&ticks),
            ticker,
        ));
        PollTask { token, ticks }
    }

    fn stopped(&self, task: &PollTask, reason: PollStopReason) {
        let ticks = task.ticks();
        debug!(?reason, ticks, "status polling stopped");
        self.inner
            .shared
            .emit(AppEvent::Poller(PollerEvent::Stopped { reason, ticks }));
    }
}

async fn poll_loop<B: PipelineBackend + 'static>(
    inner: Weak<PollerInner<B>>,
    token: CancellationToken,
    ticks: Arc<AtomicU64>,
    mut ticker: Interval,
) {
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let Some(inner) = inner.upgrade() else {
            break;
        };
        let sequence = ticks.fetch_add(1, Ordering::Relaxed) + 1;
        inner
            .shared
            .emit(AppEvent::Poller(PollerEvent::Tick { sequence }));
        StatusPoller { inner }.refresh_status().await;
    }

    debug!("status poll loop exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedBackend;
    use clipper_errors::STATUS_FETCH_FAILED_MESSAGE;
    use clipper_types::{PipelineStatus, Step, StepState};

    const INTERVAL: Duration = Duration::from_millis(1500);

    fn poller(backend: ScriptedBackend) -> StatusPoller<ScriptedBackend> {
        let shared = Arc::new(Shared::new(backend, None));
        let clips = ClipListSynchronizer::new(Arc::clone(&shared));
        StatusPoller::new(shared, clips, INTERVAL)
    }

    fn status(state: PipelineState) -> PipelineStatus {
        PipelineStatus::new(state, vec![Step::new("upload", "Upload", StepState::Completed)])
    }

    fn backend(poller: &StatusPoller<ScriptedBackend>) -> &ScriptedBackend {
        &poller.inner.shared.backend
    }

    /// Let the spawned loop observe elapsed time
    async fn advance(duration: Duration) {
        time::advance(duration).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_processing_starts_polling_and_idle_does_not() {
        let idle = poller(ScriptedBackend::new());
        backend(&idle).push_status(Ok(status(PipelineState::Idle)));
        idle.refresh_status().await;
        assert!(!idle.is_polling());

        let busy = poller(ScriptedBackend::new());
        backend(&busy).push_status(Ok(status(PipelineState::Processing)));
        busy.refresh_status().await;
        assert!(busy.is_polling());
        busy.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_polls_at_interval() {
        let poller = poller(ScriptedBackend::new());
        backend(&poller).push_status(Ok(status(PipelineState::Processing)));
        poller.refresh_status().await;
        assert_eq!(backend(&poller).status_calls(), 1);

        advance(INTERVAL - Duration::from_millis(1)).await;
        assert_eq!(backend(&poller).status_calls(), 1);

        advance(Duration::from_millis(1)).await;
        assert_eq!(backend(&poller).status_calls(), 2);

        advance(INTERVAL).await;
        assert_eq!(backend(&poller).status_calls(), 3);
        poller.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_keeps_status_and_polling() {
        let poller = poller(ScriptedBackend::new());
        backend(&poller).push_status(Ok(status(PipelineState::Processing)));
        backend(&poller).push_status(Err(()));
        poller.refresh_status().await;

        advance(INTERVAL).await;
        let state = poller.inner.shared.store.snapshot();
        assert_eq!(state.pipeline_state(), Some(PipelineState::Processing));
        assert_eq!(state.error_message(), Some(STATUS_FETCH_FAILED_MESSAGE));
        assert!(poller.is_polling());

        // Failures repeat but the timer keeps going
        advance(INTERVAL).await;
        assert_eq!(backend(&poller).status_calls(), 3);
        poller.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_processing_stops_timer_and_refreshes_clips_once() {
        let poller = poller(ScriptedBackend::new());
        backend(&poller).push_status(Ok(status(PipelineState::Processing)));
        backend(&poller).push_status(Ok(status(PipelineState::Completed)));
        poller.refresh_status().await;
        assert_eq!(backend(&poller).clip_calls(), 0);

        advance(INTERVAL).await;
        assert!(!poller.is_polling());
        assert_eq!(backend(&poller).clip_calls(), 1);

        advance(INTERVAL * 3).await;
        assert_eq!(backend(&poller).status_calls(), 2);

        // Repeated non-processing refreshes trigger nothing further
        poller.refresh_status().await;
        assert_eq!(backend(&poller).clip_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_prevents_restart() {
        let poller = poller(ScriptedBackend::new());
        backend(&poller).push_status(Ok(status(PipelineState::Processing)));
        poller.refresh_status().await;
        poller.shutdown();
        assert!(!poller.is_polling());

        poller.refresh_status().await;
        assert!(!poller.is_polling());

        advance(INTERVAL * 2).await;
        assert_eq!(backend(&poller).status_calls(), 2);
    }
}
