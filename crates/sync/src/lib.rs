#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Status reconciliation for clipper
//!
//! Keeps a local view of the processing backend in sync: submits uploads,
//! polls `/status` while the pipeline is busy, reloads the clip list when
//! processing ends, and derives progress and summary text for display.
//! All of it lives in one [`SyncState`] record that only changes through
//! [`Transition`]s.

mod backend;
mod clips;
mod derive;
mod engine;
mod poller;
mod shared;
mod state;
mod store;
mod upload;

#[cfg(test)]
mod test_support;

pub use backend::PipelineBackend;
pub use clips::ClipListSynchronizer;
pub use derive::{
    compose_summary, derive_progress, present_steps, step_icon, Progress, StepView,
    FAILED_TEXT, IDLE_TEXT, PROCESSING_TEXT, WAITING_TEXT,
};
pub use engine::{EngineOptions, SyncEngine, DEFAULT_POLL_INTERVAL};
pub use poller::StatusPoller;
pub use state::{SyncState, Transition};
pub use store::{Applied, StateStore};
pub use upload::UploadCoordinator;
