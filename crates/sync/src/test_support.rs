//! Scripted backend for unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use clipper_errors::{Error, NetworkError};
use clipper_net::UploadFile;
use clipper_types::{ClipId, PipelineStatus};

use crate::backend::PipelineBackend;

/// Replays queued status results; the last one repeats once the queue drains
#[derive(Debug, Default)]
pub(crate) struct ScriptedBackend {
    statuses: Mutex<VecDeque<Result<PipelineStatus, ()>>>,
    clips: Mutex<Option<Result<Vec<ClipId>, ()>>>,
    upload: Mutex<Option<Result<(), ()>>>,
    status_calls: AtomicUsize,
    clip_calls: AtomicUsize,
    upload_calls: AtomicUsize,
}

fn scripted_failure() -> Error {
    NetworkError::HttpError {
        status: 500,
        message: "scripted failure".to_string(),
    }
    .into()
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_status(&self, status: Result<PipelineStatus, ()>) {
        self.statuses.lock().unwrap().push_back(status);
    }

    pub(crate) fn set_clips(&self, clips: Result<Vec<ClipId>, ()>) {
        *self.clips.lock().unwrap() = Some(clips);
    }

    pub(crate) fn set_upload(&self, result: Result<(), ()>) {
        *self.upload.lock().unwrap() = Some(result);
    }

    pub(crate) fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn clip_calls(&self) -> usize {
        self.clip_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PipelineBackend for ScriptedBackend {
    async fn upload(&self, _file: &UploadFile) -> Result<(), Error> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = *self.upload.lock().unwrap();
        scripted.unwrap_or(Ok(())).map_err(|()| scripted_failure())
    }

    async fn fetch_status(&self) -> Result<PipelineStatus, Error> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let mut queue = self.statuses.lock().unwrap();
        let next = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        next.unwrap_or(Err(())).map_err(|()| scripted_failure())
    }

    async fn fetch_clips(&self) -> Result<Vec<ClipId>, Error> {
        self.clip_calls.fetch_add(1, Ordering::SeqCst);
        self.clips
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
            .map_err(|()| scripted_failure())
    }
}
