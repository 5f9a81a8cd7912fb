//! The three backend calls the engine depends on

use std::sync::Arc;

use async_trait::async_trait;
use clipper_errors::Error;
use clipper_net::{HttpBackend, UploadFile};
use clipper_types::{ClipId, PipelineStatus};

/// Processing backend as seen by the sync engine
///
/// Implemented by [`HttpBackend`]; tests substitute scripted backends.
#[async_trait]
pub trait PipelineBackend: Send + Sync {
    /// Submit a video for processing
    async fn upload(&self, file: &UploadFile) -> Result<(), Error>;

    /// Fetch the current pipeline snapshot
    async fn fetch_status(&self) -> Result<PipelineStatus, Error>;

    /// Fetch produced clip ids in display order
    async fn fetch_clips(&self) -> Result<Vec<ClipId>, Error>;
}

#[async_trait]
impl PipelineBackend for HttpBackend {
    async fn upload(&self, file: &UploadFile) -> Result<(), Error> {
        HttpBackend::upload(self, file).await
    }

    async fn fetch_status(&self) -> Result<PipelineStatus, Error> {
        HttpBackend::fetch_status(self).await
    }

    async fn fetch_clips(&self) -> Result<Vec<ClipId>, Error> {
        HttpBackend::fetch_clips(self).await
    }
}

#[async_trait]
impl<T: PipelineBackend + ?Sized> PipelineBackend for Arc<T> {
    async fn upload(&self, file: &UploadFile) -> Result<(), Error> {
        (**self).upload(file).await
    }

    async fn fetch_status(&self) -> Result<PipelineStatus, Error> {
        (**self).fetch_status().await
    }

    async fn fetch_clips(&self) -> Result<Vec<ClipId>, Error> {
        (**self).fetch_clips().await
    }
}
