//! Typed access to the processing backend's HTTP surface

use clipper_config::Config;
use clipper_errors::Error;
use clipper_types::{ClipConfig, ClipId, ClipResources, PipelineStatus};
use tracing::debug;

use crate::client::{NetClient, NetConfig};
use crate::upload::UploadFile;

/// Client for one backend instance
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: NetClient,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn new(client: NetClient, base_url: &str) -> Result<Self, Error> {
        crate::parse_url(base_url)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the client and backend from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or the base URL
    /// is invalid.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let client = NetClient::new(NetConfig::from(config))?;
        Self::new(client, config.base_url())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /upload` with the video under the `file` field. The response
    /// body is opaque; only the status code matters.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the request fails or
    /// the backend answers with a non-success status.
    pub async fn upload(&self, file: &UploadFile) -> Result<(), Error> {
        let url = self.endpoint("/upload");
        debug!(url = %url, file = file.file_name(), size = file.size(), "uploading video");
        let form = file.to_form().await?;
        self.client.post_multipart(&url, form).await?;
        Ok(())
    }

    /// `GET /status`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a body
    /// that is not a status object.
    pub async fn fetch_status(&self) -> Result<PipelineStatus, Error> {
        let url = self.endpoint("/status");
        debug!(url = %url, "fetching pipeline status");
        self.client.get_json(&url).await
    }

    /// `GET /clips`, in display order
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a body
    /// that is not an array of strings.
    pub async fn fetch_clips(&self) -> Result<Vec<ClipId>, Error> {
        let url = self.endpoint("/clips");
        debug!(url = %url, "fetching clip list");
        self.client.get_json(&url).await
    }

    /// `GET /clips/{id}`; the backend creates the default config on first read
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// undecodable body.
    pub async fn fetch_clip_config(&self, clip: &ClipId) -> Result<ClipConfig, Error> {
        let url = self.endpoint(&format!("/clips/{clip}"));
        self.client.get_json(&url).await
    }

    /// `POST /clips/{id}/config`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn save_clip_config(&self, clip: &ClipId, config: &ClipConfig) -> Result<(), Error> {
        let url = self.endpoint(&format!("/clips/{clip}/config"));
        self.client.post_json(&url, config).await?;
        Ok(())
    }

    /// `POST /clips/{id}/render`; produces the preview resource
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn render_clip(&self, clip: &ClipId) -> Result<(), Error> {
        let url = self.endpoint(&format!("/clips/{clip}/render"));
        debug!(url = %url, "requesting clip render");
        self.client.post_empty(&url).await?;
        Ok(())
    }

    /// Links for a clip's raw video, subtitles and preview
    #[must_use]
    pub fn clip_resources(&self, clip: &ClipId) -> ClipResources {
        clip.resources(&self.base_url)
    }
}
