//! HTTP client wrapper
//!
//! Calls are issued exactly once. Failed requests are reported to the caller,
//! which decides what the user sees; nothing here retries.

use clipper_config::Config;
use clipper_errors::{Error, NetworkError};
use reqwest::multipart::Form;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub upload_timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(clipper_config::DEFAULT_TIMEOUT_SECS),
            upload_timeout: Duration::from_secs(clipper_config::DEFAULT_UPLOAD_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(clipper_config::DEFAULT_CONNECT_TIMEOUT_SECS),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 4,
            user_agent: format!("clipper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&Config> for NetConfig {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.request_timeout(),
            upload_timeout: config.upload_timeout(),
            connect_timeout: config.connect_timeout(),
            ..Self::default()
        }
    }
}

/// HTTP client wrapper
#[derive(Clone, Debug)]
pub struct NetClient {
    client: Client,
    config: NetConfig,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        // Per-request timeouts are set on each call so uploads can run longer
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ConnectionRefused(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    /// Execute a GET request and require a 2xx answer
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        let response = self
            .client
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e))?;
        ensure_success(response)
    }

    /// GET a URL and decode the JSON body
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or a body
    /// that does not decode into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let response = self.get(url).await?;
        decode_json(url, response).await
    }

    /// POST a JSON body and require a 2xx answer
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, Error> {
        let response = self
            .client
            .post(url)
            .timeout(self.config.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e))?;
        ensure_success(response)
    }

    /// POST without a body and require a 2xx answer
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn post_empty(&self, url: &str) -> Result<Response, Error> {
        let response = self
            .client
            .post(url)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e))?;
        ensure_success(response)
    }

    /// POST a multipart form using the longer upload timeout
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn post_multipart(&self, url: &str, form: Form) -> Result<Response, Error> {
        let response = self
            .client
            .post(url)
            .timeout(self.config.upload_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e))?;
        ensure_success(response)
    }

    #[must_use]
    pub fn config(&self) -> &NetConfig {
        &self.config
    }
}

fn ensure_success(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(NetworkError::HttpError {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .map_or_else(|| status.to_string(), ToString::to_string),
        }
        .into())
    }
}

async fn decode_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, Error> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| map_reqwest_error(&e))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        NetworkError::InvalidResponse {
            url: url.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Classify a reqwest failure
fn map_reqwest_error(e: &reqwest::Error) -> Error {
    let url = e
        .url()
        .map(std::string::ToString::to_string)
        .unwrap_or_default();
    if e.is_timeout() {
        NetworkError::Timeout { url }.into()
    } else if e.is_connect() {
        NetworkError::ConnectionRefused(e.to_string()).into()
    } else {
        NetworkError::RequestFailed(e.to_string()).into()
    }
}
