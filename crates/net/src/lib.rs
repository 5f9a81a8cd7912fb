#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for clipper
//!
//! This crate owns every HTTP call to the processing backend: the video
//! upload, status and clip list fetches, and the per-clip edit endpoints.

mod backend;
mod client;
mod upload;

pub use backend::HttpBackend;
pub use client::{NetClient, NetConfig};
pub use upload::UploadFile;

use clipper_errors::{Error, NetworkError};
use url::Url;

/// Parse and validate a URL
///
/// # Errors
///
/// Returns an error if the URL string is malformed or invalid according to RFC 3986.
pub fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()).into())
}
