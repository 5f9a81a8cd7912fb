//! Built-in defaults that the configuration file can override

/// Backend address used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Delay between two status polls while the pipeline is processing
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1500;

/// Whole-request timeout for status and clip calls, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Whole-request timeout for uploads, in seconds. Videos are large.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 1800;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "clipper";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// File extensions the upload picker offers. Advisory only.
pub const ACCEPTED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm"];
