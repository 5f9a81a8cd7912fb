//! Integration tests for error types

#[cfg(test)]
mod tests {
    use clipper_errors::*;

    #[test]
    fn test_error_conversion() {
        let net_err = NetworkError::Timeout {
            url: "http://localhost:8000/status".into(),
        };
        let err: Error = net_err.into();
        assert!(matches!(err, Error::Network(_)));
        assert!(err.is_retryable());
        assert_eq!(err.user_code(), Some("network.timeout"));
    }

    #[test]
    fn test_error_display() {
        let err = NetworkError::HttpError {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "HTTP error 503: Service Unavailable");
    }

    #[test]
    fn test_sync_errors_use_fixed_user_messages() {
        let upload = SyncError::upload("connection reset");
        let status = SyncError::status_fetch("HTTP error 500");
        let clips = SyncError::clip_fetch("bad json");

        assert_eq!(upload.user_message(), UPLOAD_FAILED_MESSAGE);
        assert_eq!(status.user_message(), STATUS_FETCH_FAILED_MESSAGE);
        assert_eq!(clips.user_message(), CLIP_FETCH_FAILED_MESSAGE);

        // The cause stays available for logs
        assert_eq!(upload.reason(), "connection reset");
        assert!(status.to_string().contains("HTTP error 500"));
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        let err = NetworkError::HttpError {
            status: 404,
            message: "Not Found".into(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
        assert_eq!(err.user_code(), Some("error.io"));
    }
}
