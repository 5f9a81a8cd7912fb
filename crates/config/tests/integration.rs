//! Integration tests for config

#[cfg(test)]
mod tests {
    use clipper_config::*;
    use clipper_types::ColorChoice;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for var in [
            "CLIPPER_API_URL",
            "CLIPPER_POLL_INTERVAL_MS",
            "CLIPPER_TIMEOUT",
            "CLIPPER_COLOR",
        ] {
            std::env::remove_var(var);
        }
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
color = "never"

[api]
base_url = "http://render-box:8000"

[polling]
interval_ms = 500
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.color, ColorChoice::Never);
        assert_eq!(config.base_url(), "http://render-box:8000");
        assert_eq!(config.polling.interval_ms, 500);
        // Untouched sections keep their defaults
        assert_eq!(config.network, NetworkConfig::default());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_file(&dir.path().join("absent.toml"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            clipper_errors::Error::Config(clipper_errors::ConfigError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "https://clips.example.org".to_string();
        config.polling.interval_ms = 2500;
        config.save_to(&path).await.unwrap();

        let reloaded = Config::load_from_file(&path).await.unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("CLIPPER_API_URL", "http://10.0.0.2:8000");
        std::env::set_var("CLIPPER_POLL_INTERVAL_MS", "750");
        std::env::set_var("CLIPPER_COLOR", "always");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.base_url(), "http://10.0.0.2:8000");
        assert_eq!(config.polling.interval_ms, 750);
        assert_eq!(config.general.color, ColorChoice::Always);

        clear_env();
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("CLIPPER_POLL_INTERVAL_MS", "soon");

        let mut config = Config::default();
        assert!(config.merge_env().is_err());

        clear_env();
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = "localhost:8000/api".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.base_url = "ftp://files.example.org".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.polling.interval_ms = 0;
        assert!(config.validate().is_err());
    }
}
