//! Integration tests for logging system

use core_runtime::logging::{init_logging, redact_url, LogFormat, LogLevel, LoggingConfig};

#[test]
fn test_logging_initializes_once() {
    // Only one global subscriber may be installed per process.
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug);

    init_logging(config.clone()).unwrap();
    assert!(init_logging(config).is_err());

    tracing::info!(url = redact_url("https://cdn.example.com/v.mp4?sig=1"), "logged");
}

#[test]
fn test_invalid_filter_is_rejected() {
    let config = LoggingConfig::default().with_filter("core_media=notalevel");
    assert!(init_logging(config).is_err());
}

#[test]
fn test_redaction_keeps_host_and_path() {
    let signed = "https://storage.example.com/exercises/squat.mp4\
                  ?X-Goog-Signature=deadbeef&X-Goog-Expires=900";
    assert_eq!(
        redact_url(signed),
        "https://storage.example.com/exercises/squat.mp4"
    );

    let proxied = "/api/video-proxy?url=https%3A%2F%2Fexample.com%2Fa.mp4";
    assert_eq!(redact_url(proxied), "/api/video-proxy");
}

#[test]
fn test_format_selection() {
    #[cfg(debug_assertions)]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[cfg(not(debug_assertions))]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
    }
}

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Warn)
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true);

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, LogLevel::Warn);
    assert!(!config.enable_spans);
    assert!(!config.display_target);
    assert!(config.display_thread_info);
}
