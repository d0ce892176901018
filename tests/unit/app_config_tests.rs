/*!
 * Tests for application configuration handling
 */

use speakd::app_config::{Config, LogLevel};

/// Test that the default configuration is valid
#[test]
fn test_default_config_withNoOverrides_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.engine.command, "edge-tts");
    assert_eq!(config.engine.default_voice, "ko-KR-SunHiNeural");
    assert_eq!(config.engine.timeout_secs, 120);
    assert_eq!(config.max_text_length, 5000);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that missing fields fall back to serde defaults
#[test]
fn test_config_deserialization_withPartialJson_shouldFillDefaults() {
    let json = r#"{ "port": 9000, "engine": { "default_voice": "en-US-GuyNeural" } }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.port, 9000);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.engine.default_voice, "en-US-GuyNeural");
    assert_eq!(config.engine.command, "edge-tts");
    assert!(config.validate().is_ok());
}

/// Test that an empty engine command is rejected
#[test]
fn test_config_validation_withEmptyEngineCommand_shouldFail() {
    let mut config = Config::default();
    config.engine.command = "  ".to_string();
    assert!(config.validate().is_err());
}

/// Test that an empty default voice is rejected
#[test]
fn test_config_validation_withEmptyVoice_shouldFail() {
    let mut config = Config::default();
    config.engine.default_voice = String::new();
    assert!(config.validate().is_err());
}

/// Test that a zero timeout is rejected
#[test]
fn test_config_validation_withZeroTimeout_shouldFail() {
    let mut config = Config::default();
    config.engine.timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// Test that a zero text length cap is rejected
#[test]
fn test_config_validation_withZeroMaxTextLength_shouldFail() {
    let mut config = Config::default();
    config.max_text_length = 0;
    assert!(config.validate().is_err());
}

/// Test log level serialization round-trip
#[test]
fn test_log_level_serialization_withAllLevels_shouldRoundTrip() {
    let config = Config {
        log_level: LogLevel::Debug,
        ..Config::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"debug\""));

    let parsed: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.log_level, LogLevel::Debug);
}
