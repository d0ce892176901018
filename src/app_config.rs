use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Host interface the HTTP server binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// External TTS engine config
    #[serde(default)]
    pub engine: EngineConfig,

    /// Maximum accepted length of the `text` field, in characters
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// External TTS engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    // @field: Engine command name or path
    #[serde(default = "default_engine_command")]
    pub command: String,

    // @field: Voice used when a request does not name one
    #[serde(default = "default_voice")]
    pub default_voice: String,

    // @field: Subprocess timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: default_engine_command(),
            default_voice: default_voice(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_engine_command() -> String {
    "edge-tts".to_string()
}

fn default_voice() -> String {
    "ko-KR-SunHiNeural".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_text_length() -> usize {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            engine: EngineConfig::default(),
            max_text_length: default_max_text_length(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow!("Host must not be empty"));
        }

        if self.engine.command.trim().is_empty() {
            return Err(anyhow!("Engine command must not be empty"));
        }

        if self.engine.default_voice.trim().is_empty() {
            return Err(anyhow!("Default voice must not be empty"));
        }

        if self.engine.timeout_secs == 0 {
            return Err(anyhow!("Engine timeout must be at least 1 second"));
        }

        if self.max_text_length == 0 {
            return Err(anyhow!("Maximum text length must be at least 1 character"));
        }

        Ok(())
    }
}
