/*!
 * Error types for the speakd application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while parsing a caption track
#[derive(Error, Debug)]
pub enum CaptionError {
    /// A timing token could not be converted to seconds
    #[error("Malformed timestamp '{token}' at line {line}: {reason}")]
    MalformedTimestamp {
        /// The offending timing token, as it appeared in the document
        token: String,
        /// 1-based line number of the timing line
        line: usize,
        /// What made the token unparseable
        reason: String,
    },
}

/// Errors that can occur when invoking the external TTS engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine binary could not be started at all
    #[error("Failed to spawn TTS engine '{command}': {message}")]
    SpawnFailed {
        /// The command that was attempted
        command: String,
        /// Underlying spawn error
        message: String,
    },

    /// The engine ran but exited with a non-zero status
    #[error("TTS engine exited with {status}: {message}")]
    Failed {
        /// Exit status description
        status: String,
        /// Filtered stderr output
        message: String,
    },

    /// The engine did not finish within the configured timeout
    #[error("TTS engine timed out after {0} seconds")]
    Timeout(u64),

    /// The engine reported success but an expected artifact is unusable
    #[error("TTS engine produced no usable artifact: {0}")]
    MissingArtifact(String),

    /// Error reading or writing an engine artifact
    #[error("Artifact I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the TTS engine boundary
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Error from caption parsing
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Error in the application configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
