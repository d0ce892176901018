/*!
 * TTS engine boundary.
 *
 * This module defines the interface to the external text-to-speech engine:
 * - `edge`: engine implementation shelling out to the edge-tts command
 * - `mock`: configurable in-memory engine for tests
 */

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

use crate::errors::EngineError;

/// One synthesis job handed to the engine
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Text to synthesize
    pub text: String,
    /// Voice identifier, e.g. "ko-KR-SunHiNeural"
    pub voice: String,
    /// Whether a caption-track artifact should be produced alongside the audio
    pub with_subtitles: bool,
}

/// Artifacts collected from one engine invocation
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// Raw audio bytes (MPEG)
    pub audio: Vec<u8>,
    /// Raw caption-track text, when requested and produced by the engine
    pub captions: Option<String>,
}

/// One entry of the engine's voice catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceInfo {
    /// Voice identifier
    pub name: String,
    /// Voice gender as reported by the engine
    pub gender: String,
    /// Content categories, e.g. "News, Novel"
    pub content_categories: String,
    /// Voice personalities, e.g. "Friendly, Positive"
    pub voice_personalities: String,
}

/// Common trait for TTS engine implementations
///
/// This trait defines the interface the HTTP layer drives, allowing the
/// real subprocess-backed engine and the test mock to be used
/// interchangeably. One call fully blocks one request; implementations
/// hold no state across calls.
#[async_trait]
pub trait TtsEngine: Send + Sync + Debug {
    /// Run one synthesis to completion and collect its artifacts
    ///
    /// # Arguments
    /// * `request` - The synthesis job to run
    ///
    /// # Returns
    /// * `Result<SynthesisOutput, EngineError>` - The collected artifacts or an error
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutput, EngineError>;

    /// List the voices the engine advertises
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, EngineError>;

    /// Check that the engine is invocable at all
    ///
    /// # Returns
    /// * `Result<(), EngineError>` - Ok if the engine responds, or an error
    async fn probe(&self) -> Result<(), EngineError>;
}

pub mod edge;
pub mod mock;

pub use edge::EdgeTtsEngine;
