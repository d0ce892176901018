/*!
 * Mock engine implementation for testing.
 *
 * This module provides a mock engine that simulates different behaviors:
 * - `MockTtsEngine::working()` - Always succeeds with audio and captions
 * - `MockTtsEngine::without_captions()` - Succeeds but never writes captions
 * - `MockTtsEngine::failing()` - Always fails like a broken engine binary
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::EngineError;
use crate::tts_engine::{SynthesisOutput, SynthesisRequest, TtsEngine, VoiceInfo};

/// Behavior mode for the mock engine
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, producing audio and (when asked) a caption track
    Working,
    /// Succeeds but never produces a caption artifact
    WithoutCaptions,
    /// Succeeds but produces a caption track with a broken timing line
    MalformedCaptions,
    /// Always fails as if the engine exited non-zero
    Failing,
    /// Always fails as if the engine binary were missing
    Unreachable,
}

/// Default caption track handed back by the working mock
const SAMPLE_CAPTIONS: &str = "WEBVTT\n\n00:00:00.000 --> 00:00:02.500\nHello world\n";

/// Mock TTS engine for exercising the HTTP layer without the real binary
#[derive(Debug)]
pub struct MockTtsEngine {
    /// Behavior mode
    behavior: MockBehavior,
    /// Caption track returned on successful synthesis
    captions: String,
    /// Number of synthesize calls served
    call_count: Arc<AtomicUsize>,
}

impl MockTtsEngine {
    /// Create a new mock engine with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            captions: SAMPLE_CAPTIONS.to_string(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock engine that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock engine that never produces captions
    pub fn without_captions() -> Self {
        Self::new(MockBehavior::WithoutCaptions)
    }

    /// Create a mock engine that produces an unparseable caption track
    pub fn malformed_captions() -> Self {
        Self::new(MockBehavior::MalformedCaptions)
    }

    /// Create a mock engine that always fails with a non-zero exit
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock engine that cannot be spawned at all
    pub fn unreachable() -> Self {
        Self::new(MockBehavior::Unreachable)
    }

    /// Replace the caption track returned on success
    pub fn with_captions(mut self, captions: impl Into<String>) -> Self {
        self.captions = captions.into();
        self
    }

    /// Number of synthesize calls served so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TtsEngine for MockTtsEngine {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutput, EngineError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Failing => Err(EngineError::Failed {
                status: "exit status: 1".to_string(),
                message: "mock engine failure".to_string(),
            }),
            MockBehavior::Unreachable => Err(EngineError::SpawnFailed {
                command: "mock-tts".to_string(),
                message: "No such file or directory".to_string(),
            }),
            MockBehavior::WithoutCaptions => Ok(SynthesisOutput {
                audio: mock_audio(&request.text),
                captions: None,
            }),
            MockBehavior::MalformedCaptions => Ok(SynthesisOutput {
                audio: mock_audio(&request.text),
                captions: request
                    .with_subtitles
                    .then(|| "00:00:aa.000 --> 00:00:02.000\nBroken\n".to_string()),
            }),
            MockBehavior::Working => Ok(SynthesisOutput {
                audio: mock_audio(&request.text),
                captions: request.with_subtitles.then(|| self.captions.clone()),
            }),
        }
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, EngineError> {
        match self.behavior {
            MockBehavior::Failing | MockBehavior::Unreachable => Err(EngineError::Failed {
                status: "exit status: 1".to_string(),
                message: "mock engine failure".to_string(),
            }),
            _ => Ok(vec![
                VoiceInfo {
                    name: "ko-KR-SunHiNeural".to_string(),
                    gender: "Female".to_string(),
                    content_categories: "General".to_string(),
                    voice_personalities: "Friendly, Positive".to_string(),
                },
                VoiceInfo {
                    name: "en-US-GuyNeural".to_string(),
                    gender: "Male".to_string(),
                    content_categories: "News, Novel".to_string(),
                    voice_personalities: "Passion".to_string(),
                },
            ]),
        }
    }

    async fn probe(&self) -> Result<(), EngineError> {
        match self.behavior {
            MockBehavior::Unreachable => Err(EngineError::SpawnFailed {
                command: "mock-tts".to_string(),
                message: "No such file or directory".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Deterministic fake audio payload derived from the input text
fn mock_audio(text: &str) -> Vec<u8> {
    let mut bytes = b"MOCKMPEG".to_vec();
    bytes.extend_from_slice(text.as_bytes());
    bytes
}
