use async_trait::async_trait;
use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};
use tokio::process::Command;

use crate::app_config::EngineConfig;
use crate::errors::EngineError;
use crate::tts_engine::{SynthesisOutput, SynthesisRequest, TtsEngine, VoiceInfo};

// @module: edge-tts subprocess engine

// @const: Column separator of the --list-voices table
static VOICE_TABLE_COLUMNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// TTS engine backed by the edge-tts command-line tool
///
/// Each synthesis shells out once: the engine writes its audio artifact
/// (and optionally a WebVTT caption artifact) into scoped temporary files
/// that are removed again on every exit path, success or failure.
#[derive(Debug, Clone)]
pub struct EdgeTtsEngine {
    /// Command name or path of the engine binary
    command: String,
    /// Subprocess timeout in seconds
    timeout_secs: u64,
}

impl EdgeTtsEngine {
    /// Create an engine from the application configuration
    pub fn new(config: &EngineConfig) -> Self {
        EdgeTtsEngine {
            command: config.command.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    /// Run the engine with the given arguments, enforcing the timeout
    async fn run_engine(&self, args: &[&str]) -> Result<std::process::Output, EngineError> {
        let engine_future = Command::new(&self.command).args(args).output();

        let timeout_duration = std::time::Duration::from_secs(self.timeout_secs);
        let output = tokio::select! {
            result = engine_future => {
                result.map_err(|e| EngineError::SpawnFailed {
                    command: self.command.clone(),
                    message: e.to_string(),
                })?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(EngineError::Timeout(self.timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = filter_engine_stderr(&stderr);
            error!("TTS engine invocation failed: {}", filtered);
            return Err(EngineError::Failed {
                status: output.status.to_string(),
                message: filtered,
            });
        }

        Ok(output)
    }

    /// Allocate a scoped temporary artifact file with the given suffix
    fn artifact_file(suffix: &str) -> Result<NamedTempFile, EngineError> {
        Ok(Builder::new().prefix("speakd-").suffix(suffix).tempfile()?)
    }
}

#[async_trait]
impl TtsEngine for EdgeTtsEngine {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutput, EngineError> {
        // Temp files live until the end of this call; dropping them removes
        // the artifacts on success and failure alike
        let audio_file = Self::artifact_file(".mp3")?;
        let caption_file = if request.with_subtitles {
            Some(Self::artifact_file(".vtt")?)
        } else {
            None
        };

        let audio_path = audio_file.path().to_string_lossy().to_string();
        let mut args = vec![
            "--text",
            request.text.as_str(),
            "--voice",
            request.voice.as_str(),
            "--write-media",
            audio_path.as_str(),
        ];

        let caption_path = caption_file
            .as_ref()
            .map(|f| f.path().to_string_lossy().to_string());
        if let Some(path) = &caption_path {
            args.push("--write-subtitles");
            args.push(path.as_str());
        }

        debug!(
            "Invoking TTS engine '{}' for {} chars, voice {}",
            self.command,
            request.text.chars().count(),
            request.voice
        );
        self.run_engine(&args).await?;

        let audio = std::fs::read(audio_file.path())?;
        if audio.is_empty() {
            return Err(EngineError::MissingArtifact(
                "audio artifact is empty".to_string(),
            ));
        }

        // The engine may legitimately skip the caption artifact, e.g. for
        // text it produced no word boundaries for; surface that as absence
        let captions = match &caption_file {
            Some(file) if artifact_present(file.path()) => {
                Some(std::fs::read_to_string(file.path())?)
            }
            _ => None,
        };

        Ok(SynthesisOutput { audio, captions })
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, EngineError> {
        let output = self.run_engine(&["--list-voices"]).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_voice_table(&stdout))
    }

    async fn probe(&self) -> Result<(), EngineError> {
        self.run_engine(&["--help"]).await.map(|_| ())
    }
}

/// Whether an artifact file exists and holds any content
fn artifact_present(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false)
}

/// Parse the engine's `--list-voices` table into voice entries.
///
/// The table is column-aligned text with a header row and a dashed rule,
/// columns separated by runs of two or more spaces:
///
/// ```text
/// Name                Gender    ContentCategories    VoicePersonalities
/// ------------------  --------  -------------------  ------------------
/// ko-KR-SunHiNeural   Female    General              Friendly, Positive
/// ```
///
/// Header, rule, and ragged rows are skipped rather than failing the call.
pub fn parse_voice_table(table: &str) -> Vec<VoiceInfo> {
    let mut voices = Vec::new();

    for line in table.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with("Name")
            || trimmed.starts_with('-')
        {
            continue;
        }

        let fields: Vec<&str> = VOICE_TABLE_COLUMNS.splitn(trimmed, 4).collect();
        if fields.len() < 2 {
            debug!("Skipping unrecognized voice table row: {}", trimmed);
            continue;
        }

        voices.push(VoiceInfo {
            name: fields[0].trim().to_string(),
            gender: fields[1].trim().to_string(),
            content_categories: fields.get(2).map_or(String::new(), |f| f.trim().to_string()),
            voice_personalities: fields.get(3).map_or(String::new(), |f| f.trim().to_string()),
        });
    }

    voices
}

/// Filter engine stderr down to meaningful error lines, dropping empty
/// lines and the progress noise some engine builds emit.
pub fn filter_engine_stderr(stderr: &str) -> String {
    let noise_prefixes = ["WARNING:", "DeprecationWarning"];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !noise_prefixes.iter().any(|p| trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown engine error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
