/*!
 * # speakd - Speech synthesis bridge with time-aligned captions
 *
 * A Rust service exposing an HTTP endpoint that converts text to speech by
 * shelling out to an external TTS engine (edge-tts by default).
 *
 * ## Features
 *
 * - Synthesize speech from text over a simple JSON API
 * - Optional time-aligned subtitles parsed from the engine's caption track
 * - Voice catalog listing straight from the engine
 * - Per-request scoped temporary artifacts, cleaned up on every exit path
 * - Configurable engine command, default voice, and timeout
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `caption_parser`: Caption-track parsing into timed cues
 * - `tts_engine`: External engine boundary:
 *   - `tts_engine::edge`: edge-tts subprocess implementation
 *   - `tts_engine::mock`: In-memory engine for tests
 * - `server`: HTTP routes, request validation, and response shaping
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod caption_parser;
pub mod errors;
pub mod server;
pub mod tts_engine;

// Re-export main types for easier usage
pub use app_config::Config;
pub use caption_parser::{parse_caption_track, parse_timestamp, CaptionCue};
pub use errors::{AppError, CaptionError, EngineError};
pub use server::{router, AppState};
pub use tts_engine::{EdgeTtsEngine, SynthesisRequest, TtsEngine, VoiceInfo};
