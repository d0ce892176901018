use serde::Serialize;

use crate::errors::CaptionError;

// @module: Caption track parsing

/// Separator token of a cue timing line
const TIMING_SEPARATOR: &str = "-->";

// @struct: Single timed caption cue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionCue {
    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Cue text, trimmed and whitespace-joined
    pub text: String,
}

impl CaptionCue {
    /// Creates a new caption cue - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        CaptionCue {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Convert a caption timestamp token to seconds.
///
/// The token is one or more `:`-separated numeric components. The last
/// component is the seconds value and may carry a fractional part; every
/// preceding component is folded in as a generalized hours/minutes chain,
/// so `H:MM:SS.mmm` yields `H*3600 + MM*60 + SS.mmm` and a four-component
/// token keeps multiplying by 60 the same way.
///
/// `line` is the 1-based line number of the timing line the token came
/// from, reported back on failure.
pub fn parse_timestamp(token: &str, line: usize) -> Result<f64, CaptionError> {
    let malformed = |reason: String| CaptionError::MalformedTimestamp {
        token: token.to_string(),
        line,
        reason,
    };

    let parts: Vec<&str> = token.split(':').collect();

    // split always yields at least one element, so unwrap is safe here
    let (seconds_part, leading) = parts.split_last().unwrap();

    let mut chained: f64 = 0.0;
    for part in leading {
        let value: u64 = part
            .trim()
            .parse()
            .map_err(|_| malformed(format!("non-numeric component '{}'", part.trim())))?;
        chained = chained * 60.0 + value as f64;
    }

    let seconds: f64 = seconds_part
        .trim()
        .parse()
        .map_err(|_| malformed(format!("non-numeric seconds '{}'", seconds_part.trim())))?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(malformed(format!(
            "seconds component '{}' is not a non-negative number",
            seconds_part.trim()
        )));
    }

    Ok(chained * 60.0 + seconds)
}

/// Parse a caption-track document into an ordered sequence of cues.
///
/// The document is walked line by line with an explicit cursor. A line
/// containing `-->` starts a cue: the tokens around the separator are its
/// time range, and every following non-blank line is trimmed and joined
/// into the cue text until a blank line or end of input. Cues whose text
/// ends up empty are dropped. Anything else — the `WEBVTT` header, cue
/// index numbers, blank lines — is skipped.
///
/// Encounter order is preserved; the parser never re-sorts and never
/// validates that `end >= start`, passing through whatever the track
/// encodes. The only failure is a malformed timing token.
pub fn parse_caption_track(document: &str) -> Result<Vec<CaptionCue>, CaptionError> {
    let lines: Vec<&str> = document.lines().collect();
    let mut cues = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();

        if line.contains(TIMING_SEPARATOR) {
            let mut tokens = line.split(TIMING_SEPARATOR);
            // contains() guarantees two pieces around the first separator
            let start_token = tokens.next().unwrap_or_default().trim();
            let end_token = tokens.next().unwrap_or_default().trim();

            let start = parse_timestamp(start_token, i + 1)?;
            let end = parse_timestamp(end_token, i + 1)?;

            // Collect the cue text block directly below the timing line
            let mut text = String::new();
            i += 1;
            while i < lines.len() && !lines[i].trim().is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(lines[i].trim());
                i += 1;
            }

            if !text.is_empty() {
                cues.push(CaptionCue { start, end, text });
            }
        }

        i += 1;
    }

    Ok(cues)
}
