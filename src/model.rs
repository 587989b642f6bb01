use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::timecode;

// @module: Timed text data model

// @struct: One raw timed caption unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Plain text, trimmed and single-spaced
    text: String,

    // @field: Start time in ms
    start_ms: u64,

    // @field: End time in ms, always after start
    end_ms: u64,
}

impl Cue {
    // @creates: Validated cue
    // @validates: Time range and non-empty text
    pub fn new_validated(text: &str, start_ms: u64, end_ms: u64) -> Result<Self> {
        if end_ms <= start_ms {
            return Err(anyhow!(
                "Invalid time range: end time {} <= start time {}",
                end_ms, start_ms
            ));
        }

        let text = collapse_whitespace(text);
        if text.is_empty() {
            return Err(anyhow!("Empty cue text at {}ms", start_ms));
        }

        Ok(Cue { text, start_ms, end_ms })
    }

    /// Build a cue whose invariants the caller has already checked
    pub(crate) fn from_parts(text: String, start_ms: u64, end_ms: u64) -> Self {
        debug_assert!(end_ms > start_ms);
        debug_assert!(!text.trim().is_empty());
        Cue { text, start_ms, end_ms }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// One output sentence with its derived time interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceUnit {
    index: usize,
    text: String,
    start_ms: u64,
    end_ms: u64,
}

impl SentenceUnit {
    /// Creates a sentence unit as-is; the segmenter guarantees the invariants
    pub fn new(index: usize, text: String, start_ms: u64, end_ms: u64) -> Self {
        SentenceUnit { index, text, start_ms, end_ms }
    }

    /// 1-based position in the produced sequence
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    /// Copy of this unit carrying a different index
    pub fn renumbered(&self, index: usize) -> Self {
        SentenceUnit { index, ..self.clone() }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        timecode::format_srt(self.start_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        timecode::format_srt(self.end_ms)
    }
}

impl fmt::Display for SentenceUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// A timed caption event as delivered by a subtitle fetcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionEvent {
    pub text: String,

    #[serde(alias = "start", alias = "startMs", alias = "tStartMs")]
    pub start_ms: u64,

    #[serde(alias = "end", alias = "endMs")]
    pub end_ms: u64,
}

impl CaptionEvent {
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        CaptionEvent { text: text.into(), start_ms, end_ms }
    }
}

/// Collapse every whitespace run to a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
