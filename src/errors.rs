/*!
 * Error types for the resub application.
 *
 * Parse failures are fatal for the input they describe and are returned to the
 * caller. Problems with individual cues are recovered locally and reported as
 * `CueWarning` values alongside the successful result.
 */

use std::fmt;
use thiserror::Error;

/// Errors raised when subtitle input cannot be used at all
#[derive(Error, Debug)]
pub enum ParseError {
    /// A timing line exists but cannot be read as `HH:MM:SS,mmm --> HH:MM:SS,mmm`
    #[error("Malformed timestamp at line {line}: {content}")]
    MalformedTimestamp {
        /// 1-based line number in the source text
        line: usize,
        /// The offending line or attribute value
        content: String,
    },

    /// A block does not have the index/timing/text structure
    #[error("Invalid subtitle block at line {line}: {reason}")]
    InvalidBlock {
        /// 1-based line number where the block starts
        line: usize,
        /// What was wrong with the block
        reason: String,
    },

    /// Caption event JSON could not be decoded
    #[error("Invalid caption events: {0}")]
    InvalidEvents(#[from] serde_json::Error),

    /// TTML document is structurally unusable
    #[error("Invalid TTML document: {reason}")]
    InvalidTtml {
        /// What was wrong with the document
        reason: String,
    },
}

/// Non-fatal diagnostics for cues dropped during normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueWarning {
    /// Cue text was empty once markup and whitespace were stripped
    EmptyText {
        /// 1-based position of the cue in the input
        position: usize,
        start_ms: u64,
        end_ms: u64,
    },

    /// Cue ends at or before its start
    NonPositiveDuration {
        /// 1-based position of the cue in the input
        position: usize,
        start_ms: u64,
        end_ms: u64,
        text: String,
    },
}

impl CueWarning {
    /// Position of the offending cue in the input
    pub fn position(&self) -> usize {
        match self {
            CueWarning::EmptyText { position, .. } => *position,
            CueWarning::NonPositiveDuration { position, .. } => *position,
        }
    }
}

impl fmt::Display for CueWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueWarning::EmptyText { position, start_ms, end_ms } => {
                write!(f, "Dropped cue {} ({}ms-{}ms): empty text", position, start_ms, end_ms)
            }
            CueWarning::NonPositiveDuration { position, start_ms, end_ms, text } => {
                write!(
                    f,
                    "Dropped cue {} ({}ms-{}ms): non-positive duration for \"{}\"",
                    position, start_ms, end_ms, text
                )
            }
        }
    }
}
