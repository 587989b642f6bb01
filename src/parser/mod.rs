/*!
 * Cue parsing and normalization.
 *
 * - `srt`: textual SRT parse
 * - `events`: JSON caption events and TTML documents
 * - `markup`: markup-stripping rule table
 * - `dedup`: rolling-caption overlap detection
 *
 * Parsers produce raw `CaptionEvent` values. `CueNormalizer` turns them into
 * an ordered, non-overlapping `Cue` sequence plus non-fatal warnings.
 */

pub mod dedup;
pub mod events;
pub mod markup;
pub mod srt;

use log::debug;

use crate::errors::CueWarning;
use crate::model::{CaptionEvent, Cue};

pub use events::{parse_caption_events, parse_ttml};
pub use srt::parse_srt;

/// Options controlling cue normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Remove text repeated from the previous cue by rolling captions
    pub dedupe_rolling_captions: bool,

    /// Shortest overlap, in words, treated as a rolling-caption repeat
    pub min_overlap_words: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            dedupe_rolling_captions: true,
            min_overlap_words: 2,
        }
    }
}

/// Result of normalization: usable cues and the diagnostics for dropped ones
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedCues {
    pub cues: Vec<Cue>,
    pub warnings: Vec<CueWarning>,
}

/// Cue still being adjusted by the normalizer
#[derive(Debug)]
struct PendingCue {
    text: String,
    start_ms: u64,
    end_ms: u64,
}

/// Turns raw caption events into a clean cue sequence
#[derive(Debug, Clone, Default)]
pub struct CueNormalizer {
    options: NormalizeOptions,
}

impl CueNormalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Normalize raw events.
    ///
    /// Markup is stripped, empty and non-positive cues are dropped with a
    /// warning, cues are stably ordered by start, rolling-caption repeats are
    /// removed and overlapping intervals are clamped. Clamping never drops
    /// text: a cue that would be left without duration is merged forward.
    pub fn normalize(&self, events: &[CaptionEvent]) -> NormalizedCues {
        let mut warnings = Vec::new();
        let mut pending = Vec::with_capacity(events.len());

        for (i, event) in events.iter().enumerate() {
            let position = i + 1;
            let text = markup::strip_markup(&event.text);

            if text.is_empty() {
                debug!("Dropping cue {}: empty text", position);
                warnings.push(CueWarning::EmptyText {
                    position,
                    start_ms: event.start_ms,
                    end_ms: event.end_ms,
                });
                continue;
            }

            if event.end_ms <= event.start_ms {
                debug!("Dropping cue {}: end {}ms <= start {}ms", position, event.end_ms, event.start_ms);
                warnings.push(CueWarning::NonPositiveDuration {
                    position,
                    start_ms: event.start_ms,
                    end_ms: event.end_ms,
                    text,
                });
                continue;
            }

            pending.push(PendingCue {
                text,
                start_ms: event.start_ms,
                end_ms: event.end_ms,
            });
        }

        if pending.windows(2).any(|pair| pair[1].start_ms < pair[0].start_ms) {
            debug!("Reordering out-of-order cues by start time");
            pending.sort_by_key(|cue| cue.start_ms);
        }

        let mut out: Vec<PendingCue> = Vec::with_capacity(pending.len());
        // Stripped text of the preceding cue before its own repeat was removed
        let mut previous_source: Option<String> = None;
        for mut cue in pending {
            let source = cue.text.clone();
            let overlap = match previous_source.as_deref() {
                Some(previous) if self.options.dedupe_rolling_captions => {
                    dedup::overlap_word_count(previous, &cue.text, self.options.min_overlap_words)
                }
                _ => 0,
            };
            if overlap > 0 {
                if let Some(last) = out.last_mut() {
                    if overlap == dedup::word_count(&cue.text) {
                        // Whole cue repeats the previous tail; only a rolling
                        // repeat while the previous line is still shown
                        if cue.start_ms < last.end_ms {
                            debug!("Merging repeated cue \"{}\" into previous", cue.text);
                            last.end_ms = last.end_ms.max(cue.end_ms);
                            previous_source = Some(source);
                            continue;
                        }
                    } else {
                        debug!("Removing {} repeated leading words from \"{}\"", overlap, cue.text);
                        cue.text = dedup::drop_leading_words(&cue.text, overlap);
                    }
                }
            }

            if let Some(last) = out.last_mut() {
                if cue.start_ms < last.end_ms {
                    if cue.start_ms > last.start_ms {
                        last.end_ms = cue.start_ms;
                    } else if let Some(last) = out.pop() {
                        // Same start: the previous cue cannot keep any time
                        cue.text = format!("{} {}", last.text, cue.text);
                        cue.end_ms = cue.end_ms.max(last.end_ms);
                    }
                }
            }

            out.push(cue);
            previous_source = Some(source);
        }

        let cues = out
            .into_iter()
            .map(|cue| Cue::from_parts(cue.text, cue.start_ms, cue.end_ms))
            .collect();

        NormalizedCues { cues, warnings }
    }
}
