/*!
 * Caller-facing re-segmentation.
 *
 * One call takes a whole subtitle track, from raw text or caption events to
 * sentence units. It either returns the complete result with its warnings or
 * fails on input that cannot be parsed; partial output is never exposed.
 */

use log::debug;

use crate::errors::{CueWarning, ParseError};
use crate::model::{CaptionEvent, Cue, SentenceUnit};
use crate::parser::{self, CueNormalizer, NormalizeOptions};
use crate::segmenter::{SegmentationOptions, Segmenter, SplitWeight};
use crate::serializer;

/// Sentences produced for one track and the cues dropped on the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resegmented {
    pub units: Vec<SentenceUnit>,
    pub warnings: Vec<CueWarning>,
}

impl Resegmented {
    /// Render the units as SRT text
    pub fn to_srt(&self) -> String {
        serializer::to_srt(&self.units)
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Normalize, segment and time a subtitle track in one call
pub struct Resegmenter {
    normalizer: CueNormalizer,
    segmenter: Segmenter,
}

impl Default for Resegmenter {
    fn default() -> Self {
        Self::new(&SegmentationOptions::default())
    }
}

impl Resegmenter {
    pub fn new(options: &SegmentationOptions) -> Self {
        let normalizer = CueNormalizer::new(NormalizeOptions {
            dedupe_rolling_captions: options.dedupe_rolling_captions,
            min_overlap_words: options.min_overlap_words.max(1),
        });
        Self {
            normalizer,
            segmenter: Segmenter::new(options),
        }
    }

    /// Replace the weighting used when a cue's time is split between sentences
    pub fn with_split_weight(mut self, weight: impl SplitWeight + Send + Sync + 'static) -> Self {
        self.segmenter = self.segmenter.with_split_weight(weight);
        self
    }

    /// Re-segment raw caption events
    pub fn resegment_events(&self, events: &[CaptionEvent]) -> Resegmented {
        let normalized = self.normalizer.normalize(events);
        debug!(
            "Normalized {} events into {} cues ({} dropped)",
            events.len(),
            normalized.cues.len(),
            normalized.warnings.len()
        );

        Resegmented {
            units: self.segmenter.segment(&normalized.cues),
            warnings: normalized.warnings,
        }
    }

    /// Re-segment cues that are already ordered and non-overlapping
    pub fn resegment_cues(&self, cues: &[Cue]) -> Vec<SentenceUnit> {
        self.segmenter.segment(cues)
    }

    /// Re-segment SRT text
    pub fn resegment_srt(&self, content: &str) -> Result<Resegmented, ParseError> {
        let events = parser::parse_srt(content)?;
        Ok(self.resegment_events(&events))
    }

    /// Re-segment a JSON caption event list
    pub fn resegment_caption_json(&self, content: &str) -> Result<Resegmented, ParseError> {
        let events = parser::parse_caption_events(content)?;
        Ok(self.resegment_events(&events))
    }

    /// Re-segment a TTML document
    pub fn resegment_ttml(&self, content: &str) -> Result<Resegmented, ParseError> {
        let events = parser::parse_ttml(content)?;
        Ok(self.resegment_events(&events))
    }
}
