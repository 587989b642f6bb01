/*!
 * Timestamp allocation for sentence slices.
 *
 * Time inside a cue is assumed to advance uniformly with the weight of the
 * text read so far. This is an approximation of reading speed, not of the
 * actual speech timing. The weighting is pluggable through `SplitWeight`.
 */

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::buffer::ProvenanceEntry;
use crate::model::Cue;

/// Weight of a piece of text for proportional time splitting
pub trait SplitWeight {
    fn weight(&self, text: &str) -> f64;
}

/// Built-in weighting rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitRule {
    /// Proportional to character count
    #[default]
    Characters,
    /// Proportional to word count
    Words,
}

impl SplitWeight for SplitRule {
    fn weight(&self, text: &str) -> f64 {
        match self {
            SplitRule::Characters => text.chars().count() as f64,
            SplitRule::Words => text.split_whitespace().count() as f64,
        }
    }
}

impl std::fmt::Display for SplitRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitRule::Characters => write!(f, "characters"),
            SplitRule::Words => write!(f, "words"),
        }
    }
}

impl std::str::FromStr for SplitRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "characters" | "chars" => Ok(Self::Characters),
            "words" => Ok(Self::Words),
            _ => Err(anyhow::anyhow!("Invalid split rule: {}", s)),
        }
    }
}

/// Computes `(start, end)` for buffer slices from provenance
pub struct TimestampAllocator<'a> {
    cues: &'a [Cue],
    weight: &'a dyn SplitWeight,
    min_duration_ms: u64,
}

impl<'a> TimestampAllocator<'a> {
    pub fn new(cues: &'a [Cue], weight: &'a dyn SplitWeight, min_duration_ms: u64) -> Self {
        Self {
            cues,
            weight,
            min_duration_ms: min_duration_ms.max(1),
        }
    }

    /// Allocate a time range for `slice` of the buffer.
    ///
    /// The result never starts before `floor_ms` and always lasts at least
    /// the minimal duration, so consecutive allocations cannot overlap.
    pub fn allocate(&self, provenance: &[ProvenanceEntry], slice: Range<usize>, floor_ms: u64) -> (u64, u64) {
        let start = self.time_at_start(provenance, slice.start).round() as u64;
        let end = self.time_at_end(provenance, slice.end).round() as u64;

        let start = start.max(floor_ms);
        let end = end.max(start.saturating_add(self.min_duration_ms));
        (start, end)
    }

    /// Time at which text beginning at buffer position `pos` starts
    pub fn time_at_start(&self, provenance: &[ProvenanceEntry], pos: usize) -> f64 {
        let Some(entry) = provenance.iter().find(|entry| entry.range.end > pos) else {
            return provenance
                .last()
                .map_or(0.0, |entry| self.cues[entry.cue_index].end_ms() as f64);
        };

        let cue = &self.cues[entry.cue_index];
        if pos < entry.range.start {
            // Separator between cues
            return cue.start_ms() as f64;
        }
        self.interpolate(entry, pos).unwrap_or(cue.start_ms() as f64)
    }

    /// Time at which text ending at buffer position `pos` ends
    pub fn time_at_end(&self, provenance: &[ProvenanceEntry], pos: usize) -> f64 {
        let Some(entry) = provenance.iter().rev().find(|entry| entry.range.start < pos) else {
            return provenance
                .first()
                .map_or(0.0, |entry| self.cues[entry.cue_index].start_ms() as f64);
        };

        let cue = &self.cues[entry.cue_index];
        if pos >= entry.range.end {
            return cue.end_ms() as f64;
        }
        self.interpolate(entry, pos).unwrap_or(cue.end_ms() as f64)
    }

    /// Linear interpolation inside the entry's cue; `None` for a cue with
    /// zero weight
    fn interpolate(&self, entry: &ProvenanceEntry, pos: usize) -> Option<f64> {
        let cue = &self.cues[entry.cue_index];
        let total = self.weight.weight(cue.text());
        if total <= 0.0 {
            return None;
        }

        let cue_pos = (entry.cue_offset + pos.saturating_sub(entry.range.start)).min(cue.text().len());
        let consumed = self.weight.weight(cue.text().get(..cue_pos)?);
        let fraction = (consumed / total).clamp(0.0, 1.0);

        Some(cue.start_ms() as f64 + fraction * cue.duration_ms() as f64)
    }
}
