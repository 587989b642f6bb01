/*!
 * Sentence segmentation.
 *
 * Walks an ordered cue sequence, accumulating text in a `TokenBuffer` and
 * cutting a `SentenceUnit` at every resolved boundary. Timing for each
 * sentence comes from the `TimestampAllocator`.
 *
 * Segmentation never fails. A track without any boundary yields a single
 * unit spanning all cues.
 */

pub mod allocator;
pub mod buffer;
pub mod terminators;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::{Cue, SentenceUnit};
use allocator::TimestampAllocator;
use buffer::TokenBuffer;
use terminators::{BoundaryDetector, Scan};

pub use allocator::{SplitRule, SplitWeight};

/// Tunables for segmentation and cue normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationOptions {
    /// How cue time is split between sentences
    #[serde(default)]
    pub split_rule: SplitRule,

    /// Shortest duration a sentence may get, in ms
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,

    /// Remove text repeated by rolling auto-captions
    #[serde(default = "default_true")]
    pub dedupe_rolling_captions: bool,

    /// Shortest repeated run of words treated as a rolling-caption repeat
    #[serde(default = "default_min_overlap_words")]
    pub min_overlap_words: usize,

    /// Additional abbreviations that never end a sentence
    #[serde(default)]
    pub extra_abbreviations: Vec<String>,
}

impl Default for SegmentationOptions {
    fn default() -> Self {
        Self {
            split_rule: SplitRule::default(),
            min_duration_ms: default_min_duration_ms(),
            dedupe_rolling_captions: true,
            min_overlap_words: default_min_overlap_words(),
            extra_abbreviations: Vec::new(),
        }
    }
}

fn default_min_duration_ms() -> u64 {
    1
}

fn default_min_overlap_words() -> usize {
    2
}

fn default_true() -> bool {
    true
}

/// Sentence segmenter; holds configuration only, never per-call state
pub struct Segmenter {
    detector: BoundaryDetector,
    weight: Box<dyn SplitWeight + Send + Sync>,
    min_duration_ms: u64,
}

impl Segmenter {
    pub fn new(options: &SegmentationOptions) -> Self {
        Self {
            detector: BoundaryDetector::new(&options.extra_abbreviations),
            weight: Box::new(options.split_rule),
            min_duration_ms: options.min_duration_ms.max(1),
        }
    }

    /// Replace the weighting used for proportional time splits
    pub fn with_split_weight(mut self, weight: impl SplitWeight + Send + Sync + 'static) -> Self {
        self.weight = Box::new(weight);
        self
    }

    /// Segment an ordered, non-overlapping cue sequence into sentences
    pub fn segment(&self, cues: &[Cue]) -> Vec<SentenceUnit> {
        let allocator = TimestampAllocator::new(cues, self.weight.as_ref(), self.min_duration_ms);
        let mut run = SegmentationRun::new(&allocator);

        for (i, cue) in cues.iter().enumerate() {
            run.buffer.append(i, cue.text());

            loop {
                match self.detector.next_boundary(run.buffer.text(), run.scan_from) {
                    Scan::Boundary(end) => run.emit(end),
                    Scan::Pending(from) => {
                        run.scan_from = from;
                        break;
                    }
                    Scan::Exhausted => {
                        run.scan_from = run.buffer.len();
                        break;
                    }
                }
            }
        }

        let units = run.finish();
        debug!("Segmented {} cues into {} sentences", cues.len(), units.len());
        units
    }
}

/// State for one `segment` call
struct SegmentationRun<'a> {
    allocator: &'a TimestampAllocator<'a>,
    buffer: TokenBuffer,
    units: Vec<SentenceUnit>,
    scan_from: usize,
    floor_ms: u64,
}

impl<'a> SegmentationRun<'a> {
    fn new(allocator: &'a TimestampAllocator<'a>) -> Self {
        Self {
            allocator,
            buffer: TokenBuffer::new(),
            units: Vec::new(),
            scan_from: 0,
            floor_ms: 0,
        }
    }

    /// Cut the buffer at `end` and emit the sentence before it
    fn emit(&mut self, end: usize) {
        let text = self.buffer.text()[..end].trim().to_string();
        if !text.is_empty() {
            let (start_ms, end_ms) = self.allocator.allocate(self.buffer.provenance(), 0..end, self.floor_ms);
            self.units.push(SentenceUnit::new(self.units.len() + 1, text, start_ms, end_ms));
            self.floor_ms = end_ms;
        }
        self.buffer.cut(end);
        self.scan_from = 0;
    }

    /// Flush any residual text, even without terminal punctuation
    fn finish(mut self) -> Vec<SentenceUnit> {
        if !self.buffer.is_blank() {
            let end = self.buffer.len();
            self.emit(end);
        }
        self.buffer.clear();
        self.units
    }
}
