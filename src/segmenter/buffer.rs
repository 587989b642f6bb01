use std::ops::Range;

// @module: Token buffer with provenance

/// Maps a span of the buffer back to the cue it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceEntry {
    /// Index of the source cue in the segmented slice
    pub cue_index: usize,

    /// Byte range of this cue's text inside the buffer
    pub range: Range<usize>,

    /// Byte offset into the cue text where `range` begins; non-zero once the
    /// start of the cue has been cut away with an earlier sentence
    pub cue_offset: usize,
}

/// Accumulates cue text until a sentence boundary is cut off.
///
/// Lives for a single segmentation call. After a cut the buffer keeps the
/// whitespace that followed the boundary, so timing for the next sentence
/// starts exactly where the previous one ended.
#[derive(Debug, Default)]
pub struct TokenBuffer {
    text: String,
    provenance: Vec<ProvenanceEntry>,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn provenance(&self) -> &[ProvenanceEntry] {
        &self.provenance
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when nothing but whitespace is buffered
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Append a cue's text, separated by a single space from earlier content
    pub fn append(&mut self, cue_index: usize, cue_text: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        let start = self.text.len();
        self.text.push_str(cue_text);
        self.provenance.push(ProvenanceEntry {
            cue_index,
            range: start..self.text.len(),
            cue_offset: 0,
        });
    }

    /// Remove the first `end` bytes and shift provenance accordingly
    pub fn cut(&mut self, end: usize) {
        let end = end.min(self.text.len());
        self.text.drain(..end);

        self.provenance.retain(|entry| entry.range.end > end);
        for entry in &mut self.provenance {
            if entry.range.start < end {
                entry.cue_offset += end - entry.range.start;
                entry.range.start = end;
            }
            entry.range.start -= end;
            entry.range.end -= end;
        }
    }

    /// Empty the buffer
    pub fn clear(&mut self) {
        self.text.clear();
        self.provenance.clear();
    }
}
