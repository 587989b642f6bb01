/*!
 * Sentence terminator table and boundary detection.
 *
 * A boundary is the end of a terminator run (plus any closing quotes or
 * brackets) that is followed by whitespace and then by something other than
 * a lowercase letter or a digit. A terminator at the very end of the text is
 * left pending until more text arrives or the caller flushes.
 */

use std::collections::HashSet;

/// Recognized terminators, longest first. Any run of terminator characters
/// counts as a single terminator, so `"?!?"` or `"...."` end one sentence.
pub const TERMINATORS: &[&str] = &["...", "\u{2026}", "?!", "!?", ".", "!", "?"];

/// Abbreviations that never end a sentence when followed by a single period
pub const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "e.g", "i.e",
    "approx", "dept", "fig", "inc", "ltd", "corp", "gen", "gov", "sen", "rep", "capt",
    "lt", "col", "sgt", "rev", "hon",
];

const CLOSING_MARKS: &[char] = &['"', '\'', ')', ']', '\u{201D}', '\u{2019}', '\u{00BB}'];
const OPENING_MARKS: &[char] = &['"', '\'', '(', '[', '\u{201C}', '\u{2018}', '\u{00AB}', '\u{00BF}', '\u{00A1}'];

fn is_terminator_char(c: char) -> bool {
    TERMINATORS.iter().any(|t| t.starts_with(c))
}

/// Outcome of scanning for the next boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// A sentence ends at this byte offset (exclusive)
    Boundary(usize),
    /// A terminator starting at this byte offset needs more text to decide
    Pending(usize),
    /// No terminator left in the scanned text
    Exhausted,
}

/// Finds sentence boundaries using the terminator table and abbreviation guard
#[derive(Debug, Clone)]
pub struct BoundaryDetector {
    abbreviations: HashSet<String>,
}

impl Default for BoundaryDetector {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl BoundaryDetector {
    /// Build a detector with the default abbreviations plus `extra` ones
    /// (case-insensitive, written without the final period)
    pub fn new(extra: &[String]) -> Self {
        let abbreviations = DEFAULT_ABBREVIATIONS
            .iter()
            .map(|a| a.to_string())
            .chain(extra.iter().map(|a| a.trim().trim_end_matches('.').to_lowercase()))
            .filter(|a| !a.is_empty())
            .collect();
        Self { abbreviations }
    }

    /// Scan `text` from byte offset `from` for the next boundary
    pub fn next_boundary(&self, text: &str, from: usize) -> Scan {
        let mut pos = from;

        while let Some(offset) = text[pos..].find(is_terminator_char) {
            let run_start = pos + offset;
            let run_end = skip_while(text, run_start, is_terminator_char);
            let end = skip_while(text, run_end, |c| CLOSING_MARKS.contains(&c));

            let Some(next) = text[end..].chars().next() else {
                return Scan::Pending(run_start);
            };

            if !next.is_whitespace() {
                // "3.5", "U.S.", "word.word"
                pos = end;
                continue;
            }

            let visible_at = skip_while(text, end, |c| c.is_whitespace() || OPENING_MARKS.contains(&c));
            let Some(visible) = text[visible_at..].chars().next() else {
                return Scan::Pending(run_start);
            };

            if visible.is_lowercase() || visible.is_ascii_digit() {
                pos = end;
                continue;
            }

            if &text[run_start..run_end] == "." && self.is_abbreviation(&text[..run_start]) {
                pos = end;
                continue;
            }

            return Scan::Boundary(end);
        }

        Scan::Exhausted
    }

    /// True when the word right before a period is a known abbreviation or
    /// a single-letter initial
    fn is_abbreviation(&self, before: &str) -> bool {
        let Some(word) = before.split_whitespace().last() else {
            return false;
        };
        let word = word.trim_start_matches(|c: char| OPENING_MARKS.contains(&c));

        let mut chars = word.chars();
        if let (Some(only), None) = (chars.next(), chars.next()) {
            return only.is_uppercase() && only != 'I' && only != 'A';
        }

        self.abbreviations.contains(&word.to_lowercase())
    }
}

fn skip_while(text: &str, from: usize, predicate: impl Fn(char) -> bool) -> usize {
    text[from..]
        .char_indices()
        .find(|&(_, c)| !predicate(c))
        .map_or(text.len(), |(i, _)| from + i)
}
