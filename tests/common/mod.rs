/*!
 * Common test utilities for the resub test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use rand::Rng;
use tempfile::TempDir;

use resub::model::CaptionEvent;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample auto-caption track: fragments cut mid-sentence
pub const FRAGMENTED_SRT: &str = r#"1
00:00:01,000 --> 00:00:03,000
so today we are going to

2
00:00:03,000 --> 00:00:05,000
talk about rust. It is a

3
00:00:05,000 --> 00:00:07,000
systems language.
"#;

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, FRAGMENTED_SRT)
}

/// Creates a caption event JSON file for testing
pub fn create_test_events(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = r#"[
  {"text": "the quick brown", "start_ms": 0, "end_ms": 1000},
  {"text": "quick brown fox jumps.", "start_ms": 900, "end_ms": 2000},
  {"text": "", "start_ms": 2500, "end_ms": 2400}
]"#;
    create_test_file(dir, filename, content)
}

/// Creates a TTML file for testing
pub fn create_test_ttml(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = r#"<?xml version="1.0" encoding="utf-8"?>
<tt xmlns="http://www.w3.org/ns/ttml"><body><div>
<p begin="00:00:00.000" end="00:00:02.000">Welcome back</p>
<p begin="00:00:02.000" dur="2s">everyone. Let&apos;s start.</p>
</div></body></tt>
"#;
    create_test_file(dir, filename, content)
}

const WORDS: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "river", "stone", "light", "Paris", "Dr.", "we",
    "it", "3.5", "again", "world", "I", "e.g.", "time",
];
const ENDINGS: &[&str] = &["", "", "", ".", "?", "!", "...", ","];

/// Random caption track with arbitrary overlaps, gaps, bad cues and punctuation
pub fn random_events(rng: &mut impl Rng, count: usize) -> Vec<CaptionEvent> {
    let mut events = Vec::with_capacity(count);
    let mut t: u64 = 0;

    for _ in 0..count {
        let words = rng.random_range(0..6);
        let mut text = Vec::with_capacity(words);
        for _ in 0..words {
            let word = WORDS[rng.random_range(0..WORDS.len())];
            let ending = ENDINGS[rng.random_range(0..ENDINGS.len())];
            text.push(format!("{}{}", word, ending));
        }

        let start = t.saturating_sub(rng.random_range(0..500));
        let end = if rng.random_bool(0.05) {
            start.saturating_sub(10)
        } else {
            start + rng.random_range(1..3000)
        };
        t += rng.random_range(0..2000);

        events.push(CaptionEvent::new(text.join(" "), start, end));
    }

    events
}
