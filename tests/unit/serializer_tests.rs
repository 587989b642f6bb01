/*!
 * Tests for SRT serialization
 */

use anyhow::Result;
use resub::model::SentenceUnit;
use resub::parser;
use resub::serializer::{to_srt, write_srt_file};
use crate::common;

fn unit(index: usize, text: &str, start: u64, end: u64) -> SentenceUnit {
    SentenceUnit::new(index, text.to_string(), start, end)
}

/// Test the canonical block layout
#[test]
fn test_to_srt_withUnits_shouldWriteCanonicalBlocks() {
    let units = vec![
        unit(1, "Hello world.", 0, 1_920),
        unit(2, "How are you?", 1_920, 4_000),
    ];

    let expected = "1\n00:00:00,000 --> 00:00:01,920\nHello world.\n\n\
                    2\n00:00:01,920 --> 00:00:04,000\nHow are you?\n\n";
    assert_eq!(to_srt(&units), expected);
}

/// Test that serialized output is parsed back to the same timing and text
#[test]
fn test_to_srt_withParsedOutput_shouldRoundTrip() -> Result<()> {
    let units = vec![
        unit(3, "First.", 1_001, 2_002),
        unit(8, "Second, with \"quotes\".", 2_002, 3_723_004),
    ];

    let srt = to_srt(&units);
    let events = parser::parse_srt(&srt)?;

    assert_eq!(events.len(), 2);
    for (event, unit) in events.iter().zip(&units) {
        assert_eq!(event.text, unit.text());
        assert_eq!((event.start_ms, event.end_ms), (unit.start_ms(), unit.end_ms()));
    }
    Ok(())
}

/// Test that write_srt_file creates missing directories
#[test]
fn test_write_srt_file_withNestedPath_shouldCreateFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("deep").join("out.srt");
    let units = vec![unit(1, "Saved.", 0, 500)];

    write_srt_file(&units, &path)?;

    assert_eq!(std::fs::read_to_string(&path)?, to_srt(&units));
    Ok(())
}
