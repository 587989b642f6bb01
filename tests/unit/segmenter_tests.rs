/*!
 * Tests for sentence segmentation and timestamp allocation
 */

use anyhow::Result;
use resub::model::{Cue, SentenceUnit};
use resub::segmenter::{SegmentationOptions, Segmenter, SplitRule};

fn cue(text: &str, start: u64, end: u64) -> Result<Cue> {
    Cue::new_validated(text, start, end)
}

fn texts(units: &[SentenceUnit]) -> Vec<&str> {
    units.iter().map(|u| u.text()).collect()
}

fn times(units: &[SentenceUnit]) -> Vec<(u64, u64)> {
    units.iter().map(|u| (u.start_ms(), u.end_ms())).collect()
}

/// Test the two-sentence cue example from the behaviour description
#[test]
fn test_segment_withTwoSentencesInOneCue_shouldSplitProportionally() -> Result<()> {
    let segmenter = Segmenter::new(&SegmentationOptions::default());

    let units = segmenter.segment(&[cue("Hello world. How are you?", 0, 4_000)?]);

    assert_eq!(texts(&units), vec!["Hello world.", "How are you?"]);
    assert_eq!(times(&units), vec![(0, 1_920), (1_920, 4_000)]);
    Ok(())
}

/// Test the abbreviation example: one sentence, not two
#[test]
fn test_segment_withAbbreviation_shouldNotSplit() -> Result<()> {
    let segmenter = Segmenter::new(&SegmentationOptions::default());

    let units = segmenter.segment(&[cue("Dr. Smith arrived.", 0, 2_000)?]);

    assert_eq!(texts(&units), vec!["Dr. Smith arrived."]);
    assert_eq!(times(&units), vec![(0, 2_000)]);
    Ok(())
}

/// Test that configured abbreviations extend the built-in list
#[test]
fn test_segment_withExtraAbbreviation_shouldNotSplit() -> Result<()> {
    let options = SegmentationOptions {
        extra_abbreviations: vec!["Approx".to_string()],
        ..SegmentationOptions::default()
    };
    let cues = [cue("It weighs approx. Ten tons.", 0, 1_000)?];

    let default_units = Segmenter::new(&SegmentationOptions::default()).segment(&cues);
    let custom_units = Segmenter::new(&options).segment(&cues);

    // "approx" is already built in
    assert_eq!(default_units.len(), 1);
    assert_eq!(custom_units.len(), 1);

    let options = SegmentationOptions {
        extra_abbreviations: vec!["Tel.".to_string()],
        ..SegmentationOptions::default()
    };
    let cues = [cue("Call tel. Now please.", 0, 1_000)?];
    assert_eq!(Segmenter::new(&SegmentationOptions::default()).segment(&cues).len(), 2);
    assert_eq!(Segmenter::new(&options).segment(&cues).len(), 1);
    Ok(())
}

/// Test a sentence spanning several cues and a cue holding several sentences
#[test]
fn test_segment_withMixedFragments_shouldKeepTimingContiguous() -> Result<()> {
    let segmenter = Segmenter::new(&SegmentationOptions::default());
    let cues = [
        cue("this sentence spans", 0, 1_000)?,
        cue("two cues. Short one. And", 1_000, 2_000)?,
        cue("a tail", 2_500, 3_000)?,
    ];

    let units = segmenter.segment(&cues);

    assert_eq!(
        texts(&units),
        vec!["this sentence spans two cues.", "Short one.", "And a tail"]
    );
    assert_eq!(units[0].start_ms(), 0);
    assert_eq!(units[2].end_ms(), 3_000);
    for pair in units.windows(2) {
        assert_eq!(pair[0].end_ms(), pair[1].start_ms());
    }
    Ok(())
}

/// Test that the word rule splits by word count
#[test]
fn test_segment_withWordsRule_shouldSplitByWords() -> Result<()> {
    let options = SegmentationOptions {
        split_rule: SplitRule::Words,
        ..SegmentationOptions::default()
    };

    let units = Segmenter::new(&options).segment(&[cue("Hello world. How are you?", 0, 4_000)?]);

    assert_eq!(times(&units), vec![(0, 1_600), (1_600, 4_000)]);
    Ok(())
}

/// Test the minimum duration floor
#[test]
fn test_segment_withLargeMinDuration_shouldStretchShortSentences() -> Result<()> {
    let options = SegmentationOptions {
        min_duration_ms: 500,
        ..SegmentationOptions::default()
    };

    let units = Segmenter::new(&options).segment(&[cue("Go. Then we walked for a long while.", 0, 1_000)?]);

    assert_eq!(units.len(), 2);
    assert_eq!(units[0].end_ms() - units[0].start_ms(), 500);
    assert!(units[0].end_ms() <= units[1].start_ms());
    Ok(())
}

/// Test quotes and terminator runs
#[test]
fn test_segment_withQuotesAndEllipsis_shouldKeepMarksWithSentence() -> Result<()> {
    let segmenter = Segmenter::new(&SegmentationOptions::default());

    let units = segmenter.segment(&[cue("She said \"wait...\" He stopped. Why?!", 0, 3_000)?]);

    assert_eq!(texts(&units), vec!["She said \"wait...\"", "He stopped.", "Why?!"]);
    Ok(())
}

/// Test that segmenting a track with no punctuation is not an error
#[test]
fn test_segment_withNoPunctuation_shouldReturnSingleUnit() -> Result<()> {
    let segmenter = Segmenter::new(&SegmentationOptions::default());
    let cues = [cue("one", 0, 100)?, cue("two", 200, 300)?, cue("three", 400, 500)?];

    let units = segmenter.segment(&cues);

    assert_eq!(texts(&units), vec!["one two three"]);
    assert_eq!(times(&units), vec![(0, 500)]);
    assert_eq!(units[0].index(), 1);
    Ok(())
}
