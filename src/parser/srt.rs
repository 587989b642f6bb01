use log::debug;

use crate::errors::ParseError;
use crate::model::CaptionEvent;
use crate::timecode;

// @module: SRT textual parser

/// Parse SRT text into raw caption events.
///
/// Blocks are separated by blank lines. Each block is an optional numeric
/// index, a `HH:MM:SS,mmm --> HH:MM:SS,mmm` timing line (trailing position
/// coordinates are ignored), then zero or more text lines. Text is returned
/// raw; markup and empty cues are handled by the normalizer.
pub fn parse_srt(content: &str) -> Result<Vec<CaptionEvent>, ParseError> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);

    let mut events = Vec::new();
    let mut block: Vec<(usize, &str)> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            if !block.is_empty() {
                events.push(parse_block(&block)?);
                block.clear();
            }
            continue;
        }
        block.push((i + 1, line.trim_end()));
    }

    if !block.is_empty() {
        events.push(parse_block(&block)?);
    }

    debug!("Parsed {} SRT blocks", events.len());
    Ok(events)
}

fn parse_block(block: &[(usize, &str)]) -> Result<CaptionEvent, ParseError> {
    let (first_line_no, first_line) = block[0];

    // The index line is optional, some writers omit it
    let timing_pos = if first_line.contains("-->") {
        0
    } else if first_line.trim().chars().all(|c| c.is_ascii_digit()) {
        1
    } else {
        return Err(ParseError::InvalidBlock {
            line: first_line_no,
            reason: format!("expected a cue index or timing line, found \"{}\"", first_line.trim()),
        });
    };

    let (timing_line_no, timing_line) = match block.get(timing_pos) {
        Some(&(line_no, line)) if line.contains("-->") => (line_no, line),
        Some(&(line_no, line)) => {
            return Err(ParseError::InvalidBlock {
                line: line_no,
                reason: format!("expected a timing line, found \"{}\"", line.trim()),
            });
        }
        None => {
            return Err(ParseError::InvalidBlock {
                line: first_line_no,
                reason: "block has an index but no timing line".to_string(),
            });
        }
    };

    let (start_ms, end_ms) = parse_timing_line(timing_line).ok_or_else(|| {
        ParseError::MalformedTimestamp {
            line: timing_line_no,
            content: timing_line.trim().to_string(),
        }
    })?;

    let text = block[timing_pos + 1..]
        .iter()
        .map(|(_, line)| line.trim())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(CaptionEvent { text, start_ms, end_ms })
}

fn parse_timing_line(line: &str) -> Option<(u64, u64)> {
    let (start, rest) = line.split_once("-->")?;
    let end = rest.split_whitespace().next()?;

    let start_ms = timecode::parse_clock(start.trim())?;
    let end_ms = timecode::parse_clock(end)?;
    Some((start_ms, end_ms))
}
