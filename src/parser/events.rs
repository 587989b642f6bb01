/*!
 * Structured caption input: JSON caption event lists and TTML documents.
 *
 * These are the shapes a subtitle fetcher hands over. Both are turned into
 * raw `CaptionEvent` values; cleanup happens in the normalizer.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::errors::ParseError;
use crate::model::CaptionEvent;
use crate::timecode;

/// TTML paragraph with attributes and body
static TTML_PARAGRAPH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<p\b([^>]*)>(.*?)</p>").unwrap()
});

/// Attribute `name="value"` or `name='value'`
static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([\w:.-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static TTML_ROOT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:\w+:)?tt\b").unwrap()
});

#[derive(Deserialize)]
#[serde(untagged)]
enum EventsDocument {
    List(Vec<CaptionEvent>),
    Wrapped { events: Vec<CaptionEvent> },
}

/// Parse a JSON caption event list.
///
/// Accepts a bare array of `{"text", "start_ms", "end_ms"}` objects or an
/// object with an `events` array.
pub fn parse_caption_events(content: &str) -> Result<Vec<CaptionEvent>, ParseError> {
    let document: EventsDocument = serde_json::from_str(content)?;
    let events = match document {
        EventsDocument::List(events) => events,
        EventsDocument::Wrapped { events } => events,
    };
    debug!("Parsed {} caption events", events.len());
    Ok(events)
}

/// Parse a TTML document into raw caption events.
///
/// Every `<p>` carrying a `begin` attribute becomes one event; its end comes
/// from `end`, or from `begin + dur`. Paragraphs without `begin` are skipped.
pub fn parse_ttml(content: &str) -> Result<Vec<CaptionEvent>, ParseError> {
    if !TTML_ROOT_REGEX.is_match(content) {
        return Err(ParseError::InvalidTtml {
            reason: "missing <tt> root element".to_string(),
        });
    }

    let mut events = Vec::new();

    for caps in TTML_PARAGRAPH_REGEX.captures_iter(content) {
        let (Some(whole), Some(attributes), Some(body)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let line = content[..whole.start()].matches('\n').count() + 1;

        let mut begin = None;
        let mut end = None;
        let mut dur = None;
        for attr in ATTRIBUTE_REGEX.captures_iter(attributes.as_str()) {
            let name = attr.get(1).map_or("", |m| m.as_str());
            let value = attr
                .get(2)
                .or_else(|| attr.get(3))
                .map_or("", |m| m.as_str());
            // Namespaced forms such as tts:begin are not used by TTML timing
            match name {
                "begin" => begin = Some(value),
                "end" => end = Some(value),
                "dur" => dur = Some(value),
                _ => {}
            }
        }

        let Some(begin) = begin else {
            debug!("Skipping TTML paragraph at line {} without begin", line);
            continue;
        };

        let start_ms = parse_time_attribute(begin, line)?;
        let end_ms = match (end, dur) {
            (Some(end), _) => parse_time_attribute(end, line)?,
            (None, Some(dur)) => start_ms
                .checked_add(parse_time_attribute(dur, line)?)
                .ok_or_else(|| ParseError::MalformedTimestamp {
                    line,
                    content: dur.to_string(),
                })?,
            (None, None) => {
                return Err(ParseError::InvalidTtml {
                    reason: format!("paragraph at line {} has begin but no end or dur", line),
                });
            }
        };

        events.push(CaptionEvent {
            text: body.as_str().to_string(),
            start_ms,
            end_ms,
        });
    }

    debug!("Parsed {} TTML paragraphs", events.len());
    Ok(events)
}

fn parse_time_attribute(value: &str, line: usize) -> Result<u64, ParseError> {
    timecode::parse_ttml_time(value).ok_or_else(|| ParseError::MalformedTimestamp {
        line,
        content: value.to_string(),
    })
}
