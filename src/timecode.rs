use once_cell::sync::Lazy;
use regex::Regex;

// @module: Timestamp parsing and formatting

// @const: Clock time, "HH:MM:SS,mmm" or "HH:MM:SS.mmm" (fraction optional)
static CLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,}):(\d{2}):(\d{2})(?:[,.](\d{1,3}))?$").unwrap()
});

// @const: TTML offset time, e.g. "12.5s", "1500ms", "2m", "0.5h"
static OFFSET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)(h|m|s|ms)$").unwrap()
});

/// Parse a clock timestamp into milliseconds.
///
/// Accepts `HH:MM:SS,mmm`, `HH:MM:SS.mmm` and `HH:MM:SS`. A fraction shorter
/// than three digits is right-padded, so `00:00:01,5` is 1500ms. Minutes and
/// seconds must be below 60.
pub fn parse_clock(value: &str) -> Option<u64> {
    let caps = CLOCK_REGEX.captures(value.trim())?;

    let hours: u64 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: u64 = caps.get(2)?.as_str().parse().ok()?;
    let seconds: u64 = caps.get(3)?.as_str().parse().ok()?;
    let millis: u64 = match caps.get(4) {
        Some(fraction) => {
            let digits = fraction.as_str();
            let padded = format!("{:0<3}", digits);
            padded.parse().ok()?
        }
        None => 0,
    };

    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    hours
        .checked_mul(3_600_000)?
        .checked_add(minutes * 60_000 + seconds * 1_000 + millis)
}

/// Parse a TTML time expression (clock time or offset time) into milliseconds
pub fn parse_ttml_time(value: &str) -> Option<u64> {
    let value = value.trim();
    if let Some(ms) = parse_clock(value) {
        return Some(ms);
    }

    let caps = OFFSET_REGEX.captures(value)?;
    let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
    let scale = match caps.get(2)?.as_str() {
        "h" => 3_600_000.0,
        "m" => 60_000.0,
        "s" => 1_000.0,
        "ms" => 1.0,
        _ => return None,
    };

    let ms = (amount * scale).round();
    // Casting would saturate silently
    if !ms.is_finite() || ms >= u64::MAX as f64 {
        return None;
    }
    Some(ms as u64)
}

/// Format milliseconds as an SRT timestamp (HH:MM:SS,mmm)
pub fn format_srt(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}
