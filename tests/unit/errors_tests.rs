/*!
 * Tests for error types and conversions
 */

use resub::errors::{CueWarning, ParseError};

#[test]
fn test_parseError_malformedTimestamp_shouldDisplayLineAndContent() {
    let error = ParseError::MalformedTimestamp {
        line: 12,
        content: "00:00:xx,000 --> 00:00:02,000".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("line 12"));
    assert!(display.contains("00:00:xx,000"));
}

#[test]
fn test_parseError_invalidBlock_shouldDisplayReason() {
    let error = ParseError::InvalidBlock {
        line: 3,
        reason: "expected a timing line".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid subtitle block at line 3: expected a timing line"
    );
}

#[test]
fn test_parseError_fromSerdeJson_shouldWrapAsInvalidEvents() {
    let json_error = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
    let error: ParseError = json_error.into();
    assert!(matches!(error, ParseError::InvalidEvents(_)));
    assert!(error.to_string().starts_with("Invalid caption events"));
}

#[test]
fn test_cueWarning_position_shouldReturnInputPosition() {
    let empty = CueWarning::EmptyText { position: 4, start_ms: 500, end_ms: 400 };
    let inverted = CueWarning::NonPositiveDuration {
        position: 9,
        start_ms: 900,
        end_ms: 900,
        text: "late".to_string(),
    };

    assert_eq!(empty.position(), 4);
    assert_eq!(inverted.position(), 9);
    assert!(empty.to_string().contains("empty text"));
    assert!(inverted.to_string().contains("\"late\""));
}
