/*!
 * Tests for error types and conversions
 */

use std::error::Error;

use subcue::errors::{AdjustError, AppError, BoundaryError, InputError, SegmentationError, SubtitleError, TimecodeError};
use subcue::Timecode;

#[test]
fn test_inputError_invalidTimestamp_shouldExposeSource() {
    let error = InputError::InvalidTimestamp {
        index: 4,
        source: TimecodeError::OutOfRange(-1.0),
    };
    let display = error.to_string();
    assert!(display.contains("word 4"));
    assert!(error.source().is_some());
}

#[test]
fn test_segmentationError_fromInputError_shouldWrap() {
    let input = InputError::UnorderedWords {
        index: 2,
        start: Timecode::from_millis(1_000),
        previous: Timecode::from_millis(2_000),
    };
    let error: SegmentationError = input.clone().into();
    assert_eq!(error, SegmentationError::MalformedInput(input));
    assert!(error.to_string().contains("00:00:01.000"));
}

#[test]
fn test_segmentationError_fromBoundaryError_shouldWrap() {
    let error: SegmentationError = BoundaryError::UnsupportedLanguage("de".to_string()).into();
    assert!(matches!(error, SegmentationError::Boundary(BoundaryError::UnsupportedLanguage(_))));
    assert!(error.to_string().contains("de"));
}

#[test]
fn test_adjustError_overlappingCues_shouldDisplayTimes() {
    let error = AdjustError::OverlappingCues {
        index: 3,
        end: Timecode::from_millis(5_500),
        next_start: Timecode::from_millis(5_000),
    };
    let display = error.to_string();
    assert!(display.contains("Cue 3"));
    assert!(display.contains("00:00:05.500"));
    assert!(display.contains("00:00:05.000"));
}

#[test]
fn test_subtitleError_parse_shouldDisplayLine() {
    let error = SubtitleError::Parse {
        line: 12,
        message: "invalid timing line".to_string(),
    };
    assert_eq!(error.to_string(), "Parse error at line 12: invalid timing line");
}

#[test]
fn test_appError_conversions_shouldPickVariant() {
    let error: AppError = AdjustError::InvalidBuffer(-1.0).into();
    assert!(matches!(error, AppError::Adjust(_)));

    let error: AppError = SubtitleError::NoCues.into();
    assert!(error.to_string().contains("No subtitle cues found"));

    let error: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(error, AppError::File(message) if message == "gone"));

    let error: AppError = anyhow::anyhow!("something else").into();
    assert!(matches!(error, AppError::Unknown(_)));
}
