/*!
 * Tests for transcript loading
 */

use anyhow::Result;

use subcue::errors::InputError;
use subcue::{Timecode, Transcript};
use crate::common;

/// Test that a transcript file on disk loads with its words and language
#[test]
fn test_transcript_fromFile_shouldLoadWordsAndLanguage() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_transcript(temp_dir.path(), "talk.words.json")?;

    let transcript = Transcript::from_file(&path)?;
    assert_eq!(transcript.language.as_deref(), Some("en"));
    assert_eq!(transcript.words.len(), 19);
    assert_eq!(transcript.words[0].text, "Welcome");
    assert_eq!(transcript.words[18].start, Timecode::from_millis(9_000));
    Ok(())
}

/// Test that words from consecutive segments are concatenated in order
#[test]
fn test_transcript_withSeveralSegments_shouldFlattenWords() {
    let json = r#"{"segments": [
        {"words": [{"word": "One", "start": 0.0, "end": 0.3}]},
        {"words": []},
        {"words": [{"word": "two.", "start": 0.5, "end": 0.9}]}
    ]}"#;

    let transcript = Transcript::from_json_str(json).unwrap();
    assert_eq!(transcript.text(), "One two.");
    assert!(transcript.language.is_none());
    assert!(transcript.words[1].trailing_punctuation);
}

/// Test that malformed documents are rejected with the matching error
#[test]
fn test_transcript_withMalformedInput_shouldReject() {
    assert!(matches!(Transcript::from_json_str("not json"), Err(InputError::Parse(_))));

    let backwards = r#"{"segments": [{"words": [{"word": "x", "start": 2.0, "end": 1.0}]}]}"#;
    assert!(matches!(
        Transcript::from_json_str(backwards),
        Err(InputError::InvalidWordTiming { index: 0, .. })
    ));

    let unordered = r#"{"segments": [
        {"words": [{"word": "late", "start": 5.0, "end": 5.5}]},
        {"words": [{"word": "early", "start": 1.0, "end": 1.5}]}
    ]}"#;
    assert!(matches!(
        Transcript::from_json_str(unordered),
        Err(InputError::UnorderedWords { index: 1, .. })
    ));
}

/// Test that a missing file is reported with its path
#[test]
fn test_transcript_fromMissingFile_shouldFailWithContext() {
    let err = Transcript::from_file("/definitely/not/here.json").unwrap_err();
    assert!(format!("{:#}", err).contains("here.json"));
}
