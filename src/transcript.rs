/*!
 * Word-level transcripts.
 *
 * Loads Whisper-style JSON (`segments[].words[]`) into an ordered list of
 * timed words and checks the timing guarantees the segmenter relies on.
 */

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;

use crate::errors::InputError;
use crate::timecode::Timecode;

/// Placeholder emitted by the transcriber for non-speech segments
const NON_SPEECH_TOKEN: &str = "[*]";

/// A single transcribed word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub start: Timecode,
    pub end: Timecode,
    /// Whether the text ends with a punctuation mark
    pub trailing_punctuation: bool,
}

impl Word {
    pub fn new(text: impl Into<String>, start: Timecode, end: Timecode) -> Self {
        let text = text.into();
        let trailing_punctuation = text
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_punctuation() || is_unicode_punctuation(c));
        Word {
            text,
            start,
            end,
            trailing_punctuation,
        }
    }

    /// Character count used for line-width decisions
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

fn is_unicode_punctuation(c: char) -> bool {
    matches!(c, '…' | '»' | '«' | '“' | '”' | '’' | '‘' | '¿' | '¡' | '–' | '—')
}

/// Check that words are well-formed and ordered by start time
pub fn validate_words<'a, I>(words: I) -> Result<(), InputError>
where
    I: IntoIterator<Item = &'a Word>,
{
    let mut previous: Option<Timecode> = None;
    for (index, word) in words.into_iter().enumerate() {
        if word.start > word.end {
            return Err(InputError::InvalidWordTiming {
                index,
                start: word.start,
                end: word.end,
            });
        }
        if let Some(previous) = previous {
            if word.start < previous {
                return Err(InputError::UnorderedWords {
                    index,
                    start: word.start,
                    previous,
                });
            }
        }
        previous = Some(word.start);
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct RawTranscript {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    #[serde(default)]
    words: Vec<RawWord>,
}

#[derive(Debug, Deserialize)]
struct RawWord {
    #[serde(alias = "word")]
    text: String,
    start: f64,
    end: f64,
}

/// Words of a whole document, plus the language the transcriber reported
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub words: Vec<Word>,
    pub language: Option<String>,
}

impl Transcript {
    pub fn new(words: Vec<Word>, language: Option<String>) -> Self {
        Transcript { words, language }
    }

    /// Parse a Whisper word-level JSON document
    pub fn from_json_str(content: &str) -> Result<Self, InputError> {
        let raw: RawTranscript =
            serde_json::from_str(content).map_err(|e| InputError::Parse(e.to_string()))?;

        let mut words = Vec::new();
        let mut skipped = 0;
        for raw_word in raw.segments.into_iter().flat_map(|s| s.words) {
            let text = raw_word.text.trim();
            if text.is_empty() || text == NON_SPEECH_TOKEN {
                skipped += 1;
                continue;
            }

            let index = words.len();
            let start = Timecode::from_seconds(raw_word.start)
                .map_err(|source| InputError::InvalidTimestamp { index, source })?;
            let end = Timecode::from_seconds(raw_word.end)
                .map_err(|source| InputError::InvalidTimestamp { index, source })?;

            words.push(Word::new(text, start, end));
        }

        if skipped > 0 {
            debug!("Skipped {} placeholder or empty tokens", skipped);
        }
        if words.is_empty() {
            warn!("Transcript contains no words");
        }

        validate_words(&words)?;

        let language = raw
            .language
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty());

        Ok(Transcript { words, language })
    }

    /// Read and parse a transcript file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript: {:?}", path))?;
        let transcript = Self::from_json_str(&content)
            .with_context(|| format!("Invalid transcript: {:?}", path))?;
        Ok(transcript)
    }

    /// Plain text of the transcript, words joined by single spaces
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
