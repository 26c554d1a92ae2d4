/*!
 * Error types for the subcue application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::timecode::Timecode;

/// Errors raised while parsing or building a timecode
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimecodeError {
    /// The text does not look like a subtitle timestamp
    #[error("Invalid timestamp format: {0}")]
    InvalidFormat(String),

    /// Minutes, seconds or milliseconds are out of range
    #[error("Invalid time components in timestamp: {0}")]
    InvalidComponent(String),

    /// A seconds value that cannot be represented (negative, NaN, infinite)
    #[error("Time value out of range: {0}")]
    OutOfRange(f64),
}

/// Malformed word-level input, rejected before segmentation starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// The transcript could not be decoded
    #[error("Failed to parse transcript: {0}")]
    Parse(String),

    /// A word carries a timestamp that is not a valid time
    #[error("Invalid timestamp for word {index}: {source}")]
    InvalidTimestamp {
        /// Position of the word in the transcript
        index: usize,
        /// Underlying timecode error
        source: TimecodeError,
    },

    /// A word ends before it starts
    #[error("Word {index} starts at {start} after it ends at {end}")]
    InvalidWordTiming {
        index: usize,
        start: Timecode,
        end: Timecode,
    },

    /// A word starts before the previous word
    #[error("Word {index} starts at {start}, before the previous word at {previous}")]
    UnorderedWords {
        index: usize,
        start: Timecode,
        previous: Timecode,
    },
}

/// Errors reported by a boundary provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundaryError {
    /// The provider has no rules for this language
    #[error("Unsupported language for boundary analysis: {0}")]
    UnsupportedLanguage(String),

    /// The entity definition file could not be used
    #[error("Invalid entity definition: {0}")]
    InvalidEntityDefinition(String),
}

/// Errors that can occur while turning sentences into cues
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentationError {
    /// Word timings are inconsistent
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] InputError),

    /// A sentence without any word
    #[error("Sentence {0} contains no words")]
    EmptySentence(usize),

    /// Clause candidates or entity spans point outside their sentence
    #[error("Invalid boundary data in sentence {sentence}: {message}")]
    InvalidBoundary { sentence: usize, message: String },

    /// Boundary analysis failed upstream
    #[error("Boundary analysis failed: {0}")]
    Boundary(#[from] BoundaryError),
}

/// Precondition violations of the buffer adjuster
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdjustError {
    /// Buffer is negative or not a number
    #[error("Invalid buffer value: {0} seconds")]
    InvalidBuffer(f64),

    /// A cue ends before it starts
    #[error("Cue {index} ends at {end} before it starts at {start}")]
    InvalidCueTiming {
        index: usize,
        start: Timecode,
        end: Timecode,
    },

    /// A cue starts before its predecessor
    #[error("Cue {index} starts at {start}, before the previous cue at {previous}")]
    UnorderedCues {
        index: usize,
        start: Timecode,
        previous: Timecode,
    },

    /// A cue runs into the next one
    #[error("Cue {index} ends at {end}, after the next cue starts at {next_start}")]
    OverlappingCues {
        index: usize,
        end: Timecode,
        next_start: Timecode,
    },
}

/// Errors that can occur during subtitle parsing and serialization
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// Malformed subtitle content
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The content holds no cue at all
    #[error("No subtitle cues found")]
    NoCues,

    /// Neither extension nor content identify the format
    #[error("Unknown subtitle format: {0}")]
    UnknownFormat(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the transcript input
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Error from boundary analysis
    #[error("Boundary error: {0}")]
    Boundary(#[from] BoundaryError),

    /// Error from segmentation
    #[error("Segmentation error: {0}")]
    Segmentation(#[from] SegmentationError),

    /// Error from the buffer adjuster
    #[error("Adjust error: {0}")]
    Adjust(#[from] AdjustError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
