/*!
 * # subcue - subtitle cues from word-level transcripts
 *
 * A Rust library that turns timed words produced by a speech recognizer
 * into readable subtitle cues, and post-processes existing cues.
 *
 * ## Features
 *
 * - Sentence, clause and entity aware cue boundaries
 * - Greedy line wrapping with width and line-count limits
 * - Overlap-free cue timing taken from the words themselves
 * - End-time buffering capped at the next cue
 * - WebVTT and SRT reading and writing
 * - Rule-based boundary detection for English and French, swappable
 *   through the `BoundaryProvider` trait
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `transcript`: Word-level transcript loading and validation
 * - `boundary`: Sentence, clause and entity detection:
 *   - `boundary::rules`: Language-specific rules
 *   - `boundary::punctuation`: Terminal punctuation only
 *   - `boundary::entities`: Entity phrase dictionary
 * - `segmentation`: Words to cues
 * - `adjuster`: Cue end-time buffering
 * - `subtitle_processor`: Cue type, WebVTT/SRT rendering and parsing
 * - `timecode`: Millisecond timestamps
 * - `app_config`: Configuration management
 * - `app_controller`: File and folder workflows
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities and detection
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod adjuster;
pub mod app_config;
pub mod app_controller;
pub mod boundary;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod segmentation;
pub mod subtitle_processor;
pub mod timecode;
pub mod transcript;

// Re-export main types for easier usage
pub use adjuster::adjust;
pub use app_config::Config;
pub use boundary::{BoundaryProvider, EntityDictionary, EntitySpan, PunctuationProvider, RuleBasedProvider, Sentence};
pub use segmentation::{segment, segment_words};
pub use subtitle_processor::{Cue, SubtitleCollection, SubtitleFormat};
pub use timecode::Timecode;
pub use transcript::{Transcript, Word};
pub use language_utils::{detect_language, get_language_name, language_codes_match, normalize_to_part2t};
pub use errors::{AdjustError, AppError, BoundaryError, InputError, SegmentationError, SubtitleError, TimecodeError};
