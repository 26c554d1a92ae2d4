/*!
 * Common test utilities for the subcue test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use subcue::{Timecode, Word};

/// Route library logs through the test harness; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Words 400ms long, one every 500ms, starting at `offset_ms`
pub fn timed_words(text: &str, offset_ms: u64) -> Vec<Word> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, w)| {
            let start = Timecode::from_millis(offset_ms + i as u64 * 500);
            Word::new(w, start, start.saturating_add_millis(400))
        })
        .collect()
}

/// Whisper-style JSON for `text`, one segment per sentence-ish chunk of 8 words
pub fn transcript_json(text: &str, language: Option<&str>) -> String {
    let words = timed_words(text, 0);
    let segments: Vec<serde_json::Value> = words
        .chunks(8)
        .map(|chunk| {
            let words: Vec<serde_json::Value> = chunk
                .iter()
                .map(|w| {
                    serde_json::json!({
                        "word": format!(" {}", w.text),
                        "start": w.start.as_seconds(),
                        "end": w.end.as_seconds(),
                    })
                })
                .collect();
            serde_json::json!({ "words": words })
        })
        .collect();

    let mut document = serde_json::json!({ "segments": segments });
    if let Some(language) = language {
        document["language"] = serde_json::Value::String(language.to_string());
    }
    document.to_string()
}

/// Creates a sample transcript file for testing
pub fn create_test_transcript(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = transcript_json(
        "Welcome to this tutorial about web development where we'll learn the basics of HTML and CSS. \
         Let's get started.",
        Some("en"),
    );
    create_test_file(dir, filename, &content)
}

/// Creates a sample WebVTT file for testing
pub fn create_test_vtt(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = "WEBVTT

00:00:03.190 --> 00:00:03.610
Hello there.

00:00:03.900 --> 00:00:05.000
Nice to meet you.
";
    create_test_file(dir, filename, content)
}

/// Creates a sample SRT file for testing
pub fn create_test_srt(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:04,100 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";
    create_test_file(dir, filename, content)
}
