/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use subcue::file_utils::{FileManager, FileType};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that dir_exists returns false for non-existent directories
#[test]
fn test_dir_exists_withNonExistentDir_shouldReturnFalse() {
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));
}

/// Test that adjusted_output_path inserts the suffix before the extension
#[test]
fn test_adjusted_output_path_shouldInsertSuffix() {
    assert_eq!(
        FileManager::adjusted_output_path("/tmp/talks/talk.vtt"),
        Path::new("/tmp/talks/talk.adjusted.vtt")
    );
    assert_eq!(
        FileManager::adjusted_output_path("episode.01.srt"),
        Path::new("episode.01.adjusted.srt")
    );
}

/// Test that subtitle_output_path drops the `.words` stem suffix
#[test]
fn test_subtitle_output_path_withWordsStem_shouldStripIt() {
    assert_eq!(
        FileManager::subtitle_output_path("/data/talk.words.json", "vtt"),
        Path::new("/data/talk.vtt")
    );
    assert_eq!(
        FileManager::subtitle_output_path("/data/talk.json", "srt"),
        Path::new("/data/talk.srt")
    );
}

/// Test that write_to_file creates parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = temp_dir.path().join("nested").join("out.vtt");

    FileManager::write_to_file(&test_file, "WEBVTT\n\n")?;

    assert_eq!(fs::read_to_string(&test_file)?, "WEBVTT\n\n");
    assert_eq!(FileManager::read_to_string(&test_file)?, "WEBVTT\n\n");
    Ok(())
}

/// Test that find_files filters by extension and orders by modification time
#[test]
fn test_find_files_shouldFilterAndSortByModificationTime() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let newer = common::create_test_file(temp_dir.path(), "a.json", "{}")?;
    let older = common::create_test_file(temp_dir.path(), "b.JSON", "{}")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "ignored")?;

    let now = SystemTime::now();
    fs::File::options()
        .write(true)
        .open(&older)?
        .set_modified(now - Duration::from_secs(3600))?;
    fs::File::options().write(true).open(&newer)?.set_modified(now)?;

    let files = FileManager::find_files(temp_dir.path(), &["json"])?;
    assert_eq!(files, vec![older, newer]);
    Ok(())
}

/// Test that detect_file_type classifies by extension
#[test]
fn test_detect_file_type_shouldClassifyByExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let transcript = common::create_test_file(temp_dir.path(), "t.json", "{}")?;
    let subtitle = common::create_test_vtt(temp_dir.path(), "s.vtt")?;
    let other = common::create_test_file(temp_dir.path(), "o.mkv", "")?;

    assert_eq!(FileManager::detect_file_type(&transcript)?, FileType::Transcript);
    assert_eq!(FileManager::detect_file_type(&subtitle)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&other)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.vtt")).is_err());
    Ok(())
}
