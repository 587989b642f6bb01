/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use resub::file_utils::{FileManager, FileType, SUPPORTED_EXTENSIONS};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(&temp_dir.path().to_path_buf(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let input_file = Path::new("/tmp/input/talk.en.json");
    let output_dir = Path::new("/tmp/output");

    assert_eq!(
        FileManager::generate_output_path(input_file, output_dir, None),
        Path::new("/tmp/output/talk.en.srt")
    );
    assert_eq!(
        FileManager::generate_output_path(input_file, output_dir, Some("sentences")),
        Path::new("/tmp/output/talk.en.sentences.srt")
    );
}

/// Test that the source file is never chosen as output
#[test]
fn test_generate_output_path_withSameDirectory_shouldNotOverwriteSource() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(&temp_dir.path().to_path_buf(), "talk.srt")?;

    let output = FileManager::generate_output_path(&input, temp_dir.path(), None);

    assert_eq!(output, temp_dir.path().join("talk.sentences.srt"));
    Ok(())
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(test_subdir.is_dir());
    Ok(())
}

/// Test that append_to_log_file accumulates timestamped lines
#[test]
fn test_append_to_log_file_withTwoEntries_shouldKeepBoth() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_file = temp_dir.path().join("resub.issues.log");

    FileManager::append_to_log_file(&log_file, "first")?;
    FileManager::append_to_log_file(&log_file, "second")?;

    let content = fs::read_to_string(&log_file)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('[') && lines[0].ends_with("] first"));
    assert!(lines[1].ends_with("] second"));
    Ok(())
}

/// Test detection by extension and by content
#[test]
fn test_detect_file_type_withVariousFiles_shouldDetectFormat() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let srt = common::create_test_subtitle(&dir, "a.srt")?;
    let events = common::create_test_events(&dir, "b.json")?;
    let ttml = common::create_test_ttml(&dir, "c.xml")?;
    let sniffed_srt = common::create_test_file(&dir, "d.txt", common::FRAGMENTED_SRT)?;
    let other = common::create_test_file(&dir, "e.txt", "just some notes")?;

    assert_eq!(FileManager::detect_file_type(&srt)?, FileType::Srt);
    assert_eq!(FileManager::detect_file_type(&events)?, FileType::CaptionEvents);
    assert_eq!(FileManager::detect_file_type(&ttml)?, FileType::Ttml);
    assert_eq!(FileManager::detect_file_type(&sniffed_srt)?, FileType::Srt);
    assert_eq!(FileManager::detect_file_type(&other)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(dir.join("missing.srt")).is_err());

    Ok(())
}

/// Test that find_files_with_extensions walks subdirectories
#[test]
fn test_find_files_with_extensions_withNestedFiles_shouldFindSupportedOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    fs::create_dir_all(dir.join("season1"))?;

    common::create_test_subtitle(&dir, "a.srt")?;
    common::create_test_subtitle(&dir.join("season1"), "b.SRT")?;
    common::create_test_events(&dir, "c.json")?;
    common::create_test_file(&dir, "notes.txt", "ignored")?;

    let found = FileManager::find_files_with_extensions(&dir, SUPPORTED_EXTENSIONS)?;
    assert_eq!(found.len(), 3);
    assert!(found.windows(2).all(|pair| pair[0] <= pair[1]));

    let srt_only = FileManager::find_files_with_extensions(&dir, &[".srt"])?;
    assert_eq!(srt_only.len(), 2);

    Ok(())
}
