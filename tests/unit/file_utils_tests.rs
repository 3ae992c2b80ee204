/*!
 * Tests for file system utilities
 */

use anyhow::Result;
use signgloss::file_utils::{FileManager, FileType};
use std::path::{Path, PathBuf};

use crate::common;

#[test]
fn test_generateOutputPath_shouldReplaceExtension() {
    let path = FileManager::generate_output_path("/videos/talk.mp4", "/reports", "gloss.json");
    assert_eq!(path, PathBuf::from("/reports/talk.gloss.json"));

    let dotted = FileManager::generate_output_path("talk.mkv", "out", ".json");
    assert_eq!(dotted, PathBuf::from("out/talk.json"));
}

#[test]
fn test_hasVideoExtension_shouldBeCaseInsensitive() {
    assert!(FileManager::has_video_extension("clip.MP4"));
    assert!(FileManager::has_video_extension("clip.webm"));
    assert!(!FileManager::has_video_extension("notes.txt"));
    assert!(!FileManager::has_video_extension("no_extension"));
}

#[test]
fn test_findVideos_shouldRecurseAndSort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("day2");
    FileManager::ensure_dir(&nested)?;

    common::create_test_file(temp_dir.path(), "b.mp4", "x")?;
    common::create_test_file(temp_dir.path(), "a.mkv", "x")?;
    common::create_test_file(temp_dir.path(), "readme.txt", "x")?;
    common::create_test_file(&nested, "c.mov", "x")?;

    let videos = FileManager::find_videos(temp_dir.path())?;
    let names: Vec<_> = videos
        .iter()
        .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_path_buf())
        .collect();

    assert_eq!(
        names,
        vec![PathBuf::from("a.mkv"), PathBuf::from("b.mp4"), Path::new("day2").join("c.mov")]
    );
    Ok(())
}

#[test]
fn test_writeToFile_shouldCreateParentDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("reports").join("talk.gloss.json");

    FileManager::write_to_file(&target, "[]")?;

    assert!(target.is_file());
    assert_eq!(std::fs::read_to_string(&target)?, "[]");
    Ok(())
}

#[tokio::test]
async fn test_detectFileType_shouldClassifyInputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video = common::create_test_file(temp_dir.path(), "talk.mp4", "not really a video")?;

    assert_eq!(FileManager::detect_file_type(temp_dir.path()).await?, FileType::Directory);
    assert_eq!(FileManager::detect_file_type(&video).await?, FileType::Video);
    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.mp4")).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_detectFileType_withTextFile_shouldBeUnknown() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let notes = common::create_test_file(temp_dir.path(), "notes.txt", "plain text")?;

    // Unknown extensions go through the async ffprobe check
    assert_eq!(FileManager::detect_file_type(&notes).await?, FileType::Unknown);
    Ok(())
}
