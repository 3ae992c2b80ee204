/*!
 * Media side of the system: audio extraction and the video pipeline.
 *
 * - `ffmpeg`: audio extraction through ffprobe/ffmpeg
 * - `pipeline`: video → audio → text → sentences → glosses
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::errors::ExtractionError;

pub mod ffmpeg;
pub mod pipeline;

pub use self::ffmpeg::FfmpegExtractor;
pub use self::pipeline::{MediaPipeline, VideoGloss};

/// Audio file produced from a video
///
/// When extracted into a temporary directory, the directory lives as long as
/// this value and is removed when it is dropped.
#[derive(Debug)]
pub struct ExtractedAudio {
    path: PathBuf,
    _workdir: Option<TempDir>,
}

impl ExtractedAudio {
    /// Audio stored inside a temporary directory owned by this value
    pub fn temporary(path: PathBuf, workdir: TempDir) -> Self {
        Self {
            path,
            _workdir: Some(workdir),
        }
    }

    /// Audio stored at a location that outlives this value
    pub fn persistent(path: PathBuf) -> Self {
        Self {
            path,
            _workdir: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self._workdir.is_some()
    }
}

/// Extracts the audio track of a video into a standalone file
#[async_trait]
pub trait AudioExtractor: Send + Sync + Debug {
    /// Extract the audio of `video_path`
    ///
    /// # Returns
    /// * `Result<ExtractedAudio, ExtractionError>` - Handle to the audio file or an error
    async fn extract(&self, video_path: &Path) -> Result<ExtractedAudio, ExtractionError>;
}
