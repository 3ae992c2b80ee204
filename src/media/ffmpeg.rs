use async_trait::async_trait;
use log::{debug, error};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::app_config::AudioConfig;
use crate::errors::ExtractionError;
use crate::media::{AudioExtractor, ExtractedAudio};

// @module: Audio extraction through ffmpeg

/// Extracts mono WAV audio from videos with ffprobe and ffmpeg
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    // @field: Output sample rate in Hz
    sample_rate: u32,
    // @field: Output channel count
    channels: u16,
    // @field: Timeout for each external command
    timeout_secs: u64,
    // @field: Write the audio next to the video instead of a temp dir
    keep_audio: bool,
}

impl FfmpegExtractor {
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            channels: config.channels,
            timeout_secs: config.timeout_secs,
            keep_audio: config.keep_audio,
        }
    }

    /// Run an external command, killing it when the timeout elapses
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output, ExtractionError> {
        let future = Command::new(program).args(args).kill_on_drop(true).output();

        let timeout_duration = Duration::from_secs(self.timeout_secs);
        tokio::select! {
            result = future => {
                result.map_err(|e| ExtractionError::CommandFailed(format!("Failed to execute {}: {}", program, e)))
            },
            _ = tokio::time::sleep(timeout_duration) => {
                Err(ExtractionError::Timeout { command: program.to_string(), seconds: self.timeout_secs })
            }
        }
    }

    /// Count audio streams reported by ffprobe
    pub async fn audio_stream_count(&self, video_path: &Path) -> Result<usize, ExtractionError> {
        let video = video_path.to_string_lossy().to_string();
        let output = self
            .run(
                "ffprobe",
                &["-v", "quiet", "-print_format", "json", "-show_streams", "-select_streams", "a", video.as_str()],
            )
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("ffprobe failed: {}", stderr);
            return Err(ExtractionError::CommandFailed(format!("ffprobe failed: {}", stderr.trim())));
        }

        Self::count_audio_streams(&String::from_utf8_lossy(&output.stdout))
    }

    /// Parse ffprobe JSON output and count its streams
    pub fn count_audio_streams(probe_json: &str) -> Result<usize, ExtractionError> {
        if probe_json.trim().is_empty() {
            return Ok(0);
        }

        let json: Value = serde_json::from_str(probe_json)
            .map_err(|e| ExtractionError::CommandFailed(format!("Failed to parse ffprobe JSON output: {}", e)))?;

        Ok(json
            .get("streams")
            .and_then(|s| s.as_array())
            .map(|streams| {
                streams
                    .iter()
                    .filter(|s| s.get("codec_type").and_then(|t| t.as_str()).unwrap_or("audio") == "audio")
                    .count()
            })
            .unwrap_or(0))
    }

    /// Where the audio for `video_path` goes when it is kept
    pub fn persistent_audio_path(video_path: &Path) -> PathBuf {
        let stem = video_path.file_stem().unwrap_or_default().to_string_lossy();
        video_path.with_file_name(format!("{}.audio.wav", stem))
    }

    /// Filter ffmpeg stderr to only show meaningful error lines, stripping the
    /// version banner, build configuration, and stream metadata noise.
    pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
        let noise_prefixes = [
            "ffmpeg version",
            "built with",
            "configuration:",
            "lib",
            "Input #",
            "Metadata:",
            "Duration:",
            "Stream #",
            "Output #",
            "Stream mapping:",
            "Press [q]",
            "size=",
        ];

        let meaningful: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !noise_prefixes.iter().any(|p| line.starts_with(p)))
            .collect();

        if meaningful.is_empty() {
            "unknown ffmpeg error (stderr was empty after filtering)".to_string()
        } else {
            meaningful.join("\n")
        }
    }
}

#[async_trait]
impl AudioExtractor for FfmpegExtractor {
    async fn extract(&self, video_path: &Path) -> Result<ExtractedAudio, ExtractionError> {
        if !video_path.is_file() {
            return Err(ExtractionError::VideoNotFound(video_path.to_path_buf()));
        }

        if self.audio_stream_count(video_path).await? == 0 {
            return Err(ExtractionError::NoAudioTrack(video_path.to_path_buf()));
        }

        let audio = if self.keep_audio {
            ExtractedAudio::persistent(Self::persistent_audio_path(video_path))
        } else {
            let workdir = tempfile::Builder::new().prefix("signgloss-").tempdir()?;
            let path = workdir.path().join("audio.wav");
            ExtractedAudio::temporary(path, workdir)
        };

        let video = video_path.to_string_lossy().to_string();
        let target = audio.path().to_string_lossy().to_string();
        let sample_rate = self.sample_rate.to_string();
        let channels = self.channels.to_string();

        debug!("Extracting audio from {:?} to {}", video_path, target);
        let output = self
            .run(
                "ffmpeg",
                &[
                    "-y",
                    "-i", video.as_str(),
                    "-vn",
                    "-acodec", "pcm_s16le",
                    "-ar", sample_rate.as_str(),
                    "-ac", channels.as_str(),
                    target.as_str(),
                ],
            )
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = Self::filter_ffmpeg_stderr(&stderr);
            error!("Audio extraction failed: {}", filtered);
            return Err(ExtractionError::CommandFailed(format!("ffmpeg extraction failed: {}", filtered)));
        }

        let size = tokio::fs::metadata(audio.path()).await?.len();
        if size == 0 {
            return Err(ExtractionError::CommandFailed(format!(
                "Extracted audio is empty for {:?}",
                video_path
            )));
        }

        Ok(audio)
    }
}
