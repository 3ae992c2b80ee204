use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType};
use crate::gloss::{SentenceGloss, SentencePipeline};
use crate::media::{FfmpegExtractor, MediaPipeline, VideoGloss};
use crate::providers::{Annotator, HttpAnnotator, Transcriber, WhisperTranscriber};

// @module: Application controller for video and text glossing

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Video pipeline with its collaborators
    pipeline: MediaPipeline,
}

impl Controller {
    // @method: Create a controller wired to the configured services
    pub fn with_config(config: Config) -> Result<Self> {
        let annotator = HttpAnnotator::new(
            config.annotator.endpoint.as_str(),
            config.annotator.model.as_str(),
            config.annotator.timeout_secs,
        )
        .context("Failed to create annotation client")?;

        let transcription = &config.transcription;
        let transcriber = WhisperTranscriber::new(
            transcription.get_endpoint(),
            transcription.get_model(),
            transcription.api_key.as_str(),
            transcription.timeout_secs,
        )
        .context("Failed to create transcription client")?
        .language(transcription.get_language());

        let extractor = FfmpegExtractor::new(&config.audio);

        let pipeline = MediaPipeline::new(
            Arc::new(extractor),
            Arc::new(transcriber),
            SentencePipeline::new(Arc::new(annotator)),
        );

        Ok(Self::with_pipeline(config, pipeline))
    }

    // @method: Create a controller around an already built pipeline
    pub fn with_pipeline(config: Config, pipeline: MediaPipeline) -> Self {
        Self { config, pipeline }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Probe the annotation and transcription services, warning on failure
    pub async fn check_services(&self) -> bool {
        let mut healthy = true;

        let annotator: &Arc<dyn Annotator> = self.pipeline.sentence_pipeline().annotator();
        if let Err(e) = annotator.test_connection().await {
            warn!("Annotation service unavailable at {}: {}", self.config.annotator.endpoint, e);
            healthy = false;
        }

        let transcriber: &Arc<dyn Transcriber> = self.pipeline.transcriber();
        if let Err(e) = transcriber.test_connection().await {
            warn!(
                "{} transcription service unavailable at {}: {}",
                self.config.transcription.provider.display_name(),
                self.config.transcription.get_endpoint(),
                e
            );
            healthy = false;
        }

        healthy
    }

    /// Run on a video file or a folder of videos
    pub async fn run(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        match FileManager::detect_file_type(input).await? {
            FileType::Video => self.run_video(input, output).await.map(|_| ()),
            FileType::Directory => self.run_folder(input, output).await,
            FileType::Unknown => Err(anyhow!("Unsupported input, expected a video file or a folder: {:?}", input)),
        }
    }

    /// Gloss one video, print the result and optionally write a JSON report
    pub async fn run_video(&self, video: &Path, output: Option<&Path>) -> Result<VideoGloss> {
        let start_time = Instant::now();

        let result = self
            .pipeline
            .translate_video(video)
            .await
            .with_context(|| format!("Failed to gloss video: {:?}", video))?;

        Self::print_sentences(&result.sentences);

        if let Some(report_path) = output {
            Self::write_report(report_path, &result)?;
        }

        info!(
            "Glossed {} sentence(s) in {}",
            result.sentences.len(),
            Self::format_duration(start_time.elapsed())
        );
        Ok(result)
    }

    /// Gloss every video below a folder, one at a time
    ///
    /// A failing video is logged and skipped. When `output_dir` is given, one
    /// `{stem}.gloss.json` report is written per video.
    pub async fn run_folder(&self, input_dir: &Path, output_dir: Option<&Path>) -> Result<()> {
        let start_time = Instant::now();

        let videos = FileManager::find_videos(input_dir)?;
        if videos.is_empty() {
            return Err(anyhow!("No video files found in directory: {:?}", input_dir));
        }

        if let Some(dir) = output_dir {
            FileManager::ensure_dir(dir)?;
        }

        let folder_pb = ProgressBar::new(videos.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} videos {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(style.progress_chars("█▓▒░"));

        let mut success_count = 0;
        let mut error_count = 0;

        for video in &videos {
            let file_name = video
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(file_name.clone());

            let report = output_dir.map(|dir| FileManager::generate_output_path(video, dir, "gloss.json"));

            match self.run_video(video, report.as_deref()).await {
                Ok(_) => success_count += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    error_count += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("done");

        info!(
            "Folder processing completed: {} processed, {} errors ({})",
            success_count,
            error_count,
            Self::format_duration(start_time.elapsed())
        );
        Ok(())
    }

    /// Gloss raw English text without any audio step
    pub async fn run_text(&self, text: &str, output: Option<&Path>) -> Result<Vec<SentenceGloss>> {
        let sentences = self
            .pipeline
            .sentence_pipeline()
            .translate_text(text)
            .await
            .context("Failed to gloss text")?;

        Self::print_sentences(&sentences);

        if let Some(report_path) = output {
            Self::write_report(report_path, &sentences)?;
        }

        Ok(sentences)
    }

    fn print_sentences(sentences: &[SentenceGloss]) {
        for sentence in sentences {
            println!("English Sentence: {}", sentence.text);
            println!("ISL Output: [{}]", sentence.gloss);
        }
    }

    /// Serialize a result as pretty JSON to `path`
    pub fn write_report<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
        FileManager::write_to_file(path, &json)?;
        debug!("Report written to {:?}", path);
        Ok(())
    }

    // Format duration in a human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
