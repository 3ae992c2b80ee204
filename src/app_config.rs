use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Annotation service settings
    #[serde(default)]
    pub annotator: AnnotatorConfig,

    /// Speech-to-text settings
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Audio extraction settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Annotation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnnotatorConfig {
    /// Base URL of the annotation server
    #[serde(default = "default_annotator_endpoint")]
    pub endpoint: String,

    /// Pipeline name requested from the server
    #[serde(default = "default_annotator_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_annotator_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_annotator_endpoint(),
            model: default_annotator_model(),
            timeout_secs: default_annotator_timeout_secs(),
        }
    }
}

/// Transcription provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    // @provider: Local OpenAI-compatible Whisper server
    #[default]
    Local,
    // @provider: Hosted OpenAI API
    OpenAI,
}

impl TranscriptionProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Local => "Local Whisper",
            Self::OpenAI => "OpenAI",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Local => "local".to_string(),
            Self::OpenAI => "openai".to_string(),
        }
    }
}

impl std::fmt::Display for TranscriptionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranscriptionProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "openai" => Ok(Self::OpenAI),
            _ => Err(anyhow!("Invalid transcription provider: {}", s)),
        }
    }
}

/// Speech-to-text configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    /// Transcription provider to use
    #[serde(default)]
    pub provider: TranscriptionProvider,

    /// Service URL, empty for the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Model name, empty for the provider default
    #[serde(default = "String::new")]
    pub model: String,

    /// API key (required for the hosted OpenAI API)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Spoken language (ISO 639-1 or 639-2/T)
    #[serde(default = "default_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            provider: TranscriptionProvider::default(),
            endpoint: String::new(),
            model: String::new(),
            api_key: String::new(),
            language: default_language(),
            timeout_secs: default_transcription_timeout_secs(),
        }
    }
}

impl TranscriptionConfig {
    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }

        match self.provider {
            TranscriptionProvider::Local => default_local_whisper_endpoint(),
            TranscriptionProvider::OpenAI => default_openai_endpoint(),
        }
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if !self.model.is_empty() {
            return self.model.clone();
        }

        match self.provider {
            TranscriptionProvider::Local => default_local_whisper_model(),
            TranscriptionProvider::OpenAI => default_openai_model(),
        }
    }

    /// Language hint as ISO 639-1 where one exists
    pub fn get_language(&self) -> String {
        language_utils::normalize_to_part1_or_part2t(&self.language)
            .unwrap_or_else(|_| self.language.clone())
    }
}

/// Audio extraction configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AudioConfig {
    /// Output sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Output channel count
    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Timeout for each ffmpeg/ffprobe invocation in seconds
    #[serde(default = "default_ffmpeg_timeout_secs")]
    pub timeout_secs: u64,

    /// Keep the extracted audio next to the video
    #[serde(default)]
    pub keep_audio: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            timeout_secs: default_ffmpeg_timeout_secs(),
            keep_audio: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_annotator_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_annotator_model() -> String {
    "en_core_web_sm".to_string()
}

fn default_annotator_timeout_secs() -> u64 {
    30
}

fn default_local_whisper_endpoint() -> String {
    "http://localhost:8000/v1".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_local_whisper_model() -> String {
    "base".to_string()
}

fn default_openai_model() -> String {
    "whisper-1".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_transcription_timeout_secs() -> u64 {
    300 // transcription of long videos is slow
}

fn default_sample_rate() -> u32 {
    16_000 // Whisper models expect 16 kHz
}

fn default_channels() -> u16 {
    1
}

fn default_ffmpeg_timeout_secs() -> u64 {
    120
}

fn validate_endpoint(name: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint).with_context(|| format!("Invalid {} endpoint: {}", name, endpoint))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(anyhow!("Unsupported scheme '{}' for {} endpoint", other, name)),
    }
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write this configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json).with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        validate_endpoint("annotator", &self.annotator.endpoint)?;
        validate_endpoint("transcription", &self.transcription.get_endpoint())?;

        if self.annotator.model.trim().is_empty() {
            return Err(anyhow!("Annotator model must not be empty"));
        }

        // Only English speech is glossed
        let language = &self.transcription.language;
        language_utils::validate_language_code(language)?;
        if !language_utils::language_codes_match(language, "en") {
            return Err(anyhow!(
                "Unsupported spoken language '{}': only English is supported",
                language
            ));
        }

        if self.transcription.provider == TranscriptionProvider::OpenAI && self.transcription.api_key.is_empty() {
            return Err(anyhow!("Transcription API key is required for OpenAI provider"));
        }

        if self.audio.sample_rate == 0 {
            return Err(anyhow!("Audio sample rate must be positive"));
        }
        if !(1..=2).contains(&self.audio.channels) {
            return Err(anyhow!("Audio channels must be 1 or 2, got {}", self.audio.channels));
        }
        if self.audio.timeout_secs == 0 || self.annotator.timeout_secs == 0 || self.transcription.timeout_secs == 0 {
            return Err(anyhow!("Timeouts must be at least one second"));
        }

        Ok(())
    }
}
