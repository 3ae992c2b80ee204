/*!
 * Mock provider implementations for testing.
 *
 * - `StaticAnnotator` - Serves pre-registered parses, splits sentences on terminal punctuation
 * - `MockTranscriber` - Returns a fixed transcript or fails
 * - `MockExtractor` - Pretends to extract audio or fails
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{AnnotationError, ExtractionError, TranscriptionError};
use crate::gloss::ParsedSentence;
use crate::media::{AudioExtractor, ExtractedAudio};
use crate::providers::{Annotator, Transcriber};

/// Annotator answering from a fixed table of parses
#[derive(Debug, Default)]
pub struct StaticAnnotator {
    /// Parses keyed by trimmed sentence text
    parses: HashMap<String, ParsedSentence>,
    /// Fail every call when set
    failing: bool,
    /// Number of annotate calls served
    annotate_count: Arc<AtomicUsize>,
}

impl StaticAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an annotator whose every call fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Register a parse under its own text
    pub fn with_sentence(mut self, sentence: ParsedSentence) -> Self {
        self.parses.insert(sentence.text().trim().to_string(), sentence);
        self
    }

    pub fn annotate_count(&self) -> usize {
        self.annotate_count.load(Ordering::SeqCst)
    }

    /// Split on '.', '!' and '?' the way a simple sentencizer would
    pub fn split_sentences(text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();

        for c in text.chars() {
            current.push(c);
            if matches!(c, '.' | '!' | '?') {
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    sentences.push(trimmed.to_string());
                }
                current.clear();
            }
        }

        let rest = current.trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }

        sentences
    }
}

#[async_trait]
impl Annotator for StaticAnnotator {
    async fn annotate(&self, text: &str) -> Result<ParsedSentence, AnnotationError> {
        self.annotate_count.fetch_add(1, Ordering::SeqCst);

        if self.failing {
            return Err(AnnotationError::RequestFailed("mock annotator failure".to_string()));
        }
        if text.trim().is_empty() {
            return Err(AnnotationError::EmptyInput);
        }

        self.parses
            .get(text.trim())
            .cloned()
            .ok_or_else(|| AnnotationError::ParseError(format!("no parse registered for '{}'", text)))
    }

    async fn segment(&self, text: &str) -> Result<Vec<String>, AnnotationError> {
        if self.failing {
            return Err(AnnotationError::RequestFailed("mock annotator failure".to_string()));
        }
        if text.trim().is_empty() {
            return Err(AnnotationError::EmptyInput);
        }
        Ok(Self::split_sentences(text))
    }
}

/// Transcriber returning a fixed transcript
#[derive(Debug)]
pub struct MockTranscriber {
    transcript: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockTranscriber {
    /// Create a transcriber that always recognizes `transcript`
    pub fn working(transcript: impl Into<String>) -> Self {
        Self {
            transcript: Some(transcript.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a transcriber that always fails
    pub fn failing() -> Self {
        Self {
            transcript: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.transcript {
            Some(text) if text.trim().is_empty() => {
                Err(TranscriptionError::EmptyTranscript(audio_path.to_path_buf()))
            }
            Some(text) => Ok(text.clone()),
            None => Err(TranscriptionError::RequestFailed("mock transcriber failure".to_string())),
        }
    }
}

/// Behavior mode for the mock extractor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockExtraction {
    /// Always succeeds
    Working,
    /// Reports a video without audio
    NoAudio,
    /// Reports a missing video
    MissingVideo,
}

/// Extractor that never touches ffmpeg
#[derive(Debug)]
pub struct MockExtractor {
    behavior: MockExtraction,
    calls: Arc<AtomicUsize>,
}

impl MockExtractor {
    pub fn new(behavior: MockExtraction) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockExtraction::Working)
    }

    pub fn no_audio() -> Self {
        Self::new(MockExtraction::NoAudio)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioExtractor for MockExtractor {
    async fn extract(&self, video_path: &Path) -> Result<ExtractedAudio, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockExtraction::Working => {
                let audio: PathBuf = video_path.with_extension("wav");
                Ok(ExtractedAudio::persistent(audio))
            }
            MockExtraction::NoAudio => Err(ExtractionError::NoAudioTrack(video_path.to_path_buf())),
            MockExtraction::MissingVideo => {
                Err(ExtractionError::VideoNotFound(video_path.to_path_buf()))
            }
        }
    }
}
