/*!
 * Provider implementations for the external language services.
 *
 * This module contains client implementations for:
 * - spaCy-style annotation servers (tokens, POS, dependencies, entities)
 * - OpenAI-compatible speech transcription endpoints
 * - In-process mocks used for testing
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::{AnnotationError, TranscriptionError};
use crate::gloss::ParsedSentence;

/// Natural-language annotator
///
/// Implementations turn raw English into annotated tokens and split running
/// text into sentences.
#[async_trait]
pub trait Annotator: Send + Sync + Debug {
    /// Annotate a piece of text as a single parse
    ///
    /// # Arguments
    /// * `text` - The sentence to annotate
    ///
    /// # Returns
    /// * `Result<ParsedSentence, AnnotationError>` - Tokens in sentence order or an error
    async fn annotate(&self, text: &str) -> Result<ParsedSentence, AnnotationError>;

    /// Split running text into sentences, in order, trimmed and non-empty
    async fn segment(&self, text: &str) -> Result<Vec<String>, AnnotationError>;

    /// Test the connection to the annotator
    async fn test_connection(&self) -> Result<(), AnnotationError> {
        Ok(())
    }
}

/// Speech-to-text service
#[async_trait]
pub trait Transcriber: Send + Sync + Debug {
    /// Transcribe an audio file to plain text
    ///
    /// # Arguments
    /// * `audio_path` - Path to the audio file
    ///
    /// # Returns
    /// * `Result<String, TranscriptionError>` - The recognized text or an error
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError>;

    /// Test the connection to the transcription service
    async fn test_connection(&self) -> Result<(), TranscriptionError> {
        Ok(())
    }
}

pub mod mock;
pub mod spacy;
pub mod whisper;

pub use self::spacy::HttpAnnotator;
pub use self::whisper::WhisperTranscriber;
