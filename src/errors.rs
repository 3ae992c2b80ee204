/*!
 * Error types for the signgloss application.
 *
 * Each external collaborator gets its own error enum so a failure can be
 * attributed to the stage that produced it. `GlossError` wraps all of them
 * for the pipelines; the application layer converts it into `anyhow::Error`.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while annotating or segmenting text
#[derive(Error, Debug)]
pub enum AnnotationError {
    /// Input was empty or whitespace only
    #[error("Cannot annotate empty text")]
    EmptyInput,

    /// The annotation service could not be reached
    #[error("Annotation request failed: {0}")]
    RequestFailed(String),

    /// The annotation service answered with an error status
    #[error("Annotation service responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// The response body could not be decoded
    #[error("Failed to parse annotation response: {0}")]
    ParseError(String),

    /// The parse itself is inconsistent (bad indices, dangling heads)
    #[error("Malformed parse: {0}")]
    MalformedParse(String),
}

/// Errors raised while transcribing audio
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// The audio file handed to the transcriber does not exist
    #[error("Audio file not found: {0:?}")]
    AudioNotFound(PathBuf),

    /// The transcription service could not be reached
    #[error("Transcription request failed: {0}")]
    RequestFailed(String),

    /// The transcription service answered with an error status
    #[error("Transcription service responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// The response body could not be decoded
    #[error("Failed to parse transcription response: {0}")]
    ParseError(String),

    /// The service returned no recognizable speech
    #[error("No speech recognized in {0:?}")]
    EmptyTranscript(PathBuf),
}

/// Errors raised while extracting the audio track of a video
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The video file does not exist
    #[error("Video file does not exist: {0:?}")]
    VideoNotFound(PathBuf),

    /// The container has no audio stream
    #[error("No audio track found in {0:?}")]
    NoAudioTrack(PathBuf),

    /// ffmpeg or ffprobe failed
    #[error("Audio extraction command failed: {0}")]
    CommandFailed(String),

    /// ffmpeg or ffprobe did not finish in time
    #[error("{command} timed out after {seconds} seconds")]
    Timeout {
        /// Name of the external command
        command: String,
        /// Configured timeout
        seconds: u64,
    },

    /// Filesystem error around the temporary audio artifact
    #[error("I/O error during audio extraction: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort the processing of a video or a sentence
#[derive(Error, Debug)]
pub enum GlossError {
    /// Audio extraction stage failed
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// Transcription stage failed
    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    /// Annotation or segmentation stage failed
    #[error("Annotation failed: {0}")]
    Annotation(#[from] AnnotationError),
}
