/*!
 * # signgloss - English to Indian Sign Language gloss
 *
 * A Rust library that turns spoken or written English into ISL gloss
 * sequences using a fixed, rule-based reordering.
 *
 * ## Features
 *
 * - Extract audio from video files (ffmpeg)
 * - Transcribe speech through an OpenAI-compatible Whisper endpoint
 * - Annotate English through a spaCy-style parsing service
 * - Split conditional clauses and reorder words into ISL order:
 *   time, modifier, object, subject, verb, negation
 *
 * ## Architecture
 *
 * - `gloss`: the rule engine (tokens, clause splitter, classifier, sentence pipeline)
 * - `media`: audio extraction and the video pipeline
 * - `providers`: annotation and transcription clients, plus mocks
 * - `app_config`: configuration management
 * - `app_controller`: main application controller
 * - `file_utils`: file system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: custom error types for the application
 */

#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod gloss;
pub mod language_utils;
pub mod media;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AnnotationError, ExtractionError, GlossError, TranscriptionError};
pub use gloss::{GlossSequence, GlossToken, ParsedSentence, SentencePipeline, Token, gloss_sentence};
pub use media::{MediaPipeline, VideoGloss};
