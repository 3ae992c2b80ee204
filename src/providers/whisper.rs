use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, header, multipart};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::errors::TranscriptionError;
use crate::providers::Transcriber;

/// Client for an OpenAI-compatible `/audio/transcriptions` endpoint
///
/// Works against the hosted OpenAI API as well as local Whisper servers that
/// mirror its interface.
#[derive(Debug)]
pub struct WhisperTranscriber {
    /// HTTP client for API requests
    client: Client,
    /// API base URL (e.g. "https://api.openai.com/v1")
    endpoint: String,
    /// Model name (e.g. "whisper-1")
    model: String,
    /// Bearer token, empty for local servers
    api_key: String,
    /// Spoken language hint (ISO 639-1)
    language: Option<String>,
}

/// Transcription response
#[derive(Debug, Deserialize)]
pub struct TranscriptionResponse {
    /// Recognized text
    pub text: String,
}

impl WhisperTranscriber {
    /// Create a new transcription client
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, TranscriptionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TranscriptionError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            language: None,
        })
    }

    /// Set the language hint
    pub fn language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        self.language = (!language.is_empty()).then_some(language);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            request
        } else {
            request.header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
        }
    }

    /// Extract the transcript, rejecting blank results
    pub fn extract_text(
        response: TranscriptionResponse,
        audio_path: &Path,
    ) -> Result<String, TranscriptionError> {
        let text = response.text.trim();
        if text.is_empty() {
            return Err(TranscriptionError::EmptyTranscript(audio_path.to_path_buf()));
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        if !audio_path.is_file() {
            return Err(TranscriptionError::AudioNotFound(audio_path.to_path_buf()));
        }

        let bytes = tokio::fs::read(audio_path)
            .await
            .map_err(|e| TranscriptionError::RequestFailed(format!("Failed to read audio: {}", e)))?;

        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.wav".to_string());

        let file_part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let mut form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("response_format", "json");
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        debug!("Uploading {:?} for transcription", audio_path);
        let response = self
            .authorize(self.client.post(self.url("audio/transcriptions")))
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Transcription service error ({}): {}", status, message);
            return Err(TranscriptionError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed = response
            .json::<TranscriptionResponse>()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        Self::extract_text(parsed, audio_path)
    }

    async fn test_connection(&self) -> Result<(), TranscriptionError> {
        let response = self
            .authorize(self.client.get(self.url("models")))
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TranscriptionError::ApiError {
                status_code: status.as_u16(),
                message: "connection test failed".to_string(),
            })
        }
    }
}
