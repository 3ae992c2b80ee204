use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::AnnotationError;
use crate::gloss::{DependencyLabel, EntityType, ParsedSentence, PartOfSpeech, Token};
use crate::providers::Annotator;

/// Client for a spaCy-style annotation server
///
/// The server exposes `POST /parse` returning doc-level tokens (with head
/// indices) and sentence spans, and `GET /health`.
#[derive(Debug)]
pub struct HttpAnnotator {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the annotation service
    endpoint: String,
    /// Pipeline name forwarded to the server (e.g. "en_core_web_sm")
    model: String,
}

/// Parse request body
#[derive(Debug, Serialize)]
pub struct ParseRequest {
    /// Text to annotate
    pub text: String,
    /// Pipeline name
    pub model: String,
}

/// Token as returned by the annotation server
#[derive(Debug, Deserialize)]
pub struct ParseToken {
    /// Index within the document
    pub i: usize,
    /// Surface form
    pub text: String,
    /// Base form
    pub lemma: String,
    /// Coarse POS tag
    pub pos: String,
    /// Dependency label
    pub dep: String,
    /// Entity type, empty string when none
    #[serde(default)]
    pub ent_type: String,
    /// Index of the head token
    pub head: usize,
}

/// Sentence span as returned by the annotation server
#[derive(Debug, Deserialize)]
pub struct ParseSentence {
    /// Sentence text
    pub text: String,
    /// First token index
    #[serde(default)]
    pub start: usize,
    /// One past the last token index
    #[serde(default)]
    pub end: usize,
}

/// Parse response body
#[derive(Debug, Deserialize)]
pub struct ParseResponse {
    /// Tokens of the whole document
    pub tokens: Vec<ParseToken>,
    /// Sentence segmentation of the document
    #[serde(default)]
    pub sents: Vec<ParseSentence>,
}

impl ParseResponse {
    /// Convert the wire tokens into a validated sentence
    pub fn into_sentence(self, text: &str) -> Result<ParsedSentence, AnnotationError> {
        let tokens = self
            .tokens
            .into_iter()
            .map(|t| Token {
                index: t.i,
                text: t.text,
                lemma: t.lemma,
                pos: PartOfSpeech::from(t.pos),
                dep: DependencyLabel::from(t.dep),
                ent_type: EntityType::parse_optional(&t.ent_type),
                head: t.head,
            })
            .collect();

        ParsedSentence::new(text, tokens)
    }

    /// Sentence texts, trimmed, blanks removed
    pub fn sentence_texts(&self) -> Vec<String> {
        self.sents
            .iter()
            .map(|s| s.text.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl HttpAnnotator {
    /// Create a new annotation client
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, AnnotationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AnnotationError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
    }

    /// Send a parse request and decode the response
    pub async fn parse(&self, text: &str) -> Result<ParseResponse, AnnotationError> {
        if text.trim().is_empty() {
            return Err(AnnotationError::EmptyInput);
        }

        let request = ParseRequest {
            text: text.to_string(),
            model: self.model.clone(),
        };

        let response = self
            .client
            .post(self.url("parse"))
            .json(&request)
            .send()
            .await
            .map_err(|e| AnnotationError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Annotation service error ({}): {}", status, message);
            return Err(AnnotationError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed = response
            .json::<ParseResponse>()
            .await
            .map_err(|e| AnnotationError::ParseError(e.to_string()))?;

        debug!("Annotated {} tokens in {} sentence(s)", parsed.tokens.len(), parsed.sents.len());
        Ok(parsed)
    }
}

#[async_trait]
impl Annotator for HttpAnnotator {
    async fn annotate(&self, text: &str) -> Result<ParsedSentence, AnnotationError> {
        self.parse(text).await?.into_sentence(text)
    }

    async fn segment(&self, text: &str) -> Result<Vec<String>, AnnotationError> {
        Ok(self.parse(text).await?.sentence_texts())
    }

    async fn test_connection(&self) -> Result<(), AnnotationError> {
        let response = self
            .client
            .get(self.url("health"))
            .send()
            .await
            .map_err(|e| AnnotationError::RequestFailed(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AnnotationError::ApiError {
                status_code: response.status().as_u16(),
                message: "health check failed".to_string(),
            })
        }
    }
}
