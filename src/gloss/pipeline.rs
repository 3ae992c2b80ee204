/*!
 * Sentence pipeline: annotate, split, classify, join.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::AnnotationError;
use crate::providers::Annotator;

use super::classifier::classify;
use super::sequence::GlossSequence;
use super::splitter::split_clauses;
use super::token::ParsedSentence;

/// A sentence paired with its gloss
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceGloss {
    /// English sentence as segmented
    pub text: String,
    /// Gloss sequence for the sentence
    pub gloss: GlossSequence,
}

/// Gloss an already annotated sentence.
///
/// Pure function of the parse: the condition clause (if any) comes first,
/// followed by a comma and the main clause.
pub fn gloss_sentence(sentence: &ParsedSentence) -> GlossSequence {
    let split = split_clauses(sentence);
    let condition = classify(split.condition());
    let main = classify(split.main());

    debug!("condition: [{}] main: [{}]", condition, main);

    GlossSequence::join_clauses(condition, main)
}

/// Translates English sentences into gloss sequences using an injected annotator
#[derive(Debug, Clone)]
pub struct SentencePipeline {
    annotator: Arc<dyn Annotator>,
}

impl SentencePipeline {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self { annotator }
    }

    pub fn annotator(&self) -> &Arc<dyn Annotator> {
        &self.annotator
    }

    /// Annotate one sentence and gloss it
    pub async fn translate(&self, sentence: &str) -> Result<GlossSequence, AnnotationError> {
        let parsed = self.annotator.annotate(sentence).await?;
        Ok(gloss_sentence(&parsed))
    }

    /// Segment free text into sentences and gloss each one, in order
    pub async fn translate_text(&self, text: &str) -> Result<Vec<SentenceGloss>, AnnotationError> {
        let sentences = self.annotator.segment(text).await?;
        let mut results = Vec::with_capacity(sentences.len());

        for sentence in sentences {
            let gloss = self.translate(&sentence).await?;
            results.push(SentenceGloss {
                text: sentence,
                gloss,
            });
        }

        Ok(results)
    }
}
