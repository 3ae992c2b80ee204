/*!
 * Video pipeline.
 *
 * Stages run strictly one after another: extract the audio, transcribe it,
 * segment the transcript, gloss each sentence. The first failing stage aborts
 * the whole video.
 */

use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::GlossError;
use crate::gloss::{GlossSequence, SentenceGloss, SentencePipeline};
use crate::media::AudioExtractor;
use crate::providers::Transcriber;

/// Result of glossing one video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoGloss {
    /// Video the result was produced from
    pub source: PathBuf,
    /// Full recognized text
    pub transcript: String,
    /// Sentences in transcription order
    pub sentences: Vec<SentenceGloss>,
}

impl VideoGloss {
    /// One gloss sequence per sentence, in order
    pub fn glosses(&self) -> Vec<GlossSequence> {
        self.sentences.iter().map(|s| s.gloss.clone()).collect()
    }
}

/// Video to gloss pipeline with injected collaborators
#[derive(Debug, Clone)]
pub struct MediaPipeline {
    extractor: Arc<dyn AudioExtractor>,
    transcriber: Arc<dyn Transcriber>,
    sentences: SentencePipeline,
}

impl MediaPipeline {
    pub fn new(
        extractor: Arc<dyn AudioExtractor>,
        transcriber: Arc<dyn Transcriber>,
        sentences: SentencePipeline,
    ) -> Self {
        Self {
            extractor,
            transcriber,
            sentences,
        }
    }

    pub fn sentence_pipeline(&self) -> &SentencePipeline {
        &self.sentences
    }

    pub fn transcriber(&self) -> &Arc<dyn Transcriber> {
        &self.transcriber
    }

    /// Gloss every sentence spoken in a video
    pub async fn translate_video(&self, video_path: &Path) -> Result<VideoGloss, GlossError> {
        info!("Processing video: {:?}", video_path);

        let audio = self.extractor.extract(video_path).await?;
        info!("Audio extracted.");

        let transcript = self.transcriber.transcribe(audio.path()).await?;
        info!("Recognized English text: {}", transcript);

        // The audio is no longer needed once transcribed.
        drop(audio);

        let segmented = self.sentences.annotator().segment(&transcript).await?;

        let mut sentences = Vec::with_capacity(segmented.len());
        for text in segmented {
            let gloss = self.sentences.translate(&text).await?;
            info!("English Sentence: {}", text);
            info!("ISL Output: [{}]", gloss);
            sentences.push(SentenceGloss { text, gloss });
        }

        Ok(VideoGloss {
            source: video_path.to_path_buf(),
            transcript,
            sentences,
        })
    }
}
