/*!
 * Tests for provider implementations
 */

use std::path::Path;

use signgloss::errors::{AnnotationError, TranscriptionError};
use signgloss::gloss::{DependencyLabel, EntityType, PartOfSpeech};
use signgloss::providers::mock::{MockExtractor, MockTranscriber, StaticAnnotator};
use signgloss::providers::spacy::ParseResponse;
use signgloss::providers::whisper::TranscriptionResponse;
use signgloss::providers::{Annotator, HttpAnnotator, Transcriber, WhisperTranscriber};
use signgloss::media::AudioExtractor;
use signgloss::errors::ExtractionError;

use crate::common;

const MEET_RESPONSE: &str = r#"{
    "tokens": [
        {"i": 0, "text": "Meet", "lemma": "meet", "pos": "VERB", "dep": "ROOT", "ent_type": "", "head": 0},
        {"i": 1, "text": "me", "lemma": "I", "pos": "PRON", "dep": "dobj", "ent_type": "", "head": 0},
        {"i": 2, "text": "tomorrow", "lemma": "tomorrow", "pos": "NOUN", "dep": "npadvmod", "ent_type": "DATE", "head": 0},
        {"i": 3, "text": ".", "lemma": ".", "pos": "PUNCT", "dep": "punct", "head": 0}
    ],
    "sents": [{"text": "Meet me tomorrow.", "start": 0, "end": 4}]
}"#;

#[test]
fn test_parseResponse_intoSentence_shouldMapLabels() {
    let response: ParseResponse = serde_json::from_str(MEET_RESPONSE).unwrap();
    let sentence = response.into_sentence(common::MEET_TOMORROW).unwrap();

    assert_eq!(sentence.text(), common::MEET_TOMORROW);
    assert_eq!(sentence.len(), 4);

    let meet = &sentence.tokens()[0];
    assert_eq!(meet.pos, PartOfSpeech::Verb);
    assert_eq!(meet.dep, DependencyLabel::Root);
    assert!(meet.ent_type.is_none());

    let tomorrow = &sentence.tokens()[2];
    assert_eq!(tomorrow.ent_type, Some(EntityType::Date));
    assert_eq!(tomorrow.dep, DependencyLabel::Other("npadvmod".to_string()));

    // Missing ent_type defaults to none
    assert!(sentence.tokens()[3].ent_type.is_none());
}

#[test]
fn test_parseResponse_withDanglingHead_shouldBeMalformed() {
    let json = r#"{"tokens": [{"i": 0, "text": "Go", "lemma": "go", "pos": "VERB", "dep": "ROOT", "head": 7}]}"#;
    let response: ParseResponse = serde_json::from_str(json).unwrap();
    assert!(matches!(response.into_sentence("Go"), Err(AnnotationError::MalformedParse(_))));
}

#[test]
fn test_parseResponse_sentenceTexts_shouldTrimAndSkipBlanks() {
    let json = r#"{"tokens": [], "sents": [{"text": " Hello. "}, {"text": "  "}, {"text": "Bye."}]}"#;
    let response: ParseResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.sentence_texts(), vec!["Hello.".to_string(), "Bye.".to_string()]);
}

#[tokio::test]
async fn test_httpAnnotator_withBlankInput_shouldRejectWithoutRequest() {
    // Nothing listens on this port; a request would fail differently
    let annotator = HttpAnnotator::new("http://127.0.0.1:9", "en_core_web_sm", 1).unwrap();
    assert!(matches!(annotator.annotate("   ").await, Err(AnnotationError::EmptyInput)));
    assert!(matches!(annotator.segment("").await, Err(AnnotationError::EmptyInput)));
}

#[tokio::test]
async fn test_httpAnnotator_withUnreachableServer_shouldReportRequestFailure() {
    let annotator = HttpAnnotator::new("http://127.0.0.1:9", "en_core_web_sm", 1).unwrap();
    assert!(matches!(
        annotator.annotate("Hello.").await,
        Err(AnnotationError::RequestFailed(_))
    ));
    assert!(annotator.test_connection().await.is_err());
}

#[test]
fn test_whisper_extractText_withBlankTranscript_shouldBeEmptyTranscript() {
    let audio = Path::new("audio.wav");

    let ok = WhisperTranscriber::extract_text(
        TranscriptionResponse {
            text: "  Meet me tomorrow. ".to_string(),
        },
        audio,
    );
    assert_eq!(ok.unwrap(), "Meet me tomorrow.");

    let blank = WhisperTranscriber::extract_text(TranscriptionResponse { text: " \n".to_string() }, audio);
    assert!(matches!(blank, Err(TranscriptionError::EmptyTranscript(_))));
}

#[test]
fn test_clients_withValidSettings_shouldBuild() {
    assert!(HttpAnnotator::new("http://127.0.0.1:9", "en_core_web_sm", 30).is_ok());
    assert!(WhisperTranscriber::new("http://127.0.0.1:9/v1", "base", "key", 30).is_ok());
}

#[tokio::test]
async fn test_whisper_withMissingAudio_shouldFailBeforeUpload() {
    let transcriber = WhisperTranscriber::new("http://127.0.0.1:9/v1", "base", "", 1)
        .unwrap()
        .language("en");
    let result = transcriber.transcribe(Path::new("/no/such/audio.wav")).await;
    assert!(matches!(result, Err(TranscriptionError::AudioNotFound(_))));
}

#[tokio::test]
async fn test_staticAnnotator_shouldServeRegisteredParses() {
    let annotator = common::fixture_annotator();

    let parsed = annotator.annotate(common::CAT_SLEEPS).await.unwrap();
    assert_eq!(parsed.len(), 4);
    assert_eq!(annotator.annotate_count(), 1);

    assert!(matches!(
        annotator.annotate("Unknown sentence.").await,
        Err(AnnotationError::ParseError(_))
    ));
    assert!(StaticAnnotator::failing().annotate(common::CAT_SLEEPS).await.is_err());
}

#[test]
fn test_staticAnnotator_splitSentences_shouldSplitOnTerminalPunctuation() {
    assert_eq!(
        StaticAnnotator::split_sentences("Meet me tomorrow. The cat sleeps!  Really? trailing"),
        vec!["Meet me tomorrow.", "The cat sleeps!", "Really?", "trailing"]
    );
    assert!(StaticAnnotator::split_sentences("   ").is_empty());
}

#[tokio::test]
async fn test_mockTranscriber_shouldCountCalls() {
    let transcriber = MockTranscriber::working("Hello.");
    assert_eq!(transcriber.transcribe(Path::new("a.wav")).await.unwrap(), "Hello.");
    assert_eq!(transcriber.calls(), 1);

    let blank = MockTranscriber::working("   ");
    assert!(matches!(
        blank.transcribe(Path::new("a.wav")).await,
        Err(TranscriptionError::EmptyTranscript(_))
    ));
}

#[tokio::test]
async fn test_mockExtractor_noAudio_shouldReportNoAudioTrack() {
    let extractor = MockExtractor::no_audio();
    let result = extractor.extract(Path::new("silent.mp4")).await;
    assert!(matches!(result, Err(ExtractionError::NoAudioTrack(_))));
    assert_eq!(extractor.calls(), 1);

    let audio = MockExtractor::working().extract(Path::new("talk.mp4")).await.unwrap();
    assert_eq!(audio.path(), Path::new("talk.wav"));
    assert!(!audio.is_temporary());
}
