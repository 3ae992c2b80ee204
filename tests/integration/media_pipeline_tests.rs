/*!
 * Media pipeline tests with mocked extraction and transcription
 */

use std::path::Path;
use std::sync::Arc;

use signgloss::SentencePipeline;
use signgloss::errors::{AnnotationError, ExtractionError, GlossError, TranscriptionError};
use signgloss::media::MediaPipeline;
use signgloss::providers::mock::{MockExtraction, MockExtractor, MockTranscriber, StaticAnnotator};

use crate::common::{self, strings};

struct Harness {
    pipeline: MediaPipeline,
    extractor: Arc<MockExtractor>,
    transcriber: Arc<MockTranscriber>,
    annotator: Arc<StaticAnnotator>,
}

fn harness(extractor: MockExtractor, transcriber: MockTranscriber, annotator: StaticAnnotator) -> Harness {
    common::init_test_logger();

    let extractor = Arc::new(extractor);
    let transcriber = Arc::new(transcriber);
    let annotator = Arc::new(annotator);

    let pipeline = MediaPipeline::new(
        extractor.clone(),
        transcriber.clone(),
        SentencePipeline::new(annotator.clone()),
    );

    Harness {
        pipeline,
        extractor,
        transcriber,
        annotator,
    }
}

#[tokio::test]
async fn test_translateVideo_shouldGlossSentencesInTranscriptOrder() {
    let transcript = format!("{} {}", common::IF_RAINS, common::MEET_TOMORROW);
    let h = harness(
        MockExtractor::working(),
        MockTranscriber::working(transcript.clone()),
        common::fixture_annotator(),
    );

    let result = h.pipeline.translate_video(Path::new("lecture.mp4")).await.unwrap();

    assert_eq!(result.source, Path::new("lecture.mp4"));
    assert_eq!(result.transcript, transcript);

    let glosses: Vec<Vec<String>> = result.glosses().iter().map(strings).collect();
    assert_eq!(
        glosses,
        vec![
            vec!["RAIN", ",", "NOW", "UMBRELLA", "BRING"],
            vec!["TOMORROW", "ME", "MEET"],
        ]
    );
    assert_eq!(h.extractor.calls(), 1);
    assert_eq!(h.transcriber.calls(), 1);
    assert_eq!(h.annotator.annotate_count(), 2);
}

#[tokio::test]
async fn test_translateVideo_withoutAudio_shouldAbortBeforeTranscription() {
    let h = harness(
        MockExtractor::no_audio(),
        MockTranscriber::working(common::CAT_SLEEPS),
        common::fixture_annotator(),
    );

    let result = h.pipeline.translate_video(Path::new("silent.mp4")).await;

    assert!(matches!(
        result,
        Err(GlossError::Extraction(ExtractionError::NoAudioTrack(_)))
    ));
    assert_eq!(h.transcriber.calls(), 0);
    assert_eq!(h.annotator.annotate_count(), 0);
}

#[tokio::test]
async fn test_translateVideo_withMissingVideo_shouldReportExtractionFailure() {
    let h = harness(
        MockExtractor::new(MockExtraction::MissingVideo),
        MockTranscriber::working(common::CAT_SLEEPS),
        common::fixture_annotator(),
    );

    let result = h.pipeline.translate_video(Path::new("gone.mp4")).await;

    assert!(matches!(
        result,
        Err(GlossError::Extraction(ExtractionError::VideoNotFound(_)))
    ));
}

#[tokio::test]
async fn test_translateVideo_withFailingTranscriber_shouldAbortBeforeAnnotation() {
    let h = harness(MockExtractor::working(), MockTranscriber::failing(), common::fixture_annotator());

    let result = h.pipeline.translate_video(Path::new("lecture.mp4")).await;

    assert!(matches!(result, Err(GlossError::Transcription(_))));
    assert_eq!(h.extractor.calls(), 1);
    assert_eq!(h.annotator.annotate_count(), 0);
}

#[tokio::test]
async fn test_translateVideo_withSilentAudio_shouldReportEmptyTranscript() {
    let h = harness(MockExtractor::working(), MockTranscriber::working("   "), common::fixture_annotator());

    let result = h.pipeline.translate_video(Path::new("lecture.mp4")).await;

    assert!(matches!(
        result,
        Err(GlossError::Transcription(TranscriptionError::EmptyTranscript(_)))
    ));
}

#[tokio::test]
async fn test_translateVideo_withUnknownSentence_shouldAbortOnFirstFailure() {
    // Second sentence has no registered parse, third is never reached
    let transcript = format!("{} Nobody parsed this. {}", common::CAT_SLEEPS, common::MEET_TOMORROW);
    let h = harness(
        MockExtractor::working(),
        MockTranscriber::working(transcript),
        common::fixture_annotator(),
    );

    let result = h.pipeline.translate_video(Path::new("lecture.mp4")).await;

    assert!(matches!(
        result,
        Err(GlossError::Annotation(AnnotationError::ParseError(_)))
    ));
    assert_eq!(h.annotator.annotate_count(), 2);
}

#[tokio::test]
async fn test_translateVideo_withFailingAnnotator_shouldReportAnnotationFailure() {
    let h = harness(
        MockExtractor::working(),
        MockTranscriber::working(common::CAT_SLEEPS),
        StaticAnnotator::failing(),
    );

    let result = h.pipeline.translate_video(Path::new("lecture.mp4")).await;
    assert!(matches!(result, Err(GlossError::Annotation(_))));
}

#[tokio::test]
async fn test_videoGloss_serialize_shouldContainSentences() {
    let h = harness(
        MockExtractor::working(),
        MockTranscriber::working(common::CAT_SLEEPS),
        common::fixture_annotator(),
    );

    let result = h.pipeline.translate_video(Path::new("cat.mp4")).await.unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["sentences"][0]["text"], common::CAT_SLEEPS);
    assert_eq!(json["sentences"][0]["gloss"], serde_json::json!(["CAT", "SLEEP"]));
}
