/*!
 * Sentence pipeline tests: text in, gloss sequences out
 */

use std::sync::Arc;

use signgloss::SentencePipeline;
use signgloss::errors::AnnotationError;
use signgloss::providers::mock::StaticAnnotator;

use crate::common::{self, strings};

#[tokio::test]
async fn test_translate_ifRains_shouldMatchExpectedGloss() {
    let (pipeline, annotator) = common::fixture_pipeline();

    let gloss = pipeline.translate(common::IF_RAINS).await.unwrap();

    assert_eq!(strings(&gloss), vec!["RAIN", ",", "NOW", "UMBRELLA", "BRING"]);
    assert_eq!(gloss.to_string(), "RAIN , NOW UMBRELLA BRING");
    assert_eq!(annotator.annotate_count(), 1);
}

#[tokio::test]
async fn test_translate_meetTomorrow_shouldStartWithTomorrow() {
    let (pipeline, _) = common::fixture_pipeline();

    let gloss = pipeline.translate(common::MEET_TOMORROW).await.unwrap();

    assert_eq!(gloss.tokens()[0], "TOMORROW");
    assert_eq!(strings(&gloss), vec!["TOMORROW", "ME", "MEET"]);
}

#[tokio::test]
async fn test_translate_catSleeps_shouldEmitSubjectThenVerb() {
    let (pipeline, _) = common::fixture_pipeline();
    let gloss = pipeline.translate(common::CAT_SLEEPS).await.unwrap();
    assert_eq!(strings(&gloss), vec!["CAT", "SLEEP"]);
}

#[tokio::test]
async fn test_translate_twice_shouldBeIdentical() {
    let (pipeline, _) = common::fixture_pipeline();

    for sentence in [common::IF_RAINS, common::MEET_TOMORROW, common::CAT_SLEEPS, common::NOT_LIKE] {
        let first = pipeline.translate(sentence).await.unwrap();
        let second = pipeline.translate(sentence).await.unwrap();
        assert_eq!(first, second);
    }
}

#[tokio::test]
async fn test_translate_separator_shouldAppearOnlyWithCondition() {
    let (pipeline, _) = common::fixture_pipeline();

    let conditional = pipeline.translate(common::IF_RAINS).await.unwrap();
    assert_eq!(conditional.iter().filter(|t| t.is_separator()).count(), 1);

    for sentence in [common::MEET_TOMORROW, common::CAT_SLEEPS, common::NOT_LIKE] {
        let gloss = pipeline.translate(sentence).await.unwrap();
        assert!(gloss.iter().all(|t| !t.is_separator()));
    }
}

#[tokio::test]
async fn test_translateText_shouldKeepSentenceOrder() {
    let (pipeline, annotator) = common::fixture_pipeline();
    let text = format!("{} {} {}", common::CAT_SLEEPS, common::MEET_TOMORROW, common::NOT_LIKE);

    let results = pipeline.translate_text(&text).await.unwrap();

    let texts: Vec<&str> = results.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec![common::CAT_SLEEPS, common::MEET_TOMORROW, common::NOT_LIKE]);
    assert_eq!(strings(&results[2].gloss), vec!["APPLES", "I", "LIKE", "NOT"]);
    assert_eq!(annotator.annotate_count(), 3);
}

#[tokio::test]
async fn test_translate_withFailingAnnotator_shouldPropagateError() {
    let pipeline = SentencePipeline::new(Arc::new(StaticAnnotator::failing()));

    let result = pipeline.translate(common::CAT_SLEEPS).await;
    assert!(matches!(result, Err(AnnotationError::RequestFailed(_))));

    let result = pipeline.translate_text(common::CAT_SLEEPS).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_translate_withEmptyInput_shouldFail() {
    let (pipeline, _) = common::fixture_pipeline();
    assert!(matches!(pipeline.translate("  ").await, Err(AnnotationError::EmptyInput)));
}

#[test]
fn test_sentenceGloss_serialize_shouldUseStringArray() {
    let gloss = signgloss::gloss_sentence(&common::cat_sleeps());
    let json = serde_json::to_string(&gloss).unwrap();
    assert_eq!(json, r#"["CAT","SLEEP"]"#);
}
