/*!
 * Tests for ISO language code utilities
 */

use signgloss::app_config::Config;
use signgloss::language_utils::{
    LanguageCodeType, language_codes_match, normalize_to_part1_or_part2t, validate_language_code,
};

#[test]
fn test_validateLanguageCode_shouldDetectCodeType() {
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("eng").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code(" EN ").unwrap(), LanguageCodeType::Part1);
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("english").is_err());
    assert!(validate_language_code("zz").is_err());
}

#[test]
fn test_validateLanguageCode_withBibliographicCode_shouldReject() {
    assert!(validate_language_code("ger").is_err());
    assert!(validate_language_code("fre").is_err());
}

#[test]
fn test_normalize_shouldPreferTwoLetterForm() {
    assert_eq!(normalize_to_part1_or_part2t("eng").unwrap(), "en");
    assert_eq!(normalize_to_part1_or_part2t(" EN ").unwrap(), "en");
    assert!(normalize_to_part1_or_part2t("xx").is_err());
}

#[test]
fn test_languageCodesMatch_acrossForms_shouldMatch() {
    assert!(language_codes_match("en", "eng"));
    assert!(!language_codes_match("en", "fr"));
    assert!(!language_codes_match("en", "invalid"));
}

#[test]
fn test_config_withThreeLetterEnglish_shouldValidate() {
    let mut config = Config::default();
    config.transcription.language = "eng".to_string();
    assert!(config.validate().is_ok());
    assert_eq!(config.transcription.get_language(), "en");
}
