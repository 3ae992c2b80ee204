use anyhow::{Result, anyhow};
use isolang::Language;

/// ISO language code helpers for the spoken-language setting.
///
/// Accepts ISO 639-1 (2-letter) and ISO 639-2/T (3-letter) codes.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
}

// Resolve an accepted code form to a language and the form it was given in
fn resolve(code: &str) -> Option<(Language, LanguageCodeType)> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized).map(|lang| (lang, LanguageCodeType::Part1)),
        3 => Language::from_639_3(&normalized).map(|lang| (lang, LanguageCodeType::Part2T)),
        _ => None,
    }
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2/T code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    resolve(code)
        .map(|(_, kind)| kind)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize to ISO 639-1 when the language has one, ISO 639-2/T otherwise
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let (lang, _) = resolve(code).ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;
    Ok(lang
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| lang.to_639_3().to_string()))
}

/// Check if two language codes represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (resolve(code1), resolve(code2)) {
        (Some((a, _)), Some((b, _))) => a == b,
        _ => false,
    }
}
