use anyhow::{Result, anyhow};
use isolang::Language;
use log::debug;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating and normalizing ISO 639-1
/// (2-letter) and ISO 639-2 (3-letter) language codes, plus a lightweight
/// English/French detector used when a transcript does not name its language.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Number of characters inspected by `detect_language`
const DETECTION_SAMPLE_CHARS: usize = 1000;

const ENGLISH_MARKERS: &[&str] = &[
    "the", "and", "is", "are", "was", "to", "of", "in", "that", "it", "you", "we", "this",
    "with", "for", "on", "have", "be", "not", "what", "will", "about", "learn",
];

const FRENCH_MARKERS: &[&str] = &[
    "le", "la", "les", "et", "est", "sont", "un", "une", "des", "du", "de", "que", "qui",
    "nous", "vous", "dans", "pour", "pas", "sur", "avec", "ce", "cette", "je", "il",
];

const FRENCH_ACCENTS: &str = "éèêëàâäôöûüçîï";

/// Map an ISO 639-2/B code to its ISO 639-2/T equivalent
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"),
        "ger" => Some("deu"),
        "dut" => Some("nld"),
        "gre" => Some("ell"),
        "chi" => Some("zho"),
        "cze" => Some("ces"),
        "ice" => Some("isl"),
        "alb" => Some("sqi"),
        "arm" => Some("hye"),
        "baq" => Some("eus"),
        "bur" => Some("mya"),
        "per" => Some("fas"),
        "geo" => Some("kat"),
        "may" => Some("msa"),
        "mac" => Some("mkd"),
        "rum" => Some("ron"),
        "slo" => Some("slk"),
        "wel" => Some("cym"),
        _ => None,
    }
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part2T),
        3 if part2b_to_part2t(&normalized_code).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    match validate_language_code(&normalized_code)? {
        LanguageCodeType::Part1 => Language::from_639_1(&normalized_code)
            .map(|lang| lang.to_639_3().to_string())
            .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code)),
        LanguageCodeType::Part2T => Ok(normalized_code),
        LanguageCodeType::Part2B => part2b_to_part2t(&normalized_code)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code)),
    }
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-2/T if no ISO 639-1 code exists
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let part2t = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&part2t)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(lang
        .to_639_1()
        .map(str::to_string)
        .unwrap_or(part2t))
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Guess whether a text is English or French
///
/// Counts common function words of each language in the first
/// characters of the text; accented letters add weight to French.
/// Ties go to English.
pub fn detect_language(text: &str) -> &'static str {
    let sample: String = text.chars().take(DETECTION_SAMPLE_CHARS).collect();

    let mut english = 0usize;
    let mut french = 0usize;
    for token in sample.split(|c: char| !c.is_alphanumeric() && c != '\'') {
        let token = token.to_lowercase();
        if token.is_empty() {
            continue;
        }
        if ENGLISH_MARKERS.contains(&token.as_str()) {
            english += 1;
        }
        if FRENCH_MARKERS.contains(&token.as_str()) {
            french += 1;
        }
        if token.chars().any(|c| FRENCH_ACCENTS.contains(c)) {
            french += 1;
        }
    }

    debug!("Language detection scores: en={}, fr={}", english, french);

    if french > english { "fr" } else { "en" }
}
