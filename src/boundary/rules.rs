/*!
 * Rule-based boundary detection for English and French.
 *
 * Sentences end on terminal punctuation, except after known abbreviations,
 * single-letter initials, or when the next word starts in lowercase.
 * Clause candidates are commas, semicolons and colons. Entities come from
 * the dictionary plus runs of capitalized words.
 */

use log::trace;

use super::{
    has_clause_mark, has_terminal_mark, merge_spans, split_sentences, strip_closing,
    strip_opening, BoundaryProvider, EntityDictionary, EntitySpan, Sentence,
};
use crate::errors::BoundaryError;
use crate::language_utils;
use crate::transcript::Word;

const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "e.g", "i.e", "approx",
    "fig", "dept", "gen", "gov", "sgt", "capt", "lt", "col", "u.s", "u.k",
];

const FRENCH_ABBREVIATIONS: &[&str] = &[
    "m", "mm", "mme", "mmes", "mlle", "mlles", "dr", "pr", "me", "st", "ste", "cf", "p", "ex",
    "env", "vol", "av", "bd", "chap", "éd", "hab", "n°",
];

/// Languages the rule tables cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleLanguage {
    English,
    French,
}

impl RuleLanguage {
    fn abbreviations(self) -> &'static [&'static str] {
        match self {
            RuleLanguage::English => ENGLISH_ABBREVIATIONS,
            RuleLanguage::French => FRENCH_ABBREVIATIONS,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            RuleLanguage::English => "en",
            RuleLanguage::French => "fr",
        }
    }
}

/// Boundary provider driven by punctuation and per-language tables
#[derive(Debug, Clone)]
pub struct RuleBasedProvider {
    language: RuleLanguage,
    entities: EntityDictionary,
}

impl RuleBasedProvider {
    pub fn new(language: &str, entities: EntityDictionary) -> Result<Self, BoundaryError> {
        let code = language_utils::normalize_to_part1(language)
            .map_err(|_| BoundaryError::UnsupportedLanguage(language.to_string()))?;
        let language = match code.as_str() {
            "en" => RuleLanguage::English,
            "fr" => RuleLanguage::French,
            _ => return Err(BoundaryError::UnsupportedLanguage(language.to_string())),
        };
        Ok(RuleBasedProvider { language, entities })
    }

    pub fn language(&self) -> RuleLanguage {
        self.language
    }

    fn is_abbreviation(&self, text: &str) -> bool {
        let core = strip_opening(strip_closing(text));
        let Some(stem) = core.strip_suffix('.') else {
            return false;
        };
        let lowered = stem.to_lowercase();
        if self.language.abbreviations().contains(&lowered.as_str()) {
            return true;
        }
        // Single-letter initial such as "J."
        let mut chars = stem.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
    }

    fn is_sentence_break(&self, words: &[Word], index: usize) -> bool {
        let word = &words[index];
        if !has_terminal_mark(&word.text) {
            return false;
        }
        let ends_with_period = strip_closing(&word.text).ends_with('.')
            && !strip_closing(&word.text).ends_with("..");
        if ends_with_period && self.is_abbreviation(&word.text) {
            return false;
        }
        match words.get(index + 1) {
            Some(next) => !starts_lowercase(&next.text),
            None => true,
        }
    }

    fn capitalized_runs(&self, words: &[Word]) -> Vec<EntitySpan> {
        let mut spans = Vec::new();
        let mut run_start: Option<usize> = None;

        for (index, word) in words.iter().enumerate() {
            if starts_uppercase(&word.text) && word.text != "I" {
                let start = *run_start.get_or_insert(index);
                let continues = !word.trailing_punctuation || self.is_abbreviation(&word.text);
                if !continues {
                    if index > start {
                        spans.push(EntitySpan::new(start, index));
                    }
                    run_start = None;
                }
            } else {
                if let Some(start) = run_start.take() {
                    if index - 1 > start {
                        spans.push(EntitySpan::new(start, index - 1));
                    }
                }
            }
        }
        if let Some(start) = run_start {
            if words.len() - 1 > start {
                spans.push(EntitySpan::new(start, words.len() - 1));
            }
        }
        spans
    }

    fn build_sentence(&self, words: Vec<Word>) -> Sentence {
        let last = words.len().saturating_sub(1);
        let clause_candidates: Vec<usize> = words
            .iter()
            .enumerate()
            .filter(|(index, word)| *index < last && has_clause_mark(&word.text))
            .map(|(index, _)| index)
            .collect();

        let mut spans = self.entities.find_spans(&words);
        spans.extend(self.capitalized_runs(&words));
        let entities = merge_spans(spans);

        trace!(
            "Sentence of {} words: clause candidates {:?}, entities {:?}",
            words.len(),
            clause_candidates,
            entities
        );

        Sentence::new(words)
            .with_clause_candidates(clause_candidates)
            .with_entities(entities)
    }
}

impl BoundaryProvider for RuleBasedProvider {
    fn name(&self) -> &str {
        match self.language {
            RuleLanguage::English => "rules-en",
            RuleLanguage::French => "rules-fr",
        }
    }

    fn analyze(&self, words: &[Word]) -> Result<Vec<Sentence>, BoundaryError> {
        let sentences = split_sentences(words, |index| self.is_sentence_break(words, index));
        Ok(sentences
            .into_iter()
            .map(|sentence| self.build_sentence(sentence))
            .collect())
    }
}

fn first_letter(text: &str) -> Option<char> {
    strip_opening(text).chars().find(|c| c.is_alphanumeric())
}

fn starts_lowercase(text: &str) -> bool {
    first_letter(text).is_some_and(|c| c.is_lowercase())
}

fn starts_uppercase(text: &str) -> bool {
    first_letter(text).is_some_and(|c| c.is_uppercase())
}
