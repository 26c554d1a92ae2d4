/*!
 * Sentence, clause and entity boundaries over transcribed words.
 *
 * Boundary detection is a swappable capability: the segmenter only sees
 * the `Sentence` values a provider returns.
 *
 * # Architecture
 *
 * - `entities`: entity dictionary loaded from a definition file
 * - `rules`: language-aware rule-based provider (English, French)
 * - `punctuation`: language-agnostic provider splitting on terminal marks only
 */

use std::fmt::Debug;

use crate::app_config::BoundaryStrategy;
use crate::errors::BoundaryError;
use crate::transcript::Word;

pub mod entities;
pub mod punctuation;
pub mod rules;

pub use entities::EntityDictionary;
pub use punctuation::PunctuationProvider;
pub use rules::RuleBasedProvider;

/// Inclusive range of word indices that must stay in one cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
}

impl EntitySpan {
    pub fn new(start: usize, end: usize) -> Self {
        EntitySpan { start, end }
    }

    /// Whether a split right after word `index` would cut this span
    pub fn splits_after(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// A run of words with its clause split candidates and entity spans
///
/// Indices are local to `words`. A clause candidate `i` allows a split
/// between `words[i]` and `words[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub words: Vec<Word>,
    pub clause_candidates: Vec<usize>,
    pub entities: Vec<EntitySpan>,
}

impl Sentence {
    pub fn new(words: Vec<Word>) -> Self {
        Sentence {
            words,
            clause_candidates: Vec::new(),
            entities: Vec::new(),
        }
    }

    pub fn with_clause_candidates(mut self, candidates: Vec<usize>) -> Self {
        self.clause_candidates = candidates;
        self
    }

    pub fn with_entities(mut self, entities: Vec<EntitySpan>) -> Self {
        self.entities = entities;
        self
    }

    /// Whether splitting after word `index` would cut an entity
    pub fn splits_entity(&self, index: usize) -> bool {
        self.entities.iter().any(|span| span.splits_after(index))
    }

    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Capability interface for boundary detection
pub trait BoundaryProvider: Send + Sync + Debug {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Group words into sentences, in document order
    fn analyze(&self, words: &[Word]) -> Result<Vec<Sentence>, BoundaryError>;
}

/// Build the provider for a strategy and language
pub fn provider_for(
    strategy: &BoundaryStrategy,
    language: &str,
    entities: EntityDictionary,
) -> Result<Box<dyn BoundaryProvider>, BoundaryError> {
    match strategy {
        BoundaryStrategy::Rules => Ok(Box::new(RuleBasedProvider::new(language, entities)?)),
        BoundaryStrategy::Punctuation => Ok(Box::new(PunctuationProvider::new(entities))),
    }
}

/// Closing characters ignored when looking at how a word ends
const CLOSING_CHARS: &[char] = &['"', '\'', '”', '’', '»', ')', ']', '}'];

/// Opening characters ignored when looking at how a word starts
const OPENING_CHARS: &[char] = &['"', '\'', '“', '‘', '«', '(', '[', '{', '¿', '¡'];

pub(crate) fn strip_closing(text: &str) -> &str {
    text.trim_end_matches(CLOSING_CHARS)
}

pub(crate) fn strip_opening(text: &str) -> &str {
    text.trim_start_matches(OPENING_CHARS)
}

/// Whether the word carries a sentence-final mark
pub(crate) fn has_terminal_mark(text: &str) -> bool {
    let core = strip_closing(text);
    core.ends_with(['.', '!', '?', '…'])
}

/// Whether the word ends with a comma or an equivalent clause mark
pub(crate) fn has_clause_mark(text: &str) -> bool {
    let core = strip_closing(text);
    core.ends_with([',', ';', ':', '،', '、', '，'])
}

/// Cut `words` into sentence ranges after every index where `is_break` holds
pub(crate) fn split_sentences<F>(words: &[Word], is_break: F) -> Vec<Vec<Word>>
where
    F: Fn(usize) -> bool,
{
    let mut sentences = Vec::new();
    let mut current = Vec::new();
    for (index, word) in words.iter().enumerate() {
        current.push(word.clone());
        if is_break(index) {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

/// Sort spans and merge the ones that share a word
pub(crate) fn merge_spans(mut spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
    spans.sort();
    let mut merged: Vec<EntitySpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}
