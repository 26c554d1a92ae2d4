/*!
 * Language-agnostic boundary detection.
 *
 * Every terminal mark ends a sentence; no clause candidates are produced,
 * so cues only break at sentence ends or where line limits force it.
 */

use super::{has_terminal_mark, split_sentences, BoundaryProvider, EntityDictionary, Sentence};
use crate::errors::BoundaryError;
use crate::transcript::Word;

#[derive(Debug, Clone, Default)]
pub struct PunctuationProvider {
    entities: EntityDictionary,
}

impl PunctuationProvider {
    pub fn new(entities: EntityDictionary) -> Self {
        PunctuationProvider { entities }
    }
}

impl BoundaryProvider for PunctuationProvider {
    fn name(&self) -> &str {
        "punctuation"
    }

    fn analyze(&self, words: &[Word]) -> Result<Vec<Sentence>, BoundaryError> {
        let sentences = split_sentences(words, |index| has_terminal_mark(&words[index].text));
        Ok(sentences
            .into_iter()
            .map(|words| {
                let entities = self.entities.find_spans(&words);
                Sentence::new(words).with_entities(entities)
            })
            .collect())
    }
}
