/*!
 * Entity dictionary.
 *
 * Multi-word names (people, places, products) that must never be split
 * across two cues. Definitions come from a JSON file holding either a bare
 * list of phrases or an object with an `entities` list.
 */

use std::path::Path;

use log::debug;
use serde::Deserialize;

use super::EntitySpan;
use crate::errors::BoundaryError;
use crate::transcript::Word;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntityDefinition {
    List(Vec<String>),
    Object { entities: Vec<String> },
}

/// Known entity phrases, stored as normalized token sequences
#[derive(Debug, Clone, Default)]
pub struct EntityDictionary {
    phrases: Vec<Vec<String>>,
}

impl EntityDictionary {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases: Vec<Vec<String>> = phrases
            .into_iter()
            .map(|p| p.as_ref().split_whitespace().map(normalize_token).collect::<Vec<_>>())
            .map(|tokens| tokens.into_iter().filter(|t| !t.is_empty()).collect::<Vec<_>>())
            .filter(|tokens| !tokens.is_empty())
            .collect();

        // Longest phrases first so "New York City" wins over "New York"
        phrases.sort_by(|a, b| b.len().cmp(&a.len()));
        phrases.dedup();

        EntityDictionary { phrases }
    }

    pub fn from_json_str(content: &str) -> Result<Self, BoundaryError> {
        let definition: EntityDefinition = serde_json::from_str(content)
            .map_err(|e| BoundaryError::InvalidEntityDefinition(e.to_string()))?;
        let phrases = match definition {
            EntityDefinition::List(list) => list,
            EntityDefinition::Object { entities } => entities,
        };
        Ok(Self::new(phrases))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BoundaryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BoundaryError::InvalidEntityDefinition(format!("{}: {}", path.display(), e))
        })?;
        let dictionary = Self::from_json_str(&content)?;
        debug!("Loaded {} entity phrases from {:?}", dictionary.len(), path);
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Spans of every dictionary phrase found in `words`, leftmost-longest
    pub fn find_spans(&self, words: &[Word]) -> Vec<EntitySpan> {
        if self.phrases.is_empty() {
            return Vec::new();
        }

        let tokens: Vec<String> = words.iter().map(|w| normalize_token(&w.text)).collect();
        let mut spans = Vec::new();
        let mut index = 0;
        while index < tokens.len() {
            let matched = self.phrases.iter().find(|phrase| {
                tokens.len() - index >= phrase.len()
                    && phrase.iter().zip(&tokens[index..]).all(|(p, t)| p == t)
            });
            match matched {
                Some(phrase) => {
                    spans.push(EntitySpan::new(index, index + phrase.len() - 1));
                    index += phrase.len();
                }
                None => index += 1,
            }
        }
        spans
    }
}

/// Lowercase a token and drop surrounding punctuation
fn normalize_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}
