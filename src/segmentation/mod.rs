/*!
 * Segmentation engine: sentences to subtitle cues.
 *
 * Each sentence is processed as index ranges (`Chunk`) over its own word
 * buffer, so cue text is always rebuilt from the original words:
 *
 * 1. every sentence starts as one chunk
 * 2. chunks longer than the comma threshold are split at clause candidates
 *    (skipped in punctuation-only mode)
 * 3. chunks are wrapped to the line width and halved until they fit the
 *    line limit
 * 4. cues take the start of their first word and the end of their last
 * 5. an earlier cue is trimmed when it runs into the next one
 *
 * # Architecture
 *
 * - `clauses`: step 2
 * - `wrap`: step 3
 */

use log::debug;

use crate::app_config::SegmentationConfig;
use crate::boundary::{BoundaryProvider, Sentence};
use crate::errors::SegmentationError;
use crate::subtitle_processor::Cue;
use crate::transcript::{validate_words, Word};

mod clauses;
mod wrap;

/// Half-open range `[start, end)` of word indices within one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn new(start: usize, end: usize) -> Self {
        Chunk { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Split right after word `index`; both halves are non-empty
    pub fn split_after(&self, index: usize) -> (Chunk, Chunk) {
        (Chunk::new(self.start, index + 1), Chunk::new(index + 1, self.end))
    }
}

/// Turn sentences into timed cues
pub fn segment(sentences: &[Sentence], config: &SegmentationConfig) -> Result<Vec<Cue>, SegmentationError> {
    validate_sentences(sentences)?;

    let mut cues = Vec::new();
    for sentence in sentences {
        let whole = Chunk::new(0, sentence.words.len());

        let mut chunks = Vec::new();
        if config.punctuation_only {
            chunks.push(whole);
        } else {
            clauses::split_clauses(sentence, whole, config.comma_split_threshold, &mut chunks);
        }

        let mut fitted = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            wrap::fit_chunk(sentence, chunk, config.max_width, config.max_lines, &mut fitted);
        }

        for (chunk, lines) in fitted {
            let first = &sentence.words[chunk.start];
            let last = &sentence.words[chunk.end - 1];
            cues.push(Cue::new(lines, first.start, last.end));
        }
    }

    let trimmed = correct_overlaps(&mut cues);
    debug!(
        "Segmented {} sentences into {} cues ({} end times trimmed)",
        sentences.len(),
        cues.len(),
        trimmed
    );

    Ok(cues)
}

/// Validate words, run boundary analysis, then segment
pub fn segment_words(
    words: &[Word],
    provider: &dyn BoundaryProvider,
    config: &SegmentationConfig,
) -> Result<Vec<Cue>, SegmentationError> {
    validate_words(words)?;

    let sentences = provider.analyze(words)?;
    debug!("Boundary provider '{}' found {} sentences", provider.name(), sentences.len());

    segment(&sentences, config)
}

/// Trim each cue that ends after the next one starts; returns how many were trimmed
pub fn correct_overlaps(cues: &mut [Cue]) -> usize {
    let mut trimmed = 0;
    for i in 1..cues.len() {
        let next_start = cues[i].start;
        let previous = &mut cues[i - 1];
        if previous.end > next_start {
            previous.end = next_start;
            trimmed += 1;
        }
    }
    trimmed
}

fn validate_sentences(sentences: &[Sentence]) -> Result<(), SegmentationError> {
    for (index, sentence) in sentences.iter().enumerate() {
        let len = sentence.words.len();
        if len == 0 {
            return Err(SegmentationError::EmptySentence(index));
        }
        if let Some(candidate) = sentence.clause_candidates.iter().find(|&&c| c >= len) {
            return Err(SegmentationError::InvalidBoundary {
                sentence: index,
                message: format!("clause candidate {} outside {} words", candidate, len),
            });
        }
        if let Some(span) = sentence.entities.iter().find(|s| s.start > s.end || s.end >= len) {
            return Err(SegmentationError::InvalidBoundary {
                sentence: index,
                message: format!("entity span {}..={} outside {} words", span.start, span.end, len),
            });
        }
    }

    validate_words(sentences.iter().flat_map(|s| s.words.iter()))?;
    Ok(())
}
