/*!
 * Clause-level splitting of over-long chunks.
 */

use log::trace;

use super::Chunk;
use crate::boundary::Sentence;

/// Recursively split `chunk` at clause candidates until every piece has at
/// most `threshold` words or no eligible candidate is left
pub(crate) fn split_clauses(sentence: &Sentence, chunk: Chunk, threshold: usize, out: &mut Vec<Chunk>) {
    if chunk.len() <= threshold {
        out.push(chunk);
        return;
    }

    match choose_clause_split(sentence, chunk) {
        Some(after) => {
            let (left, right) = chunk.split_after(after);
            trace!(
                "Clause split after word {} of {:?}: {} + {} words",
                after,
                chunk,
                left.len(),
                right.len()
            );
            split_clauses(sentence, left, threshold, out);
            split_clauses(sentence, right, threshold, out);
        }
        None => out.push(chunk),
    }
}

/// Eligible candidate whose split best balances the two halves
///
/// A candidate is eligible when it lies inside the chunk, is not the
/// chunk's last word and does not cut an entity span. Ties go to the
/// lower index.
pub(crate) fn choose_clause_split(sentence: &Sentence, chunk: Chunk) -> Option<usize> {
    let mut candidates: Vec<usize> = sentence
        .clause_candidates
        .iter()
        .copied()
        .filter(|&c| c >= chunk.start && c + 1 < chunk.end)
        .filter(|&c| !sentence.splits_entity(c))
        .collect();
    candidates.sort_unstable();
    candidates.dedup();

    // Distance of the split boundary (c + 1) from the midpoint, doubled to stay integral
    let imbalance = |c: usize| (2 * (c + 1)).abs_diff(chunk.start + chunk.end);

    let mut best: Option<usize> = None;
    for candidate in candidates {
        match best {
            Some(current) if imbalance(candidate) >= imbalance(current) => {}
            _ => best = Some(candidate),
        }
    }
    best
}
