/*!
 * Greedy line wrapping and line-limit splitting.
 */

use log::trace;

use super::Chunk;
use crate::boundary::Sentence;
use crate::transcript::Word;

/// Pack words left to right into lines of at most `max_width` characters
///
/// Words are joined by a single space and never broken; a word wider than
/// `max_width` gets a line of its own.
pub(crate) fn wrap_words(words: &[Word], max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in words {
        let width = word.width();
        if current.is_empty() {
            current.push_str(&word.text);
            current_width = width;
        } else if current_width + 1 + width <= max_width {
            current.push(' ');
            current.push_str(&word.text);
            current_width += 1 + width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(&word.text);
            current_width = width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap `chunk`, halving it until every piece fits in `max_lines` lines
pub(crate) fn fit_chunk(
    sentence: &Sentence,
    chunk: Chunk,
    max_width: usize,
    max_lines: usize,
    out: &mut Vec<(Chunk, Vec<String>)>,
) {
    let lines = wrap_words(&sentence.words[chunk.start..chunk.end], max_width);
    if lines.len() <= max_lines || chunk.len() <= 1 {
        out.push((chunk, lines));
        return;
    }

    let boundary = midpoint_boundary(sentence, chunk);
    trace!(
        "{:?} needs {} lines (max {}), splitting before word {}",
        chunk,
        lines.len(),
        max_lines,
        boundary
    );
    fit_chunk(sentence, Chunk::new(chunk.start, boundary), max_width, max_lines, out);
    fit_chunk(sentence, Chunk::new(boundary, chunk.end), max_width, max_lines, out);
}

/// Word boundary closest to the middle of `chunk` that keeps entities whole
///
/// Returns the index of the first word of the second half. Falls back to
/// the plain midpoint when every boundary cuts an entity.
pub(crate) fn midpoint_boundary(sentence: &Sentence, chunk: Chunk) -> usize {
    let midpoint = chunk.start + chunk.len() / 2;
    let keeps_entities = |boundary: usize| !sentence.splits_entity(boundary - 1);

    for distance in 0..chunk.len() {
        let below = midpoint.checked_sub(distance).filter(|&b| b > chunk.start);
        let above = Some(midpoint + distance).filter(|&b| b < chunk.end);

        if below.is_none() && above.is_none() {
            break;
        }
        if let Some(boundary) = below.filter(|&b| keeps_entities(b)) {
            return boundary;
        }
        if let Some(boundary) = above.filter(|&b| keeps_entities(b)) {
            return boundary;
        }
    }
    midpoint
}
