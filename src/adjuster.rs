/*!
 * Timestamp buffer adjustment.
 *
 * Extends each cue's end time by a fixed buffer so text lingers a little
 * after speech stops. An extended end never runs past the next cue's
 * original start, so a valid cue list stays ordered and non-overlapping.
 * The last cue always receives the full buffer.
 */

use log::debug;

use crate::errors::AdjustError;
use crate::subtitle_processor::Cue;

/// Extend cue end times by `buffer_seconds`, capped at the next cue's start
///
/// The buffer is rounded to whole milliseconds. Input must be ordered and
/// non-overlapping with `start <= end` for every cue; violations are
/// reported, never repaired.
pub fn adjust(cues: &[Cue], buffer_seconds: f64) -> Result<Vec<Cue>, AdjustError> {
    let buffer_ms = buffer_millis(buffer_seconds)?;
    validate_cues(cues)?;

    let mut capped = 0;
    let adjusted: Vec<Cue> = cues
        .iter()
        .enumerate()
        .map(|(i, cue)| {
            let extended = cue.end.saturating_add_millis(buffer_ms);
            let end = match cues.get(i + 1) {
                Some(next) if extended > next.start => {
                    capped += 1;
                    // Validation guarantees next.start >= cue.end
                    next.start
                }
                _ => extended,
            };
            cue.with_timing(cue.start, end)
        })
        .collect();

    debug!(
        "Extended {} cues by {}ms ({} capped at the next cue)",
        adjusted.len(),
        buffer_ms,
        capped
    );

    Ok(adjusted)
}

fn buffer_millis(buffer_seconds: f64) -> Result<u64, AdjustError> {
    if !buffer_seconds.is_finite() || buffer_seconds < 0.0 {
        return Err(AdjustError::InvalidBuffer(buffer_seconds));
    }
    let millis = (buffer_seconds * 1000.0).round();
    if millis > u64::MAX as f64 {
        return Err(AdjustError::InvalidBuffer(buffer_seconds));
    }
    Ok(millis as u64)
}

fn validate_cues(cues: &[Cue]) -> Result<(), AdjustError> {
    for (index, cue) in cues.iter().enumerate() {
        if cue.start > cue.end {
            return Err(AdjustError::InvalidCueTiming {
                index,
                start: cue.start,
                end: cue.end,
            });
        }
    }

    for (index, pair) in cues.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        if next.start < current.start {
            return Err(AdjustError::UnorderedCues {
                index: index + 1,
                start: next.start,
                previous: current.start,
            });
        }
        if current.end > next.start {
            return Err(AdjustError::OverlappingCues {
                index,
                end: current.end,
                next_start: next.start,
            });
        }
    }
    Ok(())
}
