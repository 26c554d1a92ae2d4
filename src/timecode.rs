/*!
 * Millisecond-precision time values for subtitle cues.
 *
 * Both subtitle notations are supported:
 * - SRT: `HH:MM:SS,mmm`
 * - VTT: `HH:MM:SS.mmm` (the hour field may be omitted when parsing)
 */

use std::fmt;
use std::str::FromStr;

use crate::errors::TimecodeError;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_HOUR: u64 = 3_600_000;

/// A point in time, counted in milliseconds from the start of the media
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode(u64);

impl Timecode {
    pub const ZERO: Timecode = Timecode(0);

    pub const fn from_millis(ms: u64) -> Self {
        Timecode(ms)
    }

    /// Build a timecode from fractional seconds, rounded to the nearest millisecond
    pub fn from_seconds(seconds: f64) -> Result<Self, TimecodeError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(TimecodeError::OutOfRange(seconds));
        }
        let ms = (seconds * MS_PER_SECOND as f64).round();
        if ms > u64::MAX as f64 {
            return Err(TimecodeError::OutOfRange(seconds));
        }
        Ok(Timecode(ms as u64))
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / MS_PER_SECOND as f64
    }

    pub fn saturating_add_millis(self, ms: u64) -> Self {
        Timecode(self.0.saturating_add(ms))
    }

    /// Format as an SRT timestamp (HH:MM:SS,mmm)
    pub fn to_srt_string(self) -> String {
        self.format_with(',')
    }

    /// Format as a VTT timestamp (HH:MM:SS.mmm)
    pub fn to_vtt_string(self) -> String {
        self.format_with('.')
    }

    fn format_with(self, separator: char) -> String {
        let hours = self.0 / MS_PER_HOUR;
        let minutes = (self.0 % MS_PER_HOUR) / MS_PER_MINUTE;
        let seconds = (self.0 % MS_PER_MINUTE) / MS_PER_SECOND;
        let millis = self.0 % MS_PER_SECOND;

        format!("{:02}:{:02}:{:02}{}{:03}", hours, minutes, seconds, separator, millis)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_vtt_string())
    }
}

impl FromStr for Timecode {
    type Err = TimecodeError;

    /// Parse `HH:MM:SS,mmm`, `HH:MM:SS.mmm` or `MM:SS.mmm`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let timestamp = s.trim();
        let (clock, millis) = timestamp
            .rsplit_once([',', '.'])
            .ok_or_else(|| TimecodeError::InvalidFormat(timestamp.to_string()))?;

        if millis.len() != 3 || !millis.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimecodeError::InvalidFormat(timestamp.to_string()));
        }

        let fields: Vec<&str> = clock.split(':').collect();
        let (hours, minutes, seconds) = match fields.as_slice() {
            [h, m, s] => (*h, *m, *s),
            [m, s] => ("0", *m, *s),
            _ => return Err(TimecodeError::InvalidFormat(timestamp.to_string())),
        };

        let parse_field = |field: &str| -> Result<u64, TimecodeError> {
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(TimecodeError::InvalidFormat(timestamp.to_string()));
            }
            field
                .parse::<u64>()
                .map_err(|_| TimecodeError::InvalidFormat(timestamp.to_string()))
        };

        let hours = parse_field(hours)?;
        let minutes = parse_field(minutes)?;
        let seconds = parse_field(seconds)?;
        let millis = parse_field(millis)?;

        if minutes >= 60 || seconds >= 60 {
            return Err(TimecodeError::InvalidComponent(timestamp.to_string()));
        }

        // Hour digits are unbounded, so the total can overflow
        hours
            .checked_mul(MS_PER_HOUR)
            .and_then(|ms| ms.checked_add(minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis))
            .map(Timecode)
            .ok_or_else(|| TimecodeError::InvalidComponent(timestamp.to_string()))
    }
}
