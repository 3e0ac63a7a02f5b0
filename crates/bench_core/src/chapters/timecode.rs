//! Timeline arithmetic for chapter offsets and spans.
//!
//! A [`Timecode`] is a plain non-negative nanosecond count. The same type
//! is used for offsets (time since the start of a title) and for spans
//! (elapsed length), so `offset + span` and `offset - offset` work
//! directly. There is no calendar or time-of-day semantics: hours are
//! unbounded and nothing wraps at 24 hours.

use std::fmt;
use std::ops::{Add, AddAssign};
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::{ChapterError, ChapterResult};

const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A non-negative position or length on a title's timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timecode {
    ns: u64,
}

impl Timecode {
    /// The start of the timeline.
    pub const ZERO: Timecode = Timecode { ns: 0 };

    /// Create a timecode from nanoseconds.
    pub const fn from_nanos(ns: u64) -> Self {
        Self { ns }
    }

    /// Create a timecode from milliseconds.
    pub const fn from_millis(ms: u64) -> Self {
        Self {
            ns: ms.saturating_mul(NANOS_PER_MILLI),
        }
    }

    /// Create a timecode from whole seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            ns: secs.saturating_mul(NANOS_PER_SEC),
        }
    }

    /// Create a timecode from fractional seconds, rounded to the nearest
    /// nanosecond. Negative and NaN inputs clamp to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        let ns = (secs * NANOS_PER_SEC as f64).round();
        // `as` saturates: NaN and negatives become 0
        Self { ns: ns as u64 }
    }

    /// Nanoseconds since the zero reference.
    pub const fn as_nanos(&self) -> u64 {
        self.ns
    }

    /// Whole milliseconds, truncated.
    pub const fn as_millis(&self) -> u64 {
        self.ns / NANOS_PER_MILLI
    }

    /// Elapsed seconds since the zero reference.
    pub fn to_seconds(&self) -> f64 {
        self.ns as f64 / NANOS_PER_SEC as f64
    }

    /// Number of frames covered at `framerate` frames per second.
    ///
    /// Rounds to the nearest frame with ties going to the even frame, so
    /// exactly 2.5 frames is 2 and 3.5 frames is 4.
    pub fn to_frames(&self, framerate: f64) -> u64 {
        (self.to_seconds() * framerate).round_ties_even() as u64
    }

    /// `self - rhs`, or `None` if `rhs` is later than `self`.
    pub fn checked_sub(self, rhs: Timecode) -> Option<Timecode> {
        self.ns.checked_sub(rhs.ns).map(Timecode::from_nanos)
    }

    /// `self - rhs`, clamped at zero.
    pub fn saturating_sub(self, rhs: Timecode) -> Timecode {
        Timecode::from_nanos(self.ns.saturating_sub(rhs.ns))
    }

    /// True for the zero timecode.
    pub const fn is_zero(&self) -> bool {
        self.ns == 0
    }

    /// Format as `HH:MM:SS.mmm`, the form used in simple chapter files.
    ///
    /// Sub-millisecond precision is truncated.
    pub fn format_chapter(&self) -> String {
        let (h, m, s, sub_ns) = self.split();
        format!("{:02}:{:02}:{:02}.{:03}", h, m, s, sub_ns / NANOS_PER_MILLI)
    }

    /// Format as `HH:MM:SS.nnnnnnnnn`, the form used in Matroska XML.
    pub fn format_nanos(&self) -> String {
        let (h, m, s, sub_ns) = self.split();
        format!("{:02}:{:02}:{:02}.{:09}", h, m, s, sub_ns)
    }

    /// Parse `HH:MM:SS` with an optional fraction of 1 to 9 digits.
    ///
    /// Hours may exceed 23. Minutes and seconds must be below 60.
    pub fn parse(text: &str) -> ChapterResult<Timecode> {
        let invalid = || ChapterError::InvalidTimestamp(text.to_string());

        let parts: Vec<&str> = text.trim().split(':').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let (secs_part, frac_part) = match parts[2].split_once('.') {
            Some((secs, frac)) => (secs, Some(frac)),
            None => (parts[2], None),
        };

        let hours = parse_digits(parts[0]).ok_or_else(invalid)?;
        let minutes = parse_digits(parts[1]).ok_or_else(invalid)?;
        let seconds = parse_digits(secs_part).ok_or_else(invalid)?;
        if minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }

        let nanos = match frac_part {
            Some(frac) if (1..=9).contains(&frac.len()) => {
                // Right-pad to nine digits: ".5" is 500_000_000ns
                let padded = format!("{:0<9}", frac);
                parse_digits(&padded).ok_or_else(invalid)?
            }
            Some(_) => return Err(invalid()),
            None => 0,
        };

        let whole_secs = hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .ok_or_else(invalid)?;
        let ns = whole_secs
            .checked_mul(NANOS_PER_SEC)
            .and_then(|ns| ns.checked_add(nanos))
            .ok_or_else(invalid)?;

        Ok(Timecode::from_nanos(ns))
    }

    /// Split into hours, minutes, seconds and the sub-second nanoseconds.
    fn split(&self) -> (u64, u64, u64, u64) {
        let total_secs = self.ns / NANOS_PER_SEC;
        (
            total_secs / 3600,
            (total_secs % 3600) / 60,
            total_secs % 60,
            self.ns % NANOS_PER_SEC,
        )
    }
}

fn parse_digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Renders `HH:MM:SS.ffffff` (microseconds).
impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s, sub_ns) = self.split();
        write!(f, "{:02}:{:02}:{:02}.{:06}", h, m, s, sub_ns / 1_000)
    }
}

impl Add for Timecode {
    type Output = Timecode;

    fn add(self, rhs: Timecode) -> Timecode {
        Timecode::from_nanos(self.ns.saturating_add(rhs.ns))
    }
}

impl AddAssign for Timecode {
    fn add_assign(&mut self, rhs: Timecode) {
        *self = *self + rhs;
    }
}

impl From<Duration> for Timecode {
    fn from(duration: Duration) -> Self {
        Timecode::from_nanos(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
    }
}

impl From<Timecode> for Duration {
    fn from(tc: Timecode) -> Self {
        Duration::from_nanos(tc.ns)
    }
}

impl Serialize for Timecode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format_nanos())
    }
}

impl<'de> Deserialize<'de> for Timecode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timecode::parse(&text).map_err(serde::de::Error::custom)
    }
}
