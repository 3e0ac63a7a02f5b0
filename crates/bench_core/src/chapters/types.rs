//! Chapter types and error definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::timecode::Timecode;

/// A named interval on a title's timeline.
///
/// `start` is the offset from the beginning of the title and `duration`
/// the chapter's length. Sequences of chapters are expected to be in
/// presentation order; nothing here sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChapterFields")]
pub struct Chapter {
    /// Display name.
    pub name: String,
    /// Offset from the start of the title.
    pub start: Timecode,
    /// Length of the chapter, always non-zero.
    pub duration: Timecode,
}

impl Chapter {
    /// Create a chapter, rejecting a zero duration.
    pub fn new(
        name: impl Into<String>,
        start: Timecode,
        duration: Timecode,
    ) -> ChapterResult<Self> {
        let name = name.into();
        if duration.is_zero() {
            return Err(ChapterError::InvalidDuration(name));
        }
        Ok(Self {
            name,
            start,
            duration,
        })
    }

    /// Offset just past the end of the chapter.
    pub fn end(&self) -> Timecode {
        self.start + self.duration
    }

    /// Frame number the chapter starts on.
    pub fn start_frame(&self, framerate: f64) -> u64 {
        self.start.to_frames(framerate)
    }

    /// Frame number just past the end of the chapter.
    pub fn end_frame(&self, framerate: f64) -> u64 {
        self.end().to_frames(framerate)
    }
}

/// Wire form of [`Chapter`], checked through [`Chapter::new`].
#[derive(Deserialize)]
struct ChapterFields {
    name: String,
    start: Timecode,
    duration: Timecode,
}

impl TryFrom<ChapterFields> for Chapter {
    type Error = ChapterError;

    fn try_from(fields: ChapterFields) -> ChapterResult<Self> {
        Chapter::new(fields.name, fields.start, fields.duration)
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} starts at {} and lasts {}",
            self.name, self.start, self.duration
        )
    }
}

/// Error types for chapter operations.
#[derive(Debug, thiserror::Error)]
pub enum ChapterError {
    /// A chapter was built with a zero duration.
    #[error("Chapter '{0}' must have a non-zero duration")]
    InvalidDuration(String),

    /// More names than chapters to put them on.
    #[error("{names} names provided for only {chapters} chapters")]
    TooManyNames { names: usize, chapters: usize },

    /// Repeat mode needs the names to tile the chapters exactly.
    #[error("{names} names do not divide evenly into {chapters} chapters in repeat mode")]
    UnevenNames { names: usize, chapters: usize },

    /// Chapters cannot be split into groups of zero.
    #[error("Chapter group size must be at least 1")]
    InvalidGroupSize,

    /// A timestamp string could not be parsed.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A chapter file could not be parsed.
    #[error("Failed to parse chapters: {0}")]
    ParseError(String),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for chapter operation results.
pub type ChapterResult<T> = Result<T, ChapterError>;
