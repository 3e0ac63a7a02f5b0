//! Title metadata types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chapters::{Chapter, ChapterError, Timecode};

/// One chapter as reported by the disc reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterDescriptor {
    /// Offset from the start of the title.
    pub start: Timecode,
    /// Length of the chapter.
    pub duration: Timecode,
}

/// Title data exactly as the disc reader hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTitle {
    pub title_num: u32,
    pub playlist: String,
    pub run_length: Timecode,
    /// Reader's video format code, e.g. `"1080p"` or `"4"`.
    pub video_format: String,
    /// Frame rate as text, e.g. `"24000/1001"`.
    pub frame_rate: String,
    pub num_audio_tracks: u32,
    /// Clip ids without extension, e.g. `"00001"`.
    pub clip_ids: Vec<String>,
    pub chapters: Vec<ChapterDescriptor>,
}

/// Encoding-relevant information about one disc title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleInfo {
    /// Title number on the disc.
    pub title_num: u32,
    /// Playlist file name, e.g. `"00800.mpls"`.
    pub playlist: String,
    /// Total length of the title.
    pub run_length: Timecode,
    /// Video resolution, e.g. `"1080p"`.
    pub resolution: String,
    /// Video frame rate as text.
    pub frame_rate: String,
    /// Number of primary audio tracks.
    pub num_audio_tracks: u32,
    /// Stream files the playlist points to, e.g. `"00001.m2ts"`.
    pub clip_files: Vec<String>,
    /// Chapters in presentation order.
    pub chapters: Vec<Chapter>,
}

impl TitleInfo {
    /// Build title info from raw reader output.
    ///
    /// Chapters are named `Chapter 1`, `Chapter 2`, ... and clip ids get
    /// their `.m2ts` extension.
    pub fn from_raw(raw: RawTitle) -> DiscResult<Self> {
        if raw.chapters.is_empty() {
            return Err(DiscError::NoChapters(raw.title_num));
        }

        let chapters = raw
            .chapters
            .iter()
            .enumerate()
            .map(|(i, desc)| Chapter::new(format!("Chapter {}", i + 1), desc.start, desc.duration))
            .collect::<Result<Vec<_>, _>>()?;

        let clip_files = raw
            .clip_ids
            .iter()
            .map(|id| format!("{}.m2ts", id))
            .collect();

        tracing::debug!(
            "Title {} ({}): {} chapters, {} clips",
            raw.title_num,
            raw.playlist,
            chapters.len(),
            raw.clip_ids.len()
        );

        Ok(Self {
            title_num: raw.title_num,
            playlist: raw.playlist,
            run_length: raw.run_length,
            resolution: normalize_resolution(&raw.video_format),
            frame_rate: raw.frame_rate,
            num_audio_tracks: raw.num_audio_tracks,
            clip_files,
            chapters,
        })
    }

    /// Parse raw reader output from JSON.
    pub fn from_json(json: &str) -> DiscResult<Self> {
        let raw: RawTitle = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Frame rate as a number, from `"24000/1001"` or `"25"` style text.
    pub fn frames_per_second(&self) -> DiscResult<f64> {
        parse_frame_rate(&self.frame_rate)
            .ok_or_else(|| DiscError::InvalidFrameRate(self.frame_rate.clone()))
    }

    /// Total number of frames in the title.
    pub fn frame_count(&self) -> DiscResult<u64> {
        Ok(self.run_length.to_frames(self.frames_per_second()?))
    }
}

impl fmt::Display for TitleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "title_num: {}", self.title_num)?;
        writeln!(f, "playlist: {}", self.playlist)?;
        writeln!(f, "run_length: {}", self.run_length)?;
        writeln!(f, "resolution: {}", self.resolution)?;
        writeln!(f, "frame_rate: {}", self.frame_rate)?;
        writeln!(f, "num_audio_tracks: {}", self.num_audio_tracks)?;
        for (i, clip) in self.clip_files.iter().enumerate() {
            writeln!(f, "clip {}: {}", i + 1, clip)?;
        }
        for chapter in &self.chapters {
            writeln!(f, "{}", chapter)?;
        }
        Ok(())
    }
}

/// The reader reports 1080i as format code `"4"`.
fn normalize_resolution(format: &str) -> String {
    match format {
        "4" => "1080i".to_string(),
        other => other.to_string(),
    }
}

fn parse_frame_rate(text: &str) -> Option<f64> {
    let fps = match text.trim().split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => text.trim().parse().ok()?,
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}

/// Error types for title metadata.
#[derive(Debug, thiserror::Error)]
pub enum DiscError {
    /// The title has no chapters.
    #[error("Title {0} has no chapters")]
    NoChapters(u32),

    /// A chapter descriptor was invalid.
    #[error("Invalid chapter: {0}")]
    InvalidChapter(#[from] ChapterError),

    /// The frame rate text could not be understood.
    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(String),

    /// Reader output was not valid JSON.
    #[error("Failed to parse title info: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Type alias for title metadata results.
pub type DiscResult<T> = Result<T, DiscError>;
