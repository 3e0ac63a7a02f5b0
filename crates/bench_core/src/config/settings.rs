//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::commands::{x264_defaults, ArgumentSet};
use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Locations of the external tools.
    #[serde(default)]
    pub tools: ToolSettings,

    /// NeroAacEnc arguments.
    #[serde(default = "default_audio_args")]
    pub audio: ArgumentSet,

    /// x264 arguments.
    #[serde(default = "x264_defaults")]
    pub video: ArgumentSet,

    /// mkvmerge global arguments.
    #[serde(default)]
    pub mux: ArgumentSet,

    /// Chapter handling settings.
    #[serde(default)]
    pub chapters: ChapterSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

fn default_audio_args() -> ArgumentSet {
    ArgumentSet::from([("q", "0.65")])
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tools: ToolSettings::default(),
            audio: default_audio_args(),
            video: x264_defaults(),
            mux: ArgumentSet::new(),
            chapters: ChapterSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Executable locations as they should appear in the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// AviSynth audio pipe.
    #[serde(default = "default_bepipe")]
    pub bepipe: String,

    /// AAC encoder reading from stdin.
    #[serde(default = "default_neroaac")]
    pub neroaac: String,

    /// Video encoder (x264 or a wrapper such as avs4x26x).
    #[serde(default = "default_x264")]
    pub x264: String,

    /// Matroska muxer.
    #[serde(default = "default_mkvmerge")]
    pub mkvmerge: String,
}

fn default_bepipe() -> String {
    "BePipe.exe".to_string()
}

fn default_neroaac() -> String {
    "neroAacEnc.exe".to_string()
}

fn default_x264() -> String {
    "x264.exe".to_string()
}

fn default_mkvmerge() -> String {
    "mkvmerge.exe".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            bepipe: default_bepipe(),
            neroaac: default_neroaac(),
            x264: default_x264(),
            mkvmerge: default_mkvmerge(),
        }
    }
}

/// Output format for chapter files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterFormat {
    /// `CHAPTERnn=` / `CHAPTERnnNAME=` text.
    #[default]
    Simple,
    /// Matroska chapter XML.
    Xml,
}

impl ChapterFormat {
    /// File extension used for chapter files in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ChapterFormat::Simple => "chapters.txt",
            ChapterFormat::Xml => "chapters.xml",
        }
    }
}

impl std::fmt::Display for ChapterFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChapterFormat::Simple => write!(f, "simple"),
            ChapterFormat::Xml => write!(f, "xml"),
        }
    }
}

/// Chapter handling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSettings {
    /// Drop chapters shorter than this many seconds (0 keeps everything).
    #[serde(default)]
    pub min_duration_secs: f64,

    /// Names assigned to chapters in order (empty keeps reader names).
    #[serde(default)]
    pub names: Vec<String>,

    /// Repeat `names` across all chapters; the count must divide evenly.
    #[serde(default)]
    pub repeat_names: bool,

    /// Chapter file format.
    #[serde(default)]
    pub format: ChapterFormat,

    /// ISO 639-2 language for XML chapter displays.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "eng".to_string()
}

impl Default for ChapterSettings {
    fn default() -> Self {
        Self {
            min_duration_secs: 0.0,
            names: Vec::new(),
            repeat_names: false,
            format: ChapterFormat::default(),
            language: default_language(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Tools,
    Audio,
    Video,
    Mux,
    Chapters,
    Logging,
}

impl ConfigSection {
    /// All sections in file order.
    pub const ALL: [ConfigSection; 6] = [
        ConfigSection::Tools,
        ConfigSection::Audio,
        ConfigSection::Video,
        ConfigSection::Mux,
        ConfigSection::Chapters,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "tools",
            ConfigSection::Audio => "audio",
            ConfigSection::Video => "video",
            ConfigSection::Mux => "mux",
            ConfigSection::Chapters => "chapters",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section in generated files.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "# External tool locations",
            ConfigSection::Audio => "# NeroAacEnc arguments (single-dash flags, numbers may be unquoted)",
            ConfigSection::Video => "# x264 arguments (empty value = bare flag, numbers may be unquoted)",
            ConfigSection::Mux => "# mkvmerge global arguments",
            ConfigSection::Chapters => "# Chapter handling",
            ConfigSection::Logging => "# Logging configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[tools]"));
        assert!(toml.contains("[video]"));
        assert!(toml.contains("no-fast-pskip = \"\""));
        assert!(toml.contains("mkvmerge"));
    }

    #[test]
    fn settings_round_trip() {
        let mut settings = Settings::default();
        settings.chapters.names = vec!["Opening".to_string(), "Episode".to_string()];
        settings.chapters.format = ChapterFormat::Xml;

        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn serialization_is_reproducible() {
        let a = toml::to_string_pretty(&Settings::default()).unwrap();
        let b = toml::to_string_pretty(&Settings::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[tools]\nx264 = \"avs4x26x.exe\"\n\n[chapters]\nmin_duration_secs = 1.5";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        // Custom values preserved
        assert_eq!(parsed.tools.x264, "avs4x26x.exe");
        assert_eq!(parsed.chapters.min_duration_secs, 1.5);
        // Defaults applied for missing
        assert_eq!(parsed.tools.mkvmerge, "mkvmerge.exe");
        assert_eq!(parsed.video.get("crf"), Some("16"));
        assert_eq!(parsed.audio.get("q"), Some("0.65"));
        assert_eq!(parsed.chapters.language, "eng");
        assert_eq!(parsed.logging.level, LogLevel::Info);
    }

    #[test]
    fn chapter_format_extension() {
        assert_eq!(ChapterFormat::Simple.extension(), "chapters.txt");
        assert_eq!(ChapterFormat::Xml.extension(), "chapters.xml");
        assert_eq!(ChapterFormat::Xml.to_string(), "xml");
    }

    #[test]
    fn hand_edited_numbers_load_as_arguments() {
        let parsed: Settings = toml::from_str("[video]\ncrf = 18\n\n[audio]\nq = 0.5").unwrap();
        assert_eq!(parsed.video.get("crf"), Some("18"));
        assert_eq!(parsed.audio.get("q"), Some("0.5"));
    }
}
