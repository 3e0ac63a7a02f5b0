//! Configuration management.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use bench_core::config::{ConfigManager, ConfigSection};
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/bench.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Muxer: {}", config.settings().tools.mkvmerge);
//!
//! // Modify a setting
//! config.settings_mut().video.insert("crf", "18");
//!
//! // Save just the video section atomically
//! config.update_section(ConfigSection::Video).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ChapterFormat, ChapterSettings, ConfigSection, LoggingSettings, Settings, ToolSettings,
};
