//! Encode script generation.
//!
//! This module turns tracks, attachments and argument sets into the
//! command lines of a Windows batch script that drives the external
//! tools: BePipe piped into NeroAacEnc for audio, x264 for video and
//! mkvmerge for muxing.
//!
//! # Architecture
//!
//! - **args**: `ArgumentSet`, the unordered flag map and its sorted rendering
//! - **entities**: validated `Track` / `Attachment` mkvmerge inputs
//! - **writers**: one function per step, each appending a fragment to a sink
//! - **script**: `Script`, a fragment accumulator that saves atomically
//! - **presets**: default x264 argument sets

mod args;
mod entities;
mod presets;
mod script;
mod writers;

pub use args::ArgumentSet;
pub use entities::{Attachment, Track};
pub use presets::{avs4x26x_defaults, x264_defaults};
pub use script::Script;
pub use writers::{
    write_bepipe_nero_command, write_mkvmerge_command, write_x264_command, FragmentKind,
};

/// Error types for command generation.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A required field was empty when building a track or attachment.
    #[error("Must give {field} for {entity}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// Writing to the output sink failed.
    #[error("Failed to format command: {0}")]
    FormatError(#[from] std::fmt::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CommandError {
    pub(crate) fn missing(entity: &'static str, field: &'static str) -> Self {
        Self::MissingField { entity, field }
    }
}

/// Type alias for command generation results.
pub type CommandResult<T> = Result<T, CommandError>;
