//! Batch script assembly.

use std::path::Path;

use super::args::ArgumentSet;
use super::entities::{Attachment, Track};
use super::writers::{write_bepipe_nero_command, write_mkvmerge_command, write_x264_command};
use super::CommandResult;
use crate::files::atomic_write;

/// An encode script built up one fragment at a time.
///
/// Fragments are appended in call order; a `Script` is the exclusive
/// sink for its fragments, so they can never interleave.
#[derive(Debug, Clone, Default)]
pub struct Script {
    text: String,
    fragments: usize,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an audio fragment. See [`write_bepipe_nero_command`].
    pub fn audio(
        &mut self,
        bepipe: &str,
        nero: &str,
        script: &str,
        output: &str,
        nero_args: Option<&ArgumentSet>,
    ) -> CommandResult<&mut Self> {
        write_bepipe_nero_command(&mut self.text, bepipe, nero, script, output, nero_args)?;
        self.fragments += 1;
        Ok(self)
    }

    /// Append a video fragment. See [`write_x264_command`].
    pub fn video(
        &mut self,
        x264: &str,
        input: &str,
        output: &str,
        args: Option<&ArgumentSet>,
    ) -> CommandResult<&mut Self> {
        write_x264_command(&mut self.text, x264, input, output, args)?;
        self.fragments += 1;
        Ok(self)
    }

    /// Append a mux fragment. See [`write_mkvmerge_command`].
    pub fn mux(
        &mut self,
        mkvmerge: &str,
        output: &str,
        tracks: &[Track],
        attachments: &[Attachment],
        global_args: Option<&ArgumentSet>,
    ) -> CommandResult<&mut Self> {
        write_mkvmerge_command(
            &mut self.text,
            mkvmerge,
            output,
            tracks,
            attachments,
            global_args,
        )?;
        self.fragments += 1;
        Ok(self)
    }

    /// Number of fragments written so far.
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments == 0
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Write the script to `path` atomically.
    pub fn save(&self, path: &Path) -> CommandResult<()> {
        atomic_write(path, &self.text)?;
        tracing::info!(
            "Saved script with {} fragments to {}",
            self.fragments,
            path.display()
        );
        Ok(())
    }
}
