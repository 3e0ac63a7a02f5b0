//! Encode job for one disc title.
//!
//! A `ScriptJob` runs the chapter pipeline configured in `[chapters]`,
//! writes the chapter file next to the outputs, and assembles the
//! audio, video and mux fragments into a [`Script`].
//!
//! All outputs derive from one base path:
//!
//! ```text
//! <base>.m4a            audio (BePipe -> NeroAacEnc)
//! <base>.264            video (x264)
//! <base>.chapters.txt   chapters (or .chapters.xml)
//! <base>.mkv            muxed result
//! ```

use std::path::{Path, PathBuf};

use crate::chapters::{
    remove_chapters_shorter_than, rename_chapters, write_chapter_file, write_chapters_xml,
    Chapter, ChapterError,
};
use crate::commands::{Attachment, CommandError, Script, Track};
use crate::config::{ChapterFormat, Settings};
use crate::disc::TitleInfo;

/// Error types for job assembly.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// Chapter processing or writing failed.
    #[error("Chapter error: {0}")]
    Chapter(#[from] ChapterError),

    /// Command generation failed.
    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Type alias for job results.
pub type JobResult<T> = Result<T, JobError>;

/// Output file locations of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutputs {
    pub audio: String,
    pub video: String,
    pub chapters: String,
    pub mkv: String,
}

/// Result of building a job.
#[derive(Debug, Clone)]
pub struct JobOutput {
    /// The assembled script, not yet saved.
    pub script: Script,
    /// Chapters as written to the chapter file.
    pub chapters: Vec<Chapter>,
    /// Chapter file, if any chapters survived filtering.
    pub chapter_file: Option<PathBuf>,
}

/// Builds the encode script for one title.
pub struct ScriptJob<'a> {
    settings: &'a Settings,
    input: String,
    base: String,
    attachments: Vec<Attachment>,
}

impl<'a> ScriptJob<'a> {
    /// Create a job encoding the AviSynth script at `input` to files
    /// starting with `base`.
    pub fn new(settings: &'a Settings, input: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            settings,
            input: input.into(),
            base: base.into(),
            attachments: Vec::new(),
        }
    }

    /// Attach a file (fonts, cover art) to the muxed output.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Where each output of this job goes.
    pub fn outputs(&self) -> JobOutputs {
        JobOutputs {
            audio: format!("{}.m4a", self.base),
            video: format!("{}.264", self.base),
            chapters: format!("{}.{}", self.base, self.settings.chapters.format.extension()),
            mkv: format!("{}.mkv", self.base),
        }
    }

    /// Apply the configured filter and rename to `chapters`.
    pub fn prepare_chapters(&self, mut chapters: Vec<Chapter>) -> JobResult<Vec<Chapter>> {
        let config = &self.settings.chapters;

        if config.min_duration_secs > 0.0 {
            remove_chapters_shorter_than(&mut chapters, config.min_duration_secs);
        }
        if !config.names.is_empty() && !chapters.is_empty() {
            rename_chapters(&mut chapters, config.names.as_slice(), config.repeat_names)?;
        }
        Ok(chapters)
    }

    /// Build the job for a disc title.
    pub fn build_for_title(&self, title: &TitleInfo) -> JobResult<JobOutput> {
        tracing::info!("Building encode job for title {}", title.title_num);
        self.build(title.chapters.clone())
    }

    /// Process `chapters`, write the chapter file and assemble the script.
    ///
    /// When every chapter is filtered out no chapter file is written and
    /// mkvmerge gets no `--chapters` option.
    pub fn build(&self, chapters: Vec<Chapter>) -> JobResult<JobOutput> {
        let outputs = self.outputs();
        let chapters = self.prepare_chapters(chapters)?;

        let chapter_file = if chapters.is_empty() {
            tracing::warn!("No chapters left for {}; muxing without chapters", outputs.mkv);
            None
        } else {
            let path = PathBuf::from(&outputs.chapters);
            self.write_chapters(&chapters, &path)?;
            Some(path)
        };

        let tools = &self.settings.tools;
        let bepipe_script = format!("import(^{}^)", self.input);

        let tracks = [Track::new(outputs.video.as_str())?, Track::new(outputs.audio.as_str())?];

        let mut mux_args = self.settings.mux.clone();
        if chapter_file.is_some() {
            mux_args.insert("chapters", format!("\"{}\"", outputs.chapters));
        }

        let mut script = Script::new();
        script
            .audio(
                &tools.bepipe,
                &tools.neroaac,
                &bepipe_script,
                &outputs.audio,
                Some(&self.settings.audio),
            )?
            .video(&tools.x264, &self.input, &outputs.video, Some(&self.settings.video))?
            .mux(
                &tools.mkvmerge,
                &outputs.mkv,
                &tracks,
                &self.attachments,
                Some(&mux_args),
            )?;

        tracing::info!(
            "Built script for {} with {} chapters",
            outputs.mkv,
            chapters.len()
        );

        Ok(JobOutput {
            script,
            chapters,
            chapter_file,
        })
    }

    fn write_chapters(&self, chapters: &[Chapter], path: &Path) -> JobResult<()> {
        match self.settings.chapters.format {
            ChapterFormat::Simple => write_chapter_file(chapters, path)?,
            ChapterFormat::Xml => {
                write_chapters_xml(chapters, &self.settings.chapters.language, path)?
            }
        }
        Ok(())
    }
}
