//! Script fragment writers for the audio, video and mux steps.
//!
//! Every fragment has the same shape:
//!
//! ```text
//! REM <Kind> <output>
//! "<tool>" <arguments...>
//!
//! ```
//!
//! File locations are wrapped in double quotes here; callers pass them
//! unquoted. Only argument-set keys are reordered (sorted); tracks and
//! attachments are written in the order given.

use std::fmt::{self, Write};

use super::args::ArgumentSet;
use super::entities::{Attachment, Track};

/// The step a fragment belongs to, used in its header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Audio,
    Video,
    Mux,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentKind::Audio => write!(f, "Audio"),
            FragmentKind::Video => write!(f, "Video"),
            FragmentKind::Mux => write!(f, "Mux"),
        }
    }
}

fn write_header<W: Write>(out: &mut W, kind: FragmentKind, output: &str) -> fmt::Result {
    writeln!(out, "REM {} {}", kind, output)
}

/// Write a BePipe -> NeroAacEnc fragment.
///
/// BePipe decodes `script` (e.g. `import(^episode.avs^)`) to stdout and
/// NeroAacEnc reads it from stdin. Nero takes single-dash flags only, so
/// `nero_args` are all rendered with `-`.
pub fn write_bepipe_nero_command<W: Write>(
    out: &mut W,
    bepipe: &str,
    nero: &str,
    script: &str,
    output: &str,
    nero_args: Option<&ArgumentSet>,
) -> fmt::Result {
    write_header(out, FragmentKind::Audio, output)?;

    write!(out, "\"{}\" --script \"{}\" | \"{}\"", bepipe, script, nero)?;
    if let Some(args) = nero_args {
        args.write_to(out, Some("-"))?;
    }
    write!(out, " -if - -of \"{}\"\n\n", output)?;

    tracing::debug!("Wrote audio command for {}", output);
    Ok(())
}

/// Write an x264 (or x264 wrapper) encode fragment.
pub fn write_x264_command<W: Write>(
    out: &mut W,
    x264: &str,
    input: &str,
    output: &str,
    args: Option<&ArgumentSet>,
) -> fmt::Result {
    write_header(out, FragmentKind::Video, output)?;

    write!(out, "\"{}\" --output \"{}\"", x264, output)?;
    if let Some(args) = args {
        args.write_to(out, None)?;
    }
    write!(out, " \"{}\"\n\n", input)?;

    tracing::debug!("Wrote video command for {}", output);
    Ok(())
}

/// Write an mkvmerge fragment.
///
/// Global options come first, then every attachment, then every track.
pub fn write_mkvmerge_command<W: Write>(
    out: &mut W,
    mkvmerge: &str,
    output: &str,
    tracks: &[Track],
    attachments: &[Attachment],
    global_args: Option<&ArgumentSet>,
) -> fmt::Result {
    write_header(out, FragmentKind::Mux, output)?;

    write!(out, "\"{}\" --output \"{}\"", mkvmerge, output)?;
    if let Some(args) = global_args {
        args.write_to(out, None)?;
    }
    for attachment in attachments {
        attachment.write_to(out)?;
    }
    for track in tracks {
        track.write_to(out)?;
    }
    out.write_str("\n\n")?;

    tracing::debug!(
        "Wrote mux command for {} ({} tracks, {} attachments)",
        output,
        tracks.len(),
        attachments.len()
    );
    Ok(())
}
