//! Multiplexer inputs: tracks and attachments.
//!
//! Both are validated when built and render themselves as mkvmerge
//! arguments. File locations are written inside double quotes, so they
//! should be given without quotes of their own.

use std::fmt::{self, Write};

use super::args::ArgumentSet;
use super::CommandError;

/// One media stream to import into the muxed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    location: String,
    args: Option<ArgumentSet>,
}

impl Track {
    /// Create a track for the file at `location`.
    pub fn new(location: impl Into<String>) -> Result<Self, CommandError> {
        Self::with_args(location, None)
    }

    /// Create a track with per-track mkvmerge options such as
    /// `language = "0:jpn"`.
    pub fn with_args(
        location: impl Into<String>,
        args: Option<ArgumentSet>,
    ) -> Result<Self, CommandError> {
        let location = location.into();
        if location.is_empty() {
            return Err(CommandError::missing("track", "location"));
        }
        Ok(Self { location, args })
    }

    /// File location of the track.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Per-track options, if any.
    pub fn args(&self) -> Option<&ArgumentSet> {
        self.args.as_ref()
    }

    /// Append ` <options> "<location>"`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        if let Some(args) = &self.args {
            args.write_to(out, None)?;
        }
        write!(out, " \"{}\"", self.location)
    }
}

/// A file embedded in the muxed container, usually a font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    location: String,
    mime_type: String,
    name: Option<String>,
    description: Option<String>,
    attach_once: bool,
}

impl Attachment {
    /// Create an attachment. mkvmerge requires a MIME type for every
    /// attachment, so both fields must be non-empty.
    pub fn new(
        location: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Result<Self, CommandError> {
        let location = location.into();
        let mime_type = mime_type.into();
        if location.is_empty() {
            return Err(CommandError::missing("attachment", "location"));
        }
        if mime_type.is_empty() {
            return Err(CommandError::missing("attachment", "mime type"));
        }
        Ok(Self {
            location,
            mime_type,
            name: None,
            description: None,
            attach_once: false,
        })
    }

    /// Set the attachment name. An empty name is treated as unset.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into()).filter(|n| !n.is_empty());
        self
    }

    /// Set the attachment description. An empty description is treated as unset.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into()).filter(|d| !d.is_empty());
        self
    }

    /// Use `--attach-file-once` instead of `--attach-file`.
    pub fn attach_once(mut self, once: bool) -> Self {
        self.attach_once = once;
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_attach_once(&self) -> bool {
        self.attach_once
    }

    /// Append the attachment options. The order is fixed: MIME type,
    /// name, description, then the file itself.
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, " --attachment-mime-type {}", self.mime_type)?;
        if let Some(name) = self.name() {
            write!(out, " --attachment-name \"{}\"", name)?;
        }
        if let Some(description) = self.description() {
            write!(out, " --attachment-description \"{}\"", description)?;
        }
        let flag = if self.attach_once {
            "--attach-file-once"
        } else {
            "--attach-file"
        };
        write!(out, " {} \"{}\"", flag, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_track(track: &Track) -> String {
        let mut out = String::new();
        track.write_to(&mut out).unwrap();
        out
    }

    fn render_attachment(attachment: &Attachment) -> String {
        let mut out = String::new();
        attachment.write_to(&mut out).unwrap();
        out
    }

    #[test]
    fn track_without_args() {
        let track = Track::new("folder\\test.264").unwrap();
        assert_eq!(render_track(&track), " \"folder\\test.264\"");
    }

    #[test]
    fn track_args_precede_location() {
        let args = ArgumentSet::from([("track-name", "0:Hooplah"), ("language", "0:Japanese")]);
        let track = Track::with_args("folder\\test.m4a", Some(args)).unwrap();
        assert_eq!(
            render_track(&track),
            " --language 0:Japanese --track-name 0:Hooplah \"folder\\test.m4a\""
        );
    }

    #[test]
    fn track_requires_location() {
        let err = Track::new("").unwrap_err();
        assert!(matches!(
            err,
            CommandError::MissingField {
                entity: "track",
                field: "location"
            }
        ));

        let args = ArgumentSet::from([("language", "0:eng")]);
        assert!(Track::with_args("", Some(args)).is_err());
    }

    #[test]
    fn sparse_attachment() {
        let font = Attachment::new("Arial.ttf", "application/x-truetype-font").unwrap();
        assert_eq!(
            render_attachment(&font),
            " --attachment-mime-type application/x-truetype-font --attach-file \"Arial.ttf\""
        );
    }

    #[test]
    fn full_attachment_attached_once() {
        let font = Attachment::new("Helvetica.ttf", "application/x-truetype-font")
            .unwrap()
            .with_name("Helvetica")
            .with_description("the font she tells you not to worry about")
            .attach_once(true);
        assert_eq!(
            render_attachment(&font),
            " --attachment-mime-type application/x-truetype-font \
             --attachment-name \"Helvetica\" \
             --attachment-description \"the font she tells you not to worry about\" \
             --attach-file-once \"Helvetica.ttf\""
        );
    }

    #[test]
    fn empty_name_is_skipped() {
        let font = Attachment::new("Arial.ttf", "font/ttf")
            .unwrap()
            .with_name("")
            .with_description("body text");
        assert_eq!(font.name(), None);
        assert_eq!(
            render_attachment(&font),
            " --attachment-mime-type font/ttf --attachment-description \"body text\" \
             --attach-file \"Arial.ttf\""
        );
    }

    #[test]
    fn attachment_requires_location_and_mime_type() {
        assert!(matches!(
            Attachment::new("", "font/ttf"),
            Err(CommandError::MissingField {
                field: "location",
                ..
            })
        ));
        assert!(matches!(
            Attachment::new("Arial.ttf", ""),
            Err(CommandError::MissingField {
                field: "mime type",
                ..
            })
        ));
        assert!(matches!(
            Attachment::new("", ""),
            Err(CommandError::MissingField {
                field: "location",
                ..
            })
        ));
    }
}
