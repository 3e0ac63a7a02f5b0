//! Chapter serialization.
//!
//! Two output formats are supported:
//! - The simple `CHAPTERnn=` / `CHAPTERnnNAME=` text format read by mkvmerge
//! - Matroska chapter XML
//!
//! The simple format can also be read back with [`parse_simple_chapters`].

use std::fmt::{self, Write};
use std::path::Path;

use super::timecode::Timecode;
use super::types::{Chapter, ChapterError, ChapterResult};
use crate::files::atomic_write;

/// Write chapters in the simple chapter format.
///
/// Each chapter produces two lines, numbered from 1 and zero padded to at
/// least two digits:
///
/// ```text
/// CHAPTER01=00:00:00.000
/// CHAPTER01NAME=Chapter 1
/// ```
pub fn write_simple_chapters<W: Write>(chapters: &[Chapter], out: &mut W) -> fmt::Result {
    for (i, chapter) in chapters.iter().enumerate() {
        let base = format!("CHAPTER{:02}", i + 1);
        writeln!(out, "{}={}", base, chapter.start.format_chapter())?;
        writeln!(out, "{}NAME={}", base, chapter.name)?;
    }
    Ok(())
}

/// Render chapters in the simple chapter format.
pub fn to_simple_chapters(chapters: &[Chapter]) -> String {
    let mut text = String::new();
    // Writing into a String cannot fail
    let _ = write_simple_chapters(chapters, &mut text);
    text
}

/// Write the simple chapter format to `path` atomically.
pub fn write_chapter_file(chapters: &[Chapter], path: &Path) -> ChapterResult<()> {
    atomic_write(path, &to_simple_chapters(chapters))?;
    tracing::info!("Wrote {} chapters to {}", chapters.len(), path.display());
    Ok(())
}

/// Read the simple chapter format back into chapters.
///
/// Durations are not stored in the format, so each chapter lasts until
/// the next one starts and the last one lasts until `run_length`.
/// Chapters without a `NAME` line are called `Chapter N`.
pub fn parse_simple_chapters(text: &str, run_length: Timecode) -> ChapterResult<Vec<Chapter>> {
    let mut entries: Vec<(u32, Timecode, Option<String>)> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let parse_error = || ChapterError::ParseError(format!("line {}: {}", line_no + 1, line));

        let rest = line.strip_prefix("CHAPTER").ok_or_else(parse_error)?;
        let (key, value) = rest.split_once('=').ok_or_else(parse_error)?;

        if let Some(number) = key.strip_suffix("NAME") {
            let number: u32 = number.parse().map_err(|_| parse_error())?;
            match entries.last_mut() {
                Some((n, _, name)) if *n == number => *name = Some(value.to_string()),
                _ => return Err(parse_error()),
            }
        } else {
            let number: u32 = key.parse().map_err(|_| parse_error())?;
            entries.push((number, Timecode::parse(value)?, None));
        }
    }

    let mut chapters = Vec::with_capacity(entries.len());
    for (i, (_, start, name)) in entries.iter().enumerate() {
        let end = entries.get(i + 1).map(|(_, next, _)| *next).unwrap_or(run_length);
        let name = name.clone().unwrap_or_else(|| format!("Chapter {}", i + 1));
        let duration = end.checked_sub(*start).unwrap_or(Timecode::ZERO);
        chapters.push(Chapter::new(name, *start, duration)?);
    }

    tracing::debug!("Parsed {} chapters", chapters.len());
    Ok(chapters)
}

/// Serialize chapters to Matroska chapter XML.
///
/// `language` is the ISO 639-2 code written on every display.
pub fn to_chapters_xml(chapters: &[Chapter], language: &str) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<!DOCTYPE Chapters SYSTEM \"matroskachapters.dtd\">\n");
    xml.push_str("<Chapters>\n");
    xml.push_str("  <EditionEntry>\n");

    for chapter in chapters {
        xml.push_str("    <ChapterAtom>\n");
        xml.push_str(&format!(
            "      <ChapterTimeStart>{}</ChapterTimeStart>\n",
            chapter.start.format_nanos()
        ));
        xml.push_str(&format!(
            "      <ChapterTimeEnd>{}</ChapterTimeEnd>\n",
            chapter.end().format_nanos()
        ));
        xml.push_str("      <ChapterDisplay>\n");
        xml.push_str(&format!(
            "        <ChapterString>{}</ChapterString>\n",
            escape_xml(&chapter.name)
        ));
        xml.push_str(&format!(
            "        <ChapterLanguage>{}</ChapterLanguage>\n",
            escape_xml(language)
        ));
        xml.push_str("      </ChapterDisplay>\n");
        xml.push_str("    </ChapterAtom>\n");
    }

    xml.push_str("  </EditionEntry>\n");
    xml.push_str("</Chapters>\n");
    xml
}

/// Write Matroska chapter XML to `path` atomically.
pub fn write_chapters_xml(chapters: &[Chapter], language: &str, path: &Path) -> ChapterResult<()> {
    atomic_write(path, &to_chapters_xml(chapters, language))?;
    tracing::info!("Wrote {} chapters to {}", chapters.len(), path.display());
    Ok(())
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn chapter(name: &str, start_ms: u64, duration_ms: u64) -> Chapter {
        Chapter::new(
            name,
            Timecode::from_millis(start_ms),
            Timecode::from_millis(duration_ms),
        )
        .unwrap()
    }

    #[test]
    fn exports_single_chapter() {
        let chapters = vec![chapter("Chapter 1", 0, 90_000)];
        assert_eq!(
            to_simple_chapters(&chapters),
            "CHAPTER01=00:00:00.000\nCHAPTER01NAME=Chapter 1\n"
        );
    }

    #[test]
    fn exports_in_sequence_order() {
        let chapters = vec![
            chapter("Opening", 0, 90_000),
            chapter("Part A", 90_000, 600_500),
            chapter("Ending", 690_500, 89_999),
        ];
        assert_eq!(
            to_simple_chapters(&chapters),
            "CHAPTER01=00:00:00.000\n\
             CHAPTER01NAME=Opening\n\
             CHAPTER02=00:01:30.000\n\
             CHAPTER02NAME=Part A\n\
             CHAPTER03=00:11:30.500\n\
             CHAPTER03NAME=Ending\n"
        );
    }

    #[test]
    fn index_padding_grows_past_99() {
        let chapters: Vec<Chapter> = (0..100)
            .map(|i| chapter(&format!("c{}", i), i * 1_000, 1_000))
            .collect();
        let text = to_simple_chapters(&chapters);
        assert!(text.contains("CHAPTER09=00:00:08.000\n"));
        assert!(text.ends_with("CHAPTER100=00:01:39.000\nCHAPTER100NAME=c99\n"));
    }

    #[test]
    fn empty_list_exports_nothing() {
        assert_eq!(to_simple_chapters(&[]), "");
    }

    #[test]
    fn parses_exported_text() {
        let text = "CHAPTER01=00:00:00.000\r\nCHAPTER01NAME=Opening\r\n\
                    CHAPTER02=00:01:30.000\r\nCHAPTER02NAME=Part A\r\n";
        let chapters = parse_simple_chapters(text, Timecode::from_secs(300)).unwrap();

        assert_eq!(
            chapters,
            vec![chapter("Opening", 0, 90_000), chapter("Part A", 90_000, 210_000)]
        );
    }

    #[test]
    fn parse_names_unnamed_chapters() {
        let text = "CHAPTER01=00:00:00.000\nCHAPTER02=00:00:10.000\nCHAPTER02NAME=Two\n";
        let chapters = parse_simple_chapters(text, Timecode::from_secs(20)).unwrap();
        assert_eq!(chapters[0].name, "Chapter 1");
        assert_eq!(chapters[1].name, "Two");
    }

    #[test]
    fn parse_rejects_garbage_and_orphan_names() {
        let run = Timecode::from_secs(10);
        assert!(matches!(
            parse_simple_chapters("TITLE=foo\n", run),
            Err(ChapterError::ParseError(_))
        ));
        assert!(matches!(
            parse_simple_chapters("CHAPTER01NAME=foo\n", run),
            Err(ChapterError::ParseError(_))
        ));
        assert!(matches!(
            parse_simple_chapters("CHAPTER01=bad\n", run),
            Err(ChapterError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn parse_rejects_chapter_past_run_length() {
        let text = "CHAPTER01=00:00:30.000\n";
        assert!(matches!(
            parse_simple_chapters(text, Timecode::from_secs(30)),
            Err(ChapterError::InvalidDuration(_))
        ));
    }

    #[test]
    fn xml_contains_times_and_escaped_names() {
        let chapters = vec![chapter("Tom & Jerry", 1_500, 2_000)];
        let xml = to_chapters_xml(&chapters, "eng");

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.contains("<ChapterTimeStart>00:00:01.500000000</ChapterTimeStart>"));
        assert!(xml.contains("<ChapterTimeEnd>00:00:03.500000000</ChapterTimeEnd>"));
        assert!(xml.contains("<ChapterString>Tom &amp; Jerry</ChapterString>"));
        assert!(xml.contains("<ChapterLanguage>eng</ChapterLanguage>"));
        assert_eq!(xml.matches("<ChapterAtom>").count(), 1);
    }

    #[test]
    fn writes_files() {
        let dir = tempdir().unwrap();
        let chapters = vec![chapter("Chapter 1", 0, 1_000)];

        let txt = dir.path().join("title.chapters.txt");
        write_chapter_file(&chapters, &txt).unwrap();
        assert_eq!(
            fs::read_to_string(&txt).unwrap(),
            "CHAPTER01=00:00:00.000\nCHAPTER01NAME=Chapter 1\n"
        );

        let xml = dir.path().join("title.chapters.xml");
        write_chapters_xml(&chapters, "jpn", &xml).unwrap();
        assert!(fs::read_to_string(&xml).unwrap().contains("<ChapterLanguage>jpn"));
    }
}
