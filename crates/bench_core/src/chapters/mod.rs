//! Chapter timeline module.
//!
//! This module models the chapters of a disc title and the operations
//! applied to them before muxing.
//!
//! # Features
//!
//! - **Timecodes**: Offset/span arithmetic, frame conversion, formatting
//! - **Filtering**: Drop chapters shorter than a threshold
//! - **Splitting**: Partition into groups rebased to zero (one per episode)
//! - **Renaming**: Cyclic naming, optionally tiling a name list
//! - **Serialization**: Simple chapter text format and Matroska XML
//!
//! # Usage
//!
//! ```ignore
//! use bench_core::chapters::{remove_chapters_shorter_than, rename_chapters, write_chapter_file};
//!
//! let mut chapters = title.chapters.clone();
//! remove_chapters_shorter_than(&mut chapters, 1.0);
//! rename_chapters(&mut chapters, &["Opening", "Part A", "Part B", "Ending"], true)?;
//! write_chapter_file(&chapters, Path::new("/temp/title.chapters.txt"))?;
//! ```

mod export;
mod process;
mod timecode;
mod types;

pub use export::{
    parse_simple_chapters, to_chapters_xml, to_simple_chapters, write_chapter_file,
    write_chapters_xml, write_simple_chapters,
};
pub use process::{remove_chapters_shorter_than, rename_chapters, split_chapters};
pub use timecode::Timecode;
pub use types::{Chapter, ChapterError, ChapterResult};
