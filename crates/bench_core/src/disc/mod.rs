//! Disc title metadata.
//!
//! Reading a Blu-ray playlist is left to an external reader; this module
//! holds the data it produces (run length, resolution, frame rate, clip
//! files and chapter timings) and turns the raw chapter descriptors into
//! named [`Chapter`](crate::chapters::Chapter)s.

mod types;

pub use types::{ChapterDescriptor, DiscError, DiscResult, RawTitle, TitleInfo};
