//! Chapter timeline operations.
//!
//! Provides the transforms applied to a title's chapter list before it
//! is exported:
//! - Filtering (drop chapters shorter than a threshold)
//! - Splitting (partition into groups, each rebased to start at zero)
//! - Renaming (cyclic assignment from a list of names)

use super::timecode::Timecode;
use super::types::{Chapter, ChapterError, ChapterResult};

/// Remove every chapter whose duration is strictly shorter than `seconds`.
///
/// The remaining chapters keep their order and their original `start`
/// and `duration` values. Returns the number of chapters removed.
pub fn remove_chapters_shorter_than(chapters: &mut Vec<Chapter>, seconds: f64) -> usize {
    let original_count = chapters.len();

    chapters.retain(|chapter| chapter.duration.to_seconds() >= seconds);

    let removed = original_count - chapters.len();
    if removed > 0 {
        tracing::debug!(
            "Removed {} chapters shorter than {}s ({} remain)",
            removed,
            seconds,
            chapters.len()
        );
    }
    removed
}

/// Partition chapters into consecutive groups of `group_size`.
///
/// The last group may be smaller. Within each group every `start` is
/// rebased so the group's first chapter starts at zero; durations are
/// untouched. The input is consumed, so clone it first if the original
/// offsets are still needed.
pub fn split_chapters(
    chapters: Vec<Chapter>,
    group_size: usize,
) -> ChapterResult<Vec<Vec<Chapter>>> {
    if group_size == 0 {
        return Err(ChapterError::InvalidGroupSize);
    }

    let mut groups = Vec::with_capacity(chapters.len().div_ceil(group_size));
    let mut remaining = chapters.into_iter();

    loop {
        let mut group: Vec<Chapter> = remaining.by_ref().take(group_size).collect();
        if group.is_empty() {
            break;
        }
        rebase_to_first(&mut group);
        groups.push(group);
    }

    tracing::debug!(
        "Split chapters into {} groups of up to {}",
        groups.len(),
        group_size
    );
    Ok(groups)
}

/// Shift a group so its first chapter starts at zero.
///
/// Chapters that start before the first one (out of order input) clamp
/// to zero.
fn rebase_to_first(group: &mut [Chapter]) {
    let origin = match group.first() {
        Some(first) => first.start,
        None => return,
    };
    if origin == Timecode::ZERO {
        return;
    }
    for chapter in group.iter_mut() {
        chapter.start = chapter.start.saturating_sub(origin);
    }
}

/// Assign names cyclically: chapter `i` gets `names[i % names.len()]`.
///
/// Fails before touching anything if there are more names than chapters,
/// or if `repeat` is set and the names do not tile the chapters exactly.
///
/// Without `repeat`, only the first `names.len()` chapters are renamed
/// and the rest keep their current names. Returns the number of chapters
/// renamed.
pub fn rename_chapters<S: AsRef<str>>(
    chapters: &mut [Chapter],
    names: &[S],
    repeat: bool,
) -> ChapterResult<usize> {
    if names.len() > chapters.len() {
        return Err(ChapterError::TooManyNames {
            names: names.len(),
            chapters: chapters.len(),
        });
    }
    if repeat && (names.is_empty() || chapters.len() % names.len() != 0) {
        return Err(ChapterError::UnevenNames {
            names: names.len(),
            chapters: chapters.len(),
        });
    }

    let limit = if repeat { chapters.len() } else { names.len() };

    for (i, chapter) in chapters.iter_mut().take(limit).enumerate() {
        chapter.name = names[i % names.len()].as_ref().to_string();
    }

    tracing::debug!(
        "Renamed {} of {} chapters from {} names (repeat: {})",
        limit,
        chapters.len(),
        names.len(),
        repeat
    );
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Chapters with the given lengths in seconds, laid end to end.
    fn chapters_with_lengths(lengths: &[u64]) -> Vec<Chapter> {
        let mut start = Timecode::ZERO;
        lengths
            .iter()
            .enumerate()
            .map(|(i, &secs)| {
                let duration = Timecode::from_secs(secs);
                let chapter = Chapter::new(format!("Chapter {}", i + 1), start, duration).unwrap();
                start += duration;
                chapter
            })
            .collect()
    }

    fn names(chapters: &[Chapter]) -> Vec<&str> {
        chapters.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn remove_keeps_order_and_original_offsets() {
        let mut chapters = chapters_with_lengths(&[60, 2, 120, 90]);
        let removed = remove_chapters_shorter_than(&mut chapters, 5.0);

        assert_eq!(removed, 1);
        assert_eq!(names(&chapters), ["Chapter 1", "Chapter 3", "Chapter 4"]);
        assert_eq!(chapters[1].start, Timecode::from_secs(62));
        assert_eq!(chapters[1].duration, Timecode::from_secs(120));
    }

    #[test]
    fn remove_handles_adjacent_short_chapters() {
        let mut chapters = chapters_with_lengths(&[60, 1, 1, 90, 3]);
        let removed = remove_chapters_shorter_than(&mut chapters, 5.0);

        assert_eq!(removed, 3);
        assert_eq!(names(&chapters), ["Chapter 1", "Chapter 4"]);
    }

    #[test]
    fn remove_threshold_is_strict() {
        let mut chapters = chapters_with_lengths(&[5, 4]);
        remove_chapters_shorter_than(&mut chapters, 5.0);
        assert_eq!(names(&chapters), ["Chapter 1"]);
    }

    #[test]
    fn remove_can_empty_the_list() {
        let mut chapters = chapters_with_lengths(&[1, 1]);
        assert_eq!(remove_chapters_shorter_than(&mut chapters, 10.0), 2);
        assert!(chapters.is_empty());
    }

    #[test]
    fn split_rebases_each_group() {
        let chapters = chapters_with_lengths(&[10, 20, 30, 40, 50]);
        let groups = split_chapters(chapters, 2).unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), 5);
        for group in &groups {
            assert_eq!(group[0].start, Timecode::ZERO);
        }

        // Second group originally started at 30s
        assert_eq!(groups[1][1].start, Timecode::from_secs(30));
        assert_eq!(groups[1][1].duration, Timecode::from_secs(40));
        assert_eq!(groups[1][1].end(), Timecode::from_secs(70));
        assert_eq!(names(&groups[2]), ["Chapter 5"]);
    }

    #[test]
    fn split_group_covers_original_span() {
        let chapters = chapters_with_lengths(&[10, 20, 30, 40, 50, 60]);
        let original = chapters.clone();
        let groups = split_chapters(chapters, 3).unwrap();

        let original_span = original[5].end().saturating_sub(original[3].start);
        assert_eq!(groups[1].last().unwrap().end(), original_span);
    }

    #[test]
    fn split_with_group_larger_than_list() {
        let chapters = chapters_with_lengths(&[10, 20]);
        let groups = split_chapters(chapters, 8).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn split_empty_and_zero() {
        assert!(split_chapters(Vec::new(), 3).unwrap().is_empty());
        assert!(matches!(
            split_chapters(chapters_with_lengths(&[1]), 0),
            Err(ChapterError::InvalidGroupSize)
        ));
    }

    #[test]
    fn rename_without_repeat_leaves_remainder() {
        let mut chapters = chapters_with_lengths(&[1, 1, 1, 1, 1]);
        let renamed = rename_chapters(&mut chapters, &["A", "B"], false).unwrap();

        assert_eq!(renamed, 2);
        assert_eq!(
            names(&chapters),
            ["A", "B", "Chapter 3", "Chapter 4", "Chapter 5"]
        );
    }

    #[test]
    fn rename_with_repeat_tiles_names() {
        let mut chapters = chapters_with_lengths(&[1, 1, 1, 1, 1, 1]);
        let renamed =
            rename_chapters(&mut chapters, &["Intro", "Part A", "Part B"], true).unwrap();

        assert_eq!(renamed, 6);
        assert_eq!(
            names(&chapters),
            ["Intro", "Part A", "Part B", "Intro", "Part A", "Part B"]
        );
    }

    #[test]
    fn rename_repeat_rejects_uneven_tiling() {
        let mut chapters = chapters_with_lengths(&[1, 1, 1, 1, 1]);
        let err = rename_chapters(&mut chapters, &["A", "B"], true).unwrap_err();

        assert!(matches!(
            err,
            ChapterError::UnevenNames {
                names: 2,
                chapters: 5
            }
        ));
        // Nothing was touched
        assert_eq!(chapters[0].name, "Chapter 1");
    }

    #[test]
    fn rename_rejects_more_names_than_chapters() {
        for repeat in [false, true] {
            let mut chapters = chapters_with_lengths(&[1, 1]);
            let err = rename_chapters(&mut chapters, &["A", "B", "C"], repeat).unwrap_err();
            assert!(matches!(err, ChapterError::TooManyNames { .. }));
            assert_eq!(names(&chapters), ["Chapter 1", "Chapter 2"]);
        }
    }

    #[test]
    fn rename_with_no_names() {
        let mut chapters = chapters_with_lengths(&[1, 1]);
        let no_names: [&str; 0] = [];

        assert_eq!(rename_chapters(&mut chapters, &no_names, false).unwrap(), 0);
        assert!(matches!(
            rename_chapters(&mut chapters, &no_names, true),
            Err(ChapterError::UnevenNames { .. })
        ));
    }
}
