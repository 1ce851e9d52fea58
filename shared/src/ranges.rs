//! Range Summarizer - contiguous hour ranges for display
//!
//! Groups a set of clock hours into runs that are contiguous on the face,
//! including across the 12 -> 1 wrap, and renders them as "6" or "3-5"
//! style text. Detachment grouping additionally requires each hour in a run
//! to hold at least one painted segment, since the hour-level view can list
//! hours whose underlying segments only meet through the wrap point.

use std::collections::BTreeSet;

use crate::mapping::{hour_to_segments, segment_to_hour};

/// An ordered, wrap-aware run of clock hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourRange {
    hours: Vec<u8>,
}

impl HourRange {
    pub fn hours(&self) -> &[u8] {
        &self.hours
    }

    pub fn start(&self) -> u8 {
        self.hours[0]
    }

    pub fn end(&self) -> u8 {
        *self.hours.last().unwrap()
    }
}

impl std::fmt::Display for HourRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.hours.len() == 1 {
            write!(f, "{}", self.start())
        } else {
            write!(f, "{}-{}", self.start(), self.end())
        }
    }
}

/// Next hour clockwise, wrapping 12 -> 1.
fn next_hour(hour: u8) -> u8 {
    if hour == 12 {
        1
    } else {
        hour + 1
    }
}

fn group_with<F>(hours: &[u8], connected: F) -> Vec<HourRange>
where
    F: Fn(u8, u8) -> bool,
{
    let sorted: Vec<u8> = hours
        .iter()
        .copied()
        .filter(|h| (1..=12).contains(h))
        .collect::<BTreeSet<u8>>()
        .into_iter()
        .collect();

    if sorted.is_empty() {
        return Vec::new();
    }

    let mut ranges: Vec<Vec<u8>> = vec![vec![sorted[0]]];
    for &hour in &sorted[1..] {
        let prev = *ranges.last().unwrap().last().unwrap();
        if next_hour(prev) == hour && connected(prev, hour) {
            ranges.last_mut().unwrap().push(hour);
        } else {
            ranges.push(vec![hour]);
        }
    }

    // Wrap-merge: the last run ending at 12 continues into a first run
    // starting at 1.
    if ranges.len() > 1 {
        let last_end = *ranges.last().unwrap().last().unwrap();
        let first_start = ranges[0][0];
        if last_end == 12 && first_start == 1 && connected(12, 1) {
            let first = ranges.remove(0);
            ranges.last_mut().unwrap().extend(first);
        }
    }

    ranges.into_iter().map(|hours| HourRange { hours }).collect()
}

/// Group break hours into contiguous wrap-aware ranges.
pub fn group_consecutive(hours: &[u8]) -> Vec<HourRange> {
    group_with(hours, |_, _| true)
}

/// Group the detachment area into contiguous wrap-aware hour ranges.
///
/// Derives the affected hours from the painted segments, then joins two
/// consecutive hours only when both actually hold a painted segment.
pub fn group_detachment_ranges(segments: &[usize]) -> Vec<HourRange> {
    let segment_set: BTreeSet<usize> = segments.iter().copied().collect();
    let hours: Vec<u8> = segment_set.iter().map(|&s| segment_to_hour(s)).collect();

    let has_segment = |hour: u8| {
        hour_to_segments(hour)
            .iter()
            .any(|seg| segment_set.contains(seg))
    };

    group_with(&hours, |a, b| has_segment(a) && has_segment(b))
}

/// Render ranges as comma-joined text, "None" when empty.
pub fn format_ranges(ranges: &[HourRange]) -> String {
    if ranges.is_empty() {
        return "None".to_string();
    }
    ranges
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a plain ascending hour list, "None" when empty.
pub fn format_hour_list(hours: &[u8]) -> String {
    if hours.is_empty() {
        return "None".to_string();
    }
    let sorted: BTreeSet<u8> = hours.iter().copied().collect();
    sorted
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(ranges: &[HourRange]) -> Vec<String> {
        ranges.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_single_contiguous_run() {
        let ranges = group_consecutive(&[1, 2, 3]);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].hours(), &[1, 2, 3]);
        assert_eq!(ranges[0].to_string(), "1-3");
    }

    #[test]
    fn test_breaks_split_ranges() {
        let ranges = group_consecutive(&[1, 5, 6]);
        assert_eq!(texts(&ranges), vec!["1", "5-6"]);
    }

    #[test]
    fn test_wrap_merge_across_twelve() {
        let ranges = group_consecutive(&[11, 12, 1]);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].hours(), &[11, 12, 1]);
        assert_eq!(ranges[0].to_string(), "11-1");
    }

    #[test]
    fn test_singleton_formats_without_dash() {
        let ranges = group_consecutive(&[7]);
        assert_eq!(texts(&ranges), vec!["7"]);
    }

    #[test]
    fn test_duplicates_and_out_of_range_ignored() {
        let ranges = group_consecutive(&[3, 3, 4, 0, 13]);
        assert_eq!(texts(&ranges), vec!["3-4"]);
    }

    #[test]
    fn test_all_twelve_hours_is_one_range() {
        let hours: Vec<u8> = (1..=12).collect();
        let ranges = group_consecutive(&hours);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].hours().len(), 12);
    }

    #[test]
    fn test_detachment_ranges_wrap_through_segment_zero() {
        // Segments 55 (hour 11), 56-59 and 0-3 (hour 12), 4 (hour 1).
        let segments = [55, 56, 57, 58, 59, 0, 1, 2, 3, 4];
        let ranges = group_detachment_ranges(&segments);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].to_string(), "11-1");
    }

    #[test]
    fn test_detachment_ranges_split_when_segments_apart() {
        // Hour 2 and hour 6 painted, nothing between.
        let segments = [9, 10, 30];
        let ranges = group_detachment_ranges(&segments);
        assert_eq!(texts(&ranges), vec!["2", "6"]);
    }

    #[test]
    fn test_empty_input_formats_as_none() {
        assert_eq!(format_ranges(&[]), "None");
        assert_eq!(format_hour_list(&[]), "None");
    }

    #[test]
    fn test_format_hour_list_sorts_ascending() {
        assert_eq!(format_hour_list(&[9, 2, 5]), "2, 5, 9");
    }
}
