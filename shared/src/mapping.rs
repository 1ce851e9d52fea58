//! Segment/Hour Mapping Table
//!
//! Fixed partition of the 60 fine segments into 12 hour buckets. The buckets
//! are deliberately non-uniform (3, 5, 6, or 8 segments per hour): the
//! inferior hours 5 and 7 are narrow, hour 6 and hour 12 are wide. Every
//! segment belongs to exactly one hour.

use crate::geometry::SEGMENT_COUNT;

/// Lookup table: index is the segment number, value is the clock hour.
pub const SEGMENT_TO_HOUR: [u8; SEGMENT_COUNT] = [
    12, 12, 12, 12, // 0-3
    1, 1, 1, 1, 1, // 4-8
    2, 2, 2, 2, 2, // 9-13
    3, 3, 3, 3, 3, // 14-18
    4, 4, 4, 4, 4, // 19-23
    5, 5, 5, // 24-26
    6, 6, 6, 6, 6, 6, // 27-32
    7, 7, 7, // 33-35
    8, 8, 8, 8, 8, // 36-40
    9, 9, 9, 9, 9, // 41-45
    10, 10, 10, 10, 10, // 46-50
    11, 11, 11, 11, 11, // 51-55
    12, 12, 12, 12, // 56-59
];

/// Clock hour for a segment. O(1); total over [0, 60).
///
/// Out-of-range indices wrap, keeping the function total for any caller.
pub fn segment_to_hour(segment: usize) -> u8 {
    SEGMENT_TO_HOUR[segment % SEGMENT_COUNT]
}

/// All segments belonging to a clock hour, ascending.
///
/// Returns an empty slice for hours outside [1, 12].
pub fn hour_to_segments(hour: u8) -> &'static [usize] {
    match hour {
        1 => &[4, 5, 6, 7, 8],
        2 => &[9, 10, 11, 12, 13],
        3 => &[14, 15, 16, 17, 18],
        4 => &[19, 20, 21, 22, 23],
        5 => &[24, 25, 26],
        6 => &[27, 28, 29, 30, 31, 32],
        7 => &[33, 34, 35],
        8 => &[36, 37, 38, 39, 40],
        9 => &[41, 42, 43, 44, 45],
        10 => &[46, 47, 48, 49, 50],
        11 => &[51, 52, 53, 54, 55],
        12 => &[0, 1, 2, 3, 56, 57, 58, 59],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_every_segment_maps_to_a_valid_hour() {
        for seg in 0..SEGMENT_COUNT {
            let hour = segment_to_hour(seg);
            assert!((1..=12).contains(&hour), "segment {} -> hour {}", seg, hour);
        }
    }

    #[test]
    fn test_buckets_partition_all_segments() {
        let mut seen = BTreeSet::new();
        for hour in 1..=12u8 {
            for &seg in hour_to_segments(hour) {
                assert!(seen.insert(seg), "segment {} in two buckets", seg);
            }
        }
        assert_eq!(seen.len(), SEGMENT_COUNT);
    }

    #[test]
    fn test_forward_and_inverse_agree() {
        for hour in 1..=12u8 {
            for &seg in hour_to_segments(hour) {
                assert_eq!(segment_to_hour(seg), hour);
            }
        }
    }

    #[test]
    fn test_bucket_sizes_are_the_fixed_non_uniform_widths() {
        assert_eq!(hour_to_segments(5).len(), 3);
        assert_eq!(hour_to_segments(7).len(), 3);
        assert_eq!(hour_to_segments(6).len(), 6);
        assert_eq!(hour_to_segments(12).len(), 8);
        for hour in [1, 2, 3, 4, 8, 9, 10, 11] {
            assert_eq!(hour_to_segments(hour).len(), 5);
        }
    }

    #[test]
    fn test_hour_twelve_wraps_the_top_of_the_face() {
        assert_eq!(segment_to_hour(0), 12);
        assert_eq!(segment_to_hour(59), 12);
        assert_eq!(segment_to_hour(4), 1);
        assert_eq!(segment_to_hour(55), 11);
    }

    #[test]
    fn test_invalid_hour_has_no_segments() {
        assert!(hour_to_segments(0).is_empty());
        assert!(hour_to_segments(13).is_empty());
    }
}
