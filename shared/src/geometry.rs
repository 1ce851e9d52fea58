//! Coordinate Engine - pure clock-face geometry
//!
//! Converts between pointer coordinates, clock angles, fine segments, and
//! hour positions. Clock angles are measured in degrees, clockwise from the
//! 12 o'clock position, in [0, 360). Segment `i` spans clock angles
//! [6i, 6i+6), so segment 0's leading edge sits exactly at 12 o'clock.
//!
//! All functions are stateless; coordinates are relative to the widget's
//! geometric center, y pointing up.

/// Number of fine detachment segments around the face.
pub const SEGMENT_COUNT: usize = 60;

/// Angular width of one segment in degrees.
pub const DEGREES_PER_SEGMENT: f32 = 360.0 / SEGMENT_COUNT as f32;

/// Ring radii of the clock face, in viewbox units.
///
/// These match the rendered layout: three grid rings, hour markers on the
/// tear ring, and a wider hit ring for touch targets.
pub mod rings {
    /// Inner boundary of the segment band.
    pub const INNER: f32 = 70.0;
    /// Radius at which hour markers (tears) are drawn.
    pub const TEAR: f32 = 75.0;
    /// Middle guide ring.
    pub const MIDDLE: f32 = 85.0;
    /// Outer boundary of the segment band.
    pub const OUTER: f32 = 100.0;
    /// Hit radius around an hour marker.
    pub const MARKER_HIT: f32 = 12.0;
}

/// What a pointer position lands on when hit-tested against the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTarget {
    /// An hour marker disc (1-12).
    Hour(u8),
    /// A detachment segment wedge (0-59).
    Segment(usize),
    /// Outside every interactive zone.
    Outside,
}

/// Convert a point relative to the face center into a clock angle in degrees.
///
/// Returns a value in [0, 360). The exact center has no defined angle; it
/// maps to 0 degrees (and therefore segment 0) rather than propagating NaN.
pub fn point_to_clock_angle(x: f32, y: f32) -> f32 {
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }
    let math_deg = y.atan2(x).to_degrees();
    (90.0 - math_deg).rem_euclid(360.0)
}

/// Convert a point relative to the face center into a segment index.
///
/// Total over all inputs; the center falls back to segment 0.
pub fn point_to_segment(x: f32, y: f32) -> usize {
    let angle = point_to_clock_angle(x, y);
    (angle / DEGREES_PER_SEGMENT) as usize % SEGMENT_COUNT
}

/// Clock angle of a segment's leading edge in degrees.
pub fn segment_to_angle(segment: usize) -> f32 {
    (segment % SEGMENT_COUNT) as f32 * DEGREES_PER_SEGMENT
}

/// Clock angle of a segment's wedge midpoint in degrees.
pub fn segment_midpoint_angle(segment: usize) -> f32 {
    segment_to_angle(segment) + DEGREES_PER_SEGMENT / 2.0
}

/// Clock angle of an hour marker in degrees (hour 12 sits at 0 degrees).
pub fn hour_to_angle(hour: u8) -> f32 {
    (hour as f32 * 30.0) % 360.0
}

/// Place a point at the given radius along a clock angle.
///
/// Inverse of `point_to_clock_angle` up to radius; used to position
/// markers and wedge outlines.
pub fn angle_to_point(clock_degrees: f32, radius: f32) -> (f32, f32) {
    let math_rad = (90.0 - clock_degrees).to_radians();
    (radius * math_rad.cos(), radius * math_rad.sin())
}

/// Position of an hour marker at the given radius.
pub fn hour_to_point(hour: u8, radius: f32) -> (f32, f32) {
    angle_to_point(hour_to_angle(hour), radius)
}

/// Classify a pointer position against the interactive zones of the face.
///
/// Hour markers take precedence over the segment band beneath them. The
/// `touch_targets` flag additionally tests the wider hit discs on the
/// outer ring, matching the enlarged touch zones.
pub fn hit_test(x: f32, y: f32, touch_targets: bool) -> ClockTarget {
    for hour in 1..=12u8 {
        let (hx, hy) = hour_to_point(hour, rings::TEAR);
        if dist(x, y, hx, hy) <= rings::MARKER_HIT {
            return ClockTarget::Hour(hour);
        }
        if touch_targets {
            let (ox, oy) = hour_to_point(hour, rings::OUTER);
            if dist(x, y, ox, oy) <= rings::MARKER_HIT {
                return ClockTarget::Hour(hour);
            }
        }
    }

    let r = (x * x + y * y).sqrt();
    if r >= rings::INNER && r <= rings::OUTER {
        return ClockTarget::Segment(point_to_segment(x, y));
    }

    ClockTarget::Outside
}

fn dist(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ((ax - bx) * (ax - bx) + (ay - by) * (ay - by)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_points_map_to_expected_segments() {
        // Straight up is the leading edge of segment 0.
        assert_eq!(point_to_segment(0.0, 100.0), 0);
        // 3 o'clock (90 degrees) starts segment 15.
        assert_eq!(point_to_segment(100.0, 0.0), 15);
        // 6 o'clock.
        assert_eq!(point_to_segment(0.0, -100.0), 30);
        // 9 o'clock.
        assert_eq!(point_to_segment(-100.0, 0.0), 45);
    }

    #[test]
    fn test_center_falls_back_to_segment_zero() {
        assert_eq!(point_to_segment(0.0, 0.0), 0);
        assert_eq!(point_to_clock_angle(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_point_to_segment_total_over_all_angles() {
        for i in 0..720 {
            let theta = (i as f32 / 720.0) * std::f32::consts::TAU;
            let seg = point_to_segment(85.0 * theta.cos(), 85.0 * theta.sin());
            assert!(seg < SEGMENT_COUNT);
        }
    }

    #[test]
    fn test_segment_angle_round_trip() {
        for seg in 0..SEGMENT_COUNT {
            let angle = segment_midpoint_angle(seg);
            let (x, y) = angle_to_point(angle, rings::MIDDLE);
            assert_eq!(point_to_segment(x, y), seg);
        }
    }

    #[test]
    fn test_hour_angles() {
        assert_eq!(hour_to_angle(12), 0.0);
        assert_eq!(hour_to_angle(3), 90.0);
        assert_eq!(hour_to_angle(6), 180.0);
        assert_eq!(hour_to_angle(9), 270.0);
    }

    #[test]
    fn test_angle_to_point_twelve_is_up() {
        let (x, y) = angle_to_point(0.0, 100.0);
        assert!(x.abs() < 1e-4);
        assert!((y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_hit_test_hour_marker_wins_over_segment_band() {
        let (hx, hy) = hour_to_point(6, rings::TEAR);
        assert_eq!(hit_test(hx, hy, false), ClockTarget::Hour(6));
    }

    #[test]
    fn test_hit_test_segment_band() {
        // Midway along segment 16's wedge, away from any marker.
        let (x, y) = angle_to_point(segment_midpoint_angle(16), rings::MIDDLE);
        assert_eq!(hit_test(x, y, false), ClockTarget::Segment(16));
    }

    #[test]
    fn test_hit_test_outside() {
        assert_eq!(hit_test(0.0, 0.0, false), ClockTarget::Outside);
        assert_eq!(hit_test(300.0, 300.0, false), ClockTarget::Outside);
    }

    #[test]
    fn test_touch_targets_extend_to_outer_ring() {
        let (x, y) = hour_to_point(3, rings::OUTER);
        assert_eq!(hit_test(x, y, true), ClockTarget::Hour(3));
    }
}
