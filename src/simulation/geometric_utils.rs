//! Geometric utility functions for distance calculations and toroidal wrapping.

use std::f32::consts::TAU;

use geo::algorithm::Distance;
use geo::{Euclidean, Line, Point};

/// Calculates the minimum distance between a line segment and a circle center.
///
/// # Arguments
///
/// * `line_start` - Starting point of the line segment
/// * `line_end` - Ending point of the line segment
/// * `circle_center` - Center point of the circle
pub fn line_circle_distance(
    line_start: [f32; 2],
    line_end: [f32; 2],
    circle_center: [f32; 2],
) -> f32 {
    let p = Point::new(circle_center[0], circle_center[1]);
    let line = Line::new(
        Point::new(line_start[0], line_start[1]),
        Point::new(line_end[0], line_end[1]),
    );
    Euclidean.distance(&p, &line)
}

/// Wraps a coordinate into `[0, bound)`.
///
/// Negative values wrap from the far edge. `rem_euclid` can round up to exactly
/// `bound` for tiny negative inputs, which is folded back to zero.
pub fn wrap(value: f32, bound: f32) -> f32 {
    let wrapped = value.rem_euclid(bound);
    if wrapped >= bound { 0.0 } else { wrapped }
}

/// Wraps a position around the arena boundaries (toroidal topology).
pub fn wrap_around_mut(x: &mut f32, y: &mut f32, width: f32, height: f32) {
    *x = wrap(*x, width);
    *y = wrap(*y, height);
}

/// Shortest signed offset from `from` to `to` on an axis that wraps at `bound`.
///
/// The result lies in `[-bound / 2, bound / 2]`, so a point just across the
/// seam reads as a near neighbour instead of one on the far side.
pub fn toroidal_delta(from: f32, to: f32, bound: f32) -> f32 {
    let delta = to - from;
    delta - bound * (delta / bound).round()
}

/// Offsets that shift a disc of `radius` around `value` onto its images
/// across the seams of an axis wrapping at `bound`. Always contains `0.0`.
pub fn seam_shifts(value: f32, radius: f32, bound: f32) -> Vec<f32> {
    let mut shifts = vec![0.0];
    if value - radius < 0.0 {
        shifts.push(bound);
    }
    if value + radius >= bound {
        shifts.push(-bound);
    }
    shifts
}

/// Normalizes an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    wrap(angle, TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_values_inside() {
        assert_eq!(wrap(801.0, 800.0), 1.0);
        assert_eq!(wrap(-2.0, 800.0), 798.0);
        assert_eq!(wrap(800.0, 800.0), 0.0);
        assert_eq!(wrap(0.0, 800.0), 0.0);
    }

    #[test]
    fn wrap_never_returns_bound() {
        let wrapped = wrap(-1e-9, 800.0);
        assert!((0.0..800.0).contains(&wrapped));
    }

    #[test]
    fn distance_to_segment() {
        let d = line_circle_distance([0.0, 0.0], [10.0, 0.0], [5.0, 3.0]);
        assert!((d - 3.0).abs() < 1e-5);

        let past_end = line_circle_distance([0.0, 0.0], [10.0, 0.0], [13.0, 4.0]);
        assert!((past_end - 5.0).abs() < 1e-5);
    }

    #[test]
    fn toroidal_delta_takes_the_short_way_round() {
        assert!((toroidal_delta(795.0, 5.0, 800.0) - 10.0).abs() < 1e-4);
        assert!((toroidal_delta(5.0, 795.0, 800.0) + 10.0).abs() < 1e-4);
        assert!((toroidal_delta(100.0, 150.0, 800.0) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn seam_shifts_only_near_edges() {
        assert_eq!(seam_shifts(400.0, 50.0, 800.0), vec![0.0]);
        assert_eq!(seam_shifts(10.0, 50.0, 800.0), vec![0.0, 800.0]);
        assert_eq!(seam_shifts(790.0, 50.0, 800.0), vec![0.0, -800.0]);
    }
}
