use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A point in scene space. `y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same point moved up by `dy`.
    pub fn raised(self, dy: f64) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }
}

/// Upper bound on path samples; larger requests are clamped.
pub const MAX_PATH_SEGMENTS: usize = 10_000;

/// Helix constants. The helix is centered on the origin and spans
/// `[-height / 2, height / 2]` vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralCurve {
    pub turns: f64,
    pub radius: f64,
    pub height: f64,
}

impl Default for SpiralCurve {
    fn default() -> Self {
        Self {
            turns: 3.0,
            radius: 3.0,
            height: 8.0,
        }
    }
}

impl SpiralCurve {
    pub fn new(turns: f64, radius: f64, height: f64) -> Self {
        Self {
            turns,
            radius,
            height,
        }
    }

    /// Point at parameter `t` in `[0, 1]`.
    pub fn point(&self, t: f64) -> Point3 {
        project_to_spiral(t, self.turns, self.radius, self.height)
    }

    /// `segments + 1` evenly spaced points from `t = 0` to `t = 1`, for
    /// drawing the helix as a path or tube. `segments` is clamped to
    /// `1..=MAX_PATH_SEGMENTS`.
    pub fn sample(&self, segments: usize) -> Vec<Point3> {
        let segments = segments.clamp(1, MAX_PATH_SEGMENTS);
        (0..=segments)
            .map(|i| self.point(i as f64 / segments as f64))
            .collect()
    }
}

pub fn project_to_spiral(t: f64, turns: f64, radius: f64, height: f64) -> Point3 {
    let angle = t * TAU * turns;
    Point3 {
        x: angle.cos() * radius,
        y: t * height - height / 2.0,
        z: angle.sin() * radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point(actual: Point3, x: f64, y: f64, z: f64) {
        let eps = 1e-9;
        assert!(
            (actual.x - x).abs() < eps && (actual.y - y).abs() < eps && (actual.z - z).abs() < eps,
            "{actual:?} != ({x}, {y}, {z})"
        );
    }

    #[test]
    fn endpoints() {
        assert_point(project_to_spiral(0.0, 3.0, 3.0, 8.0), 3.0, -4.0, 0.0);
        assert_point(project_to_spiral(1.0, 3.0, 3.0, 8.0), 3.0, 4.0, 0.0);
    }

    #[test]
    fn quarter_turn() {
        // One turn, so t = 0.25 is a quarter revolution.
        assert_point(project_to_spiral(0.25, 1.0, 2.0, 4.0), 0.0, -1.0, 2.0);
    }

    #[test]
    fn default_curve_matches_free_function() {
        let curve = SpiralCurve::default();
        for t in [0.0, 0.1, 0.5, 0.9, 1.0] {
            assert_eq!(curve.point(t), project_to_spiral(t, 3.0, 3.0, 8.0));
        }
    }

    #[test]
    fn sample_includes_both_ends() {
        let curve = SpiralCurve::default();
        let points = curve.sample(100);
        assert_eq!(points.len(), 101);
        assert_eq!(points[0], curve.point(0.0));
        assert_eq!(points[100], curve.point(1.0));
    }

    #[test]
    fn sample_zero_segments_is_clamped() {
        assert_eq!(SpiralCurve::default().sample(0).len(), 2);
    }

    #[test]
    fn sample_huge_segment_count_is_clamped() {
        let points = SpiralCurve::default().sample(usize::MAX);
        assert_eq!(points.len(), MAX_PATH_SEGMENTS + 1);
        assert_eq!(points[MAX_PATH_SEGMENTS], SpiralCurve::default().point(1.0));
    }

    #[test]
    fn raised_only_moves_y() {
        let p = Point3::new(1.0, 2.0, 3.0).raised(0.5);
        assert_eq!(p, Point3::new(1.0, 2.5, 3.0));
    }
}
