//! Line segments.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::vector::Vec3;

/// Line segment between two points
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Segment {
    /// Start point
    pub start: Vec3,
    /// End point
    pub end: Vec3,
}

impl Segment {
    /// Creates a segment
    #[must_use]
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Length
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Unit direction from start to end; zero for a degenerate segment
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).normalized()
    }

    /// Point at parameter `t` in `[0, 1]`, unclamped
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.start.lerp(self.end, t)
    }

    /// Closest point on the segment to `point`
    #[must_use]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let span = self.end - self.start;
        let span_squared = span.length_squared();
        if span_squared <= crate::EPSILON {
            return self.start;
        }
        let t = ((point - self.start).dot(span) / span_squared).clamp(0.0, 1.0);
        self.start + span * t
    }

    /// Distance from `point` to the segment
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.closest_point(point).distance(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_direction() {
        let segment = Segment::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(segment.length(), 4.0);
        assert_eq!(segment.direction(), Vec3::Z);
    }

    #[test]
    fn test_closest_point_clamps_to_endpoints() {
        let segment = Segment::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(
            segment.closest_point(Vec3::new(-5.0, 1.0, 0.0)),
            Vec3::ZERO
        );
        assert_eq!(
            segment.closest_point(Vec3::new(9.0, -1.0, 0.0)),
            Vec3::new(2.0, 0.0, 0.0)
        );
        assert_eq!(
            segment.closest_point(Vec3::new(1.0, 3.0, 0.0)),
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_distance_to_point() {
        let segment = Segment::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(segment.distance_to_point(Vec3::new(1.0, 3.0, 0.0)), 3.0);
    }

    #[test]
    fn test_degenerate_segment() {
        let point = Vec3::new(1.0, 1.0, 1.0);
        let segment = Segment::new(point, point);
        assert_eq!(segment.closest_point(Vec3::new(5.0, 5.0, 5.0)), point);
        assert_eq!(segment.direction(), Vec3::ZERO);
    }
}
