//! Planes and half-space classification.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingSphere;
use crate::vector::Vec3;

/// Which side of a plane something lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// In the direction of the plane normal.
    Front,
    /// Opposite the plane normal.
    Back,
    /// Within epsilon of the plane, or straddling it.
    On,
}

/// Plane in constant-normal form: `dot(normal, p) = distance`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Creates a plane from a unit normal and distance
    #[must_use]
    pub const fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane through `point` with the given normal (normalized internally)
    #[must_use]
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalized();
        Self::new(normal, normal.dot(point))
    }

    /// Plane through three counter-clockwise points
    #[must_use]
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(c - a).normalized();
        Self::new(normal, normal.dot(a))
    }

    /// Signed distance from `point` to the plane; positive is in front
    #[must_use]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }

    /// Classifies a point against the plane
    #[must_use]
    pub fn side_of_point(&self, point: Vec3) -> Side {
        let distance = self.signed_distance(point);
        if distance > crate::EPSILON {
            Side::Front
        } else if distance < -crate::EPSILON {
            Side::Back
        } else {
            Side::On
        }
    }

    /// Classifies a sphere; `On` means the sphere straddles the plane
    #[must_use]
    pub fn side_of_sphere(&self, sphere: &BoundingSphere) -> Side {
        let distance = self.signed_distance(sphere.center);
        if distance > sphere.radius {
            Side::Front
        } else if distance < -sphere.radius {
            Side::Back
        } else {
            Side::On
        }
    }
}
