//! Column-major 4x4 matrices for affine transforms.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::quaternion::Quat;
use crate::vector::Vec3;

/// 4x4 matrix, column-major storage (`m[column * 4 + row]`)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat4 {
    /// Elements in column-major order
    pub m: [f32; 16],
}

impl Mat4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Creates from column-major elements
    #[must_use]
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Element at `(row, column)`
    #[must_use]
    pub const fn at(&self, row: usize, column: usize) -> f32 {
        self.m[column * 4 + row]
    }

    /// Translation matrix
    #[must_use]
    pub const fn from_translation(t: Vec3) -> Self {
        let mut m = Self::IDENTITY.m;
        m[12] = t.x;
        m[13] = t.y;
        m[14] = t.z;
        Self { m }
    }

    /// Non-uniform scale matrix
    #[must_use]
    pub const fn from_scale(s: Vec3) -> Self {
        let mut m = Self::IDENTITY.m;
        m[0] = s.x;
        m[5] = s.y;
        m[10] = s.z;
        Self { m }
    }

    /// Rotation matrix from a unit quaternion
    #[must_use]
    pub fn from_quat(q: Quat) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Self::from_cols_array([
            1.0 - 2.0 * (yy + zz),
            2.0 * (xy + wz),
            2.0 * (xz - wy),
            0.0,
            2.0 * (xy - wz),
            1.0 - 2.0 * (xx + zz),
            2.0 * (yz + wx),
            0.0,
            2.0 * (xz + wy),
            2.0 * (yz - wx),
            1.0 - 2.0 * (xx + yy),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Transposed copy
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = [0.0f32; 16];
        for column in 0..4 {
            for row in 0..4 {
                out[row * 4 + column] = self.m[column * 4 + row];
            }
        }
        Self { m: out }
    }

    /// Transforms a point (w = 1)
    #[must_use]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.at(0, 0) * p.x + self.at(0, 1) * p.y + self.at(0, 2) * p.z + self.at(0, 3),
            self.at(1, 0) * p.x + self.at(1, 1) * p.y + self.at(1, 2) * p.z + self.at(1, 3),
            self.at(2, 0) * p.x + self.at(2, 1) * p.y + self.at(2, 2) * p.z + self.at(2, 3),
        )
    }

    /// Transforms a direction (w = 0, translation ignored)
    #[must_use]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.at(0, 0) * v.x + self.at(0, 1) * v.y + self.at(0, 2) * v.z,
            self.at(1, 0) * v.x + self.at(1, 1) * v.y + self.at(1, 2) * v.z,
            self.at(2, 0) * v.x + self.at(2, 1) * v.y + self.at(2, 2) * v.z,
        )
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Self;

    /// `a * b` applies `b` first, then `a`
    fn mul(self, rhs: Self) -> Self {
        let mut out = [0.0f32; 16];
        for column in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * rhs.at(k, column);
                }
                out[column * 4 + row] = sum;
            }
        }
        Self { m: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-5
    }

    #[test]
    fn test_identity_transform() {
        let p = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(Mat4::IDENTITY.transform_point(p), p);
    }

    #[test]
    fn test_translation_moves_points_not_vectors() {
        let t = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(t.transform_point(p), Vec3::new(11.0, 2.0, 3.0));
        assert_eq!(t.transform_vector(p), p);
    }

    #[test]
    fn test_scale() {
        let s = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(
            s.transform_point(Vec3::new(1.0, 1.0, 1.0)),
            Vec3::new(2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn test_multiply_applies_right_hand_side_first() {
        let translate = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let scale = Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0));
        // Scale first, then translate.
        let combined = translate * scale;
        assert_eq!(
            combined.transform_point(Vec3::new(1.0, 0.0, 0.0)),
            Vec3::new(7.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_from_quat_matches_quaternion_rotation() {
        let q = Quat::from_axis_angle(Vec3::Y, 0.9);
        let m = Mat4::from_quat(q);
        let v = Vec3::new(1.0, 2.0, -0.5);
        assert!(approx(m.transform_vector(v), q.rotate(v)));
    }

    #[test]
    fn test_transpose_involution() {
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.transpose().transpose(), t);
    }
}
