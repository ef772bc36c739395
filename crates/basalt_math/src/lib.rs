//! # Basalt Math
//!
//! Linear algebra and geometry for the Basalt engine, as plain `Copy`
//! value types:
//! - Vectors, column-major matrices and quaternions
//! - Planes, bounding volumes and segments
//!
//! ## Architecture Rules
//!
//! 1. **Value types only** - everything is `Copy`, `Pod` and `repr(C)`,
//!    safe to memcpy into GPU or disk layouts
//! 2. **No hidden state** - no caches, no lazy normalization; callers own
//!    the invariants the docs state
//! 3. **No numerical heroics** - culling-grade predicates, not a solver

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bounds;
pub mod matrix;
pub mod plane;
pub mod quaternion;
pub mod segment;
pub mod vector;

pub use bounds::{Aabb, BoundingSphere};
pub use matrix::Mat4;
pub use plane::{Plane, Side};
pub use quaternion::Quat;
pub use segment::Segment;
pub use vector::{Vec2, Vec3, Vec4};

/// Tolerance used by geometric predicates and normalization guards.
pub const EPSILON: f32 = 1e-6;
