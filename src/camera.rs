//! Camera and clipping volume.
//!
//! # Coordinate System
//!
//! View space is **left-handed** with the eye at the origin:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! The projection plane sits at `z = 1`, so the visible volume is bounded by a
//! near plane and four planes through the origin.

use std::f32::consts::FRAC_PI_2;

use crate::math::{Mat3, Mat4, Vec3};

/// Plane `normal . p + distance = 0`. Points on the normal's side are inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub const fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Positive inside, negative outside, zero on the plane.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// The five view-space planes bounding the visible volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClippingPlanes {
    /// Near, left, right, top, bottom.
    pub planes: [Plane; 5],
}

impl ClippingPlanes {
    pub const NEAR: usize = 0;
    pub const LEFT: usize = 1;
    pub const RIGHT: usize = 2;
    pub const TOP: usize = 3;
    pub const BOTTOM: usize = 4;

    /// Symmetric frustum with the given full field of view and near distance.
    ///
    /// The side planes pass through the origin; their normals are the side
    /// directions rotated a quarter turn inward.
    pub fn from_fov(fov: f32, near: f32) -> Self {
        let half_fov = fov * 0.5;
        let cos_half = half_fov.cos();
        let sin_half = half_fov.sin();

        Self {
            planes: [
                Plane::new(Vec3::new(0.0, 0.0, 1.0), -near),
                Plane::new(Vec3::new(cos_half, 0.0, sin_half), 0.0),
                Plane::new(Vec3::new(-cos_half, 0.0, sin_half), 0.0),
                Plane::new(Vec3::new(0.0, -cos_half, sin_half), 0.0),
                Plane::new(Vec3::new(0.0, cos_half, sin_half), 0.0),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plane> {
        self.planes.iter()
    }
}

impl Default for ClippingPlanes {
    /// 90 degree field of view, near plane at `z = 1`.
    fn default() -> Self {
        Self::from_fov(FRAC_PI_2, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Mat3,
    pub clipping_planes: ClippingPlanes,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Mat3::IDENTITY)
    }
}

impl Camera {
    /// Camera with the default clipping planes.
    pub fn new(position: Vec3, rotation: Mat3) -> Self {
        Self {
            position,
            rotation,
            clipping_planes: ClippingPlanes::default(),
        }
    }

    /// World to view space: undo the camera translation, then its rotation.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::rotation(self.rotation).transpose() * Mat4::translation(-self.position)
    }
}
