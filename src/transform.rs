//! Transform component for mesh instances.
//!
//! Provides a [`Transform`] struct with a fluent API for managing translation,
//! rotation (a 3x3 matrix) and uniform scale.

use crate::math::{Mat3, Mat4, Vec3};

/// A 3D transform with translation, rotation and uniform scale.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_translation_xyz(5.0, 2.0, 0.0)
///     .rotate(Mat3::rotation_y(0.1))
///     .set_scale(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    translation: Vec3,
    rotation: Mat3,
    scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Mat3::IDENTITY,
            scale: 1.0,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (translation=0, rotation=identity, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform placed at `translation` with no rotation or scaling.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    // ============ Translation ============

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Vec3) -> &mut Self {
        self.translation = translation;
        self
    }

    pub fn set_translation_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.translation = Vec3::new(x, y, z);
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.translation = self.translation + delta;
        self
    }

    // ============ Rotation ============

    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Mat3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Applies `delta` after the current rotation.
    pub fn rotate(&mut self, delta: Mat3) -> &mut Self {
        self.rotation = delta * self.rotation;
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the uniform scale factor. Must be positive.
    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        debug_assert!(scale > 0.0, "scale must be positive");
        self.scale = scale;
        self
    }

    // ============ Matrix ============

    /// Model matrix: scale first, then rotate, then translate (`T * R * S`).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.translation) * Mat4::rotation(self.rotation) * Mat4::scaling(self.scale)
    }
}
