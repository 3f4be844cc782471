//! Linear interpolation of per-vertex attributes over an integer domain.
//!
//! The domain is a scanline coordinate (a row index for edges, a column index
//! within a span). Every attribute kind the rasterizer carries implements
//! [`Attribute`], so one routine covers screen X, depth, intensity, texture
//! coordinates and normals.

use std::ops::{Add, Div, Mul, Sub};

use crate::math::{Vec2, Vec3};

/// A value that can be linearly interpolated.
///
/// Interpolation happens in `Repr` (always floating point), then the result is
/// converted back. Integer attributes truncate toward zero on the way back.
pub trait Attribute: Copy {
    type Repr: Copy
        + Add<Output = Self::Repr>
        + Sub<Output = Self::Repr>
        + Mul<f32, Output = Self::Repr>
        + Div<f32, Output = Self::Repr>;

    fn to_repr(self) -> Self::Repr;
    fn from_repr(repr: Self::Repr) -> Self;
}

impl Attribute for i32 {
    type Repr = f32;

    #[inline]
    fn to_repr(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_repr(repr: f32) -> Self {
        repr as i32
    }
}

macro_rules! float_attribute {
    ($($ty:ty),*) => {
        $(
            impl Attribute for $ty {
                type Repr = $ty;

                #[inline]
                fn to_repr(self) -> $ty {
                    self
                }

                #[inline]
                fn from_repr(repr: $ty) -> Self {
                    repr
                }
            }
        )*
    };
}

float_attribute!(f32, Vec2, Vec3);

/// Samples the line through `(i0, v0)` and `(i1, v1)` at every integer in `i0..=i1`.
///
/// Yields exactly `i1 - i0 + 1` values. When `i0 == i1` the single value is
/// `v0`. An inverted range (`i1 < i0`) yields nothing.
pub fn interpolate<T: Attribute>(i0: i32, v0: T, i1: i32, v1: T) -> Vec<T> {
    if i0 == i1 {
        return vec![v0];
    }
    if i1 < i0 {
        return Vec::new();
    }

    let start = v0.to_repr();
    let slope = (v1.to_repr() - start) / (i1 - i0) as f32;

    (0..=(i1 - i0))
        .map(|step| T::from_repr(start + slope * step as f32))
        .collect()
}
