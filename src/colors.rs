//! Color representation and packing.
//!
//! Rendering math works on [`Color`] (float RGBA in `[0, 1]`). Pixel storage
//! uses packed ARGB8888 `u32` values, the same layout the canvas and textures
//! keep in memory.

use std::ops::{Add, Mul};

/// Float RGBA color. Channels are expected in `[0, 1]` when stored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const BRIGHT_RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BRIGHT_GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BRIGHT_BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const BRIGHT_YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const PURPLE: Color = Color::rgb(0.5, 0.0, 0.5);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Scales the RGB channels by `intensity`, leaving alpha untouched.
    #[inline]
    pub fn scaled(self, intensity: f32) -> Self {
        Self::new(
            self.r * intensity,
            self.g * intensity,
            self.b * intensity,
            self.a,
        )
    }

    /// Every channel clamped into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// True when every channel lies in `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// Packs into ARGB8888.
    #[inline]
    pub fn to_argb(self) -> u32 {
        debug_assert!(self.is_normalized(), "color out of range: {self:?}");
        pack_color(self.r, self.g, self.b, self.a)
    }

    /// Unpacks an ARGB8888 value.
    #[inline]
    pub fn from_argb(argb: u32) -> Self {
        let (r, g, b) = unpack_color(argb);
        let a = ((argb >> 24) & 0xFF) as f32 / 255.0;
        Self::new(r, g, b, a)
    }
}

/// Component-wise sum, used when blending texels.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Self::Output {
        Color::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

/// Scales every channel, alpha included. Use [`Color::scaled`] for lighting.
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Self::Output {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

/// Packs float channels in `[0, 1]` into ARGB8888. Values are truncated, not rounded.
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> u32 {
    let a = (a * 255.0) as u32;
    let r = (r * 255.0) as u32;
    let g = (g * 255.0) as u32;
    let b = (b * 255.0) as u32;
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Unpacks the RGB channels of an ARGB8888 value into `[0, 1]` floats.
#[inline]
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    (r, g, b)
}
