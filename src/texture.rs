use std::path::Path;

use thiserror::Error;

use crate::colors::Color;
use crate::math::Vec2;

/// How texels are picked when sampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureFilter {
    #[default]
    Nearest,
    Bilinear,
    /// Needs mipmaps, which are not supported. Rejected by every constructor.
    Trilinear,
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load texture image")]
    Image(#[from] image::ImageError),
    #[error("texture has zero size ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} texels, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("{0:?} filtering is not supported")]
    UnsupportedFilter(TextureFilter),
}

/// Represents a 2D texture for texture mapping.
#[derive(Debug)]
pub struct Texture {
    data: Vec<u32>, // ARGB8888, top row first.
    width: u32,
    height: u32,
    filter: TextureFilter,
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG).
    pub fn from_file<P: AsRef<Path>>(path: P, filter: TextureFilter) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        // Convert RGBA bytes to ARGB u32
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        let texture = Self::from_pixels(width, height, data, filter)?;
        log::info!(
            "loaded texture {} ({}x{}, {:?})",
            path.display(),
            width,
            height,
            filter
        );
        Ok(texture)
    }

    /// Wraps an existing ARGB8888 pixel buffer, top row first.
    pub fn from_pixels(
        width: u32,
        height: u32,
        data: Vec<u32>,
        filter: TextureFilter,
    ) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        if filter == TextureFilter::Trilinear {
            return Err(TextureError::UnsupportedFilter(filter));
        }
        Ok(Self {
            data,
            width,
            height,
            filter,
        })
    }

    /// Texel at `(x, y)` with no filtering. Coordinates past the edge clamp to the last texel.
    #[inline]
    pub fn pixel_at(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        Color::from_argb(self.data[(y * self.width + x) as usize])
    }

    /// Samples at texture coordinates, clamped into `[0, 1]`.
    ///
    /// `(0, 0)` is the top-left texel.
    #[inline]
    pub fn sample(&self, uv: Vec2) -> Color {
        let u = uv.u().clamp(0.0, 1.0);
        let v = uv.v().clamp(0.0, 1.0);

        let tx = u * self.width as f32;
        let ty = v * self.height as f32;

        match self.filter {
            TextureFilter::Nearest => self.pixel_at(tx as u32, ty as u32),
            TextureFilter::Bilinear => {
                let fx = tx.fract();
                let fy = ty.fract();
                let x = tx.floor() as u32;
                let y = ty.floor() as u32;

                let top_left = self.pixel_at(x, y);
                let top_right = self.pixel_at(x + 1, y);
                let bottom_left = self.pixel_at(x, y + 1);
                let bottom_right = self.pixel_at(x + 1, y + 1);

                let top = top_right * fx + top_left * (1.0 - fx);
                let bottom = bottom_right * fx + bottom_left * (1.0 - fx);
                // Blending can overshoot 1.0 by an ulp.
                (bottom * fy + top * (1.0 - fy)).clamped()
            }
            // Constructors refuse trilinear textures.
            TextureFilter::Trilinear => Color::BLACK,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn filter(&self) -> TextureFilter {
        self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BLACK: u32 = 0xFF000000;
    const WHITE: u32 = 0xFFFFFFFF;

    fn checker(filter: TextureFilter) -> Texture {
        Texture::from_pixels(2, 2, vec![BLACK, WHITE, WHITE, BLACK], filter).unwrap()
    }

    #[test]
    fn nearest_picks_quadrants() {
        let tex = checker(TextureFilter::Nearest);
        assert_eq!(tex.sample(Vec2::new(0.1, 0.1)), Color::BLACK);
        assert_eq!(tex.sample(Vec2::new(0.9, 0.1)), Color::WHITE);
        assert_eq!(tex.sample(Vec2::new(0.1, 0.9)), Color::WHITE);
        // u = 1 lands past the last column and clamps back onto it.
        assert_eq!(tex.sample(Vec2::new(1.0, 1.0)), Color::BLACK);
    }

    #[test]
    fn out_of_range_uv_clamps() {
        let tex = checker(TextureFilter::Nearest);
        assert_eq!(tex.sample(Vec2::new(-3.0, -0.5)), Color::BLACK);
        assert_eq!(tex.sample(Vec2::new(7.0, -0.5)), Color::WHITE);
    }

    #[test]
    fn bilinear_blends_neighbours() {
        let tex = checker(TextureFilter::Bilinear);
        // Texel space (0.5, 0.5): equal weights over all four texels.
        let c = tex.sample(Vec2::new(0.25, 0.25));
        assert_relative_eq!(c.r, 0.5, epsilon = 1e-5);
        assert_relative_eq!(c.a, 1.0, epsilon = 1e-5);
        // Exactly on a texel corner: no blending.
        assert_eq!(tex.sample(Vec2::ZERO), Color::BLACK);
    }

    #[test]
    fn rejects_trilinear_and_bad_sizes() {
        assert!(matches!(
            Texture::from_pixels(1, 1, vec![WHITE], TextureFilter::Trilinear),
            Err(TextureError::UnsupportedFilter(TextureFilter::Trilinear))
        ));
        assert!(matches!(
            Texture::from_pixels(0, 4, vec![], TextureFilter::Nearest),
            Err(TextureError::Empty { .. })
        ));
        assert!(matches!(
            Texture::from_pixels(2, 2, vec![WHITE], TextureFilter::Nearest),
            Err(TextureError::SizeMismatch { expected: 4, actual: 1 })
        ));
    }
}
