//! Pixel sink with a centered coordinate system.
//!
//! Points are addressed with the origin at the middle of the image, X growing
//! right and Y growing up. Both `x` and `y` span `[-n/2, n/2)`.
//! Storage is row-major ARGB8888 with the first row at the top.

use std::path::Path;

use image::{ImageResult, RgbaImage};

use crate::colors::{unpack_color, Color};
use crate::math::{Vec2, Vec3};

/// Integer point in canvas (centered) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Owned color buffer addressed in centered coordinates.
pub struct Canvas {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Creates a canvas cleared to black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_clear_color(width, height, Color::BLACK)
    }

    pub fn with_clear_color(width: u32, height: u32, clear_color: Color) -> Self {
        debug_assert!(width > 0 && height > 0, "canvas dimensions must be non-zero");
        Self {
            pixels: vec![clear_color.to_argb(); (width * height) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw ARGB8888 pixels, top row first.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Maps a centered point to a storage index, or `None` when off-canvas.
    #[inline]
    fn index_of(&self, point: Point2) -> Option<usize> {
        let x = (self.width / 2) as i32 + point.x;
        let y = (self.height / 2) as i32 - point.y - 1;
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some(x as usize + y as usize * self.width as usize)
    }

    /// Writes one pixel. Points outside the canvas are silently dropped.
    #[inline]
    pub fn draw_pixel(&mut self, point: Point2, color: Color) {
        if let Some(idx) = self.index_of(point) {
            self.pixels[idx] = color.to_argb();
        }
    }

    /// Reads one pixel back, or `None` when off-canvas.
    pub fn pixel(&self, point: Point2) -> Option<Color> {
        self.index_of(point).map(|idx| Color::from_argb(self.pixels[idx]))
    }

    /// Fills the whole canvas with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    /// Canvas point to a direction on the projection plane at `z = 1`.
    pub fn to_viewport(&self, point: Point2) -> Vec3 {
        Vec3::new(
            point.x as f32 / self.width as f32,
            point.y as f32 / self.height as f32,
            1.0,
        )
    }

    /// Viewport coordinates back to a canvas point. Truncates toward zero.
    pub fn viewport_to_canvas(&self, viewport: Vec2) -> Point2 {
        Point2::new(
            (viewport.x * self.width as f32) as i32,
            (viewport.y * self.height as f32) as i32,
        )
    }

    /// Perspective divide onto the `z = 1` plane, then viewport to canvas.
    #[inline]
    pub fn project_vertex(&self, v: Vec3) -> Point2 {
        self.viewport_to_canvas(Vec2::new(v.x / v.z, v.y / v.z))
    }

    /// Inverse of [`project_vertex`](Self::project_vertex) given the point's `1/z`.
    #[inline]
    pub fn unproject_vertex(&self, point: Point2, inv_z: f32) -> Vec3 {
        let z = 1.0 / inv_z;
        Vec3::new(
            point.x as f32 * z / self.width as f32,
            point.y as f32 * z / self.height as f32,
            z,
        )
    }

    /// Writes the canvas as an RGBA PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let path = path.as_ref();
        let image = RgbaImage::from_fn(self.width, self.height, |x, y| {
            let argb = self.pixels[(y * self.width + x) as usize];
            let (r, g, b) = unpack_color(argb);
            image::Rgba([
                (r * 255.0) as u8,
                (g * 255.0) as u8,
                (b * 255.0) as u8,
                (argb >> 24) as u8,
            ])
        });
        image.save(path)?;
        log::info!("saved {}x{} canvas to {}", self.width, self.height, path.display());
        Ok(())
    }
}
