//! Frame buffer abstraction bundling the render targets of one draw.
//!
//! Provides a borrowed view over the canvas and, optionally, a depth buffer.
//! Whether a depth buffer is attached decides whether fills are depth tested.

use super::depth_buffer::DepthBuffer;
use crate::canvas::{Canvas, Point2};
use crate::colors::Color;
use crate::math::Vec3;

/// A view into the color and (optional) depth targets.
///
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass both targets together.
///
/// # Depth Buffer
///
/// The depth buffer stores 1/z values for each pixel. Using 1/z instead of z
/// because it can be linearly interpolated in screen space. Larger values are
/// closer to the camera.
pub struct FrameBuffer<'a> {
    canvas: &'a mut Canvas,
    depth: Option<&'a mut DepthBuffer>,
}

impl<'a> FrameBuffer<'a> {
    /// Color-only target: every covered pixel is written.
    pub fn new(canvas: &'a mut Canvas) -> Self {
        Self {
            canvas,
            depth: None,
        }
    }

    /// Depth-tested target.
    pub fn with_depth(canvas: &'a mut Canvas, depth: &'a mut DepthBuffer) -> Self {
        debug_assert_eq!(
            (canvas.width(), canvas.height()),
            (depth.width(), depth.height()),
            "Depth buffer size doesn't match canvas"
        );
        Self {
            canvas,
            depth: Some(depth),
        }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn is_depth_tested(&self) -> bool {
        self.depth.is_some()
    }

    /// Runs the depth test for `point` at `inv_z`, storing it on success.
    ///
    /// Always passes when no depth buffer is attached.
    #[inline]
    pub fn depth_test(&mut self, point: Point2, inv_z: f32) -> bool {
        match self.depth.as_deref_mut() {
            Some(depth) => depth.test_and_set(point, inv_z),
            None => true,
        }
    }

    /// Set a pixel without depth testing. Out-of-bounds points are ignored.
    #[inline]
    pub fn set_pixel(&mut self, point: Point2, color: Color) {
        self.canvas.draw_pixel(point, color);
    }

    /// View-space position of a screen point with the given `1/z`.
    #[inline]
    pub fn unproject(&self, point: Point2, inv_z: f32) -> Vec3 {
        self.canvas.unproject_vertex(point, inv_z)
    }

    pub fn canvas(&self) -> &Canvas {
        self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}
