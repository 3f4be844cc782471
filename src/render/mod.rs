//! Pixel-level drawing: lines, rectangles and scanline triangle fills.
//!
//! Everything here works in canvas coordinates. The mesh pipeline in
//! [`crate::engine`] feeds it projected triangles.

pub mod depth_buffer;
pub mod edges;
pub mod framebuffer;
pub mod interpolate;
pub mod line;
pub mod rect;
pub mod scanline;

pub use depth_buffer::DepthBuffer;
pub use framebuffer::FrameBuffer;
pub use interpolate::{interpolate, Attribute};
pub use line::{draw_line, draw_wireframe_triangle};
pub use rect::{draw_filled_rect, draw_shaded_rect, draw_wireframe_rect, CornerIntensities, Rect};
pub use scanline::{fill_triangle, Shading, Surface, Triangle};
