//! Axis-aligned rectangle drawing.

use super::line::draw_line;
use crate::canvas::{Canvas, Point2};
use crate::colors::Color;

/// Four rectangle corners in canvas coordinates (Y up).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub top_left: Point2,
    pub bottom_left: Point2,
    pub top_right: Point2,
    pub bottom_right: Point2,
}

impl Rect {
    /// Axis-aligned rectangle spanning `bottom_left` to `top_right` inclusive.
    pub fn new(bottom_left: Point2, top_right: Point2) -> Self {
        Self {
            top_left: Point2::new(bottom_left.x, top_right.y),
            bottom_left,
            top_right,
            bottom_right: Point2::new(top_right.x, bottom_left.y),
        }
    }

    /// Bottoms below tops and lefts left of rights.
    pub fn is_well_ordered(&self) -> bool {
        self.bottom_left.y < self.top_left.y
            && self.bottom_right.y < self.top_right.y
            && self.top_left.x < self.top_right.x
            && self.bottom_left.x < self.bottom_right.x
    }
}

/// Per-corner intensities for [`draw_shaded_rect`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerIntensities {
    pub top_left: f32,
    pub bottom_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn draw_wireframe_rect(canvas: &mut Canvas, rect: &Rect, color: Color) {
    draw_line(canvas, rect.bottom_left, rect.top_left, color);
    draw_line(canvas, rect.top_left, rect.top_right, color);
    draw_line(canvas, rect.top_right, rect.bottom_right, color);
    draw_line(canvas, rect.bottom_right, rect.bottom_left, color);
}

/// Fills the rows from the bottom-left to the top-left corner, each spanning
/// the bottom edge's columns.
pub fn draw_filled_rect(canvas: &mut Canvas, rect: &Rect, color: Color) {
    debug_assert!(rect.is_well_ordered(), "malformed rect {rect:?}");

    for y in rect.bottom_left.y..=rect.top_left.y {
        for x in rect.bottom_left.x..=rect.bottom_right.x {
            canvas.draw_pixel(Point2::new(x, y), color);
        }
    }
}

/// Fills a rectangle with bilinearly interpolated corner intensities.
pub fn draw_shaded_rect(canvas: &mut Canvas, rect: &Rect, intensities: CornerIntensities, color: Color) {
    debug_assert!(rect.is_well_ordered(), "malformed rect {rect:?}");
    debug_assert!(
        [
            intensities.top_left,
            intensities.bottom_left,
            intensities.top_right,
            intensities.bottom_right
        ]
        .iter()
        .all(|i| (0.0..=1.0).contains(i)),
        "intensities must lie in [0, 1]"
    );

    let height = (rect.top_left.y - rect.bottom_left.y) as f32;
    let width = (rect.bottom_right.x - rect.bottom_left.x) as f32;

    for y in rect.bottom_left.y..=rect.top_left.y {
        let delta_y = (rect.top_left.y - y) as f32 / height;

        for x in rect.bottom_left.x..=rect.bottom_right.x {
            let delta_x = (rect.bottom_right.x - x) as f32 / width;

            let top = lerp(intensities.top_right, intensities.top_left, delta_x);
            let bottom = lerp(intensities.bottom_right, intensities.bottom_left, delta_x);
            let intensity = lerp(top, bottom, delta_y).clamp(0.0, 1.0);

            canvas.draw_pixel(Point2::new(x, y), color.scaled(intensity));
        }
    }
}
