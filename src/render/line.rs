//! Line and wireframe triangle drawing.

use crate::canvas::{Canvas, Point2};
use crate::colors::Color;

/// Draws a line from `p0` to `p1` inclusive using Bresenham's algorithm.
///
/// Integer-only: steps along the major axis every pixel and along the minor
/// axis whenever the accumulated error goes positive.
pub fn draw_line(canvas: &mut Canvas, p0: Point2, p1: Point2, color: Color) {
    let mut dx = (p1.x - p0.x).abs();
    let mut dy = (p1.y - p0.y).abs();

    let steep = dy > dx;
    if steep {
        std::mem::swap(&mut dx, &mut dy);
    }

    let sx = if p0.x < p1.x { 1 } else { -1 };
    let sy = if p0.y < p1.y { 1 } else { -1 };

    let mut err = 2 * dy - dx;
    let (mut x, mut y) = (p0.x, p0.y);

    for _ in 0..=dx {
        canvas.draw_pixel(Point2::new(x, y), color);

        while err > 0 {
            if steep {
                x += sx;
            } else {
                y += sy;
            }
            err -= 2 * dx;
        }

        if steep {
            y += sy;
        } else {
            x += sx;
        }
        err += 2 * dy;
    }
}

/// Outlines a triangle.
pub fn draw_wireframe_triangle(canvas: &mut Canvas, p0: Point2, p1: Point2, p2: Point2, color: Color) {
    draw_line(canvas, p0, p1, color);
    draw_line(canvas, p1, p2, color);
    draw_line(canvas, p2, p0, color);
}
