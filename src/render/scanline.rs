//! Scanline triangle filling.
//!
//! Every fill mode shares one routine. A [`Triangle`] says *what* to draw
//! through two tags:
//!
//! - [`Surface`]: a solid color or a texture with per-vertex coordinates.
//! - [`Shading`]: none, per-vertex intensities (flat and Gouraud), or
//!   per-vertex normals lit at every pixel (Phong).
//!
//! The [`FrameBuffer`] decides whether pixels are depth tested.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by Y, carrying their attributes along.
//! 2. **Classify edges**: the long edge `p0 -> p2` against the joined short
//!    edges `p0 -> p1 -> p2`, picking the left one at the middle row.
//! 3. **Interpolate attributes** down both sides with the same left/right
//!    assignment, then across each row between the two sides.
//! 4. **Resolve** each pixel: depth test, base color, intensity.
//!
//! ```text
//!          p2
//!          /\
//!         /  \
//!   long /    \ short (p1 -> p2)
//!       /      \
//!      /        p1
//!     /       /
//!    /    /  short (p0 -> p1)
//!   p0 /
//! ```
//!
//! # Depth and Perspective
//!
//! With a depth buffer, `1/z` is interpolated (it is linear in screen space)
//! and tested per pixel; only winning pixels are shaded. Texture coordinates
//! are interpolated as `uv/z` and divided by the interpolated `1/z`, which
//! undoes the perspective distortion. Without a depth buffer `1/z` is taken
//! as `1` everywhere, so texturing is affine and Phong shading unprojects
//! onto the `z = 1` plane.

use super::edges::{classify_edges, interpolate_edges, sort_by_y, EdgePair, LeftSide, ScreenVertex};
use super::framebuffer::FrameBuffer;
use super::interpolate::{interpolate, Attribute};
use crate::canvas::Point2;
use crate::colors::Color;
use crate::light::Lighting;
use crate::math::{Vec2, Vec3};
use crate::texture::Texture;

/// Where a pixel's base color comes from.
#[derive(Clone, Copy, Debug)]
pub enum Surface<'a> {
    Color(Color),
    Texture { texture: &'a Texture, uvs: [Vec2; 3] },
}

/// How a pixel's base color is lit.
#[derive(Clone, Copy, Debug)]
pub enum Shading<'a> {
    None,
    /// One intensity per vertex in `[0, 1]`, interpolated across the face.
    /// Flat shading passes the same value three times.
    Intensity([f32; 3]),
    /// View-space normals per vertex; lighting is evaluated at every pixel.
    Phong {
        normals: [Vec3; 3],
        lighting: &'a Lighting,
        specular: f32,
    },
}

/// A triangle in canvas coordinates, ready to fill.
#[derive(Clone, Copy, Debug)]
pub struct Triangle<'a> {
    pub points: [Point2; 3],
    /// View-space depth of each vertex. Only read when depth testing.
    pub depths: [f32; 3],
    pub surface: Surface<'a>,
    pub shading: Shading<'a>,
}

impl<'a> Triangle<'a> {
    /// Unshaded triangle at depth 1.
    pub fn new(points: [Point2; 3], surface: Surface<'a>) -> Self {
        Self {
            points,
            depths: [1.0; 3],
            surface,
            shading: Shading::None,
        }
    }

    pub fn with_depths(mut self, depths: [f32; 3]) -> Self {
        self.depths = depths;
        self
    }

    pub fn with_shading(mut self, shading: Shading<'a>) -> Self {
        self.shading = shading;
        self
    }
}

/// Per-vertex attributes that travel through the sort.
#[derive(Clone, Copy, Debug)]
struct VertexAttrs {
    inv_z: f32,
    /// Texture coordinates pre-multiplied by `inv_z`.
    uv: Vec2,
    intensity: f32,
    normal: Vec3,
}

fn attribute_edges<T: Attribute>(
    vertices: &[ScreenVertex<VertexAttrs>; 3],
    side: LeftSide,
    select: impl Fn(&VertexAttrs) -> T,
) -> EdgePair<T> {
    interpolate_edges(
        vertices.map(|v| v.point),
        [
            select(&vertices[0].attrs),
            select(&vertices[1].attrs),
            select(&vertices[2].attrs),
        ],
        side,
    )
}

/// Values of one attribute across a row, from `xl` to `xr`.
#[inline]
fn row_values<T: Attribute>(edges: &Option<EdgePair<T>>, row: usize, xl: i32, xr: i32) -> Vec<T> {
    match edges {
        Some(edges) => {
            let (left, right) = edges.span(row);
            interpolate(xl, left, xr, right)
        }
        None => Vec::new(),
    }
}

/// Fills `triangle` into `buffer`.
///
/// Pixels outside the buffer are skipped. With a depth buffer attached, a
/// pixel is only shaded and written when it is strictly nearer than what is
/// already stored.
pub fn fill_triangle(buffer: &mut FrameBuffer, triangle: &Triangle) {
    let depth_tested = buffer.is_depth_tested();

    let (textured, uvs) = match triangle.surface {
        Surface::Texture { uvs, .. } => (true, uvs),
        Surface::Color(_) => (false, [Vec2::ZERO; 3]),
    };
    let (intensities, normals) = match triangle.shading {
        Shading::None => ([1.0; 3], [Vec3::ZERO; 3]),
        Shading::Intensity(intensities) => {
            debug_assert!(
                intensities.iter().all(|i| (0.0..=1.0).contains(i)),
                "vertex intensities must lie in [0, 1]: {intensities:?}"
            );
            (intensities, [Vec3::ZERO; 3])
        }
        Shading::Phong { normals, .. } => ([1.0; 3], normals),
    };

    let mut vertices: [ScreenVertex<VertexAttrs>; 3] = std::array::from_fn(|i| {
        let inv_z = if depth_tested {
            1.0 / triangle.depths[i]
        } else {
            1.0
        };
        ScreenVertex {
            point: triangle.points[i],
            attrs: VertexAttrs {
                inv_z,
                uv: uvs[i] * inv_z,
                intensity: intensities[i],
                normal: normals[i],
            },
        }
    });
    sort_by_y(&mut vertices);

    let [p0, p1, p2] = vertices.map(|v| v.point);
    let (xs, side) = classify_edges(p0, p1, p2);

    let z_edges = depth_tested.then(|| attribute_edges(&vertices, side, |a| a.inv_z));
    let uv_edges = textured.then(|| attribute_edges(&vertices, side, |a| a.uv));
    let intensity_edges = matches!(triangle.shading, Shading::Intensity(_))
        .then(|| attribute_edges(&vertices, side, |a| a.intensity));
    let normal_edges = matches!(triangle.shading, Shading::Phong { .. })
        .then(|| attribute_edges(&vertices, side, |a| a.normal));

    for y in p0.y..=p2.y {
        let row = (y - p0.y) as usize;
        let (xl, xr) = xs.span(row);

        let row_zs = row_values(&z_edges, row, xl, xr);
        let row_uvs = row_values(&uv_edges, row, xl, xr);
        let row_intensities = row_values(&intensity_edges, row, xl, xr);
        let row_normals = row_values(&normal_edges, row, xl, xr);

        for x in xl..=xr {
            let k = (x - xl) as usize;
            let point = Point2::new(x, y);
            let inv_z = if depth_tested { row_zs[k] } else { 1.0 };

            if !buffer.depth_test(point, inv_z) {
                continue;
            }

            let base = match triangle.surface {
                Surface::Color(color) => color,
                Surface::Texture { texture, .. } => texture.sample(row_uvs[k] / inv_z),
            };

            let color = match triangle.shading {
                Shading::None => base,
                Shading::Intensity(_) => base.scaled(row_intensities[k].clamp(0.0, 1.0)),
                Shading::Phong {
                    lighting, specular, ..
                } => {
                    let vertex = buffer.unproject(point, inv_z);
                    let intensity = lighting.intensity(vertex, row_normals[k], specular);
                    base.scaled(intensity.clamp(0.0, 1.0))
                }
            };

            buffer.set_pixel(point, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::canvas::Canvas;
    use crate::light::{Light, LightModel};
    use crate::render::depth_buffer::DepthBuffer;
    use crate::render::line::draw_wireframe_triangle;
    use crate::texture::TextureFilter;
    use approx::assert_relative_eq;

    fn fill(canvas: &mut Canvas, triangle: &Triangle) {
        fill_triangle(&mut FrameBuffer::new(canvas), triangle);
    }

    #[test]
    fn green_triangle_with_black_outline() {
        let mut canvas = Canvas::new(1024, 1024);
        canvas.clear(Color::WHITE);
        let points = [Point2::new(-200, -250), Point2::new(200, 50), Point2::new(20, 250)];

        fill(&mut canvas, &Triangle::new(points, Surface::Color(Color::BRIGHT_GREEN)));
        draw_wireframe_triangle(&mut canvas, points[0], points[1], points[2], Color::BLACK);

        assert_eq!(canvas.pixel(Point2::new(0, 0)), Some(Color::BRIGHT_GREEN));
        assert_eq!(canvas.pixel(Point2::new(-500, -500)), Some(Color::WHITE));
        assert_eq!(canvas.pixel(Point2::new(-200, -250)), Some(Color::BLACK));
        assert_eq!(canvas.pixel(Point2::new(-900, 900)), None);
    }

    #[test]
    fn vertex_order_does_not_matter() {
        let points = [Point2::new(-30, -20), Point2::new(40, 5), Point2::new(-5, 35)];
        let orders = [[0, 1, 2], [2, 1, 0], [1, 0, 2], [2, 0, 1]];
        let mut reference: Option<Vec<u32>> = None;
        for order in orders {
            let mut canvas = Canvas::new(128, 128);
            let ordered = order.map(|i| points[i]);
            fill(&mut canvas, &Triangle::new(ordered, Surface::Color(Color::WHITE)));
            match &reference {
                Some(pixels) => assert_eq!(pixels.as_slice(), canvas.pixels()),
                None => reference = Some(canvas.pixels().to_vec()),
            }
        }
    }

    #[test]
    fn partially_off_canvas_triangle_does_not_panic() {
        let mut canvas = Canvas::new(64, 64);
        let points = [Point2::new(-500, -500), Point2::new(500, -10), Point2::new(0, 400)];
        fill(&mut canvas, &Triangle::new(points, Surface::Color(Color::BRIGHT_RED)));
        assert_eq!(canvas.pixel(Point2::new(0, 0)), Some(Color::BRIGHT_RED));
    }

    #[test]
    fn gouraud_brightness_falls_away_from_bright_vertex() {
        let mut canvas = Canvas::new(512, 512);
        let points = [Point2::new(-100, -100), Point2::new(100, -100), Point2::new(0, 100)];
        let triangle = Triangle::new(points, Surface::Color(Color::GRAY))
            .with_shading(Shading::Intensity([1.0, 0.2, 0.2]));
        fill(&mut canvas, &triangle);

        let red = |x, y| canvas.pixel(Point2::new(x, y)).map(|c| c.r).unwrap_or(0.0);

        // Along the bottom edge, away from (-100, -100).
        let bottom: Vec<f32> = (-100..=100).step_by(10).map(|x| red(x, -100)).collect();
        assert!(bottom.windows(2).all(|w| w[0] >= w[1]), "{bottom:?}");
        assert!(bottom[0] > *bottom.last().unwrap());
        assert_relative_eq!(bottom[0], 0.5, epsilon = 1.0 / 255.0);

        // Along the left edge, using the leftmost lit pixel of each row.
        let left_edge: Vec<f32> = (-100..100)
            .step_by(10)
            .map(|y| {
                (-100..=100)
                    .map(|x| red(x, y))
                    .find(|&r| r > 0.0)
                    .unwrap_or(0.0)
            })
            .collect();
        assert!(left_edge.windows(2).all(|w| w[0] >= w[1]), "{left_edge:?}");
        assert!(left_edge[0] > *left_edge.last().unwrap());
    }

    #[test]
    fn gouraud_fill_toward_a_black_vertex_stays_in_range() {
        let mut canvas = Canvas::new(512, 512);
        let points = [Point2::new(0, 0), Point2::new(87, 0), Point2::new(0, 87)];
        let triangle = Triangle::new(points, Surface::Color(Color::WHITE))
            .with_shading(Shading::Intensity([0.003, 0.0, 0.0]));
        fill(&mut canvas, &triangle);
        assert_eq!(canvas.pixel(Point2::new(80, 2)), Some(Color::BLACK));
    }

    #[test]
    fn nearer_triangle_wins_in_either_order() {
        let points = [Point2::new(-50, -50), Point2::new(50, -50), Point2::new(0, 50)];
        let near = Triangle::new(points, Surface::Color(Color::BRIGHT_GREEN)).with_depths([5.0; 3]);
        let far = Triangle::new(points, Surface::Color(Color::BRIGHT_RED)).with_depths([10.0; 3]);

        for pair in [[near, far], [far, near]] {
            let mut canvas = Canvas::new(128, 128);
            let mut depth = DepthBuffer::new(128, 128);
            let mut fb = FrameBuffer::with_depth(&mut canvas, &mut depth);
            for triangle in &pair {
                fill_triangle(&mut fb, triangle);
            }
            assert_eq!(canvas.pixel(Point2::new(0, 0)), Some(Color::BRIGHT_GREEN));
            assert_relative_eq!(depth.get(Point2::new(0, 0)).unwrap(), 0.2);
        }
    }

    #[test]
    fn equal_depth_keeps_first_triangle() {
        let points = [Point2::new(-20, -20), Point2::new(20, -20), Point2::new(0, 20)];
        let mut canvas = Canvas::new(64, 64);
        let mut depth = DepthBuffer::new(64, 64);
        let mut fb = FrameBuffer::with_depth(&mut canvas, &mut depth);
        fill_triangle(&mut fb, &Triangle::new(points, Surface::Color(Color::CYAN)).with_depths([3.0; 3]));
        fill_triangle(&mut fb, &Triangle::new(points, Surface::Color(Color::PURPLE)).with_depths([3.0; 3]));
        assert_eq!(canvas.pixel(Point2::new(0, 0)), Some(Color::CYAN));
    }

    fn split_texture() -> Texture {
        // Left column black, right column white.
        Texture::from_pixels(2, 1, vec![0xFF000000, 0xFFFFFFFF], TextureFilter::Nearest).unwrap()
    }

    #[test]
    fn textured_fill_samples_interpolated_uvs() {
        let texture = split_texture();
        let mut canvas = Canvas::new(256, 256);
        let points = [Point2::new(-100, -100), Point2::new(100, -100), Point2::new(100, 100)];
        let surface = Surface::Texture {
            texture: &texture,
            uvs: [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
        };
        fill(&mut canvas, &Triangle::new(points, surface));
        assert_eq!(canvas.pixel(Point2::new(-80, -95)), Some(Color::BLACK));
        assert_eq!(canvas.pixel(Point2::new(80, -95)), Some(Color::WHITE));
    }

    #[test]
    fn perspective_correct_texturing_shifts_the_midpoint() {
        // The right edge is four times farther away. Affine mapping would put
        // u = 0.5 at the screen midpoint; perspective-correct mapping puts it
        // much closer to the far (right) edge.
        let texture = split_texture();
        let points = [Point2::new(-100, -100), Point2::new(100, -100), Point2::new(100, 100)];
        let surface = Surface::Texture {
            texture: &texture,
            uvs: [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
        };
        let triangle = Triangle::new(points, surface).with_depths([1.0, 4.0, 4.0]);

        let mut canvas = Canvas::new(256, 256);
        let mut depth = DepthBuffer::new(256, 256);
        fill_triangle(&mut FrameBuffer::with_depth(&mut canvas, &mut depth), &triangle);
        assert_eq!(canvas.pixel(Point2::new(10, -100)), Some(Color::BLACK));

        let mut affine = Canvas::new(256, 256);
        fill(&mut affine, &triangle);
        assert_eq!(affine.pixel(Point2::new(10, -100)), Some(Color::WHITE));
    }

    #[test]
    fn textured_fill_is_scaled_by_vertex_intensity() {
        let texel = 0xFF80C040;
        let texture = Texture::from_pixels(1, 1, vec![texel], TextureFilter::Nearest).unwrap();
        let points = [Point2::new(-40, -40), Point2::new(40, -40), Point2::new(0, 40)];
        let surface = Surface::Texture {
            texture: &texture,
            uvs: [Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(0.5, 0.0)],
        };
        let triangle = Triangle::new(points, surface)
            .with_depths([3.0; 3])
            .with_shading(Shading::Intensity([0.5; 3]));

        let mut canvas = Canvas::new(128, 128);
        let mut depth = DepthBuffer::new(128, 128);
        fill_triangle(&mut FrameBuffer::with_depth(&mut canvas, &mut depth), &triangle);
        let expected = Color::from_argb(Color::from_argb(texel).scaled(0.5).to_argb());
        assert_eq!(canvas.pixel(Point2::new(0, 0)), Some(expected));
        assert_eq!(canvas.pixel(Point2::new(-30, -35)), Some(expected));
    }

    #[test]
    fn textured_phong_scales_texel_by_lighting() {
        let texel = 0xFF80C040;
        let texture = Texture::from_pixels(1, 1, vec![texel], TextureFilter::Nearest).unwrap();
        let camera = Camera::default();
        let lighting = Lighting::new(LightModel::DIFFUSE, &[Light::Ambient { intensity: 0.4 }], &camera);
        let points = [Point2::new(-40, -40), Point2::new(40, -40), Point2::new(0, 40)];
        let surface = Surface::Texture {
            texture: &texture,
            uvs: [Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(0.5, 0.0)],
        };
        let triangle = Triangle::new(points, surface)
            .with_depths([2.0; 3])
            .with_shading(Shading::Phong {
                normals: [-Vec3::FORWARD; 3],
                lighting: &lighting,
                specular: 0.0,
            });

        let mut canvas = Canvas::new(128, 128);
        let mut depth = DepthBuffer::new(128, 128);
        fill_triangle(&mut FrameBuffer::with_depth(&mut canvas, &mut depth), &triangle);
        let expected = Color::from_argb(Color::from_argb(texel).scaled(0.4).to_argb());
        assert_eq!(canvas.pixel(Point2::new(0, 0)), Some(expected));
    }

    #[test]
    fn phong_with_ambient_light_is_uniform() {
        let camera = Camera::default();
        let lighting = Lighting::new(LightModel::DIFFUSE, &[Light::Ambient { intensity: 0.4 }], &camera);
        let points = [Point2::new(-40, -40), Point2::new(40, -40), Point2::new(0, 40)];
        let triangle = Triangle::new(points, Surface::Color(Color::WHITE))
            .with_depths([2.0; 3])
            .with_shading(Shading::Phong {
                normals: [-Vec3::FORWARD; 3],
                lighting: &lighting,
                specular: 0.0,
            });

        let mut canvas = Canvas::new(128, 128);
        let mut depth = DepthBuffer::new(128, 128);
        fill_triangle(&mut FrameBuffer::with_depth(&mut canvas, &mut depth), &triangle);
        let expected = Color::from_argb(Color::WHITE.scaled(0.4).to_argb());
        assert_eq!(canvas.pixel(Point2::new(0, 0)), Some(expected));
        assert_eq!(canvas.pixel(Point2::new(-30, -35)), Some(expected));
    }

    #[test]
    fn phong_point_light_is_brightest_below_it() {
        // A point light just in front of the triangle's center.
        let camera = Camera::default();
        let lights = [Light::Point {
            position: Vec3::new(0.0, 0.0, 1.0),
            intensity: 1.0,
        }];
        let lighting = Lighting::new(LightModel::DIFFUSE, &lights, &camera);
        let points = [Point2::new(-60, -60), Point2::new(60, -60), Point2::new(0, 60)];
        let triangle = Triangle::new(points, Surface::Color(Color::WHITE))
            .with_depths([2.0; 3])
            .with_shading(Shading::Phong {
                normals: [-Vec3::FORWARD; 3],
                lighting: &lighting,
                specular: 0.0,
            });

        let mut canvas = Canvas::new(256, 256);
        let mut depth = DepthBuffer::new(256, 256);
        fill_triangle(&mut FrameBuffer::with_depth(&mut canvas, &mut depth), &triangle);
        let center = canvas.pixel(Point2::new(0, 0)).map(|c| c.r).unwrap_or(0.0);
        let corner = canvas.pixel(Point2::new(-50, -55)).map(|c| c.r).unwrap_or(0.0);
        assert!(center > corner, "center {center} corner {corner}");
    }
}
