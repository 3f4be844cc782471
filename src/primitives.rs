//! Procedural meshes for demos, tests and benchmarks.

use std::f32::consts::TAU;
use std::sync::Arc;

use crate::colors::Color;
use crate::math::{Vec2, Vec3};
use crate::mesh::{BoundingSphere, Face, Mesh};
use crate::texture::Texture;

/// Side colors of [`cube`]: front, right, back, left, top, bottom.
pub const CUBE_SIDE_COLORS: [Color; 6] = [
    Color::BRIGHT_RED,
    Color::BRIGHT_GREEN,
    Color::BRIGHT_BLUE,
    Color::BRIGHT_YELLOW,
    Color::PURPLE,
    Color::CYAN,
];

/// Specular exponent shared by the procedural meshes.
const DEMO_SPECULAR: f32 = 50.0;

/// Axis-aligned cube spanning `[-1, 1]` on every axis, two faces per side.
///
/// Faces wind so that the computed normal points out of the cube. When a
/// texture is given, each side maps the whole texture.
pub fn cube(side_colors: [Color; 6], texture: Option<Arc<Texture>>) -> Mesh {
    let vertices = vec![
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
    ];
    let normals = vec![
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
    ];
    let tex_coords = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
    ];

    // (vertex indices, texture coordinate indices) per triangle, two per side.
    const TRIANGLES: [([usize; 3], [usize; 3]); 12] = [
        ([0, 1, 2], [0, 2, 3]),
        ([0, 2, 3], [0, 3, 1]),
        ([4, 0, 3], [0, 2, 3]),
        ([4, 3, 7], [0, 3, 1]),
        ([5, 4, 7], [0, 2, 3]),
        ([5, 7, 6], [0, 3, 1]),
        ([1, 5, 6], [0, 2, 3]),
        ([1, 6, 2], [0, 3, 1]),
        ([4, 5, 1], [0, 2, 3]),
        ([4, 1, 0], [1, 3, 0]),
        ([2, 6, 7], [0, 2, 3]),
        ([2, 7, 3], [0, 3, 1]),
    ];

    let faces = TRIANGLES
        .iter()
        .enumerate()
        .map(|(i, &(verts, uvs))| {
            let side = i / 2;
            let face = Face::new(verts, [side; 3], side_colors[side]).with_specular(DEMO_SPECULAR);
            match &texture {
                Some(texture) => face.with_texture(Arc::clone(texture), uvs),
                None => face,
            }
        })
        .collect();

    Mesh {
        vertices,
        normals,
        tex_coords,
        faces,
        bounding_sphere: BoundingSphere {
            center: Vec3::ZERO,
            radius: 3.0f32.sqrt(),
        },
    }
}

/// Unit sphere built from `divisions` latitude bands and `divisions` longitude
/// steps. Vertex normals equal vertex positions.
pub fn sphere(divisions: u32, color: Color) -> Mesh {
    debug_assert!(divisions >= 2, "a sphere needs at least two divisions");
    let n = divisions as usize;
    let f_divisions = divisions as f32;
    let delta_angle = TAU / f_divisions;

    let mut vertices = Vec::with_capacity((n + 1) * n);
    for d in 0..=n {
        let y = (2.0 / f_divisions) * (d as f32 - f_divisions / 2.0);
        let radius = (1.0 - y * y).max(0.0).sqrt();
        for i in 0..n {
            let angle = i as f32 * delta_angle;
            vertices.push(Vec3::new(radius * angle.cos(), y, radius * angle.sin()));
        }
    }

    let mut faces = Vec::with_capacity(2 * n * n);
    for d in 0..n {
        for i in 0..n {
            let i0 = d * n + i;
            let i1 = (d + 1) * n + (i + 1) % n;
            let i2 = d * n + (i + 1) % n;
            let i3 = i0 + n;
            faces.push(Face::new([i0, i1, i2], [i0, i1, i2], color).with_specular(DEMO_SPECULAR));
            faces.push(Face::new([i0, i3, i1], [i0, i3, i1], color).with_specular(DEMO_SPECULAR));
        }
    }

    Mesh {
        normals: vertices.clone(),
        vertices,
        tex_coords: Vec::new(),
        faces,
        bounding_sphere: BoundingSphere {
            center: Vec3::ZERO,
            radius: 1.0,
        },
    }
}
