//! Triangle meshes and their bounding volumes.
//!
//! A [`Mesh`] is built once (procedurally or from an OBJ file) and then only
//! read. Faces index into the shared vertex, normal and texture-coordinate
//! arrays, so many faces can share one attribute value.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::colors::Color;
use crate::math::{Vec2, Vec3};
use crate::texture::Texture;

/// Errors that can occur when loading a mesh.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse OBJ file")]
    Obj(#[from] tobj::LoadError),
    #[error("OBJ file contains no geometry")]
    Empty,
    #[error("model `{0}` has no vertex normals")]
    MissingNormals(String),
    #[error("face {face} references {kind} {index}, but only {len} exist")]
    IndexOutOfRange {
        face: usize,
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

/// Sphere enclosing every vertex of a mesh, in model space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// One triangle: indices into the mesh arrays plus its material.
#[derive(Clone, Debug)]
pub struct Face {
    pub verts: [usize; 3],
    pub normals: [usize; 3],
    pub tex_coords: [usize; 3],
    pub color: Color,
    /// Specular exponent. `0.0` is a matte surface.
    pub specular: f32,
    /// `None` means untextured; `tex_coords` are then ignored.
    pub texture: Option<Arc<Texture>>,
}

impl Face {
    /// Untextured, matte face.
    pub fn new(verts: [usize; 3], normals: [usize; 3], color: Color) -> Self {
        Self {
            verts,
            normals,
            tex_coords: [0; 3],
            color,
            specular: 0.0,
            texture: None,
        }
    }

    pub fn with_specular(mut self, specular: f32) -> Self {
        self.specular = specular;
        self
    }

    pub fn with_texture(mut self, texture: Arc<Texture>, tex_coords: [usize; 3]) -> Self {
        self.texture = Some(texture);
        self.tex_coords = tex_coords;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub faces: Vec<Face>,
    pub bounding_sphere: BoundingSphere,
}

impl Mesh {
    /// Assembles a mesh and computes its bounding sphere.
    pub fn new(
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        tex_coords: Vec<Vec2>,
        faces: Vec<Face>,
    ) -> Self {
        let bounding_sphere = compute_bounding_sphere(&vertices);
        let mesh = Self {
            vertices,
            normals,
            tex_coords,
            faces,
            bounding_sphere,
        };
        debug_assert!(mesh.check_indices().is_ok(), "face index out of range");
        mesh
    }

    /// Loads every model of an OBJ file into one mesh.
    ///
    /// Faces are triangulated. Vertices are multiplied by `vertex_scale`, the
    /// V texture coordinate is flipped so that `(0, 0)` is the top-left texel,
    /// and every face gets `color`. Models without texture coordinates map to
    /// a single `(0, 0)` coordinate.
    pub fn from_obj<P: AsRef<Path>>(
        path: P,
        vertex_scale: f32,
        color: Color,
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: false,
                triangulate: true,
                ..Default::default()
            },
        )?;

        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let mut tex_coords = Vec::new();
        let mut faces = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            if mesh.normal_indices.is_empty() && !mesh.indices.is_empty() {
                return Err(LoadError::MissingNormals(model.name.clone()));
            }

            let vertex_base = vertices.len();
            let normal_base = normals.len();
            let tex_base = tex_coords.len();

            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2]) * vertex_scale),
            );
            normals.extend(
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| Vec3::new(n[0], n[1], n[2])),
            );
            let has_tex_coords = !mesh.texcoord_indices.is_empty();
            if has_tex_coords {
                tex_coords.extend(
                    mesh.texcoords
                        .chunks_exact(2)
                        .map(|t| Vec2::new(t[0], 1.0 - t[1])),
                );
            }

            for (tri, verts) in mesh.indices.chunks_exact(3).enumerate() {
                let corner = |stream: &[u32], base: usize, k: usize| base + stream[tri * 3 + k] as usize;
                let mut face = Face::new(
                    [
                        vertex_base + verts[0] as usize,
                        vertex_base + verts[1] as usize,
                        vertex_base + verts[2] as usize,
                    ],
                    [0, 1, 2].map(|k| corner(&mesh.normal_indices, normal_base, k)),
                    color,
                );
                if has_tex_coords {
                    face.tex_coords = [0, 1, 2].map(|k| corner(&mesh.texcoord_indices, tex_base, k));
                }
                faces.push(face);
            }
        }

        if faces.is_empty() {
            return Err(LoadError::Empty);
        }
        if tex_coords.is_empty() {
            tex_coords.push(Vec2::ZERO);
        }

        let mesh = Self {
            bounding_sphere: compute_bounding_sphere(&vertices),
            vertices,
            normals,
            tex_coords,
            faces,
        };
        mesh.check_indices()?;

        log::info!(
            "loaded mesh {} ({} vertices, {} normals, {} faces, radius {:.3})",
            path.display(),
            mesh.vertices.len(),
            mesh.normals.len(),
            mesh.faces.len(),
            mesh.bounding_sphere.radius
        );
        Ok(mesh)
    }

    /// Sets one texture on every face. Faces keep their texture coordinates.
    pub fn set_texture(&mut self, texture: Arc<Texture>) {
        for face in &mut self.faces {
            face.texture = Some(Arc::clone(&texture));
        }
    }

    /// Checks every face index against the array it points into.
    pub fn check_indices(&self) -> Result<(), LoadError> {
        for (face_idx, face) in self.faces.iter().enumerate() {
            // Untextured faces never read their texture coordinates.
            let untextured = face.texture.is_none();
            let streams = [
                ("vertex", &face.verts, self.vertices.len(), false),
                ("normal", &face.normals, self.normals.len(), false),
                ("texture coordinate", &face.tex_coords, self.tex_coords.len(), untextured),
            ];
            for (kind, indices, len, unused) in streams {
                if unused && len == 0 {
                    continue;
                }
                if let Some(&index) = indices.iter().find(|&&i| i >= len) {
                    return Err(LoadError::IndexOutOfRange {
                        face: face_idx,
                        kind,
                        index,
                        len,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Bounding sphere using Ritter's algorithm.
///
/// Starts from the sphere spanning the farthest pair of points, then grows it
/// to cover any point still outside. Not minimal, but always encloses every
/// point. Empty input gives a zero sphere at the origin.
pub fn compute_bounding_sphere(points: &[Vec3]) -> BoundingSphere {
    let Some(&first) = points.first() else {
        return BoundingSphere::default();
    };

    let (mut p0, mut p1) = (first, first);
    let mut max_dist_sq = 0.0f32;
    for &a in points {
        for &b in points {
            let dist_sq = (b - a).magnitude_squared();
            if dist_sq > max_dist_sq {
                max_dist_sq = dist_sq;
                p0 = a;
                p1 = b;
            }
        }
    }

    let mut center = (p0 + p1) / 2.0;
    let mut radius = max_dist_sq.sqrt() / 2.0;

    for &p in points {
        let d = p - center;
        let dist_sq = d.magnitude_squared();
        if dist_sq > radius * radius {
            let dist = dist_sq.sqrt();
            let new_radius = (radius + dist) / 2.0;
            center = center + d * ((new_radius - radius) / dist);
            radius = new_radius;
        }
    }

    BoundingSphere { center, radius }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn bounding_sphere_of_empty_set() {
        assert_eq!(compute_bounding_sphere(&[]), BoundingSphere::default());
    }

    #[test]
    fn bounding_sphere_of_segment() {
        let s = compute_bounding_sphere(&[Vec3::new(-2.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0)]);
        assert_relative_eq!(s.center.x, 1.0);
        assert_relative_eq!(s.radius, 3.0);
    }

    #[test]
    fn bounding_sphere_encloses_all_points() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 1.0, -2.0),
            Vec3::new(-1.0, 4.0, 0.5),
            Vec3::new(2.0, -3.0, 5.0),
            Vec3::new(0.2, 0.2, -4.0),
        ];
        let s = compute_bounding_sphere(&points);
        for p in points {
            assert!((p - s.center).magnitude() <= s.radius + 1e-4, "{p:?} outside {s:?}");
        }
    }

    #[test]
    fn check_indices_reports_the_bad_face() {
        let mesh = Mesh {
            vertices: vec![Vec3::ZERO; 3],
            normals: vec![Vec3::UP],
            tex_coords: vec![],
            faces: vec![
                Face::new([0, 1, 2], [0, 0, 0], Color::WHITE),
                Face::new([0, 1, 3], [0, 0, 0], Color::WHITE),
            ],
            bounding_sphere: BoundingSphere::default(),
        };
        assert!(matches!(
            mesh.check_indices(),
            Err(LoadError::IndexOutOfRange {
                face: 1,
                kind: "vertex",
                index: 3,
                len: 3
            })
        ));
    }

    #[test]
    fn untextured_face_may_skip_texture_coordinates() {
        let mut mesh = Mesh {
            vertices: vec![Vec3::ZERO; 3],
            normals: vec![Vec3::UP],
            tex_coords: vec![],
            faces: vec![Face::new([0, 1, 2], [0, 0, 0], Color::WHITE)],
            bounding_sphere: BoundingSphere::default(),
        };
        assert!(mesh.check_indices().is_ok());

        let texture = Texture::from_pixels(1, 1, vec![0xFFFFFFFF], crate::texture::TextureFilter::Nearest).unwrap();
        mesh.set_texture(Arc::new(texture));
        assert!(matches!(
            mesh.check_indices(),
            Err(LoadError::IndexOutOfRange {
                face: 0,
                kind: "texture coordinate",
                index: 0,
                len: 0
            })
        ));
    }

    #[test]
    fn set_texture_keeps_texture_coordinates() {
        let mut mesh = Mesh {
            vertices: vec![Vec3::ZERO; 3],
            normals: vec![Vec3::UP],
            tex_coords: vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            faces: vec![Face {
                tex_coords: [2, 1, 0],
                ..Face::new([0, 1, 2], [0, 0, 0], Color::WHITE)
            }],
            bounding_sphere: BoundingSphere::default(),
        };
        let texture = Arc::new(
            Texture::from_pixels(1, 1, vec![0xFFFFFFFF], crate::texture::TextureFilter::Nearest).unwrap(),
        );
        mesh.set_texture(Arc::clone(&texture));
        let face = &mesh.faces[0];
        assert_eq!(face.tex_coords, [2, 1, 0]);
        assert!(face.texture.as_ref().is_some_and(|t| Arc::ptr_eq(t, &texture)));
        assert!(mesh.check_indices().is_ok());
    }

    fn write_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("scanraster-{}-{name}.obj", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_obj_with_separate_index_streams() {
        let path = write_obj(
            "quad",
            "v -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0\n\
             vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
             vn 0 0 -1\n\
             f 1/1/1 2/2/1 3/3/1 4/4/1\n",
        );
        let mesh = Mesh::from_obj(&path, 2.0, Color::GRAY).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.normals.len(), 1);
        assert!(mesh.faces.iter().all(|f| f.normals == [0, 0, 0]));
        assert_eq!(mesh.vertices[2], Vec3::new(2.0, 2.0, 0.0));
        // V is flipped on load.
        let uv = mesh.tex_coords[mesh.faces[0].tex_coords[0]];
        assert_relative_eq!(uv.v(), 1.0);
        assert_relative_eq!(mesh.bounding_sphere.radius, 8.0f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn obj_without_normals_is_rejected() {
        let path = write_obj("no-normals", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let result = Mesh::from_obj(&path, 1.0, Color::WHITE);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(LoadError::MissingNormals(_))));
    }
}
