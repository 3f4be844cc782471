//! Mesh and scene drawing.
//!
//! [`draw_mesh`] runs one mesh instance through the pipeline:
//!
//! 1. **Cull** the whole instance by its bounding sphere (`CLIPPING`).
//! 2. **Transform** each face into view space with the model-view matrix.
//! 3. **Clip** faces not fully inside the view volume (`CLIPPING`).
//! 4. **Cull** back faces (`BACK_FACE_CULL`).
//! 5. **Shade** according to the [`ShadeModel`].
//! 6. **Fill** with the face color or texture, or draw a wireframe.
//! 7. **Outline** the face edges (`OUTLINES`).
//!
//! [`draw_scene`] builds one model-view matrix per instance and hands each
//! instance to [`draw_mesh`].

use std::ops::AddAssign;

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::clipper::{clip_triangle, cull_mesh_bounds, face_normal, is_back_facing};
use crate::flags::bit_flags;
use crate::light::{Light, LightModel, Lighting};
use crate::math::{Mat3, Mat4, Vec3, Vec4};
use crate::mesh::Mesh;
use crate::render::{
    draw_line, draw_wireframe_triangle, fill_triangle, DepthBuffer, FrameBuffer, Shading, Surface,
    Triangle,
};
use crate::scene::Scene;

/// Outlines use the face color darkened by this factor.
const OUTLINE_INTENSITY: f32 = 0.75;

bit_flags! {
    /// What to draw and which pipeline stages to run.
    pub struct DrawFlags {
        const WIREFRAME = 1 << 1;
        const COLOR_FILLED = 1 << 2;
        const TEXTURE_MAPPED = 1 << 3;
        const OUTLINES = 1 << 4;
        const DEPTH_TEST = 1 << 5;
        const BACK_FACE_CULL = 1 << 6;
        const CLIPPING = 1 << 7;
        /// Light with the computed face normal instead of the mesh normals.
        const COMPUTE_FACE_NORMALS = 1 << 8;
    }
}

/// Where lighting is evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShadeModel {
    /// No lighting. Faces keep their base color.
    #[default]
    Disabled,
    /// Once per face, at its centroid.
    Flat,
    /// At each vertex, interpolated across the face.
    Gouraud,
    /// At each pixel, from interpolated normals.
    Phong,
}

/// Everything [`draw_mesh`] needs for one instance.
#[derive(Clone, Copy, Debug)]
pub struct DrawMeshParams<'a> {
    pub mesh: &'a Mesh,
    pub camera: &'a Camera,
    pub lights: &'a [Light],

    pub draw_flags: DrawFlags,
    pub light_model: LightModel,
    pub shade_model: ShadeModel,

    /// Model space to view space.
    pub model_view: Mat4,
    /// Instance rotation, used to bring mesh normals into world space.
    pub rotation: Mat3,
    /// Instance uniform scale, used to grow the bounding sphere.
    pub scale: f32,
}

/// What happened to the faces of one or more draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub instances_culled: usize,
    pub faces_clipped: usize,
    pub faces_culled: usize,
    pub faces_drawn: usize,
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        self.instances_culled += rhs.instances_culled;
        self.faces_clipped += rhs.faces_clipped;
        self.faces_culled += rhs.faces_culled;
        self.faces_drawn += rhs.faces_drawn;
    }
}

/// Draws one mesh instance into `canvas`.
///
/// `depth` is only touched when [`DrawFlags::DEPTH_TEST`] is set. It must
/// match the canvas size and is not cleared here.
pub fn draw_mesh(canvas: &mut Canvas, depth: &mut DepthBuffer, params: &DrawMeshParams) -> DrawStats {
    let mut stats = DrawStats::default();
    let mesh = params.mesh;
    let camera = params.camera;
    let flags = params.draw_flags;
    let planes = &camera.clipping_planes;

    if flags.contains(DrawFlags::CLIPPING)
        && cull_mesh_bounds(planes, &mesh.bounding_sphere, &params.model_view, params.scale)
    {
        stats.instances_culled = 1;
        return stats;
    }

    let normal_matrix = camera.rotation.transpose() * params.rotation;
    let lighting = Lighting::new(params.light_model, params.lights, camera);
    let use_face_normals = flags.contains(DrawFlags::COMPUTE_FACE_NORMALS);

    let mut buffer = if flags.contains(DrawFlags::DEPTH_TEST) {
        FrameBuffer::with_depth(canvas, depth)
    } else {
        FrameBuffer::new(canvas)
    };

    for face in &mesh.faces {
        let view = face
            .verts
            .map(|i| (params.model_view * Vec4::point(mesh.vertices[i])).xyz());

        if flags.contains(DrawFlags::CLIPPING) && clip_triangle(planes, view) {
            stats.faces_clipped += 1;
            continue;
        }

        let normal = face_normal(view[0], view[1], view[2]);
        if flags.contains(DrawFlags::BACK_FACE_CULL) && is_back_facing(view[0], normal) {
            stats.faces_culled += 1;
            continue;
        }

        let points = view.map(|v| buffer.canvas().project_vertex(v));
        let vertex_normals = || -> [Vec3; 3] {
            if use_face_normals {
                [normal; 3]
            } else {
                face.normals.map(|i| normal_matrix * mesh.normals[i])
            }
        };

        let shading = match params.shade_model {
            ShadeModel::Disabled => Shading::None,
            ShadeModel::Flat => {
                let flat_normal = if use_face_normals {
                    normal
                } else {
                    normal_matrix * mesh.normals[face.normals[0]]
                };
                let centroid = (view[0] + view[1] + view[2]) / 3.0;
                Shading::Intensity([lighting.intensity(centroid, flat_normal, face.specular); 3])
            }
            ShadeModel::Gouraud => {
                let normals = vertex_normals();
                Shading::Intensity(std::array::from_fn(|k| {
                    lighting.intensity(view[k], normals[k], face.specular)
                }))
            }
            ShadeModel::Phong => Shading::Phong {
                normals: vertex_normals(),
                lighting: &lighting,
                specular: face.specular,
            },
        };

        // Untextured faces always fill with their color.
        let textured = flags.contains(DrawFlags::TEXTURE_MAPPED) && face.texture.is_some();
        let color_filled = flags.contains(DrawFlags::COLOR_FILLED) || face.texture.is_none();
        let wireframe = flags.contains(DrawFlags::WIREFRAME) && !color_filled && !textured;

        let surface = if color_filled {
            Some(Surface::Color(face.color))
        } else if textured {
            face.texture.as_deref().map(|texture| Surface::Texture {
                texture,
                uvs: face.tex_coords.map(|i| mesh.tex_coords[i]),
            })
        } else {
            None
        };

        let [p0, p1, p2] = points;
        match surface {
            Some(surface) => {
                let triangle = Triangle {
                    points,
                    depths: view.map(|v| v.z),
                    surface,
                    shading,
                };
                fill_triangle(&mut buffer, &triangle);
            }
            None if wireframe => {
                draw_wireframe_triangle(buffer.canvas_mut(), p0, p1, p2, face.color);
            }
            None => {}
        }

        if flags.contains(DrawFlags::OUTLINES) {
            let outline = face.color.scaled(OUTLINE_INTENSITY);
            let canvas = buffer.canvas_mut();
            draw_line(canvas, p0, p1, outline);
            draw_line(canvas, p0, p2, outline);
            draw_line(canvas, p2, p1, outline);
        }

        stats.faces_drawn += 1;
    }

    stats
}

/// Draws every instance of `scene` and returns the summed stats.
pub fn draw_scene(
    canvas: &mut Canvas,
    depth: &mut DepthBuffer,
    scene: &Scene,
    draw_flags: DrawFlags,
    light_model: LightModel,
    shade_model: ShadeModel,
) -> DrawStats {
    let view_matrix = scene.camera.view_matrix();
    let mut stats = DrawStats::default();

    for (index, instance) in scene.instances.iter().enumerate() {
        let params = DrawMeshParams {
            mesh: instance.mesh,
            camera: &scene.camera,
            lights: &scene.lights,
            draw_flags,
            light_model,
            shade_model,
            model_view: view_matrix * instance.transform.to_matrix(),
            rotation: instance.transform.rotation(),
            scale: instance.transform.scale(),
        };

        let instance_stats = draw_mesh(canvas, depth, &params);
        if instance_stats.instances_culled > 0 {
            log::trace!("instance {index} culled by its bounding sphere");
        }
        stats += instance_stats;
    }

    log::debug!(
        "drew {} instances ({} culled): {} faces drawn, {} clipped, {} back-facing",
        scene.instances.len(),
        stats.instances_culled,
        stats.faces_drawn,
        stats.faces_clipped,
        stats.faces_culled
    );

    stats
}
