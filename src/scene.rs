//! A frame's worth of things to draw.

use crate::camera::Camera;
use crate::light::Light;
use crate::mesh::Mesh;
use crate::transform::Transform;

/// One placement of a shared mesh in the world.
#[derive(Clone, Copy, Debug)]
pub struct MeshInstance<'a> {
    pub mesh: &'a Mesh,
    pub transform: Transform,
}

impl<'a> MeshInstance<'a> {
    pub fn new(mesh: &'a Mesh, transform: Transform) -> Self {
        Self { mesh, transform }
    }
}

/// Camera, mesh instances and lights. Meshes are borrowed, so several
/// instances (and several scenes) can share one mesh.
#[derive(Clone, Debug, Default)]
pub struct Scene<'a> {
    pub camera: Camera,
    pub instances: Vec<MeshInstance<'a>>,
    pub lights: Vec<Light>,
}

impl<'a> Scene<'a> {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            instances: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn add_instance(&mut self, mesh: &'a Mesh, transform: Transform) -> &mut Self {
        self.instances.push(MeshInstance::new(mesh, transform));
        self
    }

    pub fn add_light(&mut self, light: Light) -> &mut Self {
        self.lights.push(light);
        self
    }
}
