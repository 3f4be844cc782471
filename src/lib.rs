//! A CPU scanline rasterizer for triangle meshes.
//!
//! Meshes are placed in a [`Scene`](scene::Scene), seen through a
//! [`Camera`](camera::Camera), lit by [`Light`](light::Light)s and drawn into
//! a [`Canvas`](canvas::Canvas), optionally depth tested against a
//! [`DepthBuffer`](render::DepthBuffer). Every pixel is produced on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use scanraster::prelude::*;
//!
//! let cube = cube(CUBE_SIDE_COLORS, None);
//! let mut scene = Scene::new(Camera::default());
//! scene
//!     .add_instance(&cube, Transform::from_translation(Vec3::new(0.0, 0.0, 5.0)))
//!     .add_light(Light::Ambient { intensity: 1.0 });
//!
//! let mut canvas = Canvas::new(600, 600);
//! let mut depth = DepthBuffer::new(600, 600);
//! draw_scene(
//!     &mut canvas,
//!     &mut depth,
//!     &scene,
//!     DrawFlags::COLOR_FILLED | DrawFlags::DEPTH_TEST | DrawFlags::CLIPPING,
//!     LightModel::DIFFUSE,
//!     ShadeModel::Flat,
//! );
//! canvas.save_png("cube.png")?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod canvas;
pub mod clipper;
pub mod colors;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod primitives;
pub mod render;
pub mod scene;
pub mod texture;
pub mod transform;

// Internal modules - used within the crate only
pub(crate) mod flags;

// Re-export commonly needed types at crate root for convenience
pub use engine::{draw_mesh, draw_scene, DrawFlags, DrawMeshParams, DrawStats, ShadeModel};
pub use mesh::{LoadError, Mesh};
pub use texture::{Texture, TextureError};
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use scanraster::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::camera::{Camera, ClippingPlanes, Plane};
    pub use crate::light::{Light, LightModel};
    pub use crate::scene::{MeshInstance, Scene};
    pub use crate::transform::Transform;

    // Assets
    pub use crate::mesh::{Face, Mesh};
    pub use crate::primitives::{cube, sphere, CUBE_SIDE_COLORS};
    pub use crate::texture::{Texture, TextureFilter};

    // Drawing
    pub use crate::canvas::{Canvas, Point2};
    pub use crate::colors::Color;
    pub use crate::engine::{draw_scene, DrawFlags, DrawStats, ShadeModel};
    pub use crate::render::DepthBuffer;

    // Math
    pub use crate::math::{Mat3, Mat4, Vec2, Vec3, Vec4};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::light::Lighting;
    pub use crate::render::{fill_triangle, FrameBuffer, Shading, Surface, Triangle};
}
