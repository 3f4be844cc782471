//! View-space culling and clipping.
//!
//! Three independent discard stages, cheapest first:
//!
//! 1. [`cull_mesh_bounds`]: drop a whole instance whose bounding sphere lies
//!    entirely behind one of the clipping planes.
//! 2. [`clip_triangle`]: drop a triangle unless all three vertices are inside
//!    every plane. Triangles straddling a plane are discarded whole, not split.
//! 3. [`is_back_facing`]: drop triangles facing away from the eye.
//!
//! All inputs are in view space, where the eye sits at the origin.

use crate::camera::ClippingPlanes;
use crate::math::{Mat4, Vec3, Vec4};
use crate::mesh::BoundingSphere;

/// True when the sphere, moved into view space by `model_view` and scaled by
/// `scale`, is entirely outside at least one plane.
pub fn cull_mesh_bounds(
    planes: &ClippingPlanes,
    sphere: &BoundingSphere,
    model_view: &Mat4,
    scale: f32,
) -> bool {
    let center = (*model_view * Vec4::point(sphere.center)).xyz();
    let radius = sphere.radius * scale;

    planes
        .iter()
        .any(|plane| plane.signed_distance(center) < -radius)
}

/// True when the triangle must be discarded: some vertex is on or outside
/// some plane.
pub fn clip_triangle(planes: &ClippingPlanes, vertices: [Vec3; 3]) -> bool {
    planes.iter().any(|plane| {
        let inside = vertices
            .iter()
            .filter(|&&v| plane.signed_distance(v) > 0.0)
            .count();
        inside < 3
    })
}

/// Unit normal of a triangle, following its winding order.
#[inline]
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize()
}

/// True when a triangle with first vertex `v0` and face `normal` faces away
/// from the eye at the origin. Edge-on triangles count as back-facing.
#[inline]
pub fn is_back_facing(v0: Vec3, normal: Vec3) -> bool {
    (-v0).dot(normal) <= 0.0
}
