//! Lights and the lighting evaluator.
//!
//! Positions and directions are given in world space. The evaluator works in
//! view space, so it brings every light into the camera's frame once, up
//! front, and then answers per-vertex (or per-pixel) intensity queries.

use crate::camera::Camera;
use crate::flags::bit_flags;
use crate::math::{Mat3, Mat4, Vec3, Vec4};

/// A light source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    /// Uniform light reaching every surface regardless of orientation.
    Ambient { intensity: f32 },
    /// Light from infinitely far away. `direction` points from the surface
    /// toward the light and need not be normalized.
    Directional { direction: Vec3, intensity: f32 },
    /// Light radiating from a point.
    Point { position: Vec3, intensity: f32 },
}

bit_flags! {
    /// Which reflection terms the evaluator computes.
    pub struct LightModel {
        /// No lighting; surfaces keep their base color.
        const DISABLED = 0;
        const DIFFUSE = 1 << 1;
        const SPECULAR = 1 << 2;
    }
}

/// A light with its geometry already in view space.
#[derive(Clone, Copy, Debug)]
enum ViewLight {
    Ambient(f32),
    Directional(Vec3, f32),
    Point(Vec3, f32),
}

/// Evaluates light intensity at view-space points for one camera.
#[derive(Clone, Debug)]
pub struct Lighting {
    model: LightModel,
    lights: Vec<ViewLight>,
}

impl Lighting {
    pub fn new(model: LightModel, lights: &[Light], camera: &Camera) -> Self {
        let to_view_rotation: Mat3 = camera.rotation.transpose();
        let view_matrix: Mat4 = camera.view_matrix();

        let lights = lights
            .iter()
            .map(|light| match *light {
                Light::Ambient { intensity } => ViewLight::Ambient(intensity),
                Light::Directional {
                    direction,
                    intensity,
                } => ViewLight::Directional(to_view_rotation * direction, intensity),
                Light::Point {
                    position,
                    intensity,
                } => ViewLight::Point((view_matrix * Vec4::point(position)).xyz(), intensity),
            })
            .collect();

        Self { model, lights }
    }

    /// Total light intensity at a view-space `vertex` with surface `normal`,
    /// clamped to `[0, 1]`.
    ///
    /// `specular` is the surface's specular exponent; `0.0` disables the
    /// specular term for this surface. With neither diffuse nor specular
    /// enabled the surface is fully lit.
    pub fn intensity(&self, vertex: Vec3, normal: Vec3, specular: f32) -> f32 {
        let diffuse = self.model.contains(LightModel::DIFFUSE);
        let shiny = self.model.contains(LightModel::SPECULAR) && specular > 0.0;
        if !self.model.intersects(LightModel::DIFFUSE | LightModel::SPECULAR) {
            return 1.0;
        }

        // The eye sits at the view-space origin.
        let view = -vertex;
        let mut intensity = 0.0;

        for light in &self.lights {
            let (light_vector, light_intensity) = match *light {
                ViewLight::Ambient(ambient) => {
                    intensity += ambient;
                    continue;
                }
                ViewLight::Directional(direction, i) => (direction, i),
                ViewLight::Point(position, i) => (position - vertex, i),
            };

            if diffuse {
                let cos_alpha = light_vector.cos_angle(normal);
                if cos_alpha > 0.0 {
                    intensity += cos_alpha * light_intensity;
                }
            }

            if shiny {
                let reflected = light_vector.reflect(normal);
                let cos_beta = reflected.cos_angle(view);
                if cos_beta > 0.0 {
                    intensity += cos_beta.powf(specular) * light_intensity;
                }
            }
        }

        // Specular highlights can push the sum past 1; only the total is clamped.
        intensity.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lighting(model: LightModel, lights: &[Light]) -> Lighting {
        Lighting::new(model, lights, &Camera::default())
    }

    #[test]
    fn ambient_adds_unconditionally() {
        let l = lighting(
            LightModel::DIFFUSE,
            &[Light::Ambient { intensity: 0.2 }, Light::Ambient { intensity: 0.1 }],
        );
        assert_relative_eq!(l.intensity(Vec3::new(0.0, 0.0, 5.0), -Vec3::FORWARD, 0.0), 0.3, epsilon = 1e-6);
    }

    #[test]
    fn directional_diffuse_follows_cosine() {
        let l = lighting(
            LightModel::DIFFUSE,
            &[Light::Directional {
                direction: Vec3::new(0.0, 1.0, -1.0),
                intensity: 0.8,
            }],
        );
        let vertex = Vec3::new(0.0, 0.0, 5.0);
        // Facing the light head on.
        let facing = Vec3::new(0.0, 1.0, -1.0).normalize();
        assert_relative_eq!(l.intensity(vertex, facing, 0.0), 0.8, epsilon = 1e-6);
        // 45 degrees off.
        assert_relative_eq!(l.intensity(vertex, Vec3::UP, 0.0), 0.8 * 0.5f32.sqrt(), epsilon = 1e-6);
        // Facing away contributes nothing.
        assert_relative_eq!(l.intensity(vertex, -facing, 0.0), 0.0);
    }

    #[test]
    fn directional_light_rotates_with_camera() {
        let light = [Light::Directional {
            direction: Vec3::RIGHT,
            intensity: 1.0,
        }];
        let camera = Camera::new(Vec3::ZERO, Mat3::rotation_y(std::f32::consts::FRAC_PI_2));
        let l = Lighting::new(LightModel::DIFFUSE, &light, &camera);
        // rotation_y(90deg) maps +Z onto -X, so world +X is the camera's -Z.
        assert_relative_eq!(l.intensity(Vec3::new(0.0, 0.0, 5.0), -Vec3::FORWARD, 0.0), 1.0, epsilon = 1e-6);
        assert_relative_eq!(l.intensity(Vec3::new(0.0, 0.0, 5.0), Vec3::RIGHT, 0.0), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn point_light_uses_view_space_position() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, -10.0), Mat3::IDENTITY);
        let light = [Light::Point {
            position: Vec3::new(0.0, 5.0, 0.0),
            intensity: 0.6,
        }];
        let l = Lighting::new(LightModel::DIFFUSE, &light, &camera);
        // Light sits at view (0, 5, 10); vertex directly below it.
        let vertex = Vec3::new(0.0, 0.0, 10.0);
        assert_relative_eq!(l.intensity(vertex, Vec3::UP, 0.0), 0.6, epsilon = 1e-6);
    }

    #[test]
    fn specular_needs_flag_and_exponent() {
        // Light straight behind the eye, surface facing the eye: the
        // reflection points right back at the viewer.
        let light = [Light::Directional {
            direction: -Vec3::FORWARD,
            intensity: 0.5,
        }];
        let vertex = Vec3::new(0.0, 0.0, 4.0);
        let normal = -Vec3::FORWARD;

        let diffuse_only = lighting(LightModel::DIFFUSE, &light);
        assert_relative_eq!(diffuse_only.intensity(vertex, normal, 100.0), 0.5, epsilon = 1e-6);

        let both = lighting(LightModel::DIFFUSE | LightModel::SPECULAR, &light);
        assert_relative_eq!(both.intensity(vertex, normal, 100.0), 1.0, epsilon = 1e-6);
        assert_relative_eq!(both.intensity(vertex, normal, 0.0), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn total_is_clamped_not_each_light() {
        let lights = [
            Light::Ambient { intensity: 0.9 },
            Light::Directional {
                direction: -Vec3::FORWARD,
                intensity: 0.9,
            },
        ];
        let l = lighting(LightModel::DIFFUSE | LightModel::SPECULAR, &lights);
        let value = l.intensity(Vec3::new(0.0, 0.0, 3.0), -Vec3::FORWARD, 1000.0);
        assert_relative_eq!(value, 1.0);

        let dim = lighting(LightModel::DIFFUSE, &[Light::Ambient { intensity: -0.5 }]);
        assert_relative_eq!(dim.intensity(Vec3::FORWARD, Vec3::UP, 0.0), 0.0);
    }

    #[test]
    fn disabled_model_is_fully_lit() {
        let l = lighting(LightModel::DISABLED, &[Light::Ambient { intensity: 0.1 }]);
        assert_relative_eq!(l.intensity(Vec3::FORWARD, Vec3::UP, 0.0), 1.0);
    }
}
