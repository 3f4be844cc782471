use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use scanraster::prelude::*;
use scanraster::TextureError;
use scanraster::render::{
    draw_shaded_rect, draw_wireframe_rect, draw_wireframe_triangle, fill_triangle, CornerIntensities,
    FrameBuffer, Rect, Surface, Triangle,
};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 800;
const CHECKER_SIZE: u32 = 64;

fn checkerboard(size: u32) -> Result<Texture, TextureError> {
    let cell = size / 8;
    let data = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            if (x / cell + y / cell) % 2 == 0 {
                0xFFE0E0E0
            } else {
                0xFF303030
            }
        })
        .collect();
    Texture::from_pixels(size, size, data, TextureFilter::Bilinear)
}

fn lights() -> Vec<Light> {
    vec![
        Light::Ambient { intensity: 0.2 },
        Light::Directional {
            direction: Vec3::new(-1.0, 0.0, 1.0),
            intensity: 0.2,
        },
        Light::Point {
            position: Vec3::new(-3.0, 2.0, -10.0),
            intensity: 0.6,
        },
    ]
}

fn camera() -> Camera {
    Camera::new(Vec3::new(-3.0, 1.0, 2.0), Mat3::rotation_y((-30.0f32).to_radians()))
}

fn render_primitives(out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut canvas = Canvas::with_clear_color(WIDTH, HEIGHT, Color::WHITE);

    let points = [Point2::new(-200, -250), Point2::new(200, 50), Point2::new(20, 250)];
    fill_triangle(
        &mut FrameBuffer::new(&mut canvas),
        &Triangle::new(points, Surface::Color(Color::BRIGHT_GREEN)),
    );
    draw_wireframe_triangle(&mut canvas, points[0], points[1], points[2], Color::BLACK);

    let rect = Rect::new(Point2::new(-350, -350), Point2::new(-150, -250));
    let intensities = CornerIntensities {
        top_left: 1.0,
        bottom_left: 0.0,
        top_right: 0.5,
        bottom_right: 0.25,
    };
    draw_shaded_rect(&mut canvas, &rect, intensities, Color::BRIGHT_BLUE);
    draw_wireframe_rect(&mut canvas, &rect, Color::BLACK);

    canvas.save_png(out_dir.join("primitives.png"))?;
    Ok(())
}

fn render_scene(
    out_dir: &Path,
    name: &str,
    scene: &Scene,
    flags: DrawFlags,
    light_model: LightModel,
    shade_model: ShadeModel,
) -> Result<(), Box<dyn Error>> {
    let mut canvas = Canvas::with_clear_color(WIDTH, HEIGHT, Color::WHITE);
    let mut depth = DepthBuffer::new(WIDTH, HEIGHT);

    let stats = draw_scene(&mut canvas, &mut depth, scene, flags, light_model, shade_model);
    log::info!("{name}: {stats:?}");

    canvas.save_png(out_dir.join(format!("{name}.png")))?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let model_path = args.next();
    std::fs::create_dir_all(&out_dir)?;

    render_primitives(&out_dir)?;

    let texture = Arc::new(checkerboard(CHECKER_SIZE)?);
    let plain_cube = cube(CUBE_SIDE_COLORS, None);
    let textured_cube = cube(CUBE_SIDE_COLORS, Some(Arc::clone(&texture)));
    let ball = sphere(15, Color::BRIGHT_GREEN);

    let model = match &model_path {
        Some(path) => Some(Mesh::from_obj(path, 1.0, Color::GRAY)?),
        None => None,
    };

    let mut left = Transform::from_translation(Vec3::new(-1.5, 0.0, 7.0));
    left.set_scale(0.75);
    let mut right = Transform::from_translation(Vec3::new(1.25, 2.5, 7.5));
    right.set_rotation(Mat3::rotation_y(175.0f32.to_radians()));
    let mut ball_at = Transform::from_translation(Vec3::new(1.75, -0.5, 7.0));
    ball_at.set_scale(1.5);
    // Behind the camera; exercises the bounding-sphere cull.
    let hidden = Transform::from_translation(Vec3::new(0.0, 0.0, -10.0));

    let flags = DrawFlags::COLOR_FILLED
        | DrawFlags::DEPTH_TEST
        | DrawFlags::BACK_FACE_CULL
        | DrawFlags::CLIPPING;
    let light_model = LightModel::DIFFUSE | LightModel::SPECULAR;

    let mut scene = Scene::new(camera());
    scene.lights = lights();
    scene
        .add_instance(&plain_cube, left)
        .add_instance(&plain_cube, right)
        .add_instance(&ball, ball_at)
        .add_instance(&plain_cube, hidden);
    if let Some(model) = &model {
        scene.add_instance(model, Transform::from_translation(Vec3::new(0.0, 0.0, 5.0)));
    }

    render_scene(&out_dir, "flat", &scene, flags, light_model, ShadeModel::Flat)?;
    render_scene(&out_dir, "gouraud", &scene, flags, light_model, ShadeModel::Gouraud)?;
    render_scene(
        &out_dir,
        "outlines",
        &scene,
        flags | DrawFlags::OUTLINES,
        LightModel::DISABLED,
        ShadeModel::Disabled,
    )?;

    let mut textured = Scene::new(camera());
    textured.lights = lights();
    textured
        .add_instance(&textured_cube, left)
        .add_instance(&textured_cube, right)
        .add_instance(&ball, ball_at);
    let textured_model = model.clone().map(|mut model| {
        model.set_texture(texture);
        model
    });
    if let Some(model) = &textured_model {
        textured.add_instance(model, Transform::from_translation(Vec3::new(0.0, 0.0, 5.0)));
    }

    let textured_flags = DrawFlags::TEXTURE_MAPPED
        | DrawFlags::DEPTH_TEST
        | DrawFlags::BACK_FACE_CULL
        | DrawFlags::CLIPPING;
    render_scene(&out_dir, "phong_textured", &textured, textured_flags, light_model, ShadeModel::Phong)?;

    Ok(())
}
