//! Built-in scenes.

use glint_renderer::{
    Camera, Color, Gloss, Hsl, Light, Matte, Position, RenderResult, Scene, Sphere, Surface,
    Transform, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Frames it takes a sphere to fall through the whole column.
const CYCLE: f32 = 60.0;

/// The falling spheres are lit brighter than the film can show.
pub const FALLING_SPHERES_EXPOSURE: f32 = 1.0 / 1.4;

fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::new(r as f32, g as f32, b as f32) / 255.0
}

/// Where a sphere starting at `phase` is at `frame`.
///
/// Spheres move along +z from z = -12 and wrap around after [`CYCLE`]
/// units. A full cycle takes `frames` frames.
pub fn falling_position(
    x: f32,
    y: f32,
    phase: f32,
    frames: u32,
) -> impl Fn(f32) -> Vec3 + Send + Sync + 'static {
    let speed = CYCLE / frames.max(1) as f32;
    move |frame| Vec3::new(x, y, -12.0 + (phase + frame * speed).rem_euclid(CYCLE))
}

/// Randomly coloured glossy spheres drifting through the view, lit by an
/// ambient light and three coloured point lights.
pub fn falling_spheres(count: usize, frames: u32, seed: u64) -> RenderResult<Scene> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new(rgb8(20, 70, 100))
        .with_light(Light::Ambient(Color::splat(50.0 / 255.0)))
        .with_light(Light::point(Vec3::new(-25.0, 25.0, -25.0), rgb8(0x40, 0xa0, 0x40)))
        .with_light(Light::point(Vec3::new(-25.0, -25.0, -25.0), rgb8(0xa0, 0x40, 0x40)))
        .with_light(Light::point(Vec3::new(25.0, -25.0, -25.0), rgb8(0x40, 0x40, 0xa0)));

    for _ in 0..count {
        let color: Color = Hsl::new(rng.gen_range(0.0..360.0), 1.0, 0.5).into();
        let x = rng.gen_range(-10.0..10.0);
        let y = rng.gen_range(-20.0..20.0);
        let phase = rng.gen_range(0..=CYCLE as u32) as f32;

        let sphere = Sphere::new(Position::animated(falling_position(x, y, phase, frames)), 1.0);
        scene.add(Surface::new(
            sphere,
            vec![Box::new(Gloss::new(10.0)), Box::new(Matte::new(color))],
        )?);
    }

    Ok(scene)
}

/// 35mm-style pinhole camera looking down on the falling spheres.
pub fn falling_spheres_camera(width: u32, height: u32) -> Camera {
    let (fw, fh) = Camera::film_size(width, height, 0.024);
    Camera::pinhole(fw, fh, width, height, 0.05)
        .with_jitter(0.5)
        .with_transform(Transform::rotate_x((-65f32).to_radians()))
        .with_transform(Transform::translate(0.0, -4.0, -40.0))
}

/// A unit white sphere at the origin with one point light.
pub fn white_sphere() -> RenderResult<Scene> {
    let mut scene = Scene::new(Color::ZERO)
        .with_light(Light::Ambient(Color::splat(50.0 / 255.0)))
        .with_light(Light::point(Vec3::new(2.0, 2.0, -5.0), Color::splat(205.0 / 255.0)));
    scene.add(Surface::new(Sphere::unit(), vec![Box::new(Matte::new(Color::ONE))])?);
    Ok(scene)
}

/// Orthographic camera nine units in front of the white sphere.
pub fn white_sphere_camera(width: u32, height: u32) -> Camera {
    let (fw, fh) = Camera::film_size(width, height, 2.0);
    Camera::orthographic(fw, fh, width, height).with_transform(Transform::translate(0.0, 0.0, -9.0))
}
