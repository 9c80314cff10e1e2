//! Mirror floor example.
//!
//! Renders a few spheres and a triangle standing on a mirrored plane and
//! saves the result as a PNG.

use glint_renderer::{
    render, Camera, Color, Emissive, Gloss, Hsl, Light, Matte, Plane, Reflective, RenderConfig,
    RenderProgress, Scene, Sphere, Surface, Transform, Triangle, Vec3,
};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Glint - Mirror Floor Example");
    println!("============================");

    let start = std::time::Instant::now();
    let scene = build_scene().expect("Failed to build scene");
    println!("Scene built in {:?} ({} surfaces)", start.elapsed(), scene.len());

    let (width, height) = (640, 360);
    let (fw, fh) = Camera::film_size(width, height, 0.024);
    let camera = Camera::pinhole(fw, fh, width, height, 0.035)
        .with_jitter(0.5)
        .with_transform(Transform::rotate_x(15f32.to_radians()))
        .with_transform(Transform::translate(0.0, 3.0, -12.0));

    let config = RenderConfig::default().with_samples(8);
    let progress = RenderProgress::new();

    let start = std::time::Instant::now();
    let film = render(&scene, &camera, &config, None, &progress).expect("Render failed");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "mirror-floor.png";
    image::save_buffer(filename, &film.into_raw(), width, height, image::ColorType::Rgb8)
        .expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> glint_renderer::RenderResult<Scene> {
    let mut scene = Scene::new(Color::new(0.05, 0.08, 0.12))
        .with_light(Light::Ambient(Color::splat(0.1)))
        .with_light(Light::point(Vec3::new(-6.0, 10.0, -8.0), Color::splat(0.8)))
        .with_light(Light::point(Vec3::new(8.0, 6.0, -4.0), Color::new(0.3, 0.25, 0.2)));

    // Floor: half mirror, half grey
    scene.add(Surface::new(
        Plane::new(Vec3::ZERO, Vec3::Y),
        vec![
            Box::new(Matte::new(Color::splat(0.3))),
            Box::new(Reflective::new(Color::splat(0.5))),
        ],
    )?);

    for (i, x) in [-3.0f32, 0.0, 3.0].into_iter().enumerate() {
        let color: Color = Hsl::new(i as f32 * 120.0, 0.8, 0.5).into();
        scene.add(Surface::new(
            Sphere::new(Vec3::new(x, 1.0, 0.0), 1.0),
            vec![Box::new(Matte::new(color)), Box::new(Gloss::new(20.0))],
        )?);
    }

    // A glowing panel behind the spheres
    scene.add(Surface::new(
        Triangle::new(
            Vec3::new(-4.0, 0.0, 4.0),
            Vec3::new(4.0, 0.0, 4.0),
            Vec3::new(0.0, 5.0, 4.0),
        ),
        vec![
            Box::new(Matte::new(Color::splat(0.2))),
            Box::new(Emissive::new(Color::new(0.4, 0.3, 0.1))),
        ],
    )?);

    Ok(scene)
}
