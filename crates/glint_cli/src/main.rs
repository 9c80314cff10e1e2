//! Glint command line renderer.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use glint_renderer::{render, Camera, Film, RenderConfig, RenderProgress, Scene};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};

mod cli;
mod scenes;

use cli::{Cli, Command, RenderArgs};

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Settings from the config file (or defaults), then command line overrides.
fn load_config(
    path: Option<&Path>,
    default_exposure: f32,
    args: &RenderArgs,
) -> Result<RenderConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => RenderConfig::default().with_exposure(default_exposure),
    };

    if let Some(threads) = args.threads {
        config.workers = threads;
    }
    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples;
    }
    if let Some(bucket_size) = args.bucket_size {
        config.bucket_size = Some(bucket_size);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(exposure) = args.exposure {
        config.exposure = exposure;
    }
    config.validate()?;
    Ok(config)
}

/// `spheres-falling.png` becomes `spheres-falling.7.png` for frame 7.
fn frame_path(output: &Path, frame: u32) -> PathBuf {
    let extension = output.extension().and_then(|e| e.to_str()).unwrap_or("png");
    output.with_extension(format!("{}.{}", frame, extension))
}

fn save_png(film: Film, path: &Path) -> Result<()> {
    let (width, height) = (film.width, film.height);
    image::save_buffer(path, &film.into_raw(), width, height, image::ColorType::Rgb8)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    info!("Saved {}", path.display());
    Ok(())
}

/// Render on a background thread while the progress bar follows along.
fn render_with_progress(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    frame: Option<f32>,
    label: &str,
) -> Result<Film> {
    let progress = RenderProgress::new();
    let bar = ProgressBar::new(camera.image_width as u64 * camera.image_height as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} {msg} ETA: {eta}")?
            .progress_chars("=> "),
    );
    bar.set_message(label.to_string());

    let film = thread::scope(|s| {
        let handle = s.spawn(|| render(scene, camera, config, frame, &progress));
        while !handle.is_finished() {
            let snapshot = progress.snapshot();
            bar.set_position(snapshot.completed);
            if let Some(layout) = snapshot.layout {
                bar.set_message(format!(
                    "{} ({}x{} of size {}x{})",
                    label, layout.panels_x, layout.panels_y, layout.size_x, layout.size_y
                ));
            }
            thread::sleep(Duration::from_millis(100));
        }
        handle
            .join()
            .map_err(|_| anyhow!("Render thread panicked"))
    })??;

    bar.finish_and_clear();
    Ok(film)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Command::Spheres {
            width,
            height,
            frames,
            start_frame,
            spheres,
            scene_seed,
            output,
        } => {
            let config = load_config(
                cli.config.as_deref(),
                scenes::FALLING_SPHERES_EXPOSURE,
                &cli.render,
            )?;
            let scene = scenes::falling_spheres(spheres, frames, scene_seed)?;
            let camera = scenes::falling_spheres_camera(width, height);
            info!(
                "Falling spheres: {} spheres, frames {}..{}",
                spheres, start_frame, frames
            );

            for frame in start_frame..frames {
                let label = format!("f{}", frame);
                let film =
                    render_with_progress(&scene, &camera, &config, Some(frame as f32), &label)?;
                save_png(film, &frame_path(&output, frame))?;
            }
        }
        Command::Sphere {
            width,
            height,
            output,
        } => {
            let config = load_config(cli.config.as_deref(), 1.0, &cli.render)?;
            let scene = scenes::white_sphere()?;
            let camera = scenes::white_sphere_camera(width, height);

            let film = render_with_progress(&scene, &camera, &config, None, "white sphere")?;
            save_png(film, &output)?;
        }
    }

    Ok(())
}
