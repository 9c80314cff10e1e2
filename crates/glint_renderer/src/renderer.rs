//! Parallel render driver.
//!
//! The image is cut into buckets which a pool of worker threads claims one at
//! a time. Workers hand back finished buckets; the calling thread assembles
//! them into the [`Film`] once every bucket is in.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bucket::{bucket_size_for, generate_buckets, panel_layout, render_bucket, BucketResult};
use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::film::Film;
use crate::progress::{RenderProgress, RenderState};
use crate::scene::Scene;
use crate::shading::Color;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Worker threads
    pub workers: usize,
    /// Samples averaged into each pixel
    pub samples_per_pixel: u32,
    /// Bucket edge in pixels; chosen from the image size when unset
    pub bucket_size: Option<u32>,
    /// Hits closer than this along a ray are ignored
    pub epsilon: f32,
    /// Scale applied to colours before clamping
    pub exposure: f32,
    /// Base seed for the per-pixel generators
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            samples_per_pixel: 6,
            bucket_size: None,
            epsilon: 1e-4,
            exposure: 1.0,
            seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = Some(bucket_size);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_exposure(mut self, exposure: f32) -> Self {
        self.exposure = exposure;
        self
    }

    /// Reject settings no render can run with.
    pub fn validate(&self) -> RenderResult<()> {
        if self.workers == 0 {
            return Err(RenderError::NoWorkers);
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::NoSamples);
        }
        if self.bucket_size == Some(0) {
            return Err(RenderError::InvalidConfig("bucket size must be positive".into()));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        if !self.exposure.is_finite() {
            return Err(RenderError::InvalidConfig(format!(
                "exposure must be finite, got {}",
                self.exposure
            )));
        }
        Ok(())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Render a `width` x `height` image with `sampler` producing each sample.
///
/// `sampler` is called `samples_per_pixel` times per pixel with the pixel
/// position and that pixel's generator. It is shared by all workers, so it
/// must not rely on which thread or in which order it is called.
///
/// Nothing is dispatched if the dimensions or config are invalid. The first
/// error (or panic) from any worker fails the whole render; no partial image
/// is returned.
pub fn render_panels<F>(
    width: u32,
    height: u32,
    config: &RenderConfig,
    progress: &RenderProgress,
    sampler: F,
) -> RenderResult<Film>
where
    F: Fn(u32, u32, &mut StdRng) -> RenderResult<Color> + Sync,
{
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    config.validate()?;

    let bucket_size = config
        .bucket_size
        .unwrap_or_else(|| bucket_size_for(width, height, config.workers));
    let buckets = generate_buckets(width, height, bucket_size);
    let layout = panel_layout(width, height, bucket_size);
    debug!(
        "Bucket size {}: {} x {} panels",
        bucket_size, layout.panels_x, layout.panels_y
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("glint-worker-{}", i))
        .build()?;

    progress.begin(width as u64 * height as u64, buckets.len(), layout);
    progress.set_state(RenderState::Running);

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pool.install(|| {
            buckets
                .par_iter()
                .with_max_len(1)
                .map(|bucket| render_bucket(bucket, config, progress, &sampler))
                .collect::<RenderResult<Vec<BucketResult>>>()
        })
    }));

    let results = match outcome {
        Ok(Ok(results)) => results,
        Ok(Err(err)) => {
            error!("Render failed: {}", err);
            progress.set_state(RenderState::Failed);
            return Err(err);
        }
        Err(payload) => {
            let message = panic_message(&*payload);
            error!("Render worker panicked: {}", message);
            progress.set_state(RenderState::Failed);
            return Err(RenderError::WorkerPanicked(message));
        }
    };

    progress.set_state(RenderState::Aggregating);
    let mut film = Film::new(width, height);
    for result in &results {
        let bucket = &result.bucket;
        let (start, end) = (bucket.x as usize, (bucket.x + bucket.width) as usize);
        for (row, pixels) in result.pixels.chunks(bucket.width as usize).enumerate() {
            film.row_mut(bucket.y + row as u32)[start..end].copy_from_slice(pixels);
        }
    }
    progress.set_state(RenderState::Done);

    Ok(film)
}

/// Render one frame of `scene` as seen through `camera`.
///
/// The image size comes from the camera. `frame` is stamped on every camera
/// ray so animated geometry is evaluated at that time.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    frame: Option<f32>,
    progress: &RenderProgress,
) -> RenderResult<Film> {
    info!(
        "Rendering {}x{} with {} workers, {} samples per pixel",
        camera.image_width, camera.image_height, config.workers, config.samples_per_pixel
    );
    let start = Instant::now();

    let film = render_panels(
        camera.image_width,
        camera.image_height,
        config,
        progress,
        |x, y, rng: &mut StdRng| {
            let ray = camera.ray_for(x, y, Some(rng as &mut dyn RngCore), frame);
            scene.trace(&ray, config.epsilon)
        },
    )?;

    info!("Rendered in {:.2?}", start.elapsed());
    Ok(film)
}
