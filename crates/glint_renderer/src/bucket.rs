//! Bucket-based panel rendering.
//!
//! Divides the image into panels (buckets) that are rendered independently
//! by the worker pool. Each pixel draws its samples from its own generator,
//! seeded from the render seed and the pixel position, so the image does
//! not depend on which worker rendered which bucket.

use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::RenderResult;
use crate::film::color_to_rgb;
use crate::progress::{PanelLayout, RenderProgress};
use crate::renderer::RenderConfig;
use crate::shading::Color;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Largest bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Buckets are never split below this size.
pub const MIN_BUCKET_SIZE: u32 = 8;

fn panel_count(width: u32, height: u32, bucket_size: u32) -> u32 {
    width.div_ceil(bucket_size) * height.div_ceil(bucket_size)
}

/// Pick a bucket size that gives every worker several panels to claim.
///
/// Starts at [`DEFAULT_BUCKET_SIZE`] and halves until there are at least four
/// panels per worker or [`MIN_BUCKET_SIZE`] is reached.
pub fn bucket_size_for(width: u32, height: u32, workers: usize) -> u32 {
    let wanted = (workers as u32).saturating_mul(4);
    let mut size = DEFAULT_BUCKET_SIZE;
    while size > MIN_BUCKET_SIZE && panel_count(width, height, size) < wanted {
        size /= 2;
    }
    size
}

/// The panel grid for an image cut into `bucket_size` buckets.
pub fn panel_layout(width: u32, height: u32, bucket_size: u32) -> PanelLayout {
    PanelLayout {
        panels_x: width.div_ceil(bucket_size),
        panels_y: height.div_ceil(bucket_size),
        size_x: bucket_size.min(width),
        size_y: bucket_size.min(height),
    }
}

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Central buckets are claimed first so the middle of the image finishes
/// early.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    buckets.sort_by(|a, b| {
        let a_center_x = a.x as f32 + a.width as f32 / 2.0;
        let a_center_y = a.y as f32 + a.height as f32 / 2.0;
        let b_center_x = b.x as f32 + b.width as f32 / 2.0;
        let b_center_y = b.y as f32 + b.height as f32 / 2.0;

        let a_dist = (a_center_x - center_x).powi(2) + (a_center_y - center_y).powi(2);
        let b_dist = (b_center_x - center_x).powi(2) + (b_center_y - center_y).powi(2);

        a_dist.partial_cmp(&b_dist).unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Seed for the generator of pixel (x, y).
///
/// A SplitMix64 finaliser over the render seed and the pixel position.
pub fn pixel_seed(seed: u64, x: u32, y: u32) -> u64 {
    let mut z = seed ^ ((y as u64) << 32 | x as u64);
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// 8-bit pixels in row-major order within the bucket
    pub pixels: Vec<[u8; 3]>,
}

/// Render a single bucket.
///
/// Each pixel averages `config.samples_per_pixel` samples. A non-finite
/// sample is logged and counted as black. The first sampler error aborts
/// the bucket.
pub fn render_bucket<F>(
    bucket: &Bucket,
    config: &RenderConfig,
    progress: &RenderProgress,
    sampler: &F,
) -> RenderResult<BucketResult>
where
    F: Fn(u32, u32, &mut StdRng) -> RenderResult<Color> + Sync,
{
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    let samples = config.samples_per_pixel;

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let x = bucket.x + local_x;
            let y = bucket.y + local_y;
            let mut rng = StdRng::seed_from_u64(pixel_seed(config.seed, x, y));

            let mut sum = Color::ZERO;
            for _ in 0..samples {
                let sample = sampler(x, y, &mut rng)?;
                if sample.is_finite() {
                    sum += sample;
                } else {
                    warn!("Non-finite sample {} at pixel ({}, {})", sample, x, y);
                }
            }
            pixels.push(color_to_rgb(sum / samples as f32, config.exposure));
        }
        progress.add_pixels(bucket.width as u64);
    }
    progress.panel_done();

    Ok(BucketResult {
        bucket: *bucket,
        pixels,
    })
}
