//! Glint Renderer - CPU ray tracing
//!
//! A Whitted-style ray tracer: surfaces made of shading layers, point and
//! ambient lights with hard shadows, mirror reflection, and a bucket
//! scheduler that spreads each frame over a pool of worker threads.

mod bucket;
mod camera;
mod color;
mod error;
mod film;
mod hittable;
mod light;
mod plane;
mod progress;
mod renderer;
mod scene;
mod shading;
mod sphere;
mod surface;
mod triangle;

pub use bucket::{
    bucket_size_for, generate_buckets, pixel_seed, render_bucket, Bucket, BucketResult,
    DEFAULT_BUCKET_SIZE, MIN_BUCKET_SIZE,
};
pub use camera::{Camera, Projection};
pub use color::Hsl;
pub use error::{RenderError, RenderResult};
pub use film::{color_to_rgb, Film};
pub use hittable::{Geometry, Hit};
pub use light::Light;
pub use plane::Plane;
pub use progress::{PanelLayout, ProgressSnapshot, RenderProgress, RenderState};
pub use renderer::{render, render_panels, RenderConfig};
pub use scene::{Scene, DEFAULT_MAX_DEPTH};
pub use shading::{Color, Emissive, Gloss, Matte, Reflective, ShadingLayer};
pub use sphere::{Position, Sphere};
pub use surface::{Intersection, Surface, SurfaceId};
pub use triangle::Triangle;

/// Re-export common math types from glint_math
pub use glint_math::{Interval, Ray, Transform, Vec3};
