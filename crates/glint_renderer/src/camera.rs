//! Camera for ray generation.
//!
//! The camera is set up once per frame and is read-only afterwards, so it is
//! shared between render workers. Randomness for anti-aliasing comes from the
//! caller, one generator per pixel.

use glint_math::{Ray, Transform, Vec3};
use rand::{Rng, RngCore};

/// How pixel offsets turn into rays in camera space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Parallel rays along +z, starting on the film plane.
    Orthographic,
    /// Rays from the camera centre through a film plane `focal_length` away.
    Pinhole { focal_length: f32 },
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Size of the film in world units
    focal_width: f32,
    focal_height: f32,

    projection: Projection,
    /// Largest sub-pixel offset, in pixels
    jitter: f32,
    /// Camera space -> world space
    transform: Transform,
}

impl Camera {
    /// Create an orthographic camera looking down +z from the origin.
    pub fn orthographic(focal_width: f32, focal_height: f32, width: u32, height: u32) -> Self {
        Self {
            image_width: width,
            image_height: height,
            focal_width,
            focal_height,
            projection: Projection::Orthographic,
            jitter: 0.0,
            transform: Transform::IDENTITY,
        }
    }

    /// Create a pinhole camera at the origin looking down +z.
    pub fn pinhole(
        focal_width: f32,
        focal_height: f32,
        width: u32,
        height: u32,
        focal_length: f32,
    ) -> Self {
        Self {
            projection: Projection::Pinhole { focal_length },
            ..Self::orthographic(focal_width, focal_height, width, height)
        }
    }

    /// Film size for an image, keeping square pixels.
    ///
    /// The shorter side of the film is `short_side`; the longer side is
    /// scaled by the aspect ratio.
    pub fn film_size(width: u32, height: u32, short_side: f32) -> (f32, f32) {
        let aspect = width as f32 / height.max(1) as f32;
        if width > height {
            (aspect * short_side, short_side)
        } else {
            (short_side, short_side / aspect)
        }
    }

    /// Set the anti-aliasing jitter radius in pixels.
    pub fn with_jitter(mut self, radius: f32) -> Self {
        self.jitter = radius.max(0.0);
        self
    }

    /// Push a transform; it is applied after any earlier ones.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = self.transform.then(&transform);
        self
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Generate the ray through pixel (x, y).
    ///
    /// With a random source the pixel position is jittered by up to the
    /// jitter radius. The frame, if any, is stamped on the ray so animated
    /// geometry is evaluated consistently.
    pub fn ray_for(
        &self,
        x: u32,
        y: u32,
        jitter: Option<&mut dyn RngCore>,
        frame: Option<f32>,
    ) -> Ray {
        let (jx, jy) = match jitter {
            Some(rng) if self.jitter > 0.0 => (
                rng.gen_range(-self.jitter..=self.jitter),
                rng.gen_range(-self.jitter..=self.jitter),
            ),
            _ => (0.0, 0.0),
        };

        let dx = ((x as f32 + 0.5 + jx) / self.image_width as f32 - 0.5) * self.focal_width;
        let dy = (0.5 - (y as f32 + 0.5 + jy) / self.image_height as f32) * self.focal_height;

        let local = match self.projection {
            Projection::Orthographic => Ray::new(Vec3::new(dx, dy, 0.0), Vec3::Z),
            Projection::Pinhole { focal_length } => {
                Ray::new(Vec3::ZERO, Vec3::new(dx, dy, focal_length))
            }
        };
        self.transform.ray(&local).at_frame(frame)
    }
}
