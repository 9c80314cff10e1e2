//! Geometry trait and the geometric hit record.

use glint_math::{Interval, Ray, Vec3};

/// Record of a ray-geometry intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance from the ray origin along the unit direction (always > epsilon)
    pub distance: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Outward geometric normal (unit length)
    pub normal: Vec3,
    /// Whether the ray arrived against the outward normal. Tangent rays
    /// count as arriving from the front.
    pub front_face: bool,
}

impl Hit {
    /// Build a hit, working out which face the ray struck.
    pub fn new(ray: &Ray, distance: f32, outward_normal: Vec3) -> Self {
        Self {
            distance,
            point: ray.at(distance),
            normal: outward_normal,
            front_face: ray.direction().dot(outward_normal) <= 0.0,
        }
    }

    /// The normal on the side the ray came from.
    pub fn facing_normal(&self) -> Vec3 {
        if self.front_face {
            self.normal
        } else {
            -self.normal
        }
    }
}

/// Trait for shapes that can be tested against rays.
pub trait Geometry: Send + Sync {
    /// Find the nearest forward intersection with the ray.
    ///
    /// Hits at or closer than `epsilon`, or beyond `ray.extent`, are not
    /// reported.
    fn intersects(&self, ray: &Ray, epsilon: f32) -> Option<Hit>;

    /// Check whether the ray is blocked by this shape.
    ///
    /// Must agree with `intersects(ray, epsilon).is_some()`, but is free to
    /// skip computing the hit point and normal.
    fn occludes(&self, ray: &Ray, epsilon: f32) -> bool {
        self.intersects(ray, epsilon).is_some()
    }
}

/// Whether a root along the ray lies in the accepted range `(epsilon, extent]`.
#[inline]
pub(crate) fn in_range(distance: f32, epsilon: f32, ray: &Ray) -> bool {
    distance.is_finite() && Interval::along(ray, epsilon).admits(distance)
}

/// Seeded ray queries covering degenerate and axis-aligned directions,
/// segments, and a zero epsilon. Each shape checks `occludes` against
/// `intersects` over these.
#[cfg(test)]
pub(crate) fn sample_queries(seed: u64, count: usize) -> Vec<(Ray, f32)> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const AXES: [Vec3; 6] = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
    const EPSILONS: [f32; 4] = [0.0, 1e-5, 1e-4, 1e-2];

    let mut rng = StdRng::seed_from_u64(seed);
    let point = |rng: &mut StdRng, size: f32| {
        Vec3::new(
            rng.gen_range(-size..size),
            rng.gen_range(-size..size),
            rng.gen_range(-size..size),
        )
    };

    (0..count)
        .map(|_| {
            let origin = point(&mut rng, 5.0);
            let direction = match rng.gen_range(0..6) {
                0 => Vec3::ZERO,
                1 => AXES[rng.gen_range(0..AXES.len())],
                // Aimed near the origin so plenty of queries hit
                2 | 3 => point(&mut rng, 1.0) - origin,
                _ => point(&mut rng, 1.0),
            };
            let ray = if rng.gen_bool(0.5) {
                Ray::new(origin, direction)
            } else {
                let length: f32 = rng.gen_range(0.1..10.0);
                Ray::between(origin, origin + direction.normalize_or_zero() * length)
            };
            (ray, EPSILONS[rng.gen_range(0..EPSILONS.len())])
        })
        .collect()
}
