//! Sphere primitive, optionally moving over the frames of an animation.

use std::fmt;
use std::sync::Arc;

use crate::hittable::{in_range, Geometry, Hit};
use glint_math::{Ray, Vec3};

/// Where a shape is placed, possibly as a function of the animation frame.
#[derive(Clone)]
pub enum Position {
    Fixed(Vec3),
    Animated(Arc<dyn Fn(f32) -> Vec3 + Send + Sync>),
}

impl Position {
    /// Create an animated position from a frame -> location function.
    pub fn animated<F>(path: F) -> Self
    where
        F: Fn(f32) -> Vec3 + Send + Sync + 'static,
    {
        Position::Animated(Arc::new(path))
    }

    /// Location at the given frame. Rays without a frame see frame 0.
    pub fn at(&self, frame: Option<f32>) -> Vec3 {
        match self {
            Position::Fixed(p) => *p,
            Position::Animated(path) => path(frame.unwrap_or(0.0)),
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Fixed(p) => f.debug_tuple("Fixed").field(p).finish(),
            Position::Animated(_) => f.write_str("Animated(..)"),
        }
    }
}

impl From<Vec3> for Position {
    fn from(p: Vec3) -> Self {
        Position::Fixed(p)
    }
}

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Position,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: impl Into<Position>, radius: f32) -> Self {
        Self {
            center: center.into(),
            radius: radius.max(0.0),
        }
    }

    /// The unit sphere at the origin.
    pub fn unit() -> Self {
        Self::new(Vec3::ZERO, 1.0)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn center_at(&self, frame: Option<f32>) -> Vec3 {
        self.center.at(frame)
    }

    /// Nearest accepted root of the ray/sphere quadratic, with the centre used.
    fn nearest_root(&self, ray: &Ray, epsilon: f32) -> Option<(f32, Vec3)> {
        let direction = ray.unit_direction();
        if direction == Vec3::ZERO {
            return None;
        }
        let center = self.center.at(ray.frame);
        let oc = center - ray.origin();
        let h = direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        let near = h - sqrtd;
        if in_range(near, epsilon, ray) {
            return Some((near, center));
        }
        let far = h + sqrtd;
        if in_range(far, epsilon, ray) {
            return Some((far, center));
        }
        None
    }
}

impl Geometry for Sphere {
    fn intersects(&self, ray: &Ray, epsilon: f32) -> Option<Hit> {
        let (distance, center) = self.nearest_root(ray, epsilon)?;
        let point = ray.at(distance);
        let outward_normal = if self.radius > 0.0 {
            (point - center) / self.radius
        } else {
            -ray.unit_direction()
        };
        Some(Hit::new(ray, distance, outward_normal))
    }

    fn occludes(&self, ray: &Ray, epsilon: f32) -> bool {
        self.nearest_root(ray, epsilon).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_sphere_hit_near_side() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersects(&ray, EPSILON).unwrap();
        assert!((hit.distance - 0.5).abs() < 0.001);
        assert!(hit.front_face);
        assert!((hit.normal - Vec3::Z).length() < 0.001);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.intersects(&ray, EPSILON).is_none());

        // Sphere entirely behind the origin
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(sphere.intersects(&ray, EPSILON).is_none());
    }

    #[test]
    fn test_rays_missing_the_sphere_report_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = Vec3::new(1.0, -2.0, 3.0);
        let sphere = Sphere::new(center, 1.5);

        for _ in 0..200 {
            let origin = Vec3::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            );
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let ray = Ray::new(origin, direction);
            let d = ray.unit_direction();
            let to_center = center - origin;
            let line_distance = (to_center - d * to_center.dot(d)).length();
            if line_distance > 1.5 + 1e-3 {
                assert!(sphere.intersects(&ray, EPSILON).is_none());
                assert!(!sphere.occludes(&ray, EPSILON));
            }
        }
    }

    #[test]
    fn test_rays_through_center_hit_near_surface() {
        let mut rng = StdRng::seed_from_u64(11);
        let center = Vec3::new(0.5, 0.25, 2.0);
        let sphere = Sphere::new(center, 2.0);

        for _ in 0..100 {
            let origin = Vec3::new(
                rng.gen_range(-30.0..30.0),
                rng.gen_range(-30.0..30.0),
                rng.gen_range(-30.0..30.0),
            );
            if (origin - center).length() < 3.0 {
                continue;
            }
            // Deliberately not unit length
            let ray = Ray::new(origin, (center - origin) * 3.0);
            let hit = sphere.intersects(&ray, EPSILON).unwrap();
            let expected = (center - origin).length() - 2.0;
            assert!(
                (hit.distance - expected).abs() < 1e-3,
                "distance {} expected {}",
                hit.distance,
                expected
            );
        }
    }

    #[test]
    fn test_from_inside_hits_far_side() {
        let sphere = Sphere::unit();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = sphere.intersects(&ray, EPSILON).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-5);
        assert!(!hit.front_face);
    }

    #[test]
    fn test_tangent_ray_is_a_hit() {
        let sphere = Sphere::unit();
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);

        let hit = sphere.intersects(&ray, EPSILON).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_segment_stops_before_sphere() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0);
        let short = Ray::between(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        let long = Ray::between(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0));

        assert!(!sphere.occludes(&short, EPSILON));
        assert!(sphere.occludes(&long, EPSILON));
    }

    #[test]
    fn test_animated_center_follows_ray_frame() {
        let sphere = Sphere::new(Position::animated(|frame| Vec3::new(frame, 0.0, 10.0)), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(sphere.intersects(&ray.at_frame(Some(0.0)), EPSILON).is_some());
        assert!(sphere.intersects(&ray, EPSILON).is_some());
        assert!(sphere.intersects(&ray.at_frame(Some(3.0)), EPSILON).is_none());

        let moved = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::Z).at_frame(Some(3.0));
        assert!(sphere.intersects(&moved, EPSILON).is_some());
    }

    #[test]
    fn test_occludes_agrees_with_intersects() {
        let shapes = [
            Sphere::new(Vec3::new(0.5, -0.25, 0.2), 1.5),
            Sphere::new(Vec3::new(-1.0, 1.0, 0.0), 0.0),
            Sphere::new(Position::animated(|frame| Vec3::new(0.0, frame, 0.0)), 1.0),
        ];
        let mut hits = 0;

        for (ray, epsilon) in crate::hittable::sample_queries(21, 2000) {
            for sphere in &shapes {
                let hit = sphere.intersects(&ray, epsilon);
                assert_eq!(sphere.occludes(&ray, epsilon), hit.is_some(), "{:?} {}", ray, epsilon);
                hits += hit.is_some() as usize;
            }
        }
        assert!(hits > 100, "only {} hits", hits);
    }
}
