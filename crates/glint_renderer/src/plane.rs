//! Infinite plane primitive.

use crate::hittable::{in_range, Geometry, Hit};
use glint_math::{Ray, Vec3};

/// An infinite plane through `point` facing `normal`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    fn root(&self, ray: &Ray, epsilon: f32) -> Option<f32> {
        let direction = ray.unit_direction();
        let denominator = direction.dot(self.normal);
        // Parallel (or degenerate) rays never hit
        if denominator.abs() <= epsilon {
            return None;
        }
        let distance = (self.point - ray.origin()).dot(self.normal) / denominator;
        in_range(distance, epsilon, ray).then_some(distance)
    }
}

impl Geometry for Plane {
    fn intersects(&self, ray: &Ray, epsilon: f32) -> Option<Hit> {
        let distance = self.root(ray, epsilon)?;
        Some(Hit::new(ray, distance, self.normal))
    }

    fn occludes(&self, ray: &Ray, epsilon: f32) -> bool {
        self.root(ray, epsilon).is_some()
    }
}
