//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::{in_range, Geometry, Hit};
use glint_math::{Ray, Vec3};

/// A triangle primitive.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// Vertices
    a: Vec3,
    b: Vec3,
    c: Vec3,
    /// Pre-computed face normal (unit length, counter-clockwise winding)
    normal: Vec3,
}

/// Result of the Möller-Trumbore test: distance and barycentric (u, v).
struct Solution {
    distance: f32,
    u: f32,
    v: f32,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self { a, b, c, normal }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Barycentric coordinates `(u, v)` of the hit point, if the ray hits.
    ///
    /// `u` weights vertex `b` and `v` weights vertex `c`.
    pub fn barycentric(&self, ray: &Ray, epsilon: f32) -> Option<(f32, f32)> {
        self.solve(ray, epsilon).map(|s| (s.u, s.v))
    }

    fn solve(&self, ray: &Ray, epsilon: f32) -> Option<Solution> {
        let direction = ray.unit_direction();
        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;

        let h = direction.cross(edge2);
        let determinant = edge1.dot(h);

        // Ray is parallel to the triangle's plane
        if determinant > -epsilon && determinant < epsilon {
            return None;
        }
        let inv_determinant = 1.0 / determinant;

        let t = ray.origin() - self.a;
        let u = t.dot(h) * inv_determinant;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = t.cross(edge1);
        let v = direction.dot(q) * inv_determinant;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let distance = edge2.dot(q) * inv_determinant;
        in_range(distance, epsilon, ray).then_some(Solution { distance, u, v })
    }
}

impl Geometry for Triangle {
    fn intersects(&self, ray: &Ray, epsilon: f32) -> Option<Hit> {
        let solution = self.solve(ray, epsilon)?;
        Some(Hit::new(ray, solution.distance, self.normal))
    }

    fn occludes(&self, ray: &Ray, epsilon: f32) -> bool {
        self.solve(ray, epsilon).is_some()
    }
}
