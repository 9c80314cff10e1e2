// Affine transforms for placing cameras and geometry in world space.
//
// Both directions are kept so the inverse never has to be recomputed.

use glam::{Mat4, Vec3};

use crate::Ray;

/// An affine transform together with its inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub forward: Mat4,
    pub inverse: Mat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        forward: Mat4::IDENTITY,
        inverse: Mat4::IDENTITY,
    };

    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        let by = Vec3::new(x, y, z);
        Self {
            forward: Mat4::from_translation(by),
            inverse: Mat4::from_translation(-by),
        }
    }

    /// Rotation about the x axis, angle in radians.
    pub fn rotate_x(angle: f32) -> Self {
        Self {
            forward: Mat4::from_rotation_x(angle),
            inverse: Mat4::from_rotation_x(-angle),
        }
    }

    pub fn rotate_y(angle: f32) -> Self {
        Self {
            forward: Mat4::from_rotation_y(angle),
            inverse: Mat4::from_rotation_y(-angle),
        }
    }

    pub fn rotate_z(angle: f32) -> Self {
        Self {
            forward: Mat4::from_rotation_z(angle),
            inverse: Mat4::from_rotation_z(-angle),
        }
    }

    /// Non-uniform scale. A zero factor yields a non-invertible transform
    /// whose inverse is not meaningful.
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let by = Vec3::new(x, y, z);
        Self {
            forward: Mat4::from_scale(by),
            inverse: Mat4::from_scale(by.recip()),
        }
    }

    /// Compose: apply `self` first, then `next`.
    pub fn then(&self, next: &Transform) -> Transform {
        Transform {
            forward: next.forward * self.forward,
            inverse: self.inverse * next.inverse,
        }
    }

    pub fn inverted(&self) -> Transform {
        Transform {
            forward: self.inverse,
            inverse: self.forward,
        }
    }

    #[inline]
    pub fn point(&self, p: Vec3) -> Vec3 {
        self.forward.transform_point3(p)
    }

    /// Transform a direction (translation is ignored).
    #[inline]
    pub fn vector(&self, v: Vec3) -> Vec3 {
        self.forward.transform_vector3(v)
    }

    /// Transform a ray's origin and direction, keeping its other fields.
    pub fn ray(&self, ray: &Ray) -> Ray {
        Ray {
            origin: self.point(ray.origin),
            direction: self.vector(ray.direction),
            ..*ray
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
