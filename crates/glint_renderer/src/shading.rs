//! Shading layers that describe how a surface responds to light.
//!
//! A surface stacks any number of layers; the colour it shows is the sum of
//! what each layer contributes.

use std::fmt;

use crate::error::{RenderError, RenderResult};
use crate::scene::Scene;
use crate::surface::Intersection;
use glint_math::{Ray, Vec3};

/// Color type alias (linear RGB, nominally 0-1 but never clamped here)
pub type Color = Vec3;

/// One physical contribution to the colour of a surface.
///
/// Each layer owns its parameters. Implementations must be pure: the same
/// inputs always give the same colour.
pub trait ShadingLayer: Send + Sync + fmt::Debug {
    /// Short name used in error messages.
    fn name(&self) -> &'static str;

    /// Check the layer's parameters when the surface is built.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Light reflected towards `observer` from one light source.
    ///
    /// `light` is the ray from the hit point towards the light, or `None`
    /// for non-directional (ambient) light. `incident` is the colour
    /// arriving from that light.
    fn interaction(
        &self,
        _observer: &Ray,
        _light: Option<&Ray>,
        _intersection: &Intersection,
        _incident: Color,
        _scene: &Scene,
    ) -> RenderResult<Color> {
        Ok(Color::ZERO)
    }

    /// Light leaving the surface towards `observer` that does not come from
    /// a light source.
    fn emission(
        &self,
        _observer: &Ray,
        _intersection: &Intersection,
        _scene: &Scene,
    ) -> RenderResult<Color> {
        Ok(Color::ZERO)
    }
}

/// Diffuse (Lambertian) reflection.
#[derive(Debug, Clone, Copy)]
pub struct Matte {
    color: Color,
}

impl Matte {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl ShadingLayer for Matte {
    fn name(&self) -> &'static str {
        "matte"
    }

    fn validate(&self) -> Result<(), String> {
        check_color("matte colour", self.color)
    }

    fn interaction(
        &self,
        _observer: &Ray,
        light: Option<&Ray>,
        intersection: &Intersection,
        incident: Color,
        _scene: &Scene,
    ) -> RenderResult<Color> {
        let Some(light) = light else {
            return Ok(self.color * incident);
        };
        let normal = intersection.hit.facing_normal();
        let cos_theta = normal.dot(light.unit_direction()).max(0.0);
        Ok(self.color * incident * cos_theta)
    }
}

/// Phong specular highlight.
#[derive(Debug, Clone, Copy)]
pub struct Gloss {
    exponent: f32,
}

impl Gloss {
    /// Higher exponents give smaller, sharper highlights.
    pub fn new(exponent: f32) -> Self {
        Self { exponent }
    }
}

impl ShadingLayer for Gloss {
    fn name(&self) -> &'static str {
        "gloss"
    }

    fn validate(&self) -> Result<(), String> {
        if self.exponent.is_finite() && self.exponent > 0.0 {
            Ok(())
        } else {
            Err(format!("gloss exponent must be positive, got {}", self.exponent))
        }
    }

    fn interaction(
        &self,
        observer: &Ray,
        light: Option<&Ray>,
        intersection: &Intersection,
        incident: Color,
        _scene: &Scene,
    ) -> RenderResult<Color> {
        // Ambient light has no direction to reflect
        let Some(light) = light else {
            return Ok(Color::ZERO);
        };
        let normal = intersection.hit.facing_normal();
        let to_light = light.unit_direction();
        if normal.dot(to_light) <= 0.0 {
            return Ok(Color::ZERO);
        }
        let reflected = reflect(-to_light, normal);
        let to_observer = -observer.unit_direction();
        let highlight = reflected.dot(to_observer).max(0.0).powf(self.exponent);
        Ok(incident * highlight)
    }
}

/// Perfect mirror reflection of the rest of the scene.
#[derive(Debug, Clone, Copy)]
pub struct Reflective {
    reflectance: Color,
}

impl Reflective {
    pub fn new(reflectance: Color) -> Self {
        Self { reflectance }
    }
}

impl ShadingLayer for Reflective {
    fn name(&self) -> &'static str {
        "reflective"
    }

    fn validate(&self) -> Result<(), String> {
        check_color("reflectance", self.reflectance)
    }

    fn emission(
        &self,
        observer: &Ray,
        intersection: &Intersection,
        scene: &Scene,
    ) -> RenderResult<Color> {
        let hit = &intersection.hit;
        let epsilon = intersection.epsilon;
        // Grazing hits can round to a slightly positive cosine; only a ray
        // clearly leaving through the surface started inside it.
        if observer.unit_direction().dot(hit.normal) > epsilon {
            return Err(RenderError::Unsupported {
                what: self.name(),
                reason: format!(
                    "ray reached the inside of a mirror at {:?}; transmission is not modelled",
                    hit.point
                ),
            });
        }
        let direction = reflect(observer.unit_direction(), hit.normal);
        let bounced = observer.bounce(hit.point + hit.normal * epsilon, direction);
        let radiance = scene.trace(&bounced, epsilon)?;
        Ok(self.reflectance * radiance)
    }
}

/// Light emitted by the surface itself.
#[derive(Debug, Clone, Copy)]
pub struct Emissive {
    color: Color,
}

impl Emissive {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl ShadingLayer for Emissive {
    fn name(&self) -> &'static str {
        "emissive"
    }

    fn validate(&self) -> Result<(), String> {
        check_color("emission colour", self.color)
    }

    fn emission(
        &self,
        _observer: &Ray,
        _intersection: &Intersection,
        _scene: &Scene,
    ) -> RenderResult<Color> {
        Ok(self.color)
    }
}

/// Reflect a vector about a normal.
#[inline]
pub(crate) fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

fn check_color(what: &str, color: Color) -> Result<(), String> {
    if color.is_finite() && color.min_element() >= 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be finite and non-negative, got {:?}", what, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Hit;
    use crate::light::Light;
    use crate::sphere::Sphere;
    use crate::surface::{Surface, SurfaceId};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPSILON: f32 = 1e-4;

    fn mirror_sphere_scene(background: Color) -> Scene {
        let mut scene = Scene::new(background).with_light(Light::Ambient(Color::ONE));
        let layers: Vec<Box<dyn ShadingLayer>> = vec![Box::new(Reflective::new(Color::splat(0.5)))];
        scene.add(Surface::new(Sphere::unit(), layers).unwrap());
        scene
    }

    fn facing_hit() -> (Ray, Intersection) {
        let observer = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let hit = Hit::new(&observer, 4.0, -Vec3::Z);
        let intersection = Intersection {
            hit,
            surface: SurfaceId(0),
            epsilon: EPSILON,
        };
        (observer, intersection)
    }

    #[test]
    fn test_matte_ambient_and_directional() {
        let scene = Scene::default();
        let (observer, intersection) = facing_hit();
        let matte = Matte::new(Color::new(0.5, 1.0, 0.25));

        let ambient = matte
            .interaction(&observer, None, &intersection, Color::splat(0.2), &scene)
            .unwrap();
        assert!((ambient - Color::new(0.1, 0.2, 0.05)).length() < 1e-6);

        // Light straight along the normal
        let light = Ray::between(intersection.hit.point, Vec3::new(0.0, 0.0, -10.0));
        let lit = matte
            .interaction(&observer, Some(&light), &intersection, Color::ONE, &scene)
            .unwrap();
        assert!((lit - Color::new(0.5, 1.0, 0.25)).length() < 1e-5);

        // Light behind the surface
        let behind = Ray::between(intersection.hit.point, Vec3::new(0.0, 0.0, 10.0));
        let dark = matte
            .interaction(&observer, Some(&behind), &intersection, Color::ONE, &scene)
            .unwrap();
        assert_eq!(dark, Color::ZERO);
    }

    #[test]
    fn test_gloss_highlight_peaks_at_mirror_direction() {
        let scene = Scene::default();
        let (observer, intersection) = facing_hit();
        let gloss = Gloss::new(10.0);

        let mirror = Ray::between(intersection.hit.point, Vec3::new(0.0, 0.0, -10.0));
        let peak = gloss
            .interaction(&observer, Some(&mirror), &intersection, Color::ONE, &scene)
            .unwrap();
        assert!((peak - Color::ONE).length() < 1e-4);

        let oblique = Ray::between(intersection.hit.point, Vec3::new(5.0, 0.0, -2.0));
        let dimmer = gloss
            .interaction(&observer, Some(&oblique), &intersection, Color::ONE, &scene)
            .unwrap();
        assert!(dimmer.x < peak.x);

        let ambient = gloss
            .interaction(&observer, None, &intersection, Color::ONE, &scene)
            .unwrap();
        assert_eq!(ambient, Color::ZERO);
    }

    #[test]
    fn test_reflective_sees_background() {
        let scene = Scene::default().with_background(Color::new(0.2, 0.4, 0.6));
        let (observer, intersection) = facing_hit();
        let mirror = Reflective::new(Color::splat(0.5));

        let color = mirror.emission(&observer, &intersection, &scene).unwrap();
        assert!((color - Color::new(0.1, 0.2, 0.3)).length() < 1e-6);
    }

    #[test]
    fn test_reflective_inside_is_unsupported() {
        let scene = Scene::default();
        let observer = Ray::new(Vec3::ZERO, Vec3::Z);
        let intersection = Intersection {
            hit: Hit::new(&observer, 1.0, Vec3::Z),
            surface: SurfaceId(0),
            epsilon: EPSILON,
        };

        let result = Reflective::new(Color::ONE).emission(&observer, &intersection, &scene);
        assert!(matches!(
            result,
            Err(RenderError::Unsupported { what: "reflective", .. })
        ));
    }

    #[test]
    fn test_tangent_ray_on_mirror_sees_background() {
        let background = Color::new(0.2, 0.4, 0.6);
        let scene = mirror_sphere_scene(background);
        // Touches the unit sphere at (0, 1, 0)
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);

        let hit = scene.nearest(&ray, EPSILON).unwrap();
        assert!(hit.hit.front_face);
        let color = scene.trace(&ray, EPSILON).unwrap();
        assert!((color - background * 0.5).length() < 1e-5);
    }

    #[test]
    fn test_grazing_rays_on_mirror_never_fail() {
        let scene = mirror_sphere_scene(Color::ONE);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..5000 {
            let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            let radius: f32 = rng.gen_range(0.99..1.0);
            let origin = Vec3::new(radius * angle.cos(), radius * angle.sin(), -5.0);
            let ray = Ray::new(origin, Vec3::Z);

            let result = scene.trace(&ray, EPSILON);
            assert!(result.is_ok(), "ray from {:?} failed: {:?}", origin, result);
        }
    }

    #[test]
    fn test_validation() {
        assert!(Matte::new(Color::ONE).validate().is_ok());
        assert!(Matte::new(Color::new(-0.1, 0.0, 0.0)).validate().is_err());
        assert!(Emissive::new(Color::new(f32::NAN, 0.0, 0.0)).validate().is_err());
        assert!(Gloss::new(0.0).validate().is_err());
        assert!(Gloss::new(8.0).validate().is_ok());
    }
}
