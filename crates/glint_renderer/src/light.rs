//! Light sources.
//!
//! Lights form a tree: a collection contributes the sum of its members, so
//! the scene can treat however many lights it has as a single light.

use crate::error::RenderResult;
use crate::scene::Scene;
use crate::shading::Color;
use crate::surface::Intersection;
use glint_math::{Ray, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Constant illumination from every direction, never shadowed.
    Ambient(Color),
    /// A point source, blocked by anything between it and the surface.
    Point { position: Vec3, color: Color },
    /// The sum of the contained lights.
    Collection(Vec<Light>),
}

impl Light {
    /// A light that contributes nothing.
    pub fn none() -> Self {
        Light::Collection(Vec::new())
    }

    pub fn point(position: Vec3, color: Color) -> Self {
        Light::Point { position, color }
    }

    /// Add a light. A non-collection light is first wrapped in a collection.
    pub fn push(&mut self, light: Light) {
        match self {
            Light::Collection(lights) => lights.push(light),
            other => {
                let existing = std::mem::replace(other, Light::none());
                *other = Light::Collection(vec![existing, light]);
            }
        }
    }

    /// Number of individual light sources.
    pub fn count(&self) -> usize {
        match self {
            Light::Collection(lights) => lights.iter().map(Light::count).sum(),
            _ => 1,
        }
    }

    /// Colour reflected towards `observer` at `intersection` from this light.
    pub fn illuminate(
        &self,
        scene: &Scene,
        observer: &Ray,
        intersection: &Intersection,
    ) -> RenderResult<Color> {
        match self {
            Light::Ambient(color) => {
                let surface = scene.surface(intersection.surface);
                surface.interaction(observer, None, intersection, *color, scene)
            }
            Light::Point { position, color } => {
                // Start just off the surface on the observer's side
                let origin = intersection.hit.point
                    + intersection.hit.facing_normal() * intersection.epsilon;
                let shadow = Ray::between(origin, *position).at_frame(observer.frame);
                if scene.occluded(&shadow, intersection.epsilon) {
                    return Ok(Color::ZERO);
                }
                let surface = scene.surface(intersection.surface);
                surface.interaction(observer, Some(&shadow), intersection, *color, scene)
            }
            Light::Collection(lights) => lights.iter().try_fold(Color::ZERO, |total, light| {
                Ok(total + light.illuminate(scene, observer, intersection)?)
            }),
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Light::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::Matte;
    use crate::sphere::Sphere;
    use crate::surface::Surface;
    use crate::triangle::Triangle;

    const EPSILON: f32 = 1e-4;

    fn lit_floor_scene() -> Scene {
        let mut scene = Scene::new(Color::ZERO);
        // Floor made of two triangles in the y=0 plane, facing up
        let corners = [
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(10.0, 0.0, -10.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(-10.0, 0.0, 10.0),
        ];
        for tri in [
            Triangle::new(corners[0], corners[3], corners[2]),
            Triangle::new(corners[0], corners[2], corners[1]),
        ] {
            scene.add(Surface::new(tri, vec![Box::new(Matte::new(Color::ONE))]).unwrap());
        }
        scene
    }

    fn floor_hit(scene: &Scene) -> (Ray, Intersection) {
        // Lands on (2, 0, -3), away from the shared diagonal
        let observer = Ray::new(Vec3::new(0.0, 5.0, -5.0), Vec3::new(2.0, -5.0, 2.0));
        let intersection = scene.nearest(&observer, EPSILON).unwrap();
        (observer, intersection)
    }

    #[test]
    fn test_empty_collection_is_dark() {
        let scene = lit_floor_scene();
        let (observer, intersection) = floor_hit(&scene);

        let color = Light::none().illuminate(&scene, &observer, &intersection).unwrap();
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_ambient_ignores_geometry() {
        let scene = lit_floor_scene();
        let (observer, intersection) = floor_hit(&scene);

        let color = Light::Ambient(Color::splat(0.25))
            .illuminate(&scene, &observer, &intersection)
            .unwrap();
        assert_eq!(color, Color::splat(0.25));
    }

    #[test]
    fn test_point_light_blocked_by_occluder() {
        let mut scene = lit_floor_scene();
        let (observer, intersection) = floor_hit(&scene);
        let light = Light::point(Vec3::new(0.0, 4.0, 0.0), Color::ONE);

        let lit = light.illuminate(&scene, &observer, &intersection).unwrap();
        assert!(lit.x > 0.0);

        scene.add(
            Surface::new(
                // Midway between the lit point and the light
                Sphere::new(Vec3::new(1.0, 2.0, -1.5), 0.5),
                vec![Box::new(Matte::new(Color::ONE))],
            )
            .unwrap(),
        );
        let shadowed = light.illuminate(&scene, &observer, &intersection).unwrap();
        assert_eq!(shadowed, Color::ZERO);
    }

    #[test]
    fn test_occluder_beyond_light_casts_no_shadow() {
        let mut scene = lit_floor_scene();
        let (observer, intersection) = floor_hit(&scene);
        let light = Light::point(Vec3::new(0.0, 4.0, 0.0), Color::ONE);
        scene.add(
            Surface::new(
                // On the shadow ray's line, but past the light
                Sphere::new(Vec3::new(-2.0, 8.0, 3.0), 1.0),
                vec![Box::new(Matte::new(Color::ONE))],
            )
            .unwrap(),
        );

        let lit = light.illuminate(&scene, &observer, &intersection).unwrap();
        assert!(lit.x > 0.0);
    }

    #[test]
    fn test_collection_order_does_not_matter() {
        let scene = lit_floor_scene();
        let (observer, intersection) = floor_hit(&scene);
        let a = Light::Ambient(Color::new(0.1, 0.05, 0.0));
        let b = Light::point(Vec3::new(3.0, 4.0, 1.0), Color::new(0.2, 0.4, 0.6));
        let c = Light::point(Vec3::new(-2.0, 6.0, -1.0), Color::new(0.7, 0.1, 0.3));

        let forward = Light::Collection(vec![a.clone(), b.clone(), c.clone()]);
        let backward = Light::Collection(vec![c, Light::Collection(vec![b, a])]);

        let x = forward.illuminate(&scene, &observer, &intersection).unwrap();
        let y = backward.illuminate(&scene, &observer, &intersection).unwrap();
        assert!((x - y).length() < 1e-5);
        assert_eq!(forward.count(), 3);
        assert_eq!(backward.count(), 3);
    }

    #[test]
    fn test_surface_facing_away_from_light_is_shadowed_by_itself() {
        let mut scene = Scene::new(Color::ZERO);
        scene.add(Surface::new(Sphere::unit(), vec![Box::new(Matte::new(Color::ONE))]).unwrap());
        let light = Light::point(Vec3::new(0.0, 0.0, 10.0), Color::ONE);

        let front = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let lit = scene.nearest(&front, EPSILON).unwrap();
        assert!(light.illuminate(&scene, &front, &lit).unwrap().x > 0.9);

        let back = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let dark = scene.nearest(&back, EPSILON).unwrap();
        assert_eq!(light.illuminate(&scene, &back, &dark).unwrap(), Color::ZERO);
    }

    #[test]
    fn test_push_wraps_single_light() {
        let mut light = Light::Ambient(Color::ONE);
        light.push(Light::point(Vec3::Y, Color::ONE));

        assert!(matches!(&light, Light::Collection(lights) if lights.len() == 2));
        assert_eq!(light.count(), 2);
    }
}
