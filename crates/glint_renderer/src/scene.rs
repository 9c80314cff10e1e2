//! The scene: surfaces, lights and a background, plus the tracing that turns
//! a camera ray into a colour.

use crate::error::RenderResult;
use crate::light::Light;
use crate::shading::Color;
use crate::surface::{Intersection, Surface, SurfaceId};
use glint_math::Ray;

/// Default limit on how many mirror bounces a ray may take.
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Everything a render needs to know about the world.
///
/// Surfaces live in an arena indexed by [`SurfaceId`]. The scene is not
/// modified while rendering, so it can be shared freely between workers.
#[derive(Debug)]
pub struct Scene {
    surfaces: Vec<Surface>,
    lights: Light,
    background: Color,
    max_depth: u32,
}

impl Scene {
    /// Create an empty, unlit scene.
    pub fn new(background: Color) -> Self {
        Self {
            surfaces: Vec::new(),
            lights: Light::none(),
            background,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Add a surface, returning its id.
    pub fn add(&mut self, surface: Surface) -> SurfaceId {
        self.surfaces.push(surface);
        SurfaceId(self.surfaces.len() - 1)
    }

    /// Look up a surface.
    ///
    /// # Panics
    ///
    /// If `id` did not come from this scene.
    pub fn surface(&self, id: SurfaceId) -> &Surface {
        &self.surfaces[id.0]
    }

    pub fn lights(&self) -> &Light {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut Light {
        &mut self.lights
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Nearest intersection over all surfaces.
    ///
    /// Exact ties go to the surface that was added first.
    pub fn nearest(&self, ray: &Ray, epsilon: f32) -> Option<Intersection> {
        let mut closest: Option<Intersection> = None;
        for (index, surface) in self.surfaces.iter().enumerate() {
            if let Some(hit) = surface.intersects(ray, epsilon) {
                if closest.map_or(true, |c| hit.distance < c.hit.distance) {
                    closest = Some(Intersection {
                        hit,
                        surface: SurfaceId(index),
                        epsilon,
                    });
                }
            }
        }
        closest
    }

    /// Whether any surface blocks the ray.
    pub fn occluded(&self, ray: &Ray, epsilon: f32) -> bool {
        self.surfaces.iter().any(|s| s.occludes(ray, epsilon))
    }

    /// Colour arriving along `ray`, before any clamping.
    pub fn trace(&self, ray: &Ray, epsilon: f32) -> RenderResult<Color> {
        if ray.depth > self.max_depth {
            return Ok(Color::ZERO);
        }
        let Some(intersection) = self.nearest(ray, epsilon) else {
            return Ok(self.background);
        };
        let lit = self.lights.illuminate(self, ray, &intersection)?;
        let emitted = self
            .surface(intersection.surface)
            .emission(ray, &intersection, self)?;
        Ok(lit + emitted)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::ZERO)
    }
}
