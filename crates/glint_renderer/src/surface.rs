//! Surfaces: one piece of geometry plus an ordered stack of shading layers.

use std::fmt;

use crate::error::{RenderError, RenderResult};
use crate::hittable::{Geometry, Hit};
use crate::scene::Scene;
use crate::shading::{Color, ShadingLayer};
use glint_math::Ray;

/// Index of a surface in its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub usize);

/// A hit on a particular surface of a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub hit: Hit,
    /// Which surface was hit; its layers are looked up through the scene.
    pub surface: SurfaceId,
    /// Tolerance the hit was found with, reused for secondary rays.
    pub epsilon: f32,
}

/// Geometry bound to the shading layers that colour it.
pub struct Surface {
    geometry: Box<dyn Geometry>,
    layers: Vec<Box<dyn ShadingLayer>>,
}

impl Surface {
    /// Create a surface, checking every layer's parameters.
    pub fn new(
        geometry: impl Geometry + 'static,
        layers: Vec<Box<dyn ShadingLayer>>,
    ) -> RenderResult<Self> {
        if layers.is_empty() {
            return Err(RenderError::InvalidSurface(
                "a surface needs at least one shading layer".to_string(),
            ));
        }
        for layer in &layers {
            layer.validate().map_err(|reason| {
                RenderError::InvalidSurface(format!("{}: {}", layer.name(), reason))
            })?;
        }
        Ok(Self {
            geometry: Box::new(geometry),
            layers,
        })
    }

    pub fn layers(&self) -> &[Box<dyn ShadingLayer>] {
        &self.layers
    }

    /// Intersect the geometry. Shading layers play no part.
    pub fn intersects(&self, ray: &Ray, epsilon: f32) -> Option<Hit> {
        self.geometry.intersects(ray, epsilon)
    }

    pub fn occludes(&self, ray: &Ray, epsilon: f32) -> bool {
        self.geometry.occludes(ray, epsilon)
    }

    /// Sum of every layer's response to one light.
    pub fn interaction(
        &self,
        observer: &Ray,
        light: Option<&Ray>,
        intersection: &Intersection,
        incident: Color,
        scene: &Scene,
    ) -> RenderResult<Color> {
        self.layers.iter().try_fold(Color::ZERO, |total, layer| {
            Ok(total + layer.interaction(observer, light, intersection, incident, scene)?)
        })
    }

    /// Sum of every layer's emitted light.
    pub fn emission(
        &self,
        observer: &Ray,
        intersection: &Intersection,
        scene: &Scene,
    ) -> RenderResult<Color> {
        self.layers.iter().try_fold(Color::ZERO, |total, layer| {
            Ok(total + layer.emission(observer, intersection, scene)?)
        })
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}
