use crate::Vec3;

/// A ray in 3D space.
///
/// Rays are the query type for all geometry - a half-line (or, for shadow
/// rays, a segment) starting at `origin` and travelling along `direction`.
/// The direction does not have to be unit length; intersection routines
/// normalize it and report distances along the unit direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Animation frame this ray was generated for, if any.
    pub frame: Option<f32>,
    /// Farthest distance (along the unit direction) at which a hit counts.
    pub extent: f32,
    /// Number of reflections between the camera and this ray.
    pub depth: u32,
}

impl Ray {
    /// Create a new unbounded ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            frame: None,
            extent: f32::INFINITY,
            depth: 0,
        }
    }

    /// Create a segment ray from `from` towards `to`.
    ///
    /// Hits beyond `to` are ignored, which is what shadow rays need.
    pub fn between(from: Vec3, to: Vec3) -> Self {
        let offset = to - from;
        Self {
            origin: from,
            direction: offset,
            frame: None,
            extent: offset.length(),
            depth: 0,
        }
    }

    /// Stamp the ray with an animation frame.
    pub fn at_frame(mut self, frame: Option<f32>) -> Self {
        self.frame = frame;
        self
    }

    /// Build a secondary ray that continues this ray's path.
    ///
    /// The frame is kept and the bounce depth incremented.
    pub fn bounce(&self, origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            frame: self.frame,
            extent: f32::INFINITY,
            depth: self.depth + 1,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// The direction scaled to unit length.
    ///
    /// Zero-length directions stay zero rather than becoming NaN.
    #[inline]
    pub fn unit_direction(&self) -> Vec3 {
        self.direction.normalize_or_zero()
    }

    /// Get the point at `distance` along the unit direction.
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.unit_direction() * distance
    }
}
