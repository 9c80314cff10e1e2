/// A range of real values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Distances a ray accepts hits at: past `epsilon`, up to its extent.
    pub fn along(ray: &crate::Ray, epsilon: f32) -> Self {
        Self::new(epsilon, ray.extent)
    }

    /// Returns true if x is in (min, max]. NaN is never admitted.
    pub fn admits(&self, x: f32) -> bool {
        self.min < x && x <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    ///
    /// NaN is mapped to `min`.
    pub fn clamp(&self, x: f32) -> f32 {
        if x.is_nan() {
            return self.min;
        }
        x.clamp(self.min, self.max)
    }

    /// The displayable range of a colour channel.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
