// Vector and matrix types come straight from glam
pub use glam::*;

// Ray tracing types built on them
mod interval;
mod ray;
mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::Transform;
