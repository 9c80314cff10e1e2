//! Errors raised while setting up or running a render.

use thiserror::Error;

/// Errors that can occur while building a scene or rendering it.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("At least one worker thread is required")]
    NoWorkers,

    #[error("At least one sample per pixel is required")]
    NoSamples,

    #[error("Invalid render config: {0}")]
    InvalidConfig(String),

    #[error("Invalid surface: {0}")]
    InvalidSurface(String),

    /// A physical case the renderer recognizes but does not model.
    #[error("Unsupported case in {what}: {reason}")]
    Unsupported { what: &'static str, reason: String },

    #[error("Could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Render worker panicked: {0}")]
    WorkerPanicked(String),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
