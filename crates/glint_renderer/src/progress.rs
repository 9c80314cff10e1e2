//! Progress tracking for a render in flight.
//!
//! Workers bump atomic counters as they finish pixels and panels; a monitor
//! on another thread polls [`RenderProgress::snapshot`] whenever it likes.

use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Phase of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderState {
    Idle,
    Dispatching,
    Running,
    Aggregating,
    Done,
    Failed,
}

impl RenderState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => RenderState::Dispatching,
            2 => RenderState::Running,
            3 => RenderState::Aggregating,
            4 => RenderState::Done,
            5 => RenderState::Failed,
            _ => RenderState::Idle,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            RenderState::Idle => 0,
            RenderState::Dispatching => 1,
            RenderState::Running => 2,
            RenderState::Aggregating => 3,
            RenderState::Done => 4,
            RenderState::Failed => 5,
        }
    }
}

/// How the image was cut into panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelLayout {
    /// Panels across
    pub panels_x: u32,
    /// Panels down
    pub panels_y: u32,
    /// Nominal panel width in pixels (edge panels may be narrower)
    pub size_x: u32,
    /// Nominal panel height in pixels
    pub size_y: u32,
}

/// A point-in-time reading of a render's progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub state: RenderState,
    /// Pixels finished
    pub completed: u64,
    /// Pixels in the image
    pub total: u64,
    pub panels_completed: usize,
    pub panels_total: usize,
    pub layout: Option<PanelLayout>,
}

impl ProgressSnapshot {
    /// Completed fraction in [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, RenderState::Done | RenderState::Failed)
    }
}

/// Shared progress counters for one render at a time.
#[derive(Debug)]
pub struct RenderProgress {
    state: AtomicU8,
    completed: AtomicU64,
    total: AtomicU64,
    panels_completed: AtomicUsize,
    panels_total: AtomicUsize,
    layout: Mutex<Option<PanelLayout>>,
}

impl RenderProgress {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(RenderState::Idle.as_u8()),
            completed: AtomicU64::new(0),
            total: AtomicU64::new(0),
            panels_completed: AtomicUsize::new(0),
            panels_total: AtomicUsize::new(0),
            layout: Mutex::new(None),
        }
    }

    /// Clear everything back to `Idle`.
    pub fn reset(&self) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(0, Ordering::Relaxed);
        self.panels_completed.store(0, Ordering::Relaxed);
        self.panels_total.store(0, Ordering::Relaxed);
        *self.layout.lock().unwrap_or_else(PoisonError::into_inner) = None;
        self.set_state(RenderState::Idle);
    }

    /// Start tracking a new render.
    pub(crate) fn begin(&self, total_pixels: u64, total_panels: usize, layout: PanelLayout) {
        self.completed.store(0, Ordering::Relaxed);
        self.panels_completed.store(0, Ordering::Relaxed);
        self.total.store(total_pixels, Ordering::Relaxed);
        self.panels_total.store(total_panels, Ordering::Relaxed);
        *self.layout.lock().unwrap_or_else(PoisonError::into_inner) = Some(layout);
        self.set_state(RenderState::Dispatching);
    }

    pub(crate) fn set_state(&self, state: RenderState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }

    pub(crate) fn add_pixels(&self, count: u64) {
        self.completed.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn panel_done(&self) {
        self.panels_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn state(&self) -> RenderState {
        RenderState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            state: self.state(),
            completed: self.completed.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
            panels_completed: self.panels_completed.load(Ordering::Relaxed),
            panels_total: self.panels_total.load(Ordering::Relaxed),
            layout: *self.layout.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }
}

impl Default for RenderProgress {
    fn default() -> Self {
        Self::new()
    }
}
