//! Duplication driver: offset policies and command entry points.
//!
//! Each entry point corresponds to one user-invoked command and runs in
//! exactly one document transaction:
//!
//! - [`copy_to_levels`] — one copy per selected level, offset by the
//!   level elevation minus the batch's lowest bound
//! - [`copy_by_step`] — repeated vertical copies at a fixed step,
//!   upward and/or downward
//! - [`copy_along_direction`] — repeated copies along a user-picked
//!   reference line
//!
//! The UI collaborators (level pickers, dialogs, progress bars) live in
//! the host add-in; they hand in plain parameter objects and an optional
//! [`Progress`] sink, which is polled between offset steps for
//! cancellation.

mod driver;
mod offsets;

pub use driver::{copy_along_direction, copy_and_reconnect, copy_by_step, copy_to_levels};
pub use offsets::{direction_offsets, level_offsets, step_offsets};

use crate::config::CopyDefaults;
use crate::geometry::{Line3, Vector3};
use crate::host::{ElementId, Level};

/// Parameters for a per-level copy.
#[derive(Debug, Clone)]
pub struct LevelCopy {
    /// Target levels, one copy per entry.
    pub levels: Vec<Level>,
}

/// Parameters for a fixed-step vertical copy.
#[derive(Debug, Clone, Copy)]
pub struct StepCopy {
    /// Step distance in internal length units.
    pub step: f64,
    /// Number of copies per enabled direction.
    pub count: u32,
    /// Copy upward.
    pub upward: bool,
    /// Copy downward.
    pub downward: bool,
}

impl StepCopy {
    /// Builds step parameters from the persisted command defaults.
    #[must_use]
    pub const fn from_defaults(defaults: &CopyDefaults) -> Self {
        Self {
            step: defaults.default_step,
            count: defaults.default_count,
            upward: defaults.upward,
            downward: defaults.downward,
        }
    }
}

/// Parameters for a copy along a picked reference direction.
#[derive(Debug, Clone, Copy)]
pub struct DirectionCopy {
    /// The user-picked reference line.
    pub reference: Line3,
    /// Step distance; `None` uses the selection's extent along the
    /// reference direction, so copies tile without overlap.
    pub step: Option<f64>,
    /// Number of copies.
    pub count: u32,
}

/// Progress sink polled between offset steps.
///
/// All work is synchronous on the caller's thread; this is the only
/// cancellation point. Returning `true` from [`Progress::is_cancelled`]
/// aborts the command and rolls back its entire transaction.
pub trait Progress {
    /// Called after each completed or skipped offset step.
    fn advance(&mut self, completed: usize, total: usize) {
        let _ = (completed, total);
    }

    /// Polled before each offset step.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// No-op progress sink for headless callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl Progress for SilentProgress {}

/// Result of one offset step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// The offset applied in this step.
    pub offset: Vector3,
    /// Ids of the duplicates created in this step.
    pub created: Vec<ElementId>,
    /// Number of splice repairs performed in this step.
    pub splices: usize,
}

/// Result of one duplication command.
#[derive(Debug, Clone, Default)]
pub struct CopyOutcome {
    /// Completed steps, in execution order.
    pub steps: Vec<StepOutcome>,
    /// Offset steps skipped because the copy primitive produced nothing.
    pub skipped_steps: usize,
}

impl CopyOutcome {
    /// Total number of elements created across all steps.
    #[must_use]
    pub fn created(&self) -> usize {
        self.steps.iter().map(|s| s.created.len()).sum()
    }

    /// Total number of splice repairs across all steps.
    #[must_use]
    pub fn splices(&self) -> usize {
        self.steps.iter().map(|s| s.splices).sum()
    }
}
