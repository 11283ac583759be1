//! Run time extrapolation for Eratos.
//!
//! Takes the measured time of one sieve run and projects how long larger
//! bounds would take, assuming the time doubles with every extra bit. Long
//! projections are broken down into universes, years, days and so on, with
//! milestones marking when the Sun becomes a red giant and when the age of
//! the universe is exceeded.

pub mod format;
pub mod model;
pub mod projector;

pub use format::{comma_combine, group_count, group_digits, group_float};
pub use model::{
    AGE_OF_UNIVERSE_YEARS, DurationBreakdown, Milestone, Projection, SUN_RED_GIANT_YEARS, TimelineEntry,
};
pub use projector::{ProjectionSettings, TimelineProjector};

/// Errors from the timeline subsystem.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("invalid projection settings: {0}")]
    InvalidSettings(String),

    #[error("measured run time must be finite and non-negative, got {0}")]
    InvalidElapsed(f64),
}
