//! Data model for timeline projections and milestones.

use serde::Serialize;

use crate::format::{comma_combine, group_count, group_float};

/// Age of the universe in years.
pub const AGE_OF_UNIVERSE_YEARS: f64 = 13_700_000_000.0;

/// Years until the Sun becomes a red giant.
pub const SUN_RED_GIANT_YEARS: f64 = 5_000_000_000.0;

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

// ── Duration breakdown ────────────────────────────────────────────────────

/// A duration split into calendar-ish components (365-day years).
///
/// Once a duration spans at least one universe age, `years` holds only the
/// remainder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationBreakdown {
    /// Whole multiples of the age of the universe. Kept as a float because
    /// long projections exceed `u64`.
    pub universes: f64,
    pub years: u64,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl DurationBreakdown {
    /// Break `total_seconds` down; negative or non-finite input yields zero.
    pub fn from_seconds(total_seconds: f64) -> Self {
        if !total_seconds.is_finite() || total_seconds <= 0.0 {
            return Self::zero();
        }

        let mut year_quotient = total_seconds / SECONDS_PER_YEAR;
        let universes = (year_quotient / AGE_OF_UNIVERSE_YEARS).floor();
        if universes >= 1.0 {
            year_quotient %= AGE_OF_UNIVERSE_YEARS;
        }
        let years = year_quotient.floor();

        let days_product = (year_quotient - years) * 365.0;
        let days = days_product.floor();
        let hours_product = (days_product - days) * 24.0;
        let hours = hours_product.floor();
        let minutes_product = (hours_product - hours) * 60.0;
        let minutes = minutes_product.floor();
        let seconds = ((minutes_product - minutes) * 60.0).floor();

        Self {
            universes,
            years: years as u64,
            days: days as u32,
            hours: hours as u32,
            minutes: minutes as u32,
            seconds: seconds as u32,
        }
    }

    fn zero() -> Self {
        Self {
            universes: 0.0,
            years: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Non-zero components, largest first.
    pub fn segments(&self) -> Vec<String> {
        let mut segments = Vec::new();
        if self.universes >= 1.0 {
            segments.push(format!("{} universes (13.7b)", group_float(self.universes)));
        }
        if self.years >= 1 {
            segments.push(format!("{} years", group_count(self.years)));
        }
        if self.days >= 1 {
            segments.push(format!("{} days", self.days));
        }
        if self.hours >= 1 {
            segments.push(format!("{} hours", self.hours));
        }
        if self.minutes >= 1 {
            segments.push(format!("{} minutes", self.minutes));
        }
        if self.seconds >= 1 {
            segments.push(format!("{} seconds", self.seconds));
        }
        segments
    }
}

impl std::fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let segments = self.segments();
        if segments.is_empty() {
            write!(f, "under a second")
        } else {
            write!(f, "{}", comma_combine(&segments, true))
        }
    }
}

// ── Timeline entries ──────────────────────────────────────────────────────

/// A one-off marker printed before the first projection that passes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    /// Projected years exceed the Sun's remaining lifetime.
    SunRedGiant,
    /// Projected time exceeds the age of the universe.
    UniverseAge,
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SunRedGiant => write!(
                f,
                "5 billion years: Our Sun expanded into a Red Giant and baked Earth."
            ),
            Self::UniverseAge => write!(
                f,
                "{} years: Age of our Universe.",
                group_float(AGE_OF_UNIVERSE_YEARS)
            ),
        }
    }
}

/// Projected run time for one bit width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub bits: u32,
    pub seconds: f64,
    pub breakdown: DurationBreakdown,
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bits in {}", self.bits, self.breakdown)
    }
}

/// One line of timeline output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEntry {
    Milestone { milestone: Milestone },
    Projection(Projection),
}

impl std::fmt::Display for TimelineEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Milestone { milestone } => write!(f, "{milestone}"),
            Self::Projection(projection) => write!(f, "{projection}"),
        }
    }
}
