//! Extrapolates a measured sieve run to larger bit widths.

use std::time::Duration;

use crate::TimelineError;
use crate::model::*;

/// Which bit widths get a projection line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionSettings {
    /// Stop after this bit width.
    pub max_bits: u32,
    /// Every width up to here is projected.
    pub dense_until_bits: u32,
    /// Past `dense_until_bits`, only every `sparse_step`-th extra bit is projected.
    pub sparse_step: u32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            max_bits: 256,
            dense_until_bits: 80,
            sparse_step: 8,
        }
    }
}

/// Projects run times assuming each extra bit doubles the work.
#[derive(Debug, Clone, Copy)]
pub struct TimelineProjector {
    settings: ProjectionSettings,
}

impl TimelineProjector {
    pub fn new(settings: ProjectionSettings) -> Result<Self, TimelineError> {
        if settings.sparse_step == 0 {
            return Err(TimelineError::InvalidSettings(
                "sparse_step must be > 0".into(),
            ));
        }
        if settings.dense_until_bits > settings.max_bits {
            return Err(TimelineError::InvalidSettings(format!(
                "dense_until_bits ({}) exceeds max_bits ({})",
                settings.dense_until_bits, settings.max_bits
            )));
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ProjectionSettings {
        &self.settings
    }

    /// Project from a run over `2^bits` numbers that took `elapsed`.
    pub fn project(&self, bits: u32, elapsed: Duration) -> Vec<TimelineEntry> {
        self.project_seconds(bits, elapsed.as_secs_f64())
            .unwrap_or_default()
    }

    /// Project from a run over `2^bits` numbers that took `seconds`.
    ///
    /// Milestones are emitted once, right before the first projection that
    /// passes them.
    pub fn project_seconds(
        &self,
        bits: u32,
        seconds: f64,
    ) -> Result<Vec<TimelineEntry>, TimelineError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(TimelineError::InvalidElapsed(seconds));
        }

        let ProjectionSettings {
            max_bits,
            dense_until_bits,
            sparse_step,
        } = self.settings;
        let dense_steps = dense_until_bits.saturating_sub(bits);

        let mut entries = Vec::new();
        let mut total = seconds;
        let mut past_sun = false;
        let mut past_universe = false;

        for step in 1..=max_bits.saturating_sub(bits) {
            total *= 2.0;
            if step > dense_steps && step % sparse_step != 0 {
                continue;
            }

            let breakdown = DurationBreakdown::from_seconds(total);

            if breakdown.years as f64 > SUN_RED_GIANT_YEARS && !past_sun {
                entries.push(TimelineEntry::Milestone {
                    milestone: Milestone::SunRedGiant,
                });
                past_sun = true;
            }

            if breakdown.universes >= 1.0 && !past_universe {
                entries.push(TimelineEntry::Milestone {
                    milestone: Milestone::UniverseAge,
                });
                past_universe = true;
            }

            entries.push(TimelineEntry::Projection(Projection {
                bits: bits + step,
                seconds: total,
                breakdown,
            }));
        }

        tracing::debug!(
            bits,
            seconds,
            entries = entries.len(),
            "Timeline projected"
        );
        Ok(entries)
    }
}

impl Default for TimelineProjector {
    fn default() -> Self {
        Self {
            settings: ProjectionSettings::default(),
        }
    }
}
