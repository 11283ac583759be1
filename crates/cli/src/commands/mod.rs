//! Subcommand implementations and the helpers they share.

pub mod config_cmd;
pub mod factor;
pub mod primes;
pub mod run;
pub mod timeline;

use std::path::{Path, PathBuf};

use eratos_config::AppConfig;
use eratos_core::{Sieve, SieveEngine, SieveProgress};
use eratos_timeline::{ProjectionSettings, TimelineProjector, group_count};

use crate::RangeArgs;

/// The config file in use: `--config` if given, otherwise the default path.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(AppConfig::default_path, Path::to_path_buf)
}

/// Load config (file, then environment, then command-line range overrides).
pub fn load_config(
    explicit: Option<&Path>,
    range: &RangeArgs,
) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let path = config_path(explicit);
    let mut config = AppConfig::load_with_env(&path)
        .map_err(|e| format!("Failed to load config: {e}"))?;
    apply_range(&mut config, range);
    config.validate()?;
    Ok(config)
}

/// Apply `--bits` / `--max-range` on top of the loaded settings.
pub fn apply_range(config: &mut AppConfig, range: &RangeArgs) {
    if let Some(bits) = range.bits {
        config.bits = bits;
        config.max_range = None;
    }
    if let Some(max_range) = range.max_range {
        config.max_range = Some(max_range);
    }
}

/// Build the sieve for `config`, logging progress every `progress_interval` primes.
pub fn build_sieve(config: &AppConfig) -> Result<Sieve, Box<dyn std::error::Error>> {
    let engine = SieveEngine::new(config.effective_max_range())?
        .with_progress_interval(config.progress_interval);
    let mut log_progress = |p: SieveProgress| {
        tracing::info!(
            "Total found: {} / {} ({:.1}%)",
            group_count(p.primes_found),
            group_count(p.max_range),
            p.fraction() * 100.0
        );
    };
    Ok(engine.build_with_observer(&mut log_progress)?)
}

/// Map the `[timeline]` config section onto a projector.
pub fn build_projector(config: &AppConfig) -> Result<TimelineProjector, Box<dyn std::error::Error>> {
    let settings = ProjectionSettings {
        max_bits: config.timeline.max_bits,
        dense_until_bits: config.timeline.dense_until_bits,
        sparse_step: config.timeline.sparse_step,
    };
    Ok(TimelineProjector::new(settings)?)
}

/// Render factors as `[a, b, c]`.
pub fn format_factors(factors: &[u32]) -> String {
    let items: Vec<String> = factors.iter().map(u32::to_string).collect();
    format!("[{}]", items.join(", "))
}
