//! `eratos timeline`: Project run times from a known measurement.

use std::path::Path;

pub fn run(
    config_path: Option<&Path>,
    bits: u32,
    seconds: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path, &crate::RangeArgs::default())?;
    let projector = super::build_projector(&config)?;
    let entries = projector.project_seconds(bits, seconds)?;

    if entries.is_empty() {
        println!(
            "Nothing to project: {bits} bits is already at or past timeline.max_bits ({})",
            config.timeline.max_bits
        );
        return Ok(());
    }

    super::run::print_timeline(&entries);
    Ok(())
}
