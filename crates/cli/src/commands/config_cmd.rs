//! `eratos config`: Configuration management commands.

use std::path::Path;

use eratos_config::AppConfig;
use eratos_timeline::group_count;

pub fn validate(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = super::config_path(config_path);
    println!("🔍 Validating {}...", path.display());

    match AppConfig::load_with_env(&path) {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            if config.effective_bits() > 28 {
                warnings.push("Sieves above 2^28 need tens of gigabytes of memory");
            }

            if config.self_test.seed.is_some() {
                warnings.push("self_test.seed is set; every run samples the same numbers");
            }

            if config.timeline.max_bits <= config.effective_bits() {
                warnings.push("timeline.max_bits is not above the sieve size; nothing will be projected");
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!(
                "   Range:     {} ({} bits)",
                group_count(config.effective_max_range()),
                config.effective_bits()
            );
            println!("   Progress:  every {} primes", group_count(config.progress_interval));
            println!(
                "   Self-test: {}",
                if config.self_test.enabled {
                    format!("{} samples", config.self_test.samples)
                } else {
                    "disabled".into()
                }
            );
            println!(
                "   Timeline:  {}",
                if config.timeline.enabled {
                    format!("up to {} bits", config.timeline.max_bits)
                } else {
                    "disabled".into()
                }
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = super::config_path(config_path);
    let config =
        AppConfig::load_with_env(&path).map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", super::config_path(config_path).display());
    Ok(())
}

pub fn init(config_path: Option<&Path>, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = super::config_path(config_path);
    if path.exists() && !force {
        println!("  Config file already exists: {}", path.display());
        println!("  Use --force to overwrite it with defaults.");
        return Ok(());
    }

    AppConfig::default().save_to(&path)?;
    println!("✅ Wrote default config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        init(Some(&path), false).unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.bits, 24);
    }

    #[test]
    fn init_keeps_existing_file_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "bits = 12\n").unwrap();
        init(Some(&path), false).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap().bits, 12);

        init(Some(&path), true).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap().bits, 24);
    }
}
