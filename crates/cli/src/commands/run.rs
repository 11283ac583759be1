//! `eratos run`: Sieve, self-test, and project run times.

use std::path::Path;

use chrono::{DateTime, Utc};
use eratos_core::{SelfTestReport, Sieve, run_self_test};
use eratos_timeline::{TimelineEntry, group_count};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::RangeArgs;

/// Command-line switches for `run`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub samples: Option<usize>,
    pub seed: Option<u64>,
    pub self_test: bool,
    pub timeline: bool,
    pub json: bool,
}

/// Everything `run --json` prints.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub max_range: u64,
    pub bits: u32,
    pub prime_count: u64,
    pub witness_pairs: u64,
    pub elapsed_ms: u64,
    pub completed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_test: Option<SelfTestReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub timeline: Vec<TimelineEntry>,
}

pub fn run(
    config_path: Option<&Path>,
    range: &RangeArgs,
    options: RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path, range)?;
    if let Some(samples) = options.samples {
        config.self_test.samples = samples;
    }
    if options.seed.is_some() {
        config.self_test.seed = options.seed;
    }
    config.self_test.enabled &= options.self_test;
    config.timeline.enabled &= options.timeline;
    config.validate()?;

    let max_range = config.effective_max_range();
    let bits = config.effective_bits();

    if !options.json {
        println!("Calculating primes to {}", group_count(max_range));
    }

    let sieve = super::build_sieve(&config)?;

    if !options.json {
        println!(
            "Found primes: {} / {} ({bits} bits) in {:.3?}.",
            group_count(sieve.prime_count()),
            group_count(max_range),
            sieve.elapsed()
        );
        println!(
            "Witness pairs: {}",
            group_count(sieve.table().pair_count())
        );
    }

    let self_test = if config.self_test.enabled {
        let report = sample_and_verify(&sieve, config.self_test.samples, config.self_test.seed)?;
        if !options.json {
            print_self_test(&report);
        }
        Some(report)
    } else {
        None
    };

    let timeline = if config.timeline.enabled {
        let projector = super::build_projector(&config)?;
        projector.project(bits, sieve.elapsed())
    } else {
        Vec::new()
    };
    if !options.json && !timeline.is_empty() {
        print_timeline(&timeline);
    }

    if options.json {
        let report = RunReport::new(&sieve, bits, self_test.clone(), timeline);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    match &self_test {
        Some(report) => check_self_test(report),
        None => Ok(()),
    }
}

impl RunReport {
    pub fn new(
        sieve: &Sieve,
        bits: u32,
        self_test: Option<SelfTestReport>,
        timeline: Vec<TimelineEntry>,
    ) -> Self {
        Self {
            max_range: sieve.max_range(),
            bits,
            prime_count: sieve.prime_count(),
            witness_pairs: sieve.table().pair_count(),
            elapsed_ms: sieve.elapsed().as_millis() as u64,
            completed_at: Utc::now(),
            self_test,
            timeline,
        }
    }
}

/// Turn a self-test with failed cases into a command error.
fn check_self_test(report: &SelfTestReport) -> Result<(), Box<dyn std::error::Error>> {
    if report.all_passed() {
        return Ok(());
    }
    Err(format!(
        "Self-test failed: {} of {} cases did not verify",
        report.failed(),
        report.cases.len()
    )
    .into())
}

fn sample_and_verify(
    sieve: &Sieve,
    samples: usize,
    seed: Option<u64>,
) -> Result<SelfTestReport, Box<dyn std::error::Error>> {
    let report = match seed {
        Some(seed) => run_self_test(sieve, samples, &mut StdRng::seed_from_u64(seed))?,
        None => run_self_test(sieve, samples, &mut rand::rng())?,
    };
    Ok(report)
}

fn print_self_test(report: &SelfTestReport) {
    println!("Testing prime factorization:");
    for case in &report.cases {
        println!(
            "{} | Product: {} | Factors: {}",
            group_count(case.number),
            group_count(case.product),
            super::format_factors(&case.factors)
        );
    }
    println!(
        "Self-test: {} passed, {} failed",
        report.passed(),
        report.failed()
    );
}

/// Print projections, with milestones set off by blank lines.
pub fn print_timeline(entries: &[TimelineEntry]) {
    println!("Processing estimates:");
    for entry in entries {
        match entry {
            TimelineEntry::Milestone { milestone } => {
                println!();
                println!("{milestone}");
                println!();
            }
            TimelineEntry::Projection(projection) => println!("{projection}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eratos_core::SelfTestCase;

    fn options(self_test: bool, timeline: bool) -> RunOptions {
        RunOptions {
            samples: Some(10),
            seed: Some(3),
            self_test,
            timeline,
            json: true,
        }
    }

    #[test]
    fn full_run_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "bits = 12\n").unwrap();
        assert!(run(Some(&path), &RangeArgs::default(), options(true, true)).is_ok());
    }

    #[test]
    fn zero_samples_allowed_when_self_test_is_off() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let range = RangeArgs {
            bits: Some(8),
            max_range: None,
        };
        let mut opts = options(false, false);
        opts.samples = Some(0);
        assert!(run(Some(&path), &range, opts.clone()).is_ok());

        opts.self_test = true;
        assert!(run(Some(&path), &range, opts).is_err());
    }

    #[test]
    fn failed_case_fails_the_run() {
        let passing = SelfTestCase {
            number: 15,
            factors: vec![5, 3],
            product: 15,
            passed: true,
        };
        let failing = SelfTestCase {
            number: 16,
            factors: vec![5, 3],
            product: 15,
            passed: false,
        };

        let ok = SelfTestReport {
            max_range: 100,
            cases: vec![passing.clone()],
        };
        assert!(check_self_test(&ok).is_ok());

        let bad = SelfTestReport {
            max_range: 100,
            cases: vec![passing, failing],
        };
        let err = check_self_test(&bad).unwrap_err();
        assert_eq!(err.to_string(), "Self-test failed: 1 of 2 cases did not verify");
    }

    #[test]
    fn json_report_shape() {
        let sieve = eratos_core::build_sieve(100).unwrap();
        let report = RunReport::new(&sieve, 7, None, Vec::new());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["max_range"], 100);
        assert_eq!(json["bits"], 7);
        assert_eq!(json["prime_count"], 25);
        assert!(json["witness_pairs"].as_u64().unwrap() > 0);
        assert!(json["elapsed_ms"].is_u64());
        assert!(json["completed_at"].is_string());
        assert!(json.get("self_test").is_none());
        assert!(json.get("timeline").is_none());

        let projector = eratos_timeline::TimelineProjector::default();
        let timeline = projector.project_seconds(7, 1.0).unwrap();
        let report = RunReport::new(&sieve, 7, None, timeline);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["timeline"][0]["type"], "projection");
        assert_eq!(json["timeline"][0]["bits"], 8);
    }
}
