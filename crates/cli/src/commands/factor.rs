//! `eratos factor`: Factorize numbers using the witness table.

use std::path::Path;

use eratos_core::Sieve;
use serde::Serialize;

use crate::RangeArgs;

/// One number's factorization, or why it could not be factorized.
#[derive(Debug, Serialize)]
pub struct FactorOutput {
    pub number: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn run(
    config_path: Option<&Path>,
    range: &RangeArgs,
    numbers: &[u64],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path, range)?;
    let sieve = super::build_sieve(&config)?;
    let outputs = factor_all(&sieve, numbers);

    if json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else {
        for output in &outputs {
            match (&output.factors, &output.error) {
                (Some(factors), _) => {
                    println!("{}: {}", output.number, super::format_factors(factors))
                }
                (None, Some(error)) => println!("{}: ❌ {error}", output.number),
                (None, None) => {}
            }
        }
    }

    let failures = outputs.iter().filter(|o| o.error.is_some()).count();
    if failures > 0 {
        return Err(format!(
            "{failures} number(s) outside the sieve range [2, {}); raise --bits or --max-range",
            sieve.max_range()
        )
        .into());
    }

    Ok(())
}

/// Factorize every number, keeping per-number errors instead of stopping.
pub fn factor_all(sieve: &Sieve, numbers: &[u64]) -> Vec<FactorOutput> {
    let factorizer = sieve.factorizer();
    numbers
        .iter()
        .map(|&n| match factorizer.factorize(n) {
            Ok(factors) => FactorOutput {
                number: n,
                factors: Some(factors),
                error: None,
            },
            Err(e) => FactorOutput {
                number: n,
                factors: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(max_range: u64) -> RangeArgs {
        RangeArgs {
            bits: None,
            max_range: Some(max_range),
        }
    }

    #[test]
    fn factors_in_domain_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(run(Some(&path), &range(100), &[15, 17, 8], false).is_ok());
        assert!(run(Some(&path), &range(100), &[98], true).is_ok());
    }

    #[test]
    fn out_of_domain_number_fails_the_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let err = run(Some(&path), &range(100), &[15, 100], false).unwrap_err();
        assert!(err.to_string().contains("1 number(s)"), "{err}");
        assert!(run(Some(&path), &range(100), &[1], true).is_err());
    }

    #[test]
    fn errors_are_kept_per_number() {
        let sieve = eratos_core::build_sieve(100).unwrap();
        let outputs = factor_all(&sieve, &[15, 100, 8]);
        assert_eq!(outputs[0].factors, Some(vec![5, 3]));
        assert!(outputs[1].factors.is_none());
        assert!(outputs[1].error.is_some());
        assert_eq!(outputs[2].factors, Some(vec![2, 2, 2]));

        let json = serde_json::to_value(&outputs).unwrap();
        assert_eq!(json[0]["factors"], serde_json::json!([5, 3]));
        assert!(json[0].get("error").is_none());
        assert!(json[1].get("factors").is_none());
    }
}
