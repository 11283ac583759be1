//! Randomized self-test for a finished sieve.
//!
//! Samples numbers from the factorization domain, factorizes them, and checks
//! that the factors multiply back to the number and are all prime.

use rand::Rng;
use serde::Serialize;

use crate::error::Result;
use crate::factor::product;
use crate::sieve::Sieve;

/// One sampled number and its verification outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfTestCase {
    pub number: u64,
    pub factors: Vec<u32>,
    pub product: u64,
    pub passed: bool,
}

/// Outcome of a self-test run.
#[derive(Debug, Clone, Serialize)]
pub struct SelfTestReport {
    pub max_range: u64,
    pub cases: Vec<SelfTestCase>,
}

impl SelfTestReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(|c| c.passed)
    }
}

/// Factorize `n` and check the result against the sieve.
pub fn verify(sieve: &Sieve, n: u64) -> Result<SelfTestCase> {
    let factors = sieve.factorize(n)?;
    let product = product(&factors)?;
    let passed = product == n && factors.iter().all(|&f| sieve.is_prime(u64::from(f)));
    Ok(SelfTestCase {
        number: n,
        factors,
        product,
        passed,
    })
}

/// Verify `samples` numbers drawn uniformly from `[2, max_range)`.
pub fn run_self_test<R>(sieve: &Sieve, samples: usize, rng: &mut R) -> Result<SelfTestReport>
where
    R: Rng + ?Sized,
{
    let max_range = sieve.max_range();
    let mut cases = Vec::with_capacity(samples);
    for _ in 0..samples {
        let n = rng.random_range(2..max_range);
        let case = verify(sieve, n)?;
        if !case.passed {
            tracing::warn!(
                number = case.number,
                product = case.product,
                factors = ?case.factors,
                "Self-test case failed"
            );
        }
        cases.push(case);
    }

    let report = SelfTestReport { max_range, cases };
    tracing::debug!(
        samples,
        passed = report.passed(),
        failed = report.failed(),
        "Self-test finished"
    );
    Ok(report)
}
