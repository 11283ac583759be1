//! Sieve of Eratosthenes with factor-witness recording.
//!
//! Odd candidates are scanned in increasing order. A candidate with no
//! witness at the time it is reached is prime, and every multiple of it
//! below the bound receives a `(prime, cofactor)` witness.
//!
//! ## Prime 2
//!
//! The scan starts at 3, so 2 is never a marking base and even numbers only
//! receive witnesses from their odd prime factors. Powers of two end up with
//! no witness at all. The factorizer compensates by halving even numbers
//! that have no witness. Making 2 a marking base would change the contents
//! of almost every even cell and must not be done without reworking that
//! fallback.

use std::time::{Duration, Instant};

use crate::error::{Result, SieveError};
use crate::factor::Factorizer;
use crate::progress::{NoopObserver, SieveObserver, SieveProgress};
use crate::witness::{Witness, WitnessTable};

/// Smallest accepted bound.
pub const MIN_RANGE: u64 = 3;

/// Largest accepted bound; keeps every number and witness within `u32`.
pub const MAX_RANGE: u64 = 1 << 32;

/// Default number of primes between progress callbacks.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000;

/// Builds a [`Sieve`] for a fixed bound.
#[derive(Debug, Clone)]
pub struct SieveEngine {
    max_range: u64,
    progress_interval: u64,
}

impl SieveEngine {
    /// Create an engine for numbers in `[0, max_range)`.
    pub fn new(max_range: u64) -> Result<Self> {
        if !(MIN_RANGE..=MAX_RANGE).contains(&max_range) {
            return Err(SieveError::InvalidRange {
                max_range,
                min: MIN_RANGE,
                max: MAX_RANGE,
            }
            .into());
        }
        Ok(Self {
            max_range,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        })
    }

    /// Create an engine for `2^bits`.
    pub fn for_bits(bits: u32) -> Result<Self> {
        let max_range = 1u64.checked_shl(bits).unwrap_or(u64::MAX);
        Self::new(max_range)
    }

    /// Invoke the observer every `interval` primes. Zero is treated as one.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    pub fn max_range(&self) -> u64 {
        self.max_range
    }

    /// Run the sieve without progress reporting.
    pub fn build(&self) -> Result<Sieve> {
        self.build_with_observer(&mut NoopObserver)
    }

    /// Run the sieve, reporting progress to `observer`.
    ///
    /// Either the whole table is built or an error is returned; there is no
    /// partial result.
    pub fn build_with_observer(&self, observer: &mut dyn SieveObserver) -> Result<Sieve> {
        let max_range = self.max_range;
        let started = Instant::now();
        tracing::debug!(max_range, "Starting sieve");

        let len = usize::try_from(max_range).map_err(|_| SieveError::ResourceExhausted {
            max_range,
            reason: "range exceeds addressable memory".into(),
        })?;
        let mut table = WitnessTable::with_len(len).map_err(|e| exhausted(max_range, &e))?;

        let mut odd_primes = 0u64;
        let mut index = 3u64;
        while index < max_range {
            if !table.has_witness(index) {
                odd_primes += 1;
                let primes_found = odd_primes + 1;
                if primes_found % self.progress_interval == 0 {
                    observer.on_progress(SieveProgress {
                        primes_found,
                        current: index,
                        max_range,
                    });
                }
                mark_multiples(&mut table, index, max_range)?;
            }
            index += 2;
        }

        let elapsed = started.elapsed();
        tracing::info!(
            max_range,
            primes_found = odd_primes + 1,
            witness_pairs = table.pair_count(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Sieve complete"
        );

        Ok(Sieve {
            table,
            max_range,
            odd_primes,
            elapsed,
        })
    }
}

/// Record `(prime, i)` at `prime * i` for every `i >= 2` below the bound.
fn mark_multiples(table: &mut WitnessTable, prime: u64, max_range: u64) -> Result<()> {
    let mut cofactor = 2u64;
    let mut product = prime * 2;
    while product < max_range {
        // Both factors are below max_range <= 2^32.
        let witness = Witness::new(prime as u32, cofactor as u32);
        table
            .record(product as usize, witness)
            .map_err(|e| exhausted(max_range, &e))?;
        cofactor += 1;
        product += prime;
    }
    Ok(())
}

fn exhausted(max_range: u64, err: &std::collections::TryReserveError) -> SieveError {
    SieveError::ResourceExhausted {
        max_range,
        reason: err.to_string(),
    }
}

/// Build the witness table for `[0, max_range)`.
pub fn build_sieve(max_range: u64) -> Result<Sieve> {
    SieveEngine::new(max_range)?.build()
}

/// A completed sieve: the witness table plus what was learned building it.
#[derive(Debug, Clone)]
pub struct Sieve {
    table: WitnessTable,
    max_range: u64,
    odd_primes: u64,
    elapsed: Duration,
}

impl Sieve {
    /// Exclusive upper bound.
    pub fn max_range(&self) -> u64 {
        self.max_range
    }

    /// The read-only witness table.
    pub fn table(&self) -> &WitnessTable {
        &self.table
    }

    /// Number of primes below `max_range`, including 2.
    pub fn prime_count(&self) -> u64 {
        self.odd_primes + 1
    }

    /// Number of odd primes the scan discovered.
    pub fn odd_prime_count(&self) -> u64 {
        self.odd_primes
    }

    /// Wall-clock time spent building the table.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_prime(&self, n: u64) -> bool {
        self.table.is_prime(n)
    }

    /// All primes below `max_range`, ascending.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        std::iter::once(2).chain(
            (3..self.max_range)
                .step_by(2)
                .filter(|&n| !self.table.has_witness(n)),
        )
    }

    /// A factorizer borrowing this sieve's table.
    pub fn factorizer(&self) -> Factorizer<'_> {
        Factorizer::new(&self.table)
    }

    /// Prime factors of `n`, largest witness first.
    pub fn factorize(&self, n: u64) -> Result<Vec<u32>> {
        self.factorizer().factorize(n)
    }
}
