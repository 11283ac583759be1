//! Progress reporting for long sieve runs.
//!
//! The sieve never prints. Callers that want feedback pass a
//! [`SieveObserver`]; it is invoked every `progress_interval` primes.

use serde::Serialize;

/// A snapshot of sieve progress.
///
/// Counts include 2 even though the sieve never scans it, so with an
/// interval of 1000 the first report arrives at the 1000th prime (7919),
/// which is the 999th odd prime found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SieveProgress {
    /// Primes found so far, counting 2.
    pub primes_found: u64,
    /// The prime that was just found.
    pub current: u64,
    /// Exclusive upper bound of the sieve.
    pub max_range: u64,
}

impl SieveProgress {
    /// Fraction of the range scanned, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.max_range == 0 {
            return 1.0;
        }
        (self.current as f64 / self.max_range as f64).min(1.0)
    }
}

/// Receives progress callbacks during a sieve pass.
pub trait SieveObserver {
    fn on_progress(&mut self, progress: SieveProgress);
}

impl<F> SieveObserver for F
where
    F: FnMut(SieveProgress),
{
    fn on_progress(&mut self, progress: SieveProgress) {
        self(progress)
    }
}

/// An observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SieveObserver for NoopObserver {
    fn on_progress(&mut self, _progress: SieveProgress) {}
}
