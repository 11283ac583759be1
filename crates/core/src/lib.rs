//! # Eratos Core
//!
//! A sieve of Eratosthenes that records, for every composite it marks, which
//! prime and cofactor produced it. The resulting [`WitnessTable`] lets any
//! number below the bound be fully factorized without sieving again.
//!
//! ## Components
//!
//! - [`SieveEngine`] scans odd candidates and fills the witness table.
//! - [`Factorizer`] reads the table to decompose numbers into primes.
//! - [`selftest`] samples random numbers and checks their factorizations.
//!
//! The table is built once and never mutated afterwards, so a [`Sieve`] can
//! be shared freely between readers.

pub mod error;
pub mod factor;
pub mod progress;
pub mod selftest;
pub mod sieve;
pub mod witness;

#[cfg(test)]
mod proptests;

// Re-export key types at crate root for ergonomics
pub use error::{Error, FactorError, Result, SieveError};
pub use factor::{Factorizer, factorize, product};
pub use progress::{NoopObserver, SieveObserver, SieveProgress};
pub use selftest::{SelfTestCase, SelfTestReport, run_self_test, verify};
pub use sieve::{DEFAULT_PROGRESS_INTERVAL, MAX_RANGE, MIN_RANGE, Sieve, SieveEngine, build_sieve};
pub use witness::{Witness, WitnessTable};
