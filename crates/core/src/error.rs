//! Error types for the Eratos core.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each component has its own error type; [`Error`] wraps them all.

use thiserror::Error;

/// The top-level error type for all core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // --- Sieve construction ---
    #[error("Sieve error: {0}")]
    Sieve(#[from] SieveError),

    // --- Factorization ---
    #[error("Factorization error: {0}")]
    Factor(#[from] FactorError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Component errors ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SieveError {
    /// The requested bound is outside `[MIN_RANGE, MAX_RANGE]`.
    #[error("Invalid sieve range {max_range}: must be between {min} and {max}")]
    InvalidRange { max_range: u64, min: u64, max: u64 },

    /// The witness table could not be allocated.
    #[error("Out of memory building the witness table for range {max_range}: {reason}")]
    ResourceExhausted { max_range: u64, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactorError {
    /// `n` lies outside the `[2, max_range)` domain of the table.
    #[error("{n} is outside the factorization domain [2, {max_range})")]
    OutOfDomain { n: u64, max_range: u64 },

    /// Multiplying factors back together exceeded `u64`.
    #[error("Product of factors {factors:?} overflows u64")]
    Overflow { factors: Vec<u32> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sieve_error_displays_correctly() {
        let err = Error::Sieve(SieveError::InvalidRange {
            max_range: 2,
            min: 3,
            max: 1 << 32,
        });
        assert!(err.to_string().contains("Invalid sieve range 2"));
        assert!(err.to_string().contains("between 3"));
    }

    #[test]
    fn domain_error_displays_correctly() {
        let err: Error = FactorError::OutOfDomain {
            n: 100,
            max_range: 64,
        }
        .into();
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("[2, 64)"));
    }
}
