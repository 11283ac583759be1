//! Table-driven prime factorization.
//!
//! Each step takes the largest-prime witness `(p, q)` of the current number,
//! emits `p` and continues with `q`. Numbers without a witness are either odd
//! primes or even numbers whose only prime factor is 2; the latter are
//! halved, since the sieve never uses 2 as a marking base.
//!
//! Every step strictly shrinks the current number, so the loop runs at most
//! `log2(n)` times.

use crate::error::{FactorError, Result};
use crate::witness::WitnessTable;

/// Factorizes numbers in `[2, table.len())` by reading a witness table.
#[derive(Debug, Clone, Copy)]
pub struct Factorizer<'a> {
    table: &'a WitnessTable,
}

impl<'a> Factorizer<'a> {
    pub fn new(table: &'a WitnessTable) -> Self {
        Self { table }
    }

    /// Exclusive upper bound of the factorization domain.
    pub fn max_range(&self) -> u64 {
        self.table.len() as u64
    }

    /// Prime factors of `n` with multiplicity.
    ///
    /// The order is not sorted: at each step the largest witnessed prime
    /// comes first, then any factors of 2 found by halving. For example
    /// 15 gives `[5, 3]` and 12 gives `[3, 2, 2]`.
    pub fn factorize(&self, n: u64) -> Result<Vec<u32>> {
        let max_range = self.max_range();
        if n < 2 || n >= max_range {
            return Err(FactorError::OutOfDomain { n, max_range }.into());
        }

        let mut factors = Vec::new();
        let mut current = n;
        loop {
            match self.table.largest_witness(current) {
                Some(witness) => {
                    factors.push(witness.prime);
                    current = u64::from(witness.cofactor);
                }
                None if current == 2 => {
                    factors.push(2);
                    break;
                }
                None if current % 2 == 0 => {
                    factors.push(2);
                    current /= 2;
                }
                None => {
                    // Odd with no witness: prime. Below max_range <= 2^32.
                    factors.push(current as u32);
                    break;
                }
            }
        }
        Ok(factors)
    }
}

/// Factorize `n` against `table`.
pub fn factorize(table: &WitnessTable, n: u64) -> Result<Vec<u32>> {
    Factorizer::new(table).factorize(n)
}

/// Multiply factors back together, failing on `u64` overflow.
pub fn product(factors: &[u32]) -> std::result::Result<u64, FactorError> {
    factors
        .iter()
        .try_fold(1u64, |acc, &f| acc.checked_mul(u64::from(f)))
        .ok_or_else(|| FactorError::Overflow {
            factors: factors.to_vec(),
        })
}
