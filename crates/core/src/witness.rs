//! The factor-witness table filled in by the sieve.
//!
//! Cell `n` holds every `(prime, cofactor)` pair the sieve recorded for `n`.
//! An empty cell means `n` is prime, a power of two, or one of 0 and 1.

use serde::Serialize;
use std::collections::TryReserveError;

/// A recorded `prime * cofactor == n` relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Witness {
    /// An odd prime dividing the cell's number.
    pub prime: u32,
    /// The quotient of the cell's number by `prime`.
    pub cofactor: u32,
}

impl Witness {
    /// Create a new witness pair.
    pub fn new(prime: u32, cofactor: u32) -> Self {
        Self { prime, cofactor }
    }

    /// The number this pair witnesses.
    pub fn product(&self) -> u64 {
        u64::from(self.prime) * u64::from(self.cofactor)
    }
}

/// Per-number witness lists covering `[0, len)`.
///
/// Cells start as empty `Vec`s, which do not allocate, so memory is only
/// spent on composites.
#[derive(Debug, Clone, Default)]
pub struct WitnessTable {
    cells: Vec<Vec<Witness>>,
    pairs: u64,
}

impl WitnessTable {
    /// Allocate a table with `len` empty cells.
    pub(crate) fn with_len(len: usize) -> Result<Self, TryReserveError> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize_with(len, Vec::new);
        Ok(Self { cells, pairs: 0 })
    }

    /// Append a witness to cell `n`, allocating the cell's list on first use.
    pub(crate) fn record(&mut self, n: usize, witness: Witness) -> Result<(), TryReserveError> {
        let cell = &mut self.cells[n];
        cell.try_reserve(1)?;
        cell.push(witness);
        self.pairs += 1;
        Ok(())
    }

    /// Number of cells; equal to the sieve's `max_range`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every witness recorded for `n`, in insertion order.
    ///
    /// Returns an empty slice when `n` has none or lies outside the table.
    pub fn witnesses(&self, n: u64) -> &[Witness] {
        usize::try_from(n)
            .ok()
            .and_then(|i| self.cells.get(i))
            .map_or(&[], Vec::as_slice)
    }

    /// Whether at least one witness was recorded for `n`.
    pub fn has_witness(&self, n: u64) -> bool {
        !self.witnesses(n).is_empty()
    }

    /// The witness with the numerically largest prime.
    ///
    /// Insertion order is irrelevant; the largest prime wins so that
    /// factorizations are reproducible.
    pub fn largest_witness(&self, n: u64) -> Option<Witness> {
        self.witnesses(n).iter().copied().max_by_key(|w| w.prime)
    }

    /// Whether `n` is prime.
    ///
    /// 2 never receives witnesses and neither do other powers of two, so an
    /// empty cell only means "prime" for odd numbers.
    pub fn is_prime(&self, n: u64) -> bool {
        if n >= self.len() as u64 {
            return false;
        }
        n == 2 || (n >= 3 && n % 2 == 1 && !self.has_witness(n))
    }

    /// Total number of witness pairs across all cells.
    pub fn pair_count(&self) -> u64 {
        self.pairs
    }
}
