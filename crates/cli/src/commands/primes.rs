//! `eratos primes`: List or count primes below the bound.

use std::io::{BufWriter, Write};
use std::path::Path;

use eratos_core::Sieve;
use eratos_timeline::group_count;

use crate::RangeArgs;

pub fn run(
    config_path: Option<&Path>,
    range: &RangeArgs,
    count_only: bool,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path, range)?;
    let sieve = super::build_sieve(&config)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_primes(&sieve, count_only, limit, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Write either the prime count or up to `limit` primes, one per line.
pub fn write_primes<W: Write>(
    sieve: &Sieve,
    count_only: bool,
    limit: Option<usize>,
    out: &mut W,
) -> std::io::Result<()> {
    if count_only {
        return writeln!(
            out,
            "{} primes below {}",
            group_count(sieve.prime_count()),
            group_count(sieve.max_range())
        );
    }

    for prime in sieve.primes().take(limit.unwrap_or(usize::MAX)) {
        writeln!(out, "{prime}")?;
    }
    Ok(())
}
