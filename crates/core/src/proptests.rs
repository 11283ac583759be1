//! Property-based tests for the sieve and factorizer.

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use proptest::prelude::*;

    use crate::factor::product;
    use crate::sieve::{Sieve, build_sieve};

    const RANGE: u64 = 1 << 18;

    fn shared_sieve() -> &'static Sieve {
        static SIEVE: OnceLock<Sieve> = OnceLock::new();
        SIEVE.get_or_init(|| build_sieve(RANGE).unwrap())
    }

    // Trial division, independent of the table.
    fn is_prime_naive(n: u64) -> bool {
        n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
    }

    proptest! {
        #[test]
        fn factors_multiply_back(n in 2u64..RANGE) {
            let factors = shared_sieve().factorize(n).unwrap();
            prop_assert_eq!(product(&factors).unwrap(), n);
        }

        #[test]
        fn factors_are_prime(n in 2u64..RANGE) {
            for f in shared_sieve().factorize(n).unwrap() {
                prop_assert!(is_prime_naive(u64::from(f)), "{} is composite", f);
            }
        }

        #[test]
        fn classification_matches_trial_division(n in 0u64..RANGE) {
            prop_assert_eq!(shared_sieve().is_prime(n), is_prime_naive(n));
        }

        #[test]
        fn first_factor_is_largest_odd_prime(n in 3u64..RANGE) {
            let factors = shared_sieve().factorize(n).unwrap();
            let mut odd = n;
            while odd % 2 == 0 {
                odd /= 2;
            }
            let largest = factors.iter().copied().max().unwrap();
            if odd > 1 {
                prop_assert_eq!(u64::from(factors[0]), u64::from(largest));
            } else {
                prop_assert!(factors.iter().all(|&f| f == 2));
            }
        }

        #[test]
        fn odd_ranges_match_small_rebuild(max_range in 3u64..2_000) {
            let small = build_sieve(max_range).unwrap();
            for n in 2..max_range {
                prop_assert_eq!(small.factorize(n).unwrap(), shared_sieve().factorize(n).unwrap());
            }
        }
    }
}
