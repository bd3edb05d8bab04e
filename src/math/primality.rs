// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Probabilistic primality testing.
//!
//! [`miller_rabin`] is the witness test itself. [`estimate_k`] picks a round
//! count for a target error, and [`is_probable_prime`] puts a small-prime
//! sieve in front of the witness loop for candidate searches.

use num_bigint_dig::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::{CryptoRng, RngCore};

use super::power_mod;
use crate::error::{Error, Result};

/// Small odd primes for trial division (the first 256 primes after 2).
const SIEVE_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541, 547,
    557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613, 617, 619, 631, 641, 643, 647, 653, 659,
    661, 673, 677, 683, 691, 701, 709, 719, 727, 733, 739, 743, 751, 757, 761, 769, 773, 787, 797,
    809, 811, 821, 823, 827, 829, 839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911, 919, 929,
    937, 941, 947, 953, 967, 971, 977, 983, 991, 997, 1009, 1013, 1019, 1021, 1031, 1033, 1039,
    1049, 1051, 1061, 1063, 1069, 1087, 1091, 1093, 1097, 1103, 1109, 1117, 1123, 1129, 1151, 1153,
    1163, 1171, 1181, 1187, 1193, 1201, 1213, 1217, 1223, 1229, 1231, 1237, 1249, 1259, 1277, 1279,
    1283, 1289, 1291, 1297, 1301, 1303, 1307, 1319, 1321, 1327, 1361, 1367, 1373, 1381, 1399, 1409,
    1423, 1427, 1429, 1433, 1439, 1447, 1451, 1453, 1459, 1471, 1481, 1483, 1487, 1489, 1493, 1499,
    1511, 1523, 1531, 1543, 1549, 1553, 1559, 1567, 1571, 1579, 1583, 1597, 1601, 1607, 1609, 1613,
    1619,
];

/// Miller-Rabin probabilistic primality test.
///
/// Returns `false` as soon as one of `rounds` random bases in
/// `[2, candidate - 2]` witnesses compositeness. A `true` result is wrong with
/// probability at most `4^-rounds`.
///
/// Values up to 3 and even values are decided directly.
pub fn miller_rabin<R>(candidate: &BigUint, rounds: usize, rng: &mut R) -> bool
where
    R: RngCore + CryptoRng + ?Sized,
{
    if let Some(small) = candidate.to_u32() {
        if small <= 3 {
            return small >= 2;
        }
    }
    if candidate.is_even() {
        return false;
    }

    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let n_minus_1 = candidate - &one;

    // candidate - 1 = 2^s · d with d odd
    let s = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> s;

    'witness: for _ in 0..rounds {
        // Upper bound is exclusive, so this samples [2, candidate - 2].
        let base = rng.gen_biguint_range(&two, &n_minus_1);

        let mut x = power_mod(&base, &d, candidate);
        if x == one || x == n_minus_1 {
            continue;
        }

        for _ in 1..s {
            x = power_mod(&x, &two, candidate);
            if x == n_minus_1 {
                continue 'witness;
            }
            if x == one {
                // Non-trivial square root of 1.
                return false;
            }
        }

        return false;
    }

    true
}

/// Trial division by the small primes, then [`miller_rabin`].
///
/// A candidate equal to one of the sieve primes is reported prime.
pub fn is_probable_prime<R>(candidate: &BigUint, rounds: usize, rng: &mut R) -> bool
where
    R: RngCore + CryptoRng + ?Sized,
{
    if has_small_factor(candidate) {
        return false;
    }
    miller_rabin(candidate, rounds, rng)
}

/// Returns true if `n` is divisible by a sieve prime other than itself.
fn has_small_factor(n: &BigUint) -> bool {
    for &prime in SIEVE_PRIMES {
        if (n % prime).is_zero() {
            return n != &BigUint::from(prime);
        }
    }
    false
}

/// Rounds needed for a `2^-128` error on a random `bits`-bit candidate.
///
/// Average-case figures (FIPS 186-4, appendix C): a random composite fools a
/// round far less often than the `1/4` worst case, and more so as the size
/// grows.
const fn rounds_for_2_pow_128(bits: usize) -> usize {
    match bits {
        0..=256 => 40,
        257..=512 => 15,
        513..=1024 => 10,
        1025..=2048 => 6,
        2049..=4096 => 4,
        _ => 3,
    }
}

/// Minimum Miller-Rabin round count so that the chance of accepting a random
/// `bit_length`-bit composite stays below `target_error`.
///
/// With `t = ceil(-log2(target_error))`, the result is the smaller of the
/// worst-case bound `ceil(t / 2)` and the average-case table figure scaled
/// from `2^-128` to `2^-t`. Never less than one.
pub fn estimate_k(bit_length: usize, target_error: f64) -> Result<usize> {
    if bit_length == 0 {
        return Err(Error::invalid("bit length must be positive"));
    }
    if !(target_error > 0.0 && target_error < 1.0) {
        return Err(Error::invalid(format!(
            "target error must lie in (0, 1), got {target_error}"
        )));
    }

    let security_bits = (-target_error.log2()).ceil() as usize;

    let worst_case = security_bits.div_ceil(2);
    let average_case = (rounds_for_2_pow_128(bit_length) * security_bits).div_ceil(128);

    Ok(worst_case.min(average_case).max(1))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use num_bigint_dig::prime::probably_prime;
    use rand::rngs::OsRng;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn small_values_by_lookup() {
        let mut rng = OsRng;
        assert!(!miller_rabin(&big(0), 10, &mut rng));
        assert!(!miller_rabin(&big(1), 10, &mut rng));
        assert!(miller_rabin(&big(2), 10, &mut rng));
        assert!(miller_rabin(&big(3), 10, &mut rng));
        assert!(!miller_rabin(&big(4), 10, &mut rng));
    }

    #[test]
    fn known_prime_7883() {
        let mut rng = OsRng;
        for rounds in [1, 5, 20, 64] {
            assert!(miller_rabin(&big(7883), rounds, &mut rng));
        }
    }

    #[test]
    fn eight_is_composite_at_any_rounds() {
        let mut rng = OsRng;
        for rounds in 1..10 {
            assert!(!miller_rabin(&big(8), rounds, &mut rng));
        }
    }

    #[test]
    fn carmichael_numbers_are_composite() {
        let mut rng = OsRng;
        for n in [561u64, 1105, 1729, 41041, 825265] {
            assert!(!miller_rabin(&big(n), 20, &mut rng), "{n} accepted");
        }
    }

    #[test]
    fn agrees_with_library_on_small_range() {
        let mut rng = OsRng;
        for n in 5u64..3000 {
            let n = big(n);
            assert_eq!(miller_rabin(&n, 20, &mut rng), probably_prime(&n, 20), "n = {n}");
        }
    }

    #[test]
    fn large_known_primes() {
        let mut rng = OsRng;
        // 2^127 - 1 and 2^128 - 159
        let m127 = (BigUint::one() << 127usize) - 1u32;
        let p128 = (BigUint::one() << 128usize) - 159u32;
        assert!(miller_rabin(&m127, 20, &mut rng));
        assert!(miller_rabin(&p128, 20, &mut rng));
        assert!(!miller_rabin(&(&m127 * &p128), 20, &mut rng));
    }

    #[test]
    fn sieve_accepts_its_own_primes() {
        let mut rng = OsRng;
        assert!(is_probable_prime(&big(3), 5, &mut rng));
        assert!(is_probable_prime(&big(1619), 5, &mut rng));
        assert!(!is_probable_prime(&big(3 * 1619), 5, &mut rng));
        assert!(is_probable_prime(&big(7883), 5, &mut rng));
    }

    #[test]
    fn primes_with_many_factors_of_two() {
        let mut rng = OsRng;
        // 65537 - 1 = 2^16, 3 · 2^30 + 1 = 3221225473 is prime
        assert!(miller_rabin(&big(65537), 20, &mut rng));
        assert!(miller_rabin(&big(3_221_225_473), 20, &mut rng));
        assert!(!miller_rabin(&big(65537 * 257), 20, &mut rng));
    }

    #[test]
    fn estimate_k_table_values() {
        let target = 2f64.powi(-128);
        assert_eq!(estimate_k(128, target).unwrap(), 40);
        assert_eq!(estimate_k(512, target).unwrap(), 15);
        assert_eq!(estimate_k(1024, target).unwrap(), 10);
        assert_eq!(estimate_k(2048, target).unwrap(), 6);
        assert_eq!(estimate_k(8192, target).unwrap(), 3);
    }

    #[test]
    fn estimate_k_scales_with_target() {
        // 2^-64 halves the table figure for 1024 bits
        assert_eq!(estimate_k(1024, 2f64.powi(-64)).unwrap(), 5);
        // a loose target is bounded by the worst case
        assert_eq!(estimate_k(64, 0.25).unwrap(), 1);
        assert_eq!(estimate_k(64, 2f64.powi(-20)).unwrap(), 7);
    }

    #[test]
    fn estimate_k_rejects_bad_input() {
        assert!(estimate_k(0, 0.001).is_err());
        assert!(estimate_k(512, 0.0).is_err());
        assert!(estimate_k(512, 1.0).is_err());
        assert!(estimate_k(512, f64::NAN).is_err());
    }
}
