// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{Error, Result};

/// Computes `base^exponent mod modulus` by binary square-and-multiply.
///
/// `base` may exceed the modulus; it is reduced first. A zero exponent yields
/// `1 mod modulus`, so a modulus of one always yields zero.
///
/// # Panics
/// Panics if `modulus` is zero, like [`BigUint::modpow`]. Use
/// [`checked_power_mod`] when the modulus is untrusted. Key constructors in
/// this crate reject such moduli, so their exponentiations cannot reach the
/// panic.
#[track_caller]
pub fn power_mod(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "power_mod with zero modulus");

    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;

    // Scan exponent bits from least significant upwards.
    let bits = exponent.bits();
    for (i, byte) in exponent.to_bytes_le().into_iter().enumerate() {
        for j in 0..8 {
            if i * 8 + j >= bits {
                break;
            }
            if (byte >> j) & 1 == 1 {
                result = (&result * &base) % modulus;
            }
            base = (&base * &base) % modulus;
        }
    }

    result
}

/// [`power_mod`] returning [`Error::InvalidParameter`] for a zero modulus.
pub fn checked_power_mod(
    base: &BigUint,
    exponent: &BigUint,
    modulus: &BigUint,
) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::invalid("modulus must be at least 1"));
    }
    Ok(power_mod(base, exponent, modulus))
}

/// Computes `x` such that `a·x ≡ 1 (mod m)` with the extended Euclidean
/// algorithm. The result lies in `[0, m)`.
///
/// Fails with [`Error::NoInverse`] when `gcd(a, m) != 1` or `m <= 1`.
pub fn multiplicative_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m <= &BigUint::one() {
        return Err(Error::NoInverse);
    }

    let modulus = BigInt::from(m.clone());

    // Invariant: old_r ≡ old_s·a (mod m) and r ≡ s·a (mod m)
    let (mut old_r, mut r) = (BigInt::from(a % m), modulus.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return Err(Error::NoInverse);
    }

    let x = old_s.mod_floor(&modulus);
    debug_assert!(!x.is_negative());

    x.to_biguint().ok_or(Error::NoInverse)
}

/// Returns true when `gcd(a, b) == 1`.
#[inline]
pub fn are_coprime(a: &BigUint, b: &BigUint) -> bool {
    a.gcd(b).is_one()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use num_bigint_dig::ModInverse;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn power_mod_small_values() {
        assert_eq!(power_mod(&big(4), &big(13), &big(497)), big(445));
        assert_eq!(power_mod(&big(2), &big(10), &big(1000)), big(24));
        assert_eq!(power_mod(&big(3), &big(200), &big(50)), big(1));
    }

    #[test]
    fn power_mod_zero_exponent() {
        assert_eq!(power_mod(&big(12345), &big(0), &big(7)), big(1));
        assert_eq!(power_mod(&big(0), &big(0), &big(7)), big(1));
    }

    #[test]
    fn power_mod_modulus_one() {
        assert_eq!(power_mod(&big(12345), &big(0), &big(1)), big(0));
        assert_eq!(power_mod(&big(5), &big(3), &big(1)), big(0));
    }

    #[test]
    fn power_mod_reduces_large_base() {
        let m = big(7883);
        let base = big(7883 * 5 + 2);
        assert_eq!(power_mod(&base, &big(1876), &m), power_mod(&big(2), &big(1876), &m));
    }

    #[test]
    fn power_mod_matches_modpow() {
        let base = BigUint::parse_bytes(b"123456789012345678901234567890", 10).unwrap();
        let exp = BigUint::parse_bytes(b"987654321098765432109876543210", 10).unwrap();
        for m in [big(2), big(1_000_000), big(0xFFFF_FFFF_FFFF_FFC5), &base + big(17)] {
            assert_eq!(power_mod(&base, &exp, &m), base.modpow(&exp, &m));
        }
    }

    #[test]
    #[should_panic(expected = "power_mod with zero modulus")]
    fn power_mod_panics_on_zero_modulus() {
        power_mod(&big(2), &big(3), &big(0));
    }

    #[test]
    fn checked_power_mod_rejects_zero_modulus() {
        let result = checked_power_mod(&big(2), &big(3), &big(0));
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
        assert_eq!(checked_power_mod(&big(4), &big(13), &big(497)).unwrap(), big(445));
    }

    #[test]
    fn inverse_small_values() {
        assert_eq!(multiplicative_inverse(&big(3), &big(11)).unwrap(), big(4));
        assert_eq!(multiplicative_inverse(&big(17), &big(60)).unwrap(), big(53));
        assert_eq!(multiplicative_inverse(&big(1), &big(2)).unwrap(), big(1));
    }

    #[test]
    fn inverse_reduces_operand() {
        // 65537 ≡ 17 (mod 60)
        assert_eq!(multiplicative_inverse(&big(65537), &big(60)).unwrap(), big(53));
    }

    #[test]
    fn inverse_fails_when_not_coprime() {
        assert_eq!(multiplicative_inverse(&big(6), &big(9)), Err(Error::NoInverse));
        assert_eq!(multiplicative_inverse(&big(0), &big(9)), Err(Error::NoInverse));
        assert_eq!(multiplicative_inverse(&big(5), &big(1)), Err(Error::NoInverse));
        assert_eq!(multiplicative_inverse(&big(5), &big(0)), Err(Error::NoInverse));
    }

    #[test]
    fn inverse_matches_library() {
        let m = BigUint::parse_bytes(b"340282366920938463463374607431768211297", 10).unwrap();
        let a = BigUint::parse_bytes(b"98765432109876543210", 10).unwrap();

        let ours = multiplicative_inverse(&a, &m).unwrap();
        let theirs = a.clone().mod_inverse(&m).unwrap().to_biguint().unwrap();

        assert_eq!(ours, theirs);
        assert_eq!((&a * &ours) % &m, BigUint::one());
    }

    #[test]
    fn coprimality() {
        assert!(are_coprime(&big(10), &big(65537)));
        assert!(!are_coprime(&big(12), &big(18)));
    }
}
