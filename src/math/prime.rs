// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random candidate generation and bounded prime search.

use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::One;
use rand::rngs::StdRng;
use rand::{CryptoRng, RngCore, SeedableRng};
use tracing::{debug, trace};

use super::is_probable_prime;
use crate::error::{Error, Result};

/// Generate a random odd integer with exactly `bits` significant bits.
///
/// Ensures:
/// - Exact bit length (MSB set)
/// - Odd number (LSB set)
pub fn random_odd_number_nbits<R>(bits: usize, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    check_candidate_bits(bits)?;
    Ok(odd_candidate(bits, rng))
}

fn check_candidate_bits(bits: usize) -> Result<()> {
    if bits < 2 {
        return Err(Error::invalid(format!(
            "odd candidates need at least 2 bits, got {bits}"
        )));
    }
    Ok(())
}

/// Top and bottom bits forced on a uniform draw. `bits` must be at least 2.
fn odd_candidate<R>(bits: usize, rng: &mut R) -> BigUint
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut candidate = rng.gen_biguint(bits);
    candidate |= BigUint::one() << (bits - 1);
    candidate |= BigUint::one();
    candidate
}

/// Endless stream of fresh random odd `bits`-bit candidates.
///
/// Callers bound the search with [`Iterator::take`].
pub struct Candidates<'a, R: ?Sized> {
    bits: usize,
    rng: &'a mut R,
}

impl<'a, R> Candidates<'a, R>
where
    R: RngCore + CryptoRng + ?Sized,
{
    pub fn new(bits: usize, rng: &'a mut R) -> Result<Self> {
        check_candidate_bits(bits)?;
        Ok(Self { bits, rng })
    }

    pub fn bits(&self) -> usize {
        self.bits
    }
}

impl<'a, R> Iterator for Candidates<'a, R>
where
    R: RngCore + CryptoRng + ?Sized,
{
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        Some(odd_candidate(self.bits, &mut *self.rng))
    }
}

/// Search for a probable prime that also satisfies `predicate`.
///
/// `start_candidate` is tested first; every further candidate is a fresh
/// random odd number of the same bit length. At most `limit` candidates are
/// examined in total before failing with [`Error::PrimeSearchExhausted`].
///
/// `predicate` carries the caller's algebraic constraints (coprimality with a
/// public exponent, a minimum value, a minimum gap from another prime).
pub fn random_probable_prime<R, F>(
    start_candidate: BigUint,
    rounds: usize,
    mut predicate: F,
    limit: usize,
    rng: &mut R,
) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
    F: FnMut(&BigUint) -> bool,
{
    if limit == 0 {
        return Err(Error::invalid("prime search limit must be positive"));
    }

    let bits = start_candidate.bits();

    // Witness bases come from their own stream so the candidate iterator can
    // hold the caller's generator.
    let mut witness_rng =
        StdRng::from_rng(&mut *rng).map_err(|e| Error::Entropy(e.to_string()))?;
    let fresh = Candidates::new(bits, rng)?;

    for (attempt, candidate) in std::iter::once(start_candidate).chain(fresh).take(limit).enumerate()
    {
        if !predicate(&candidate) {
            trace!(attempt, "candidate rejected by predicate");
            continue;
        }
        if is_probable_prime(&candidate, rounds, &mut witness_rng) {
            debug!(bits, attempts = attempt + 1, "probable prime found");
            return Ok(candidate);
        }
    }

    debug!(bits, limit, "prime search exhausted");
    Err(Error::PrimeSearchExhausted { attempts: limit })
}

/// [`random_probable_prime`] without extra constraints, starting from a
/// fresh `bits`-bit candidate.
pub fn random_prime<R>(bits: usize, rounds: usize, limit: usize, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let start = random_odd_number_nbits(bits, rng)?;
    random_probable_prime(start, rounds, |_| true, limit, rng)
}
