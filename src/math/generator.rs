// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generators of the multiplicative group modulo a prime.
//!
//! Two strategies sit behind [`GeneratorFinder`]. [`BruteForce`] walks every
//! power of the candidate and only suits small primes. [`Factored`] needs the
//! distinct prime factors of `p - 1` and costs one exponentiation per factor,
//! which is what key generation uses with safe primes.

use num_bigint_dig::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};

use super::{miller_rabin, power_mod};
use crate::error::{Error, Result};

/// A way to decide whether `g` generates `Z*_p`.
pub trait GeneratorFinder {
    /// True iff `g` lies in `[2, p - 1]` and has order `p - 1`.
    fn is_generator(&self, g: &BigUint, p: &BigUint) -> bool;

    /// Fails when this strategy cannot answer for `p`.
    fn check(&self, p: &BigUint) -> Result<()>;

    /// Draw uniform candidates from `[2, p - 1]` until one is a generator.
    ///
    /// At most `limit` candidates are drawn.
    fn find<R>(&self, p: &BigUint, limit: usize, rng: &mut R) -> Result<BigUint>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        self.check(p)?;
        if limit == 0 {
            return Err(Error::invalid("generator search limit must be positive"));
        }

        let low = BigUint::from(2u32);
        for attempt in 1..=limit {
            let g = rng.gen_biguint_range(&low, p);
            if self.is_generator(&g, p) {
                debug!(attempts = attempt, "generator found");
                return Ok(g);
            }
            trace!(attempt, "candidate is not a generator");
        }

        Err(Error::GeneratorSearchExhausted { attempts: limit })
    }
}

fn check_modulus(p: &BigUint) -> Result<()> {
    if p < &BigUint::from(3u32) {
        return Err(Error::invalid(format!("modulus {p} has no generator in [2, p - 1]")));
    }
    Ok(())
}

fn in_range(g: &BigUint, p: &BigUint) -> bool {
    g >= &BigUint::from(2u32) && g < p
}

/// Exhaustive order check: `g^k mod p != 1` for every `k` in `[1, p - 2]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl BruteForce {
    /// Largest modulus size, in bits, that [`BruteForce::check`] accepts.
    ///
    /// One scan costs up to `p - 2` multiplications, a few milliseconds at
    /// this size.
    pub const MAX_BITS: usize = 20;
}

impl GeneratorFinder for BruteForce {
    fn is_generator(&self, g: &BigUint, p: &BigUint) -> bool {
        if !in_range(g, p) {
            return false;
        }

        let one = BigUint::one();
        let last = p - 1u32;

        // One multiplication per exponent.
        let mut power = g.clone();
        let mut k = BigUint::one();
        while k < last {
            if power == one {
                return false;
            }
            power = (&power * g) % p;
            k += 1u32;
        }

        true
    }

    fn check(&self, p: &BigUint) -> Result<()> {
        check_modulus(p)?;
        if p.bits() > Self::MAX_BITS {
            return Err(Error::invalid(format!(
                "brute-force generator search handles at most {} bits, got {}",
                Self::MAX_BITS,
                p.bits()
            )));
        }
        Ok(())
    }
}

/// Order check through the distinct prime factors of `p - 1`.
///
/// `g` generates `Z*_p` iff `g^((p - 1) / f) mod p != 1` for every prime
/// factor `f`. The factor list must be complete; [`Factored::check`] only
/// verifies that each entry divides `p - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factored {
    factors: Vec<BigUint>,
}

impl Factored {
    /// Use caller-supplied distinct prime factors of `p - 1`.
    pub fn new(mut factors: Vec<BigUint>) -> Self {
        factors.sort();
        factors.dedup();
        Self { factors }
    }

    /// Factors `{2, q}` of a safe prime `p = 2q + 1`.
    ///
    /// Fails with [`Error::InvalidParameter`] unless `(p - 1) / 2` passes
    /// `rounds` Miller-Rabin rounds.
    pub fn safe_prime<R>(p: &BigUint, rounds: usize, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        if p < &BigUint::from(5u32) || p.is_even() {
            return Err(Error::invalid(format!("{p} is not a safe prime")));
        }

        let q: BigUint = (p - 1u32) >> 1usize;
        if !miller_rabin(&q, rounds, rng) {
            return Err(Error::invalid("(p - 1) / 2 is not prime"));
        }

        Ok(Self::new(vec![BigUint::from(2u32), q]))
    }

    pub fn factors(&self) -> &[BigUint] {
        &self.factors
    }
}

impl GeneratorFinder for Factored {
    fn is_generator(&self, g: &BigUint, p: &BigUint) -> bool {
        if !in_range(g, p) {
            return false;
        }

        let order = p - 1u32;
        self.factors
            .iter()
            .all(|f| !power_mod(g, &(&order / f), p).is_one())
    }

    fn check(&self, p: &BigUint) -> Result<()> {
        check_modulus(p)?;
        if self.factors.is_empty() {
            return Err(Error::invalid("no factors of p - 1 supplied"));
        }

        let order = p - 1u32;
        for f in &self.factors {
            if f < &BigUint::from(2u32) || !(&order % f).is_zero() {
                return Err(Error::invalid(format!("{f} does not divide p - 1")));
            }
        }
        Ok(())
    }
}

/// Brute-force check that `g` generates `Z*_p`.
///
/// Runs the scan of [`BruteForce`] without its [`BruteForce::check`] size
/// guard, so the cost grows linearly with `p`. Prefer [`Factored`] when the
/// factors of `p - 1` are known.
pub fn is_generator(g: &BigUint, p: &BigUint) -> bool {
    BruteForce.is_generator(g, p)
}

/// Random generator of `Z*_p` by brute force, sampling at most `p` candidates.
///
/// Fails with [`Error::InvalidParameter`] for moduli wider than
/// [`BruteForce::MAX_BITS`].
pub fn generate_generator<R>(p: &BigUint, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    BruteForce.check(p)?;
    let limit = p.to_usize().unwrap_or(usize::MAX);
    BruteForce.find(p, limit, rng)
}
