// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{check_exponent, random_exponent, DEFAULT_TARGET_ERROR, DEFAULT_TRIES};
use crate::error::{Error, Result};
use crate::math::{
    estimate_k, miller_rabin, power_mod, random_odd_number_nbits, random_probable_prime,
    Factored, GeneratorFinder,
};

/// Public Diffie-Hellman group parameters: a prime `p` and a generator `g`
/// of `Z*_p`.
///
/// Groups produced by [`DhParamsBuilder`] use a safe prime `p = 2q + 1`, and
/// `q` is kept alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhParams {
    p: BigUint,
    q: Option<BigUint>,
    g: BigUint,
}

impl DhParams {
    /// Parameters over a safe prime `p = 2q + 1`.
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Result<Self> {
        if p != (&q << 1usize) + 1u32 {
            return Err(Error::invalid("p must equal 2q + 1"));
        }
        Self::from_group(p, g).map(|params| Self { q: Some(q), ..params })
    }

    /// Parameters for a published group with an arbitrary prime modulus.
    pub fn from_group(p: BigUint, g: BigUint) -> Result<Self> {
        if p <= BigUint::from(3u32) {
            return Err(Error::invalid("group modulus must be greater than 3"));
        }
        if g < BigUint::from(2u32) || g >= p {
            return Err(Error::invalid("generator must lie in [2, p - 1]"));
        }
        Ok(Self { p, q: None, g })
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The Sophie Germain prime `(p - 1) / 2`, when known.
    pub fn q(&self) -> Option<&BigUint> {
        self.q.as_ref()
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }
}

/// Builder for fresh Diffie-Hellman groups over safe primes.
#[derive(Debug, Clone)]
pub struct DhParamsBuilder {
    bit_length: usize,
    tries: usize,
    target_error: f64,
}

impl DhParamsBuilder {
    /// Smallest `bit_length` accepted.
    pub const MIN_BITS: usize = 8;

    pub fn new() -> Self {
        Self {
            bit_length: 2048,
            tries: DEFAULT_TRIES,
            target_error: DEFAULT_TARGET_ERROR,
        }
    }

    /// Size parameter; `q` is drawn with `ceil(bit_length / 2)` bits.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Budget for each search: candidates for `q`, attempts at a prime
    /// `p = 2q + 1`, and generator draws.
    pub fn tries(mut self, tries: usize) -> Self {
        self.tries = tries;
        self
    }

    /// Acceptable probability that `p` or `q` is composite.
    pub fn target_error(mut self, target_error: f64) -> Self {
        self.target_error = target_error;
        self
    }

    /// Generate parameters using the operating system's entropy source.
    pub fn build(self) -> Result<DhParams> {
        self.build_with_rng(&mut OsRng)
    }

    pub fn build_with_rng<R>(self, rng: &mut R) -> Result<DhParams>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        if self.bit_length < Self::MIN_BITS {
            return Err(Error::invalid(format!(
                "bit length must be at least {}, got {}",
                Self::MIN_BITS,
                self.bit_length
            )));
        }
        if self.tries == 0 {
            return Err(Error::invalid("retry budget must be positive"));
        }

        let rounds = estimate_k(self.bit_length, self.target_error)?;
        let q_size = self.bit_length.div_ceil(2);

        for attempt in 1..=self.tries {
            let start = random_odd_number_nbits(q_size, rng)?;
            let q = random_probable_prime(start, rounds, |_| true, self.tries, rng)?;
            let p: BigUint = (&q << 1usize) + 1u32;

            if !miller_rabin(&p, rounds, rng) {
                trace!(attempt, "2q + 1 is composite");
                continue;
            }
            debug!(bits = p.bits(), attempts = attempt, "safe prime found");

            let g = Factored::safe_prime(&p, rounds, rng)?.find(&p, self.tries, rng)?;
            return DhParams::new(p, q, g);
        }

        Err(Error::PrimeSearchExhausted { attempts: self.tries })
    }
}

impl Default for DhParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One party's Diffie-Hellman key: private `a` and public `g^a mod p`.
///
/// `a` is zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct DhKeyPair {
    #[zeroize(skip)]
    params: DhParams,
    #[zeroize(skip)]
    public: BigUint,
    private: BigUint,
}

impl DhKeyPair {
    /// Draw a private exponent uniformly from `[2, p - 2]`.
    pub fn generate<R>(params: &DhParams, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let private = random_exponent(&params.p, rng)?;
        Self::from_private(params.clone(), private)
    }

    /// Rebuild a key pair from a known private exponent.
    pub fn from_private(params: DhParams, private: BigUint) -> Result<Self> {
        check_exponent(&private, &params.p, "private exponent")?;
        let public = power_mod(&params.g, &private, &params.p);
        Ok(Self { params, public, private })
    }

    pub fn params(&self) -> &DhParams {
        &self.params
    }

    /// The value sent to the peer, `g^a mod p`.
    pub fn public_value(&self) -> &BigUint {
        &self.public
    }

    /// The shared secret `peer^a mod p`.
    ///
    /// Peer values outside `[2, p - 2]` are rejected: `0`, `1` and `p - 1`
    /// would force the secret into a subgroup of order at most two.
    pub fn shared_secret(&self, peer_public: &BigUint) -> Result<BigUint> {
        check_exponent(peer_public, &self.params.p, "peer public value")?;
        Ok(power_mod(peer_public, &self.private, &self.params.p))
    }
}
