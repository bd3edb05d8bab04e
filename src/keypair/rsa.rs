// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{DEFAULT_TARGET_ERROR, DEFAULT_TRIES};
use crate::error::{Advised, Error, OutOfRangeWarning, Result};
use crate::math::{
    are_coprime, estimate_k, multiplicative_inverse, random_odd_number_nbits,
    random_probable_prime,
};

/// RSA public key `(n, e)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
}

impl RsaPublicKey {
    /// Construct a public key from its components.
    ///
    /// `n` must exceed 1 and `e` must be odd and at least 3.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        if n <= BigUint::one() {
            return Err(Error::invalid("modulus must be greater than 1"));
        }
        check_public_exponent(&e)?;

        Ok(Self { n, e })
    }

    /// Return the public modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the public exponent `e`.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Return the bit length of the modulus.
    pub fn bit_length(&self) -> usize {
        self.n.bits()
    }
}

/// RSA private exponent together with its public key.
///
/// `d` is zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct RsaPrivateKey {
    #[zeroize(skip)]
    pub(crate) public_key: RsaPublicKey,
    pub(crate) d: BigUint,
}

impl RsaPrivateKey {
    /// Construct a private key from its components.
    ///
    /// Requires `0 < d < n`.
    pub fn new(public_key: RsaPublicKey, d: BigUint) -> Result<Self> {
        if d.is_zero() || d >= public_key.n {
            return Err(Error::invalid("private exponent must lie in (0, n)"));
        }

        Ok(Self { public_key, d })
    }

    /// Return a reference to the associated public key.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }
}

/// A complete RSA key pair.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct RsaKeyPair {
    #[zeroize(skip)]
    public: RsaPublicKey,
    secret: RsaPrivateKey,
}

impl RsaKeyPair {
    /// Generate a key pair with default parameters (2048-bit modulus,
    /// `e = 65537`).
    pub fn generate() -> Result<Self> {
        RsaKeyBuilder::new().build().map(Advised::into_inner)
    }

    /// Generate a key pair with a custom modulus size.
    ///
    /// Out-of-range advisories are logged and otherwise dropped; use
    /// [`RsaKeyBuilder`] to inspect them.
    pub fn generate_with_size(bit_length: usize) -> Result<Self> {
        RsaKeyBuilder::new()
            .bit_length(bit_length)
            .build()
            .map(Advised::into_inner)
    }

    /// Pair an existing private key with its public half.
    pub fn from_private_key(secret: RsaPrivateKey) -> Self {
        Self { public: secret.public_key.clone(), secret }
    }

    /// Return the public key.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.secret
    }
}

fn check_public_exponent(e: &BigUint) -> Result<()> {
    if e < &BigUint::from(3u32) {
        return Err(Error::invalid("public exponent must be at least 3"));
    }
    if e.is_even() {
        return Err(Error::invalid("public exponent must be odd"));
    }
    Ok(())
}

/// Builder for RSA key generation.
///
/// Primes are drawn following the FIPS 186-4 shape: both factors are at
/// least `√2 · 2^(size - 1)` so the modulus has exactly `bit_length` bits,
/// they differ by at least `2^(bit_length/2 - 100)`, and keys whose private
/// exponent is not above `2^(bit_length/2)` are discarded.
#[derive(Debug, Clone)]
pub struct RsaKeyBuilder {
    bit_length: usize,
    public_exponent: BigUint,
    tries: usize,
    target_error: f64,
}

impl RsaKeyBuilder {
    /// Smallest modulus size accepted at all.
    pub const MIN_BITS: usize = 8;

    /// Modulus sizes outside this list raise [`OutOfRangeWarning::ModulusBits`].
    pub const RECOMMENDED_BITS: [usize; 2] = [2048, 3072];

    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self {
            bit_length: 2048,
            public_exponent: BigUint::from(65_537u32),
            tries: DEFAULT_TRIES,
            target_error: DEFAULT_TARGET_ERROR,
        }
    }

    /// Set the desired modulus bit length.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Set the public exponent.
    pub fn public_exponent(mut self, e: impl Into<BigUint>) -> Self {
        self.public_exponent = e.into();
        self
    }

    /// Candidate budget for each prime search, and for the number of
    /// `(p, q)` draws.
    pub fn tries(mut self, tries: usize) -> Self {
        self.tries = tries;
        self
    }

    /// Acceptable probability that a factor is composite.
    pub fn target_error(mut self, target_error: f64) -> Self {
        self.target_error = target_error;
        self
    }

    /// Generate the key pair using the operating system's entropy source.
    pub fn build(self) -> Result<Advised<RsaKeyPair>> {
        self.build_with_rng(&mut OsRng)
    }

    /// Generate the key pair.
    pub fn build_with_rng<R>(self, rng: &mut R) -> Result<Advised<RsaKeyPair>>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let nlen = self.bit_length;
        let e = &self.public_exponent;

        if nlen < Self::MIN_BITS {
            return Err(Error::invalid(format!(
                "modulus must have at least {} bits, got {nlen}",
                Self::MIN_BITS
            )));
        }
        check_public_exponent(e)?;
        if self.tries == 0 {
            return Err(Error::invalid("retry budget must be positive"));
        }

        let warnings = self.advisories();
        for warning in &warnings {
            warn!(%warning, "RSA parameter outside recommended range");
        }

        let p_size = nlen.div_ceil(2);
        let q_size = nlen - p_size;
        let rounds = estimate_k(p_size, self.target_error)?;

        // floor(√2 · 2^(size-1)). The real bound is irrational, so a prime
        // meets it exactly when it is strictly above the floor.
        let min_p = (BigUint::one() << (2 * p_size - 1)).sqrt();
        let min_q = (BigUint::one() << (2 * q_size - 1)).sqrt();
        let min_d = BigUint::one() << (nlen / 2);
        let min_gap = BigUint::one() << (nlen / 2).saturating_sub(100);

        for attempt in 1..=self.tries {
            let p = Zeroizing::new(random_probable_prime(
                random_odd_number_nbits(p_size, rng)?,
                rounds,
                |c| c > &min_p && are_coprime(&(c - 1u32), e),
                self.tries,
                rng,
            )?);

            let q = Zeroizing::new(random_probable_prime(
                random_odd_number_nbits(q_size, rng)?,
                rounds,
                |c| c > &min_q && are_coprime(&(c - 1u32), e) && abs_diff(&p, c) >= min_gap,
                self.tries,
                rng,
            )?);

            let p_minus_1 = Zeroizing::new(&*p - 1u32);
            let q_minus_1 = Zeroizing::new(&*q - 1u32);
            let lambda = Zeroizing::new(p_minus_1.lcm(&q_minus_1));
            let d = multiplicative_inverse(e, &lambda)?;

            if d <= min_d {
                debug!(attempt, "private exponent too small, redrawing primes");
                continue;
            }

            let n = &*p * &*q;
            debug!(bits = n.bits(), attempts = attempt, "RSA key generated");

            let public = RsaPublicKey::new(n, e.clone())?;
            let secret = RsaPrivateKey::new(public.clone(), d)?;

            return Ok(Advised::new(RsaKeyPair { public, secret }, warnings));
        }

        Err(Error::PrimeSearchExhausted { attempts: self.tries })
    }

    fn advisories(&self) -> Vec<OutOfRangeWarning> {
        let mut warnings = Vec::new();

        let e = &self.public_exponent;
        if e <= &(BigUint::one() << 16usize) || e >= &(BigUint::one() << 256usize) {
            warnings.push(OutOfRangeWarning::PublicExponent { exponent: e.clone() });
        }
        if !Self::RECOMMENDED_BITS.contains(&self.bit_length) {
            warnings.push(OutOfRangeWarning::ModulusBits { bits: self.bit_length });
        }

        warnings
    }
}

impl Default for RsaKeyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn abs_diff(a: &BigUint, b: &BigUint) -> BigUint {
    if a > b {
        a - b
    } else {
        b - a
    }
}
