// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key material and key generation.
//!
//! Public halves are plain values. Secret halves are opaque unless the
//! `expose-secret` feature is enabled, and are zeroized on drop.

mod dh;
mod elgamal;
mod rsa;

pub use dh::{DhKeyPair, DhParams, DhParamsBuilder};
pub use elgamal::{ElGamalKeyPair, ElGamalPrivateKey, ElGamalPublicKey};
pub use rsa::{RsaKeyBuilder, RsaKeyPair, RsaPrivateKey, RsaPublicKey};

use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::One;
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// Default retry budget for prime and generator searches.
pub const DEFAULT_TRIES: usize = 30_000;

/// Default primality error bound, `2^-128`.
pub const DEFAULT_TARGET_ERROR: f64 = 2.938_735_877_055_719e-39;

/// Uniform private exponent in `[2, p - 2]`.
pub(crate) fn random_exponent<R>(p: &BigUint, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if p <= &BigUint::from(4u32) {
        return Err(Error::invalid(format!("modulus {p} leaves no room for an exponent")));
    }
    Ok(rng.gen_biguint_range(&BigUint::from(2u32), &(p - 1u32)))
}

/// Fails unless `a` lies in `[2, p - 2]`.
pub(crate) fn check_exponent(a: &BigUint, p: &BigUint, what: &str) -> Result<()> {
    let two = BigUint::from(2u32);
    if p <= &BigUint::from(4u32) || a < &two || a > &(p - &two) {
        return Err(Error::invalid(format!("{what} must lie in [2, p - 2]")));
    }
    Ok(())
}

/// Fails unless `x` lies in `[1, p - 1]`.
pub(crate) fn check_residue(x: &BigUint, p: &BigUint, what: &str) -> Result<()> {
    if x < &BigUint::one() || x >= p {
        return Err(Error::invalid(format!("{what} must lie in [1, p - 1]")));
    }
    Ok(())
}
