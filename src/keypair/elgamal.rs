// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{check_exponent, check_residue, random_exponent, DhParams};
use crate::error::{Error, Result};
use crate::math::power_mod;

/// ElGamal public key `(p, g, y = g^a mod p)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElGamalPublicKey {
    pub(crate) p: BigUint,
    pub(crate) g: BigUint,
    pub(crate) y: BigUint,
}

impl ElGamalPublicKey {
    /// Construct a public key from its components.
    ///
    /// `g` and `y` must lie in `[1, p - 1]`.
    pub fn new(p: BigUint, g: BigUint, y: BigUint) -> Result<Self> {
        if p <= BigUint::from(4u32) {
            return Err(Error::invalid("modulus must be greater than 4"));
        }
        check_residue(&g, &p, "generator")?;
        check_residue(&y, &p, "public value")?;

        Ok(Self { p, g, y })
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// The public value `g^a mod p`.
    pub fn y(&self) -> &BigUint {
        &self.y
    }
}

/// ElGamal private exponent `a` together with its public key.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct ElGamalPrivateKey {
    #[zeroize(skip)]
    pub(crate) public_key: ElGamalPublicKey,
    pub(crate) a: BigUint,
}

impl ElGamalPrivateKey {
    /// Requires `a` in `[2, p - 2]`. Whether `y = g^a` is not checked, so a
    /// key can be rebuilt from `p` and `a` alone for decryption.
    pub fn new(public_key: ElGamalPublicKey, a: BigUint) -> Result<Self> {
        check_exponent(&a, &public_key.p, "private exponent")?;
        Ok(Self { public_key, a })
    }

    pub fn public_key(&self) -> &ElGamalPublicKey {
        &self.public_key
    }
}

/// A complete ElGamal key pair.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct ElGamalKeyPair {
    #[zeroize(skip)]
    public: ElGamalPublicKey,
    secret: ElGamalPrivateKey,
}

impl ElGamalKeyPair {
    /// Draw `a` uniformly from `[2, p - 2]` in the given group.
    pub fn generate<R>(params: &DhParams, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let a = random_exponent(params.p(), rng)?;
        Self::from_private(params, a)
    }

    /// Rebuild the key pair for a known private exponent.
    pub fn from_private(params: &DhParams, a: BigUint) -> Result<Self> {
        let y = power_mod(params.g(), &a, params.p());
        let public = ElGamalPublicKey::new(params.p().clone(), params.g().clone(), y)?;
        let secret = ElGamalPrivateKey::new(public.clone(), a)?;
        Ok(Self { public, secret })
    }

    pub fn public_key(&self) -> &ElGamalPublicKey {
        &self.public
    }

    pub fn private_key(&self) -> &ElGamalPrivateKey {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rand::rngs::OsRng;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn public_value_matches_private_exponent() {
        let params = DhParams::from_group(big(28499), big(2)).unwrap();
        let keypair = ElGamalKeyPair::from_private(&params, big(3939)).unwrap();
        assert_eq!(keypair.public_key().y(), &big(18096));
    }

    #[test]
    fn generated_exponent_in_range() {
        let mut rng = OsRng;
        let params = DhParams::from_group(big(7883), big(2)).unwrap();
        for _ in 0..50 {
            let keypair = ElGamalKeyPair::generate(&params, &mut rng).unwrap();
            let a = &keypair.private_key().a;
            assert!(a >= &big(2) && a <= &big(7881));
            assert_eq!(keypair.public_key().y(), &power_mod(&big(2), a, &big(7883)));
        }
    }

    #[test]
    fn constructors_validate() {
        let p = big(28499);
        assert!(ElGamalPublicKey::new(p.clone(), big(0), big(5)).is_err());
        assert!(ElGamalPublicKey::new(p.clone(), big(2), p.clone()).is_err());

        let public = ElGamalPublicKey::new(p, big(2), big(18096)).unwrap();
        assert!(ElGamalPrivateKey::new(public.clone(), big(1)).is_err());
        assert!(ElGamalPrivateKey::new(public.clone(), big(28498)).is_err());
        assert!(ElGamalPrivateKey::new(public, big(3939)).is_ok());
    }
}
