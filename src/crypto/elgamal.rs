// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use tracing::trace;

use super::{Decrypt, Encrypt};
use crate::ciphertext::{ElGamalBlock, ElGamalCiphertext};
use crate::codec::{compute_block_size, frame, unframe};
use crate::error::{Error, Result};
use crate::keypair::{random_exponent, ElGamalKeyPair, ElGamalPrivateKey, ElGamalPublicKey};
use crate::math::{multiplicative_inverse, power_mod};

impl Encrypt for ElGamalPublicKey {
    type Ciphertext = ElGamalCiphertext;

    /// Each framed block, the size block included, gets its own ephemeral
    /// exponent `k` drawn from `[2, p - 2]`.
    fn encrypt_with_rng<R>(&self, plaintext: &[u8], rng: &mut R) -> Result<ElGamalCiphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let block_size = compute_block_size(&self.p)?;
        let values = frame(plaintext, block_size)?;
        trace!(blocks = values.len(), block_size, "ElGamal encrypt");

        values
            .iter()
            .map(|m| {
                let k = random_exponent(&self.p, rng)?;
                let c1 = power_mod(&self.g, &k, &self.p);
                let c2 = (m * power_mod(&self.y, &k, &self.p)) % &self.p;
                Ok(ElGamalBlock::new(c1, c2))
            })
            .collect()
    }
}

impl Decrypt for ElGamalPrivateKey {
    type Ciphertext = ElGamalCiphertext;

    fn decrypt(&self, ciphertext: &ElGamalCiphertext) -> Result<Vec<u8>> {
        let p = &self.public_key.p;
        let block_size = compute_block_size(p)?;

        let values = ciphertext
            .blocks()
            .iter()
            .map(|block| {
                let (c1, c2) = (block.c1(), block.c2());
                if c1.is_zero() || c1 >= p || c2 >= p {
                    return Err(Error::malformed("block is not reduced modulo p"));
                }

                // m = c2 · (c1^a)^-1 mod p
                let shared = power_mod(c1, &self.a, p);
                let mask = multiplicative_inverse(&shared, p)
                    .map_err(|_| Error::malformed("ephemeral value has no inverse"))?;
                Ok((c2 * mask) % p)
            })
            .collect::<Result<Vec<_>>>()?;

        unframe(&values, block_size)
    }
}

impl Encrypt for ElGamalKeyPair {
    type Ciphertext = ElGamalCiphertext;

    fn encrypt_with_rng<R>(&self, plaintext: &[u8], rng: &mut R) -> Result<ElGamalCiphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        self.public_key().encrypt_with_rng(plaintext, rng)
    }
}

impl Decrypt for ElGamalKeyPair {
    type Ciphertext = ElGamalCiphertext;

    fn decrypt(&self, ciphertext: &ElGamalCiphertext) -> Result<Vec<u8>> {
        self.private_key().decrypt(ciphertext)
    }
}
