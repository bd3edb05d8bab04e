// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Textbook RSA over framed blocks.
//!
//! Every framed value is raised to the key's exponent and written at
//! `block_size + 1` bytes, which holds any residue of `n`. The same two
//! functions drive encryption (exponent `e`), decryption (`d`), signing (`d`)
//! and verification (`e`).

use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};
use tracing::trace;

use super::{Decrypt, Encrypt};
use crate::codec::{bytes_from_block, compute_block_size, frame, split_fixed, unframe};
use crate::error::{Error, Result};
use crate::keypair::{RsaKeyPair, RsaPrivateKey, RsaPublicKey};
use crate::math::power_mod;

/// Frame `data` under `n` and raise every value to `exponent`.
pub(crate) fn seal(data: &[u8], exponent: &BigUint, n: &BigUint) -> Result<Vec<u8>> {
    let block_size = compute_block_size(n)?;
    let width = block_size + 1;

    let values = frame(data, block_size)?;
    trace!(blocks = values.len(), block_size, "sealing");

    let mut out = Vec::with_capacity(values.len() * width);
    for value in &values {
        out.extend(bytes_from_block(&power_mod(value, exponent, n), width)?);
    }

    Ok(out)
}

/// Inverse of [`seal`] for the matching exponent.
pub(crate) fn open(sealed: &[u8], exponent: &BigUint, n: &BigUint) -> Result<Vec<u8>> {
    let block_size = compute_block_size(n)?;

    let values = split_fixed(sealed, block_size + 1)?
        .iter()
        .map(|c| {
            if c >= n {
                return Err(Error::malformed("block is not reduced modulo n"));
            }
            Ok(power_mod(c, exponent, n))
        })
        .collect::<Result<Vec<_>>>()?;

    unframe(&values, block_size)
}

impl Encrypt for RsaPublicKey {
    type Ciphertext = Vec<u8>;

    fn encrypt_with_rng<R>(&self, plaintext: &[u8], _rng: &mut R) -> Result<Vec<u8>>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        seal(plaintext, &self.e, &self.n)
    }
}

impl Decrypt for RsaPrivateKey {
    type Ciphertext = [u8];

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        open(ciphertext, &self.d, &self.public_key.n)
    }
}

impl Encrypt for RsaKeyPair {
    type Ciphertext = Vec<u8>;

    fn encrypt_with_rng<R>(&self, plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        self.public_key().encrypt_with_rng(plaintext, rng)
    }
}

impl Decrypt for RsaKeyPair {
    type Ciphertext = [u8];

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.private_key().decrypt(ciphertext)
    }
}
