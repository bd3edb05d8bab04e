// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod elgamal;
mod rsa;
mod signature;

pub use signature::sha256;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::Result;

/// Encrypts arbitrary-length data by framing it into modulus-sized blocks.
pub trait Encrypt {
    type Ciphertext;

    /// Encrypt `plaintext`, drawing any per-block randomness from `rng`.
    ///
    /// Deterministic schemes ignore `rng`.
    fn encrypt_with_rng<R>(&self, plaintext: &[u8], rng: &mut R) -> Result<Self::Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized;

    /// Encrypt `plaintext` using the operating system's entropy source.
    fn encrypt<P: AsRef<[u8]>>(&self, plaintext: P) -> Result<Self::Ciphertext> {
        self.encrypt_with_rng(plaintext.as_ref(), &mut OsRng)
    }
}

/// Recovers the exact plaintext bytes from a framed ciphertext.
pub trait Decrypt {
    type Ciphertext: ?Sized;

    /// Fails with [`crate::Error::MalformedCiphertext`] when the input was not
    /// produced for this key; no partial plaintext is returned.
    fn decrypt(&self, ciphertext: &Self::Ciphertext) -> Result<Vec<u8>>;
}

/// Produces a signature over a digest.
pub trait Sign {
    /// Sign a digest that fits in a single block.
    fn sign(&self, digest: &[u8]) -> Result<Vec<u8>>;

    /// Hash `message` with SHA-256 and sign the digest.
    fn sign_message<M: AsRef<[u8]>>(&self, message: M) -> Result<Vec<u8>> {
        self.sign(&sha256(message.as_ref()))
    }
}

/// Checks a signature over a digest.
pub trait Verify {
    /// Returns `true` only if `signature` opens to exactly `digest`.
    ///
    /// Undecodable signatures are reported as `false`, never as an error.
    fn verify(&self, digest: &[u8], signature: &[u8]) -> bool;

    /// Hash `message` with SHA-256 and verify the signature over the digest.
    fn verify_message<M: AsRef<[u8]>>(&self, message: M, signature: &[u8]) -> bool {
        self.verify(&sha256(message.as_ref()), signature)
    }
}
