// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RSA signatures: the digest is sealed with `d` and opened with `e`.

use sha2::{Digest, Sha256};
use tracing::debug;

use super::rsa::{open, seal};
use super::{Sign, Verify};
use crate::codec::compute_block_size;
use crate::error::{Error, Result};
use crate::keypair::{RsaKeyPair, RsaPrivateKey, RsaPublicKey};

/// SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

impl Sign for RsaPrivateKey {
    /// The digest must fit a single block, so the signature is always two
    /// blocks wide.
    fn sign(&self, digest: &[u8]) -> Result<Vec<u8>> {
        let n = &self.public_key.n;
        let block_size = compute_block_size(n)?;
        if digest.len() > block_size {
            return Err(Error::invalid(format!(
                "{}-byte digest exceeds the {block_size}-byte block of this key",
                digest.len()
            )));
        }

        seal(digest, &self.d, n)
    }
}

impl Verify for RsaPublicKey {
    fn verify(&self, digest: &[u8], signature: &[u8]) -> bool {
        match open(signature, &self.e, &self.n) {
            Ok(recovered) => recovered == digest,
            Err(err) => {
                debug!(%err, "signature rejected");
                false
            }
        }
    }
}

impl Sign for RsaKeyPair {
    fn sign(&self, digest: &[u8]) -> Result<Vec<u8>> {
        self.private_key().sign(digest)
    }
}

impl Verify for RsaKeyPair {
    fn verify(&self, digest: &[u8], signature: &[u8]) -> bool {
        self.public_key().verify(digest, signature)
    }
}
