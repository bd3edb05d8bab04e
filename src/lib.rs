// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # modcrypt
//!
//! RSA, ElGamal and Diffie-Hellman built directly on modular arithmetic:
//! square-and-multiply exponentiation, extended-Euclid inverses,
//! Miller-Rabin primality, bounded prime searches and generator discovery.
//!
//! Messages of any length are cut into blocks smaller than the modulus and
//! followed by a size block, so leading, trailing and embedded zero bytes
//! survive a round trip exactly (see [`codec`]).
//!
//! These are textbook schemes without padding. They are meant for study and
//! experimentation, not for protecting real data.
//!
//! ## Example
//!
//! ```rust,no_run
//! use modcrypt::{Decrypt, Encrypt, RsaKeyBuilder, Sign, Verify};
//!
//! let keypair = RsaKeyBuilder::new().build().expect("key generation failed").into_inner();
//!
//! let ciphertext = keypair.encrypt("hello world").expect("encryption failed");
//! let plaintext = keypair.decrypt(&ciphertext).expect("decryption failed");
//! assert_eq!(plaintext, b"hello world");
//!
//! let signature = keypair.sign_message("hello world").expect("signing failed");
//! assert!(keypair.verify_message("hello world", &signature));
//! ```
//!
//! ## Secrets
//!
//! Private exponents are zeroized on drop via the `zeroize` crate and have
//! no `Debug` output unless the `expose-secret` feature is enabled.

pub mod codec;
pub mod math;

mod ciphertext;
mod crypto;
mod error;
mod keypair;

pub use ciphertext::{ElGamalBlock, ElGamalCiphertext};
pub use crypto::{sha256, Decrypt, Encrypt, Sign, Verify};
pub use error::{Advised, Error, OutOfRangeWarning, Result};
pub use keypair::{
    DhKeyPair, DhParams, DhParamsBuilder, ElGamalKeyPair, ElGamalPrivateKey, ElGamalPublicKey,
    RsaKeyBuilder, RsaKeyPair, RsaPrivateKey, RsaPublicKey, DEFAULT_TARGET_ERROR, DEFAULT_TRIES,
};
