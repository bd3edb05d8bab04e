// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used)]

use std::sync::OnceLock;

use modcrypt::codec::{compute_block_size, frame, unframe};
use modcrypt::{
    Decrypt, DhParams, DhParamsBuilder, ElGamalCiphertext, ElGamalKeyPair, Encrypt,
    RsaKeyBuilder, RsaKeyPair, Sign, Verify,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

static RSA: OnceLock<RsaKeyPair> = OnceLock::new();
static ELGAMAL: OnceLock<ElGamalKeyPair> = OnceLock::new();

fn rsa() -> &'static RsaKeyPair {
    RSA.get_or_init(|| {
        let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
        RsaKeyBuilder::new()
            .bit_length(512)
            .build_with_rng(&mut rng)
            .unwrap()
            .into_inner()
    })
}

fn elgamal() -> &'static ElGamalKeyPair {
    ELGAMAL.get_or_init(|| {
        let mut rng = ChaCha20Rng::seed_from_u64(0xe19a);
        let params: DhParams = DhParamsBuilder::new()
            .bit_length(96)
            .build_with_rng(&mut rng)
            .unwrap();
        ElGamalKeyPair::generate(&params, &mut rng).unwrap()
    })
}

proptest! {
    #[test]
    fn codec_round_trip(data in prop::collection::vec(any::<u8>(), 0..300), block_size in 1usize..64) {
        let framed = frame(&data, block_size).unwrap();
        prop_assert_eq!(framed.len(), data.len().div_ceil(block_size) + 1);
        prop_assert_eq!(unframe(&framed, block_size).unwrap(), data);
    }

    #[test]
    fn rsa_round_trip(data in prop::collection::vec(any::<u8>(), 0..300)) {
        let keypair = rsa();
        let ciphertext = keypair.encrypt(&data).unwrap();

        let width = compute_block_size(keypair.public_key().n()).unwrap() + 1;
        prop_assert_eq!(ciphertext.len() % width, 0);
        prop_assert_eq!(keypair.decrypt(&ciphertext).unwrap(), data);
    }

    #[test]
    fn elgamal_round_trip(data in prop::collection::vec(any::<u8>(), 0..200)) {
        let keypair = elgamal();
        let ciphertext = keypair.encrypt(&data).unwrap();
        prop_assert_eq!(keypair.decrypt(&ciphertext).unwrap(), data);
    }

    #[test]
    fn signatures_bind_the_message(message in prop::collection::vec(any::<u8>(), 0..100), flip in any::<u8>()) {
        let keypair = rsa();
        let signature = keypair.sign_message(&message).unwrap();
        prop_assert!(keypair.verify_message(&message, &signature));

        let mut altered = message.clone();
        altered.push(flip);
        prop_assert!(!keypair.verify_message(&altered, &signature));
    }

    #[test]
    fn rsa_decrypt_never_panics(data in prop::collection::vec(any::<u8>(), 0..400)) {
        let _ = rsa().decrypt(&data);
    }

    #[test]
    fn packed_elgamal_parse_never_panics(data in prop::collection::vec(any::<u8>(), 0..200)) {
        if let Ok(ciphertext) = ElGamalCiphertext::from_bytes(&data) {
            let _ = elgamal().decrypt(&ciphertext);
        }
    }
}
