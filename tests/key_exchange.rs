// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used)]

use modcrypt::math::{is_generator, miller_rabin, Factored, GeneratorFinder};
use modcrypt::{Decrypt, DhKeyPair, DhParamsBuilder, ElGamalKeyPair, Encrypt, Error};
use num_bigint_dig::BigUint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn generated_group_is_a_safe_prime_group() {
    init_tracing();
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    let params = DhParamsBuilder::new().bit_length(128).build_with_rng(&mut rng).unwrap();

    let p = params.p();
    let q = params.q().unwrap();
    assert_eq!(p, &((q << 1usize) + 1u32));
    assert!(miller_rabin(p, 40, &mut rng));
    assert!(miller_rabin(q, 40, &mut rng));

    let finder = Factored::safe_prime(p, 40, &mut rng).unwrap();
    assert!(finder.is_generator(params.g(), p));
}

#[test]
fn two_parties_agree() {
    let mut rng = ChaCha20Rng::seed_from_u64(77);
    let params = DhParamsBuilder::new().bit_length(64).build_with_rng(&mut rng).unwrap();

    let alice = DhKeyPair::generate(&params, &mut rng).unwrap();
    let bob = DhKeyPair::generate(&params, &mut rng).unwrap();

    let k_alice = alice.shared_secret(bob.public_value()).unwrap();
    let k_bob = bob.shared_secret(alice.public_value()).unwrap();
    assert_eq!(k_alice, k_bob);
    assert!(k_alice < *params.p());
}

#[test]
fn elgamal_over_generated_group() {
    init_tracing();
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let params = DhParamsBuilder::new().bit_length(80).build_with_rng(&mut rng).unwrap();
    let keypair = ElGamalKeyPair::generate(&params, &mut rng).unwrap();

    let message = b"\0\0attack at dawn\0";
    let ciphertext = keypair.encrypt_with_rng(message, &mut rng).unwrap();
    assert_eq!(keypair.decrypt(&ciphertext).unwrap(), message);
}

#[test]
fn small_brute_force_group() {
    let p = BigUint::from(7883u32);
    assert!(is_generator(&BigUint::from(2u32), &p));
    assert!(!is_generator(&BigUint::from(7882u32), &p));
}

#[test]
fn impossible_budget_reports_exhaustion() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let result = DhParamsBuilder::new().bit_length(512).tries(1).build_with_rng(&mut rng);

    // A single candidate for a 256-bit q, and a single chance for 2q + 1.
    assert!(matches!(result, Err(Error::PrimeSearchExhausted { .. })));
}
