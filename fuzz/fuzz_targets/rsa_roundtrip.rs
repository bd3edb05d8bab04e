#![no_main]

use libfuzzer_sys::fuzz_target;
use modcrypt::{Decrypt, Encrypt, RsaKeyBuilder, RsaKeyPair, Sign, Verify};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::sync::OnceLock;

static KEYPAIR: OnceLock<RsaKeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let keypair = KEYPAIR.get_or_init(|| {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        RsaKeyBuilder::new()
            .bit_length(512)
            .build_with_rng(&mut rng)
            .unwrap()
            .into_inner()
    });

    let ciphertext = keypair.encrypt(data).unwrap();
    let decrypted = keypair.decrypt(&ciphertext).unwrap();
    assert_eq!(decrypted, data, "RSA round trip lost bytes");

    let signature = keypair.sign_message(data).unwrap();
    assert!(keypair.verify_message(data, &signature));
});
