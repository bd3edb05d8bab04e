#![no_main]

use libfuzzer_sys::fuzz_target;
use modcrypt::{Decrypt, DhParamsBuilder, ElGamalCiphertext, ElGamalKeyPair, Encrypt};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::sync::OnceLock;

static KEYPAIR: OnceLock<ElGamalKeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let keypair = KEYPAIR.get_or_init(|| {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let params = DhParamsBuilder::new().bit_length(128).build_with_rng(&mut rng).unwrap();
        ElGamalKeyPair::generate(&params, &mut rng).unwrap()
    });

    let ciphertext = keypair.encrypt(data).unwrap();

    // through the packed form as well
    let packed = ciphertext.to_bytes().unwrap();
    let unpacked = ElGamalCiphertext::from_bytes(&packed).unwrap();
    assert_eq!(unpacked, ciphertext);

    let decrypted = keypair.decrypt(&unpacked).unwrap();
    assert_eq!(decrypted, data, "ElGamal round trip lost bytes");
});
