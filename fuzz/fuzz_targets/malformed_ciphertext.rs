#![no_main]

use libfuzzer_sys::fuzz_target;
use modcrypt::{
    Decrypt, DhParams, ElGamalCiphertext, ElGamalKeyPair, RsaKeyPair, RsaPrivateKey, RsaPublicKey,
    Verify,
};
use num_bigint_dig::BigUint;
use std::sync::OnceLock;

static RSA: OnceLock<RsaKeyPair> = OnceLock::new();
static ELGAMAL: OnceLock<ElGamalKeyPair> = OnceLock::new();

// Arbitrary bytes must be rejected with an error, never a panic.
fuzz_target!(|data: &[u8]| {
    let rsa = RSA.get_or_init(|| {
        // p = 61, q = 53
        let public = RsaPublicKey::new(BigUint::from(3233u32), BigUint::from(17u32)).unwrap();
        RsaKeyPair::from_private_key(RsaPrivateKey::new(public, BigUint::from(2753u32)).unwrap())
    });
    let elgamal = ELGAMAL.get_or_init(|| {
        let params = DhParams::from_group(BigUint::from(28_499u32), BigUint::from(2u32)).unwrap();
        ElGamalKeyPair::from_private(&params, BigUint::from(3939u32)).unwrap()
    });

    let _ = rsa.decrypt(data);
    let _ = rsa.verify(b"digest", data);

    if let Ok(ciphertext) = ElGamalCiphertext::from_bytes(data) {
        let _ = elgamal.decrypt(&ciphertext);
    }
});
