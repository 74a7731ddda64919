//! Fuzz target for EncryptedData::from_bytes.
//!
//! Tests that parsing arbitrary bytes as encrypted data is handled safely.

#![no_main]

use libfuzzer_sys::fuzz_target;
use murmur_crypto::{EncryptedData, NONCE_SIZE};

fuzz_target!(|data: &[u8]| {
    if let Ok(encrypted) = EncryptedData::from_bytes(data) {
        assert_eq!(encrypted.len(), NONCE_SIZE + encrypted.ciphertext.len());

        let roundtrip = EncryptedData::from_bytes(&encrypted.to_bytes()).unwrap();
        assert_eq!(encrypted.nonce.as_bytes(), roundtrip.nonce.as_bytes());
        assert_eq!(encrypted.ciphertext, roundtrip.ciphertext);
    }
});
