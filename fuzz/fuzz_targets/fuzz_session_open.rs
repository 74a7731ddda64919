//! Fuzz target for session protocol opening.
//!
//! Tests that arbitrary ciphertexts are rejected without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use murmur_crypto::X25519StaticPrivateKey;
use murmur_protocol::open_with_key;

fuzz_target!(|data: &[u8]| {
    let recipient = X25519StaticPrivateKey::from_bytes(&[7u8; 32]).unwrap();

    // Forging a valid sealed message from random bytes is infeasible
    assert!(open_with_key(&recipient, data).is_err());
});
