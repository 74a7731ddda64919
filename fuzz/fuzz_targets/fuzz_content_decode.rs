//! Fuzz target for content decoding and classification.
//!
//! Tests that decrypted plaintext from a hostile peer is handled safely.

#![no_main]

use libfuzzer_sys::fuzz_target;
use murmur_protocol::{classify, decode_content};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = decode_content(data) {
        // Classification and validation must never panic
        if let Some(kind) = classify(&content) {
            let _ = kind.is_valid();
            let _ = kind.name();
        }
    }
});
