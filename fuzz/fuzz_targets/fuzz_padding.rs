//! Fuzz target for plaintext padding.
//!
//! Tests that padding removal handles arbitrary data safely.

#![no_main]

use libfuzzer_sys::fuzz_target;
use murmur_protocol::limits::PADDING_BLOCK_SIZE;
use murmur_protocol::padding::{add_padding, remove_padding};

fuzz_target!(|data: &[u8]| {
    // Removal never fails and never grows the input
    let unpadded = remove_padding(data);
    assert!(unpadded.len() <= data.len());
    assert!(data.starts_with(unpadded));

    // Padding is always block aligned and reversible
    let padded = add_padding(data);
    assert_eq!(padded.len() % PADDING_BLOCK_SIZE, 0);
    assert_eq!(remove_padding(&padded), data);
});
