//! Fuzz target for envelope decoding.
//!
//! Tests that arbitrary bytes never panic the envelope codec.

#![no_main]

use libfuzzer_sys::fuzz_target;
use murmur_protocol::limits::MAX_ENVELOPE_SIZE;
use murmur_protocol::Envelope;

fuzz_target!(|data: &[u8]| {
    // Should succeed or fail gracefully - never panic
    if let Ok(envelope) = Envelope::decode_bounded(data, MAX_ENVELOPE_SIZE) {
        // Re-encoding a decoded envelope must decode to the same value
        let reencoded = envelope.encode_to_vec();
        let roundtrip = Envelope::decode(&reencoded).unwrap();
        assert_eq!(envelope, roundtrip);
    }
});
