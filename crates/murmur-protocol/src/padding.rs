//! Plaintext padding.
//!
//! Senders append a single `0x80` marker and then zero bytes until the
//! total length is a multiple of [`PADDING_BLOCK_SIZE`]. Padding hides the
//! exact plaintext length from anyone observing ciphertext sizes.
//!
//! ## Compatibility
//!
//! Older clients sent unpadded plaintexts. Removal therefore never fails:
//! input without a recognisable padding trailer is returned unchanged.

use tracing::debug;

use crate::limits::{PADDING_BLOCK_SIZE, PADDING_MARKER};

/// Pad `data` with a marker byte and zeros to the next block boundary.
///
/// The result is always strictly longer than `data`, since the marker is
/// mandatory.
///
/// # Example
///
/// ```
/// use murmur_protocol::padding::{add_padding, remove_padding};
///
/// let padded = add_padding(b"hello");
/// assert_eq!(padded.len(), 160);
/// assert_eq!(remove_padding(&padded), b"hello");
/// ```
pub fn add_padding(data: &[u8]) -> Vec<u8> {
    let unpadded_len = data.len() + 1;
    let padded_len = unpadded_len.div_ceil(PADDING_BLOCK_SIZE) * PADDING_BLOCK_SIZE;

    let mut padded = Vec::with_capacity(padded_len);
    padded.extend_from_slice(data);
    padded.push(PADDING_MARKER);
    padded.resize(padded_len, 0);
    padded
}

/// Strip padding added by [`add_padding`].
///
/// Scans backwards over trailing zeros. If the first non-zero byte is the
/// marker, everything from the marker on is removed. Otherwise the input is
/// returned unchanged.
pub fn remove_padding(padded: &[u8]) -> &[u8] {
    match padded.iter().rposition(|&byte| byte != 0) {
        Some(index) if padded[index] == PADDING_MARKER => &padded[..index],
        _ => {
            debug!(len = padded.len(), "No padding marker found, using input as-is");
            padded
        }
    }
}
