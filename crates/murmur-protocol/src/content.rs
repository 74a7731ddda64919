//! Content codec.
//!
//! Decrypted plaintext is a padded protobuf `Content`. Decoding strips the
//! padding first and then parses the remaining bytes.

use prost::Message as _;

use crate::error::Result;
use crate::padding::{add_padding, remove_padding};

pub use crate::wire::Content;

/// Strip padding from `plaintext` and decode it as a `Content`.
///
/// # Errors
///
/// Returns `ProtocolError::Decode` if the unpadded bytes are not a valid
/// `Content` encoding.
pub fn decode_content(plaintext: &[u8]) -> Result<Content> {
    Ok(Content::decode(remove_padding(plaintext))?)
}

/// Encode and pad a `Content` the way senders put it on the wire.
pub fn encode_content(content: &Content) -> Vec<u8> {
    add_padding(&content.encode_to_vec())
}
