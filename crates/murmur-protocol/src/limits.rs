//! Protocol limits and constants.
//!
//! All protocol limits are defined here for consistent enforcement.

// === Envelopes ===

/// Default maximum size of a raw envelope in bytes (10 MiB).
pub const MAX_ENVELOPE_SIZE: usize = 10 * 1024 * 1024;

// === Padding ===

/// Padded plaintexts are a multiple of this many bytes.
pub const PADDING_BLOCK_SIZE: usize = 160;

/// Byte that separates a plaintext from its zero padding.
pub const PADDING_MARKER: u8 = 0x80;

// === Identifiers ===

/// Prefix of a hex-encoded X25519 session identifier.
pub const SESSION_ID_PREFIX: &str = "05";

