//! Error types for protocol operations.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Cryptographic operation failed.
    #[error("Crypto error: {0}")]
    Crypto(#[from] murmur_crypto::CryptoError),

    /// Bytes are not a valid protobuf encoding of the expected message.
    #[error("Protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// A field required by the schema is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Raw envelope exceeds the configured size limit.
    #[error("Envelope too large: {size} bytes exceeds maximum {max} bytes")]
    EnvelopeTooLarge {
        /// Size of the rejected input.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    /// Sealed ciphertext is shorter than its fixed header.
    #[error("Ciphertext too short: need at least {min} bytes, got {actual}")]
    CiphertextTooShort {
        /// Minimum length of a well-formed ciphertext.
        min: usize,
        /// Actual length.
        actual: usize,
    },

    /// Decrypted payload is shorter than its signature trailer.
    #[error("Plaintext too short to carry a sender signature")]
    MissingSignature,
}

/// Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
