//! # murmur-crypto
//!
//! Cryptographic primitives for the murmur receive pipeline.
//!
//! This crate provides:
//! - **X25519** for key agreement with ephemeral and identity keys
//! - **XChaCha20-Poly1305** for authenticated symmetric encryption
//! - **Ed25519** for sender signatures
//! - **BLAKE3** for hashing and key derivation
//!
//! ## Security
//!
//! All secret data uses `zeroize` for secure memory cleanup.
//! All comparisons of secrets use constant-time operations via `subtle`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ed25519;
pub mod error;
pub mod hash;
pub mod symmetric;
pub mod x25519;

#[cfg(test)]
mod proptests;

pub use ed25519::{
    Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, ED25519_PUBLIC_KEY_SIZE,
    ED25519_SIGNATURE_SIZE,
};
pub use error::{CryptoError, Result};
pub use hash::Hash256;
pub use symmetric::{
    decrypt_with_aad, encrypt_with_aad, EncryptedData, Nonce, SymmetricKey, KEY_SIZE, NONCE_SIZE,
    TAG_SIZE,
};
pub use x25519::{
    SharedSecret, X25519EphemeralKeyPair, X25519PublicKey, X25519StaticPrivateKey,
    PUBLIC_KEY_SIZE, SHARED_SECRET_SIZE,
};
