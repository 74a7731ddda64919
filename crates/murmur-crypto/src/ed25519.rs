//! Ed25519 sender signatures.
//!
//! Senders sign every sealed message with their Ed25519 identity key.
//! The recipient converts the verified Ed25519 public key into its X25519
//! (Montgomery) form, which is what identifies the sender on the wire.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

use crate::{CryptoError, Result, X25519PublicKey};

/// Size of an Ed25519 public key in bytes.
pub const ED25519_PUBLIC_KEY_SIZE: usize = 32;

/// Size of an Ed25519 signature in bytes.
pub const ED25519_SIGNATURE_SIZE: usize = 64;

/// Ed25519 public key for signature verification.
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey {
    key: VerifyingKey,
}

impl Ed25519PublicKey {
    /// Create from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` for a wrong length and
    /// `CryptoError::InvalidPublicKey` if the bytes are not a curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; ED25519_PUBLIC_KEY_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: ED25519_PUBLIC_KEY_SIZE,
                    actual: bytes.len(),
                })?;
        let key = VerifyingKey::from_bytes(&arr)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Ok(Self { key })
    }

    /// Get the key as bytes.
    pub fn as_bytes(&self) -> &[u8; ED25519_PUBLIC_KEY_SIZE] {
        self.key.as_bytes()
    }

    /// Verify a signature over `message`.
    ///
    /// Uses strict verification, rejecting malleable and small-order inputs.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::SignatureVerification` if the signature is invalid.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<()> {
        self.key
            .verify_strict(message, &signature.inner)
            .map_err(|_| CryptoError::SignatureVerification)
    }

    /// Convert to the birationally equivalent X25519 public key.
    pub fn to_x25519(&self) -> X25519PublicKey {
        X25519PublicKey::from(self.key.to_montgomery().to_bytes())
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.key.as_bytes();
        write!(f, "Ed25519PublicKey({:02x}{:02x}..)", bytes[0], bytes[1])
    }
}

/// An Ed25519 signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ed25519Signature {
    inner: Signature,
}

impl Ed25519Signature {
    /// Create from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 64 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; ED25519_SIGNATURE_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidSignatureLength {
                    expected: ED25519_SIGNATURE_SIZE,
                    actual: bytes.len(),
                })?;
        Ok(Self {
            inner: Signature::from_bytes(&arr),
        })
    }

    /// Convert to a byte array.
    pub fn to_bytes(&self) -> [u8; ED25519_SIGNATURE_SIZE] {
        self.inner.to_bytes()
    }
}

/// Ed25519 signing key pair.
///
/// The secret half is zeroized on drop by `ed25519-dalek`.
pub struct Ed25519KeyPair {
    signing: SigningKey,
}

impl Ed25519KeyPair {
    /// Generate a new random key pair.
    pub fn generate() -> Self {
        Self {
            signing: SigningKey::generate(&mut OsRng),
        }
    }

    /// Recreate a key pair from its 32-byte seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 32 bytes.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let arr: [u8; 32] = seed.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: 32,
            actual: seed.len(),
        })?;
        Ok(Self {
            signing: SigningKey::from_bytes(&arr),
        })
    }

    /// Get the public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey {
            key: self.signing.verifying_key(),
        }
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature {
            inner: self.signing.sign(message),
        }
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public", &self.public_key())
            .finish_non_exhaustive()
    }
}
