//! BLAKE3 hashing primitives.
//!
//! Used to bind the public keys of a key exchange into the derived
//! encryption key.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// A 256-bit (32-byte) hash value using BLAKE3.
#[derive(Clone, Zeroize)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    /// Hash multiple inputs.
    ///
    /// Each input is length-prefixed so `["ab", "c"]` and `["a", "bc"]`
    /// never collide.
    pub fn hash_many(inputs: &[&[u8]]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for input in inputs {
            hasher.update(&(input.len() as u64).to_le_bytes());
            hasher.update(input);
        }
        let hash = hasher.finalize();
        Self(*hash.as_bytes())
    }

    /// Derive a key from this hash using BLAKE3 key derivation.
    pub fn derive_key(&self, context: &str) -> [u8; 32] {
        blake3::derive_key(context, &self.0)
    }
}

impl ConstantTimeEq for Hash256 {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Hash256 {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Hash256 {}

impl std::fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hash256({})", hex::encode(&self.0[..8]))
    }
}
