//! Property-based tests for cryptographic primitives.
//!
//! These tests use proptest to verify cryptographic properties hold
//! for arbitrary inputs:
//!
//! - Roundtrip properties (encrypt/decrypt, serialize/deserialize)
//! - Binding properties (AAD, signer, message)
//! - Error handling properties (malformed inputs are rejected, never panic)

use proptest::prelude::*;

use crate::{
    decrypt_with_aad, encrypt_with_aad, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature,
    EncryptedData, SymmetricKey, X25519PublicKey, X25519StaticPrivateKey, NONCE_SIZE, TAG_SIZE,
};

// ==================== Symmetric Encryption ====================

proptest! {
    /// Encryption followed by decryption returns the original plaintext.
    #[test]
    fn encrypt_decrypt_roundtrip(key_bytes: [u8; 32], plaintext: Vec<u8>, aad: Vec<u8>) {
        let key = SymmetricKey::from_bytes(&key_bytes).unwrap();
        let encrypted = encrypt_with_aad(&key, &plaintext, &aad).unwrap();
        let decrypted = decrypt_with_aad(&key, &encrypted, &aad).unwrap();
        prop_assert_eq!(plaintext, decrypted);
    }

    /// Any single flipped ciphertext bit is detected.
    #[test]
    fn tampering_is_detected(
        plaintext in prop::collection::vec(any::<u8>(), 1..256),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
        key_bytes in any::<[u8; 32]>(),
    ) {
        let key = SymmetricKey::from_bytes(&key_bytes).unwrap();
        let mut encrypted = encrypt_with_aad(&key, &plaintext, b"").unwrap();
        let index = position.index(encrypted.ciphertext.len());
        encrypted.ciphertext[index] ^= 1 << bit;
        prop_assert!(decrypt_with_aad(&key, &encrypted, b"").is_err());
    }

    /// Parsing arbitrary bytes as encrypted data never panics and only
    /// succeeds for inputs holding a nonce and a tag.
    #[test]
    fn encrypted_data_parse_is_total(bytes: Vec<u8>) {
        let result = EncryptedData::from_bytes(&bytes);
        prop_assert_eq!(result.is_ok(), bytes.len() >= NONCE_SIZE + TAG_SIZE);
    }
}

// ==================== X25519 ====================

proptest! {
    /// Both sides of an exchange agree for arbitrary seeds.
    #[test]
    fn x25519_agreement(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let alice = X25519StaticPrivateKey::from_bytes(&a).unwrap();
        let bob = X25519StaticPrivateKey::from_bytes(&b).unwrap();
        let ab = alice.diffie_hellman(&bob.public_key());
        let ba = bob.diffie_hellman(&alice.public_key());
        prop_assert_eq!(ab.as_bytes(), ba.as_bytes());
    }

    /// Public key parsing accepts exactly 32 bytes.
    #[test]
    fn x25519_public_key_length(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(X25519PublicKey::from_bytes(&bytes).is_ok(), bytes.len() == 32);
    }
}

// ==================== Ed25519 ====================

proptest! {
    /// Signatures verify for the signed message and no other.
    #[test]
    fn ed25519_sign_verify(message: Vec<u8>, other: Vec<u8>) {
        let pair = Ed25519KeyPair::generate();
        let signature = pair.sign(&message);
        prop_assert!(pair.public_key().verify(&message, &signature).is_ok());
        if other != message {
            prop_assert!(pair.public_key().verify(&other, &signature).is_err());
        }
    }

    /// The X25519 form of a signer's key agrees with key exchange performed
    /// against the Montgomery form, independent of the seed.
    #[test]
    fn ed25519_to_x25519_is_stable(seed in any::<[u8; 32]>()) {
        let pair = Ed25519KeyPair::from_seed(&seed).unwrap();
        let public = pair.public_key();
        let reparsed = Ed25519PublicKey::from_bytes(public.as_bytes()).unwrap();
        prop_assert_eq!(public.to_x25519(), reparsed.to_x25519());
    }

    /// Arbitrary bytes never panic the signature parser.
    #[test]
    fn ed25519_signature_parse_is_total(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        prop_assert_eq!(Ed25519Signature::from_bytes(&bytes).is_ok(), bytes.len() == 64);
    }
}
