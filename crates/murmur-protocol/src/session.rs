//! Session protocol sealing and opening.
//!
//! Every message is sealed to the recipient's X25519 key with a fresh
//! ephemeral key and signed with the sender's Ed25519 identity key.
//!
//! ## Wire format
//!
//! ```text
//! ciphertext = ephemeral_public(32) || nonce(24) || aead(payload)
//! payload    = message || sender_ed25519_public(32) || signature(64)
//! ```
//!
//! The signature covers `message || sender_ed25519_public || recipient_public`
//! so a sealed message cannot be re-targeted at another recipient.
//!
//! ## Security Notes
//!
//! - The encryption key is derived from the ECDH shared secret using BLAKE3,
//!   bound to both public keys of the exchange
//! - Exchanges with low-order points are rejected before key derivation
//! - The sealed header (both public keys) is authenticated as AAD

use murmur_crypto::{
    decrypt_with_aad, encrypt_with_aad, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature,
    EncryptedData, Hash256, SharedSecret, SymmetricKey, X25519EphemeralKeyPair, X25519PublicKey,
    X25519StaticPrivateKey, ED25519_PUBLIC_KEY_SIZE, ED25519_SIGNATURE_SIZE, NONCE_SIZE,
    PUBLIC_KEY_SIZE, TAG_SIZE,
};

use crate::error::{ProtocolError, Result};
use crate::limits::SESSION_ID_PREFIX;

/// Domain separator for session protocol key derivation.
pub const SESSION_PROTOCOL_CONTEXT: &str = "murmur session protocol v1 message key";

/// Length of the unencrypted header: ephemeral public key and nonce.
pub const SEALED_HEADER_SIZE: usize = PUBLIC_KEY_SIZE + NONCE_SIZE;

/// Shortest well-formed sealed ciphertext.
pub const MIN_SEALED_SIZE: usize = SEALED_HEADER_SIZE + TAG_SIZE;

const SIGNATURE_TRAILER_SIZE: usize = ED25519_PUBLIC_KEY_SIZE + ED25519_SIGNATURE_SIZE;

/// Format an X25519 public key as a session id.
pub fn session_id(key: &X25519PublicKey) -> String {
    format!("{}{}", SESSION_ID_PREFIX, key.to_hex())
}

/// A successfully opened and verified message.
#[derive(Debug)]
pub struct OpenedMessage {
    /// The signed message bytes.
    pub plaintext: Vec<u8>,
    /// The verified signer.
    pub sender: Ed25519PublicKey,
}

impl OpenedMessage {
    /// Session id of the sender: the X25519 form of the signing key.
    pub fn sender_session_id(&self) -> String {
        session_id(&self.sender.to_x25519())
    }
}

fn derive_message_key(
    shared: SharedSecret,
    ephemeral: &X25519PublicKey,
    recipient: &X25519PublicKey,
) -> Result<SymmetricKey> {
    let shared = shared.ensure_contributory()?;
    let key_bytes = Hash256::hash_many(&[
        shared.as_bytes(),
        ephemeral.as_bytes(),
        recipient.as_bytes(),
    ])
    .derive_key(SESSION_PROTOCOL_CONTEXT);
    Ok(SymmetricKey::from_bytes(&key_bytes)?)
}

fn header_aad(ephemeral: &X25519PublicKey, recipient: &X25519PublicKey) -> Vec<u8> {
    let mut aad = Vec::with_capacity(2 * PUBLIC_KEY_SIZE);
    aad.extend_from_slice(ephemeral.as_bytes());
    aad.extend_from_slice(recipient.as_bytes());
    aad
}

fn signed_data(message: &[u8], sender: &Ed25519PublicKey, recipient: &X25519PublicKey) -> Vec<u8> {
    let mut data = Vec::with_capacity(message.len() + ED25519_PUBLIC_KEY_SIZE + PUBLIC_KEY_SIZE);
    data.extend_from_slice(message);
    data.extend_from_slice(sender.as_bytes());
    data.extend_from_slice(recipient.as_bytes());
    data
}

/// Seal `message` for `recipient`, signed by `sender`.
///
/// # Errors
///
/// Returns `ProtocolError::Crypto` if the recipient key is a low-order point
/// or encryption fails.
///
/// # Example
///
/// ```
/// use murmur_crypto::{Ed25519KeyPair, X25519StaticPrivateKey};
/// use murmur_protocol::session::{open_with_key, seal_for_recipient};
///
/// let sender = Ed25519KeyPair::generate();
/// let recipient = X25519StaticPrivateKey::generate();
///
/// let sealed = seal_for_recipient(&sender, &recipient.public_key(), b"hi").unwrap();
/// let opened = open_with_key(&recipient, &sealed).unwrap();
/// assert_eq!(opened.plaintext, b"hi");
/// ```
pub fn seal_for_recipient(
    sender: &Ed25519KeyPair,
    recipient: &X25519PublicKey,
    message: &[u8],
) -> Result<Vec<u8>> {
    let sender_public = sender.public_key();
    let signature = sender.sign(&signed_data(message, &sender_public, recipient));

    let mut payload = Vec::with_capacity(message.len() + SIGNATURE_TRAILER_SIZE);
    payload.extend_from_slice(message);
    payload.extend_from_slice(sender_public.as_bytes());
    payload.extend_from_slice(&signature.to_bytes());

    let ephemeral = X25519EphemeralKeyPair::generate();
    let ephemeral_public = ephemeral.public_key().clone();
    let key = derive_message_key(
        ephemeral.diffie_hellman(recipient),
        &ephemeral_public,
        recipient,
    )?;
    let encrypted = encrypt_with_aad(&key, &payload, &header_aad(&ephemeral_public, recipient))?;

    let mut sealed = Vec::with_capacity(PUBLIC_KEY_SIZE + encrypted.len());
    sealed.extend_from_slice(ephemeral_public.as_bytes());
    sealed.extend_from_slice(&encrypted.to_bytes());
    Ok(sealed)
}

/// Open a sealed message with the recipient's private key and verify its
/// signature.
///
/// # Errors
///
/// - `ProtocolError::CiphertextTooShort` if the input cannot hold a header and tag
/// - `ProtocolError::Crypto(NonContributoryKeyExchange)` for a low-order ephemeral key
/// - `ProtocolError::Crypto(Decryption)` if authentication fails, e.g. the
///   message was sealed to a different key
/// - `ProtocolError::MissingSignature` if the payload has no signature trailer
/// - `ProtocolError::Crypto(SignatureVerification)` for a bad signature
pub fn open_with_key(recipient: &X25519StaticPrivateKey, ciphertext: &[u8]) -> Result<OpenedMessage> {
    if ciphertext.len() < MIN_SEALED_SIZE {
        return Err(ProtocolError::CiphertextTooShort {
            min: MIN_SEALED_SIZE,
            actual: ciphertext.len(),
        });
    }

    let (ephemeral_bytes, rest) = ciphertext.split_at(PUBLIC_KEY_SIZE);
    let ephemeral_public = X25519PublicKey::from_bytes(ephemeral_bytes)?;
    let recipient_public = recipient.public_key();

    let key = derive_message_key(
        recipient.diffie_hellman(&ephemeral_public),
        &ephemeral_public,
        &recipient_public,
    )?;
    let encrypted = EncryptedData::from_bytes(rest)?;
    let payload = decrypt_with_aad(
        &key,
        &encrypted,
        &header_aad(&ephemeral_public, &recipient_public),
    )?;

    if payload.len() < SIGNATURE_TRAILER_SIZE {
        return Err(ProtocolError::MissingSignature);
    }
    let (message, trailer) = payload.split_at(payload.len() - SIGNATURE_TRAILER_SIZE);
    let (sender_bytes, signature_bytes) = trailer.split_at(ED25519_PUBLIC_KEY_SIZE);

    let sender = Ed25519PublicKey::from_bytes(sender_bytes)?;
    let signature = Ed25519Signature::from_bytes(signature_bytes)?;
    sender.verify(&signed_data(message, &sender, &recipient_public), &signature)?;

    Ok(OpenedMessage {
        plaintext: message.to_vec(),
        sender,
    })
}
