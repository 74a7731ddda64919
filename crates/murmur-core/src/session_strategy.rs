//! Session protocol decryption strategy.

use std::sync::Arc;

use tracing::trace;

use murmur_crypto::CryptoError;
use murmur_protocol::{open_with_key, Envelope, EnvelopeType, ProtocolError};

use crate::error::{ReceiveError, Result};
use crate::storage::KeyStore;
use crate::strategy::{DecryptedPayload, DecryptionScheme, DecryptionStrategy};

/// Opens session protocol ciphertexts with keys from a [`KeyStore`].
///
/// Direct envelopes are opened with the local identity key. Closed-group
/// envelopes are opened with each stored group key pair, newest first.
#[derive(Debug)]
pub struct SessionProtocolStrategy<K> {
    keys: Arc<K>,
}

impl<K: KeyStore> SessionProtocolStrategy<K> {
    /// Create a strategy backed by `keys`.
    pub fn new(keys: Arc<K>) -> Self {
        Self { keys }
    }

    fn open_direct(&self, ciphertext: &[u8]) -> Result<DecryptedPayload> {
        let key_pair = self
            .keys
            .user_x25519_key_pair()
            .ok_or(ReceiveError::NoUserX25519KeyPair)?;
        let opened = open_with_key(&key_pair, ciphertext).map_err(map_protocol_error)?;
        let sender = opened.sender_session_id();
        Ok(DecryptedPayload::new(opened.plaintext, sender))
    }

    fn open_closed_group(&self, group_public_key: &str, ciphertext: &[u8]) -> Result<DecryptedPayload> {
        let key_pairs = self.keys.closed_group_encryption_key_pairs(group_public_key);
        if key_pairs.is_empty() {
            return Err(ReceiveError::NoGroupPrivateKey);
        }

        let mut last_error = ReceiveError::DecryptionFailed;
        for (index, key_pair) in key_pairs.iter().enumerate() {
            match open_with_key(key_pair, ciphertext) {
                Ok(opened) => {
                    let sender = opened.sender_session_id();
                    return Ok(DecryptedPayload::new(opened.plaintext, sender));
                }
                Err(error) => {
                    trace!(index, %error, "Group key pair did not open envelope");
                    last_error = map_protocol_error(error);
                }
            }
        }
        Err(last_error)
    }
}

impl<K: KeyStore, Tx> DecryptionStrategy<Tx> for SessionProtocolStrategy<K> {
    fn scheme(&self) -> DecryptionScheme {
        DecryptionScheme::SessionProtocol
    }

    fn decrypt(&self, envelope: &Envelope, _tx: &mut Tx) -> Result<DecryptedPayload> {
        let ciphertext = envelope.content.as_deref().ok_or(ReceiveError::NoData)?;
        match envelope.kind {
            EnvelopeType::UnidentifiedSender => self.open_direct(ciphertext),
            EnvelopeType::ClosedGroupCiphertext => {
                let group_public_key = envelope
                    .source
                    .as_deref()
                    .filter(|source| !source.is_empty())
                    .ok_or(ReceiveError::InvalidGroupPublicKey)?;
                self.open_closed_group(group_public_key, ciphertext)
            }
            EnvelopeType::Unknown(_) => Err(ReceiveError::UnknownEnvelopeType),
        }
    }
}

fn map_protocol_error(error: ProtocolError) -> ReceiveError {
    match error {
        ProtocolError::Crypto(CryptoError::NonContributoryKeyExchange) => {
            ReceiveError::SharedSecretGenerationFailed
        }
        ProtocolError::Crypto(
            CryptoError::SignatureVerification
            | CryptoError::InvalidPublicKey(_)
            | CryptoError::InvalidSignatureLength { .. },
        )
        | ProtocolError::MissingSignature => ReceiveError::InvalidSignature,
        _ => ReceiveError::DecryptionFailed,
    }
}
