//! Decryption strategy selection.
//!
//! Several encryption schemes coexist on the wire while peers migrate. The
//! selector maps an envelope type to an ordered chain of schemes and tries
//! them in turn until one succeeds:
//!
//! | Envelope type             | Primary          | Fallback           |
//! |---------------------------|------------------|--------------------|
//! | `UnidentifiedSender`      | session protocol | legacy protocol    |
//! | `ClosedGroupCiphertext`   | session protocol | shared sender keys |
//!
//! The order encodes migration policy. A fallback is never tried first.

use std::fmt;

use tracing::debug;

use murmur_protocol::{Envelope, EnvelopeType};

use crate::config::MigrationConfig;
use crate::error::{ReceiveError, Result};

/// Identifies an encryption scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecryptionScheme {
    /// Current sealed-sender session protocol.
    SessionProtocol,
    /// Signal-style protocol kept for peers that have not migrated.
    LegacyProtocol,
    /// Shared sender keys kept for closed groups that have not migrated.
    SharedSenderKeys,
}

impl fmt::Display for DecryptionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SessionProtocol => "session_protocol",
            Self::LegacyProtocol => "legacy_protocol",
            Self::SharedSenderKeys => "shared_sender_keys",
        };
        f.write_str(name)
    }
}

/// Output of a successful decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedPayload {
    /// Padded plaintext.
    pub plaintext: Vec<u8>,
    /// Session id of the sender.
    pub sender: String,
    /// Set by the selector for closed-group envelopes.
    pub group_public_key: Option<String>,
}

impl DecryptedPayload {
    /// Create a payload without group context.
    pub fn new(plaintext: Vec<u8>, sender: impl Into<String>) -> Self {
        Self {
            plaintext,
            sender: sender.into(),
            group_public_key: None,
        }
    }
}

/// One decryption scheme.
///
/// Implementations only decrypt; they never interpret the plaintext.
pub trait DecryptionStrategy<Tx>: Send + Sync {
    /// The scheme this strategy implements.
    fn scheme(&self) -> DecryptionScheme;

    /// Decrypt `envelope`, returning the plaintext and the sender.
    ///
    /// # Errors
    ///
    /// Returns the taxonomy kind describing why this scheme could not
    /// decrypt the envelope.
    fn decrypt(&self, envelope: &Envelope, tx: &mut Tx) -> Result<DecryptedPayload>;
}

type BoxedStrategy<Tx> = Box<dyn DecryptionStrategy<Tx>>;

/// Chooses and runs decryption strategies by envelope type.
pub struct DecryptionSelector<Tx> {
    session: BoxedStrategy<Tx>,
    legacy: Option<BoxedStrategy<Tx>>,
    shared_sender_keys: Option<BoxedStrategy<Tx>>,
    migration: MigrationConfig,
}

impl<Tx> DecryptionSelector<Tx> {
    /// Create a selector with only the primary scheme.
    pub fn new(session: impl DecryptionStrategy<Tx> + 'static) -> Self {
        Self {
            session: Box::new(session),
            legacy: None,
            shared_sender_keys: None,
            migration: MigrationConfig::default(),
        }
    }

    /// Add the legacy protocol as fallback for direct envelopes.
    pub fn with_legacy_protocol(mut self, strategy: impl DecryptionStrategy<Tx> + 'static) -> Self {
        self.legacy = Some(Box::new(strategy));
        self
    }

    /// Add shared sender keys as fallback for closed-group envelopes.
    pub fn with_shared_sender_keys(
        mut self,
        strategy: impl DecryptionStrategy<Tx> + 'static,
    ) -> Self {
        self.shared_sender_keys = Some(Box::new(strategy));
        self
    }

    /// Enable or disable fallbacks.
    pub fn with_migration(mut self, migration: MigrationConfig) -> Self {
        self.migration = migration;
        self
    }

    /// The ordered chain of strategies for an envelope type.
    ///
    /// # Errors
    ///
    /// Returns `ReceiveError::UnknownEnvelopeType` for unsupported types.
    pub fn strategies_for(&self, kind: EnvelopeType) -> Result<Vec<&dyn DecryptionStrategy<Tx>>> {
        let (fallback, enabled) = match kind {
            EnvelopeType::UnidentifiedSender => {
                (&self.legacy, self.migration.legacy_protocol_fallback)
            }
            EnvelopeType::ClosedGroupCiphertext => (
                &self.shared_sender_keys,
                self.migration.shared_sender_key_fallback,
            ),
            EnvelopeType::Unknown(_) => return Err(ReceiveError::UnknownEnvelopeType),
        };

        let mut chain: Vec<&dyn DecryptionStrategy<Tx>> = vec![self.session.as_ref()];
        if let Some(fallback) = fallback.as_deref().filter(|_| enabled) {
            chain.push(fallback);
        }
        Ok(chain)
    }

    /// Decrypt `envelope` with the first strategy that succeeds.
    ///
    /// For closed-group envelopes the result carries the envelope source as
    /// its group public key.
    ///
    /// # Errors
    ///
    /// - `UnknownEnvelopeType` for unsupported types
    /// - `InvalidGroupPublicKey` for a closed-group envelope without a source
    /// - `NoData` when the envelope has no content
    /// - otherwise the error of the last strategy attempted
    pub fn decrypt(&self, envelope: &Envelope, tx: &mut Tx) -> Result<DecryptedPayload> {
        let chain = self.strategies_for(envelope.kind)?;

        let group_public_key = match envelope.kind {
            EnvelopeType::ClosedGroupCiphertext => Some(
                envelope
                    .source
                    .clone()
                    .filter(|source| !source.is_empty())
                    .ok_or(ReceiveError::InvalidGroupPublicKey)?,
            ),
            _ => None,
        };
        if envelope.content.is_none() {
            return Err(ReceiveError::NoData);
        }

        let mut last_error = ReceiveError::DecryptionFailed;
        for strategy in chain {
            match strategy.decrypt(envelope, tx) {
                Ok(mut payload) => {
                    debug!(
                        scheme = %strategy.scheme(),
                        timestamp = envelope.timestamp,
                        "Envelope decrypted"
                    );
                    payload.group_public_key = group_public_key;
                    return Ok(payload);
                }
                Err(error) => {
                    debug!(
                        scheme = %strategy.scheme(),
                        timestamp = envelope.timestamp,
                        %error,
                        "Decryption strategy failed"
                    );
                    last_error = error;
                }
            }
        }
        Err(last_error)
    }
}

impl<Tx> fmt::Debug for DecryptionSelector<Tx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptionSelector")
            .field("session", &self.session.scheme())
            .field("legacy", &self.legacy.as_ref().map(|s| s.scheme()))
            .field(
                "shared_sender_keys",
                &self.shared_sender_keys.as_ref().map(|s| s.scheme()),
            )
            .field("migration", &self.migration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        scheme: DecryptionScheme,
        result: Result<&'static str>,
    }

    impl DecryptionStrategy<Vec<DecryptionScheme>> for Fixed {
        fn scheme(&self) -> DecryptionScheme {
            self.scheme
        }

        fn decrypt(
            &self,
            _envelope: &Envelope,
            calls: &mut Vec<DecryptionScheme>,
        ) -> Result<DecryptedPayload> {
            calls.push(self.scheme);
            self.result
                .map(|sender| DecryptedPayload::new(b"plain".to_vec(), sender))
        }
    }

    fn fixed(scheme: DecryptionScheme, result: Result<&'static str>) -> Fixed {
        Fixed { scheme, result }
    }

    fn selector(
        session: Result<&'static str>,
        fallback: Result<&'static str>,
    ) -> DecryptionSelector<Vec<DecryptionScheme>> {
        DecryptionSelector::new(fixed(DecryptionScheme::SessionProtocol, session))
            .with_legacy_protocol(fixed(DecryptionScheme::LegacyProtocol, fallback))
            .with_shared_sender_keys(fixed(DecryptionScheme::SharedSenderKeys, fallback))
    }

    fn direct() -> Envelope {
        Envelope::new(EnvelopeType::UnidentifiedSender, 1).with_content(vec![1])
    }

    fn group() -> Envelope {
        Envelope::new(EnvelopeType::ClosedGroupCiphertext, 1)
            .with_source("05group")
            .with_content(vec![1])
    }

    #[test]
    fn test_primary_success_skips_fallback() {
        let mut calls = Vec::new();
        let payload = selector(Ok("05a"), Ok("05b"))
            .decrypt(&direct(), &mut calls)
            .unwrap();

        assert_eq!(payload.sender, "05a");
        assert_eq!(payload.group_public_key, None);
        assert_eq!(calls, vec![DecryptionScheme::SessionProtocol]);
    }

    #[test]
    fn test_direct_fallback_order() {
        let mut calls = Vec::new();
        let payload = selector(Err(ReceiveError::DecryptionFailed), Ok("05b"))
            .decrypt(&direct(), &mut calls)
            .unwrap();

        assert_eq!(payload.sender, "05b");
        assert_eq!(
            calls,
            vec![
                DecryptionScheme::SessionProtocol,
                DecryptionScheme::LegacyProtocol
            ]
        );
    }

    #[test]
    fn test_group_fallback_sets_group_key() {
        let mut calls = Vec::new();
        let payload = selector(Err(ReceiveError::DecryptionFailed), Ok("05b"))
            .decrypt(&group(), &mut calls)
            .unwrap();

        assert_eq!(payload.group_public_key.as_deref(), Some("05group"));
        assert_eq!(
            calls,
            vec![
                DecryptionScheme::SessionProtocol,
                DecryptionScheme::SharedSenderKeys
            ]
        );
    }

    #[test]
    fn test_last_error_is_returned() {
        let mut calls = Vec::new();
        let result = selector(
            Err(ReceiveError::NoUserX25519KeyPair),
            Err(ReceiveError::InvalidSignature),
        )
        .decrypt(&direct(), &mut calls);

        assert_eq!(result, Err(ReceiveError::InvalidSignature));
        assert_eq!(calls.len(), 2);
    }

    #[test]
    fn test_disabled_fallback_is_not_tried() {
        let mut calls = Vec::new();
        let result = selector(Err(ReceiveError::DecryptionFailed), Ok("05b"))
            .with_migration(MigrationConfig {
                legacy_protocol_fallback: false,
                shared_sender_key_fallback: true,
            })
            .decrypt(&direct(), &mut calls);

        assert_eq!(result, Err(ReceiveError::DecryptionFailed));
        assert_eq!(calls, vec![DecryptionScheme::SessionProtocol]);
    }

    #[test]
    fn test_unknown_type_tries_nothing() {
        let mut calls = Vec::new();
        let envelope = Envelope::new(EnvelopeType::Unknown(3), 1).with_content(vec![1]);
        let result = selector(Ok("05a"), Ok("05b")).decrypt(&envelope, &mut calls);

        assert_eq!(result, Err(ReceiveError::UnknownEnvelopeType));
        assert!(calls.is_empty());
    }

    #[test]
    fn test_group_without_source() {
        let mut calls = Vec::new();
        let envelope = Envelope::new(EnvelopeType::ClosedGroupCiphertext, 1).with_content(vec![1]);
        let result = selector(Ok("05a"), Ok("05b")).decrypt(&envelope, &mut calls);

        assert_eq!(result, Err(ReceiveError::InvalidGroupPublicKey));
        assert!(calls.is_empty());
    }

    #[test]
    fn test_missing_content() {
        let mut calls = Vec::new();
        let envelope = Envelope::new(EnvelopeType::UnidentifiedSender, 1);
        let result = selector(Ok("05a"), Ok("05b")).decrypt(&envelope, &mut calls);

        assert_eq!(result, Err(ReceiveError::NoData));
        assert!(calls.is_empty());
    }

    #[test]
    fn test_strategies_for_without_fallbacks() {
        let selector: DecryptionSelector<Vec<DecryptionScheme>> =
            DecryptionSelector::new(fixed(DecryptionScheme::SessionProtocol, Ok("05a")));
        let chain = selector
            .strategies_for(EnvelopeType::ClosedGroupCiphertext)
            .unwrap();

        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].scheme(), DecryptionScheme::SessionProtocol);
    }
}
