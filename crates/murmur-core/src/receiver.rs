//! The receive pipeline.
//!
//! [`MessageReceiver::receive`] turns one raw envelope into one validated
//! [`Message`], or fails with a [`ReceiveError`]. Stages run in a fixed order:
//!
//! 1. Decode the envelope (size limit first)
//! 2. Check and record the timestamp in the dedup ledger
//! 3. Decrypt through the [`DecryptionSelector`] (open-group envelopes skip this)
//! 4. Drop blocked senders and self-sends
//! 5. Strip padding and decode the content
//! 6. Classify, stamp metadata, validate
//!
//! The timestamp is recorded before decryption. An envelope that later fails
//! to decrypt or parse is still never processed again.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use murmur_protocol::{classify, decode_content, Envelope, Message, MessageKind};

use crate::config::ReceiverConfig;
use crate::error::{ReceiveError, Result};
use crate::storage::{BlockList, MessageStorage};
use crate::strategy::{DecryptedPayload, DecryptionSelector};
use crate::time::now_millis;

/// Decrypts, deduplicates, classifies and validates incoming envelopes.
///
/// The receiver holds no per-call state. One instance can serve concurrent
/// callers as long as the storage collaborator provides an atomic
/// [`MessageStorage::record_if_unseen`].
pub struct MessageReceiver<Tx> {
    storage: Arc<dyn MessageStorage<Tx>>,
    block_list: Arc<dyn BlockList>,
    selector: DecryptionSelector<Tx>,
    config: ReceiverConfig,
}

impl<Tx> MessageReceiver<Tx> {
    /// Create a receiver with the default configuration.
    ///
    /// The selector's migration settings are replaced by the configuration's.
    pub fn new(
        storage: Arc<dyn MessageStorage<Tx>>,
        block_list: Arc<dyn BlockList>,
        selector: DecryptionSelector<Tx>,
    ) -> Self {
        Self::with_config(storage, block_list, selector, ReceiverConfig::default())
    }

    /// Create a receiver with a custom configuration.
    pub fn with_config(
        storage: Arc<dyn MessageStorage<Tx>>,
        block_list: Arc<dyn BlockList>,
        selector: DecryptionSelector<Tx>,
        config: ReceiverConfig,
    ) -> Self {
        let selector = selector.with_migration(config.migration.clone());
        Self {
            storage,
            block_list,
            selector,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Process one raw envelope.
    ///
    /// `open_group_server_message_id` is set for envelopes fetched from an
    /// open group server. Such envelopes are not encrypted and may only carry
    /// visible messages.
    ///
    /// `tx` is passed unchanged to the storage collaborator and the
    /// decryption strategies.
    ///
    /// # Errors
    ///
    /// Every failure aborts the call. See [`ReceiveError`] for the kinds and
    /// [`ReceiveError::is_retryable`] for which ones are worth redelivering.
    pub fn receive(
        &self,
        data: &[u8],
        open_group_server_message_id: Option<u64>,
        tx: &mut Tx,
    ) -> Result<Message> {
        let envelope = Envelope::decode_bounded(data, self.config.max_envelope_size)
            .map_err(|error| {
                warn!(len = data.len(), %error, "Failed to decode envelope");
                ReceiveError::MalformedEnvelope
            })?;

        if !self.storage.record_if_unseen(envelope.timestamp, tx) {
            debug!(timestamp = envelope.timestamp, "Ignoring duplicate envelope");
            return Err(ReceiveError::DuplicateMessage);
        }

        let payload = match open_group_server_message_id {
            Some(_) => open_group_payload(&envelope)?,
            None => self.selector.decrypt(&envelope, tx)?,
        };

        let user_public_key = self
            .storage
            .user_public_key()
            .ok_or(ReceiveError::NoUserX25519KeyPair)?;
        if self.block_list.is_blocked(&payload.sender) {
            debug!(sender = %payload.sender, "Dropping message from blocked sender");
            return Err(ReceiveError::SenderBlocked);
        }
        if payload.sender == user_public_key {
            debug!(timestamp = envelope.timestamp, "Dropping message sent by self");
            return Err(ReceiveError::SelfSend);
        }

        let content = decode_content(&payload.plaintext).map_err(|error| {
            warn!(timestamp = envelope.timestamp, %error, "Failed to decode content");
            ReceiveError::InvalidMessage
        })?;

        let kind = classify(&content).ok_or_else(|| {
            debug!(timestamp = envelope.timestamp, "No message kind matched content");
            ReceiveError::UnknownMessage
        })?;

        let mut message = Message::new(kind);
        message.meta.sender = payload.sender;
        message.meta.recipient = user_public_key;
        message.meta.sent_timestamp = envelope.timestamp;
        message.meta.received_timestamp = now_millis();
        message.meta.group_public_key = payload.group_public_key;
        message.meta.open_group_server_message_id = open_group_server_message_id;

        if open_group_server_message_id.is_some()
            && !matches!(message.kind, MessageKind::VisibleMessage(_))
        {
            debug!(kind = message.kind.name(), "Rejecting non-visible open group message");
            return Err(ReceiveError::InvalidMessage);
        }

        if !message.is_valid() && !has_attachment_override(&message) {
            debug!(
                kind = message.kind.name(),
                timestamp = envelope.timestamp,
                "Message failed validation"
            );
            return Err(ReceiveError::InvalidMessage);
        }

        debug!(
            kind = message.kind.name(),
            timestamp = envelope.timestamp,
            "Message received"
        );
        Ok(message)
    }
}

/// Attachment-only visible messages are accepted even when invalid.
fn has_attachment_override(message: &Message) -> bool {
    message
        .kind
        .as_visible_message()
        .is_some_and(|visible| visible.has_attachments())
}

/// Open-group envelopes carry plaintext content from a known source.
fn open_group_payload(envelope: &Envelope) -> Result<DecryptedPayload> {
    let plaintext = envelope.content.clone().ok_or(ReceiveError::NoData)?;
    let sender = envelope
        .source
        .clone()
        .filter(|source| !source.is_empty())
        .ok_or(ReceiveError::InvalidMessage)?;
    Ok(DecryptedPayload::new(plaintext, sender))
}

impl<Tx> fmt::Debug for MessageReceiver<Tx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageReceiver")
            .field("selector", &self.selector)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
