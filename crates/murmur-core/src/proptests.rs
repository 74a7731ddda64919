//! Property-based tests for the receive pipeline.
//!
//! - The receiver never panics on adversarial bytes
//! - A timestamp is admitted at most once, whatever the payload
//! - Self-sends are rejected whatever the plaintext

use std::sync::Arc;

use proptest::prelude::*;

use murmur_protocol::{Envelope, EnvelopeType};

use crate::error::{ReceiveError, Result};
use crate::receiver::MessageReceiver;
use crate::storage::InMemoryStorage;
use crate::strategy::{DecryptedPayload, DecryptionScheme, DecryptionSelector, DecryptionStrategy};

const LOCAL: &str = "05local";

/// Echoes the envelope content as plaintext from a fixed sender.
struct Echo {
    sender: &'static str,
}

impl DecryptionStrategy<()> for Echo {
    fn scheme(&self) -> DecryptionScheme {
        DecryptionScheme::SessionProtocol
    }

    fn decrypt(&self, envelope: &Envelope, _tx: &mut ()) -> Result<DecryptedPayload> {
        let plaintext = envelope.content.clone().ok_or(ReceiveError::NoData)?;
        Ok(DecryptedPayload::new(plaintext, self.sender))
    }
}

fn receiver(sender: &'static str) -> MessageReceiver<()> {
    let storage = Arc::new(InMemoryStorage::new());
    storage.set_user_public_key(LOCAL);
    MessageReceiver::new(
        storage.clone(),
        storage,
        DecryptionSelector::new(Echo { sender }),
    )
}

fn envelope_type() -> impl Strategy<Value = EnvelopeType> {
    prop_oneof![
        Just(EnvelopeType::UnidentifiedSender),
        Just(EnvelopeType::ClosedGroupCiphertext),
        any::<i32>().prop_map(EnvelopeType::Unknown),
    ]
}

// ==================== Receiver Property Tests ====================

proptest! {
    /// Arbitrary bytes produce a result, never a panic.
    #[test]
    fn receive_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..512),
        open_group in prop::option::of(any::<u64>()),
    ) {
        let _ = receiver("05peer").receive(&data, open_group, &mut ());
    }

    /// Arbitrary plaintext behind a well-formed envelope never panics.
    #[test]
    fn receive_plaintext_never_panics(
        timestamp in any::<u64>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let envelope = Envelope::new(EnvelopeType::UnidentifiedSender, timestamp)
            .with_content(plaintext)
            .encode_to_vec();
        let _ = receiver("05peer").receive(&envelope, None, &mut ());
    }

    /// The second delivery of a timestamp is always a duplicate.
    #[test]
    fn second_delivery_is_duplicate(
        timestamp in any::<u64>(),
        kind in envelope_type(),
        first in prop::collection::vec(any::<u8>(), 0..256),
        second in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let receiver = receiver("05peer");
        let first = Envelope::new(kind, timestamp)
            .with_source("05group")
            .with_content(first)
            .encode_to_vec();
        let second = Envelope::new(EnvelopeType::UnidentifiedSender, timestamp)
            .with_content(second)
            .encode_to_vec();

        let first_result = receiver.receive(&first, None, &mut ());
        prop_assert_ne!(first_result, Err(ReceiveError::DuplicateMessage));
        prop_assert_eq!(
            receiver.receive(&second, None, &mut ()),
            Err(ReceiveError::DuplicateMessage)
        );
    }

    /// Self-sends are rejected before the plaintext is looked at.
    #[test]
    fn self_send_is_always_rejected(
        timestamp in any::<u64>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let envelope = Envelope::new(EnvelopeType::UnidentifiedSender, timestamp)
            .with_content(plaintext)
            .encode_to_vec();

        prop_assert_eq!(
            receiver(LOCAL).receive(&envelope, None, &mut ()),
            Err(ReceiveError::SelfSend)
        );
    }
}
