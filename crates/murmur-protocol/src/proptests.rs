//! Property-based tests for protocol components.
//!
//! These tests verify protocol invariants hold for arbitrary inputs:
//!
//! - Decoders never panic on adversarial bytes
//! - Padding hides message size within blocks and is always reversible
//! - Classification is total and respects priority order
//! - Sealed messages only open for their recipient

use prost::Message as _;
use proptest::prelude::*;

use crate::classifier::classify;
use crate::content::{decode_content, encode_content};
use crate::envelope::{Envelope, EnvelopeType};
use crate::limits::{PADDING_BLOCK_SIZE, PADDING_MARKER};
use crate::messages::MessageKind;
use crate::padding::{add_padding, remove_padding};
use crate::session::{open_with_key, seal_for_recipient};
use crate::wire::{data_message, receipt_message, Content, DataMessage, ReceiptMessage};

use murmur_crypto::{Ed25519KeyPair, X25519StaticPrivateKey};

// ==================== Padding Property Tests ====================

proptest! {
    /// Padding is removed exactly.
    #[test]
    fn padding_roundtrip(data in prop::collection::vec(any::<u8>(), 0..1024)) {
        let padded = add_padding(&data);
        prop_assert_eq!(remove_padding(&padded), data.as_slice());
    }

    /// Padded lengths are whole blocks and add less than one block.
    #[test]
    fn padding_fills_blocks(data in prop::collection::vec(any::<u8>(), 0..1024)) {
        let padded = add_padding(&data);
        prop_assert_eq!(padded.len() % PADDING_BLOCK_SIZE, 0);
        prop_assert!(padded.len() > data.len());
        prop_assert!(padded.len() <= data.len() + PADDING_BLOCK_SIZE);
    }

    /// Inputs of the same block count are indistinguishable by length.
    #[test]
    fn padding_hides_length(a in 0usize..PADDING_BLOCK_SIZE, b in 0usize..PADDING_BLOCK_SIZE) {
        prop_assert_eq!(add_padding(&vec![1u8; a]).len(), add_padding(&vec![2u8; b]).len());
    }

    /// Removal never fails and only ever returns a prefix.
    #[test]
    fn remove_padding_returns_prefix(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let stripped = remove_padding(&data);
        prop_assert!(data.starts_with(stripped));
        if stripped.len() < data.len() {
            prop_assert_eq!(data[stripped.len()], PADDING_MARKER);
            prop_assert!(data[stripped.len() + 1..].iter().all(|&b| b == 0));
        }
    }
}

// ==================== Codec Property Tests ====================

proptest! {
    /// Arbitrary bytes never panic the envelope decoder.
    #[test]
    fn envelope_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = Envelope::decode(&bytes);
    }

    /// Arbitrary bytes never panic the content decoder or the classifier.
    #[test]
    fn content_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        if let Ok(content) = decode_content(&bytes) {
            let _ = classify(&content);
        }
    }

    /// Every field of a well-formed envelope survives encoding.
    #[test]
    fn envelope_fields_survive_encoding(
        type_value in any::<i32>(),
        timestamp in any::<u64>(),
        source in proptest::option::of("[0-9a-f]{66}"),
        content in proptest::option::of(prop::collection::vec(any::<u8>(), 0..256)),
    ) {
        let kind = match type_value {
            6 => EnvelopeType::UnidentifiedSender,
            7 => EnvelopeType::ClosedGroupCiphertext,
            other => EnvelopeType::Unknown(other),
        };
        let envelope = Envelope {
            kind,
            timestamp,
            source,
            source_device: None,
            content,
            server_timestamp: None,
        };
        prop_assert_eq!(Envelope::decode(&envelope.encode_to_vec()).unwrap(), envelope);
    }
}

// ==================== Classifier Property Tests ====================

proptest! {
    /// A READ receipt wins regardless of what else the content carries.
    #[test]
    fn read_receipt_has_top_priority(
        timestamps in prop::collection::vec(any::<u64>(), 1..8),
        body in proptest::option::of(".{0,40}"),
        flags in any::<u32>(),
    ) {
        let content = Content {
            receipt_message: Some(ReceiptMessage {
                r#type: Some(receipt_message::Type::Read as i32),
                timestamp: timestamps.clone(),
            }),
            data_message: Some(DataMessage { body, flags: Some(flags), ..Default::default() }),
            ..Default::default()
        };
        match classify(&content) {
            Some(MessageKind::ReadReceipt(receipt)) => {
                prop_assert_eq!(receipt.timestamps, timestamps);
            }
            other => {
                prop_assert!(false, "unexpected classification: {:?}", other);
            }
        }
    }

    /// Any data message classifies, as a timer update exactly when flagged.
    #[test]
    fn data_messages_always_classify(flags in any::<u32>(), body in proptest::option::of(".{0,40}")) {
        let content = Content {
            data_message: Some(DataMessage { body, flags: Some(flags), ..Default::default() }),
            ..Default::default()
        };
        let flagged = flags & data_message::Flags::ExpirationTimerUpdate as u32 != 0;
        match classify(&content) {
            Some(MessageKind::ExpirationTimerUpdate(_)) => {
                prop_assert!(flagged);
            }
            Some(MessageKind::VisibleMessage(_)) => {
                prop_assert!(!flagged);
            }
            other => {
                prop_assert!(false, "unexpected classification: {:?}", other);
            }
        }
    }

    /// Padding does not change what a content decodes to.
    #[test]
    fn padded_and_unpadded_content_agree(body in "[a-zA-Z0-9 ]{0,200}") {
        let content = Content {
            data_message: Some(DataMessage { body: Some(body), ..Default::default() }),
            ..Default::default()
        };
        prop_assert_eq!(decode_content(&encode_content(&content)).unwrap(), content.clone());
        prop_assert_eq!(decode_content(&content.encode_to_vec()).unwrap(), content);
    }
}

// ==================== Session Protocol Property Tests ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Sealed messages open to the same bytes and signer.
    #[test]
    fn seal_open_roundtrip(message in prop::collection::vec(any::<u8>(), 0..512)) {
        let sender = Ed25519KeyPair::generate();
        let recipient = X25519StaticPrivateKey::generate();

        let sealed = seal_for_recipient(&sender, &recipient.public_key(), &message).unwrap();
        let opened = open_with_key(&recipient, &sealed).unwrap();

        prop_assert_eq!(opened.plaintext, message);
        prop_assert_eq!(opened.sender, sender.public_key());
    }

    /// Arbitrary bytes never open.
    #[test]
    fn random_bytes_never_open(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let recipient = X25519StaticPrivateKey::generate();
        prop_assert!(open_with_key(&recipient, &bytes).is_err());
    }
}
