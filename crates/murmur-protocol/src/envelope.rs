//! Envelope codec.
//!
//! The envelope is the outer wire container: routing metadata plus opaque,
//! usually encrypted, content. Decoding is pure and has no side effects;
//! a rejected input leaves nothing behind.

use prost::Message as _;
use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::wire;

/// Envelope type discriminator.
///
/// Unrecognised numeric values are preserved rather than rejected so the
/// caller can distinguish "malformed" from "well-formed but unsupported".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvelopeType {
    /// One-to-one message sealed to the recipient's identity key.
    UnidentifiedSender,
    /// Message addressed to a closed group; `source` is the group public key.
    ClosedGroupCiphertext,
    /// Any other wire value.
    Unknown(i32),
}

impl EnvelopeType {
    fn from_wire(value: i32) -> Self {
        match wire::envelope::Type::try_from(value) {
            Ok(wire::envelope::Type::UnidentifiedSender) => Self::UnidentifiedSender,
            Ok(wire::envelope::Type::ClosedGroupCiphertext) => Self::ClosedGroupCiphertext,
            Err(_) => Self::Unknown(value),
        }
    }

    fn to_wire(self) -> i32 {
        match self {
            Self::UnidentifiedSender => wire::envelope::Type::UnidentifiedSender as i32,
            Self::ClosedGroupCiphertext => wire::envelope::Type::ClosedGroupCiphertext as i32,
            Self::Unknown(value) => value,
        }
    }
}

/// A decoded envelope.
///
/// Immutable once decoded; consumed by a single pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Type discriminator.
    pub kind: EnvelopeType,
    /// Sender-assigned timestamp in milliseconds. Doubles as the dedup key.
    pub timestamp: u64,
    /// Source identifier. For closed groups this is the group public key.
    pub source: Option<String>,
    /// Sending device id.
    pub source_device: Option<u32>,
    /// Encrypted content.
    pub content: Option<Vec<u8>>,
    /// Timestamp assigned by the storage server.
    pub server_timestamp: Option<u64>,
}

impl Envelope {
    /// Create an envelope with only the required fields set.
    pub fn new(kind: EnvelopeType, timestamp: u64) -> Self {
        Self {
            kind,
            timestamp,
            source: None,
            source_device: None,
            content: None,
            server_timestamp: None,
        }
    }

    /// Set the source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the content bytes.
    pub fn with_content(mut self, content: Vec<u8>) -> Self {
        self.content = Some(content);
        self
    }

    /// Decode an envelope from wire bytes.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Decode` for bytes that are not a valid
    /// protobuf and `ProtocolError::MissingField` when `type` or
    /// `timestamp` is absent.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let raw = wire::Envelope::decode(bytes)?;
        let kind = raw.r#type.ok_or(ProtocolError::MissingField("type"))?;
        let timestamp = raw.timestamp.ok_or(ProtocolError::MissingField("timestamp"))?;

        Ok(Self {
            kind: EnvelopeType::from_wire(kind),
            timestamp,
            source: raw.source,
            source_device: raw.source_device,
            content: raw.content,
            server_timestamp: raw.server_timestamp,
        })
    }

    /// Decode an envelope, rejecting inputs larger than `max_size` first.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::EnvelopeTooLarge` before any parsing when the
    /// input exceeds `max_size`, otherwise as [`Envelope::decode`].
    pub fn decode_bounded(bytes: &[u8], max_size: usize) -> Result<Self> {
        if bytes.len() > max_size {
            return Err(ProtocolError::EnvelopeTooLarge {
                size: bytes.len(),
                max: max_size,
            });
        }
        Self::decode(bytes)
    }

    /// Encode to wire bytes.
    pub fn encode_to_vec(&self) -> Vec<u8> {
        wire::Envelope {
            r#type: Some(self.kind.to_wire()),
            source: self.source.clone(),
            timestamp: Some(self.timestamp),
            source_device: self.source_device,
            content: self.content.clone(),
            server_timestamp: self.server_timestamp,
        }
        .encode_to_vec()
    }
}
