//! Typed message model.
//!
//! A decoded `Content` resolves to exactly one [`MessageKind`]. Every
//! received message also carries [`MessageMeta`], stamped by the receiver
//! once the sender and timestamps are known.
//!
//! Validity is two-layered: [`MessageMeta::is_valid`] checks the stamped
//! metadata common to every kind, and each kind adds its own structural
//! predicate on top.

mod closed_group_update;
mod expiration_timer_update;
mod read_receipt;
mod typing_indicator;
mod visible_message;

use serde::{Deserialize, Serialize};

pub use closed_group_update::{ClosedGroupSenderKey, ClosedGroupUpdate, ClosedGroupUpdateKind};
pub use expiration_timer_update::ExpirationTimerUpdate;
pub use read_receipt::ReadReceipt;
pub use typing_indicator::{TypingIndicator, TypingIndicatorKind};
pub use visible_message::{Attachment, LinkPreview, Profile, Quote, VisibleMessage};

/// Metadata stamped onto every received message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMeta {
    /// Session id of the sender.
    pub sender: String,
    /// Session id of the local user.
    pub recipient: String,
    /// Envelope timestamp in milliseconds.
    pub sent_timestamp: u64,
    /// Local processing time in milliseconds.
    pub received_timestamp: u64,
    /// Group public key, set only for closed-group envelopes.
    pub group_public_key: Option<String>,
    /// Server-assigned sequence id, set only for open-group envelopes.
    pub open_group_server_message_id: Option<u64>,
}

impl MessageMeta {
    /// Whether the stamped metadata is complete.
    pub fn is_valid(&self) -> bool {
        self.sent_timestamp > 0
            && self.received_timestamp > 0
            && !self.sender.is_empty()
            && !self.recipient.is_empty()
    }
}

/// The resolved message variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageKind {
    /// Read receipt for one or more sent messages.
    ReadReceipt(ReadReceipt),
    /// Typing started or stopped.
    TypingIndicator(TypingIndicator),
    /// Closed group membership or key update.
    ClosedGroupUpdate(ClosedGroupUpdate),
    /// Disappearing-message timer change.
    ExpirationTimerUpdate(ExpirationTimerUpdate),
    /// User-visible message.
    VisibleMessage(VisibleMessage),
}

impl MessageKind {
    /// Short name of the variant, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReadReceipt(_) => "read_receipt",
            Self::TypingIndicator(_) => "typing_indicator",
            Self::ClosedGroupUpdate(_) => "closed_group_update",
            Self::ExpirationTimerUpdate(_) => "expiration_timer_update",
            Self::VisibleMessage(_) => "visible_message",
        }
    }

    /// Kind-specific structural validity.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::ReadReceipt(receipt) => receipt.is_valid(),
            Self::TypingIndicator(indicator) => indicator.is_valid(),
            Self::ClosedGroupUpdate(update) => update.is_valid(),
            Self::ExpirationTimerUpdate(update) => update.is_valid(),
            Self::VisibleMessage(message) => message.is_valid(),
        }
    }

    /// Get the visible message, if this is one.
    pub fn as_visible_message(&self) -> Option<&VisibleMessage> {
        match self {
            Self::VisibleMessage(message) => Some(message),
            _ => None,
        }
    }
}

/// A received message: stamped metadata plus its variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Stamped metadata.
    pub meta: MessageMeta,
    /// The variant and its fields.
    #[serde(flatten)]
    pub kind: MessageKind,
}

impl Message {
    /// Wrap a freshly classified variant with empty metadata.
    pub fn new(kind: MessageKind) -> Self {
        Self {
            meta: MessageMeta::default(),
            kind,
        }
    }

    /// Metadata validity combined with the variant's own predicate.
    pub fn is_valid(&self) -> bool {
        self.meta.is_valid() && self.kind.is_valid()
    }
}
