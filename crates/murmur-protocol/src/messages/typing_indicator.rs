//! Typing started and stopped notifications.

use serde::{Deserialize, Serialize};

use crate::wire::{typing_message, Content};

/// Whether the peer started or stopped typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypingIndicatorKind {
    /// Typing started.
    Started,
    /// Typing stopped.
    Stopped,
}

/// Typing indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingIndicator {
    /// Started or stopped.
    pub kind: TypingIndicatorKind,
}

impl TypingIndicator {
    /// Extract from a content carrying a typing message with a known action.
    pub fn from_content(content: &Content) -> Option<Self> {
        let typing = content.typing_message.as_ref()?;
        let kind = match typing_message::Action::try_from(typing.action?).ok()? {
            typing_message::Action::Started => TypingIndicatorKind::Started,
            typing_message::Action::Stopped => TypingIndicatorKind::Stopped,
        };
        Some(Self { kind })
    }

    /// Always valid once extracted; the kind is all it carries.
    pub fn is_valid(&self) -> bool {
        true
    }
}
