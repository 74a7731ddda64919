//! Disappearing-message timer changes.

use serde::{Deserialize, Serialize};

use crate::wire::{data_message, Content};

/// Change of the conversation's disappearing-message timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationTimerUpdate {
    /// New timer in seconds. Zero disables expiry.
    pub duration: Option<u32>,
}

impl ExpirationTimerUpdate {
    /// Extract from a data message flagged as an expiration timer update.
    pub fn from_content(content: &Content) -> Option<Self> {
        let data = content.data_message.as_ref()?;
        let flag = data_message::Flags::ExpirationTimerUpdate as u32;
        if data.flags.unwrap_or(0) & flag == 0 {
            return None;
        }
        Some(Self {
            duration: data.expire_timer,
        })
    }

    /// Valid when a duration was supplied.
    pub fn is_valid(&self) -> bool {
        self.duration.is_some()
    }
}
