//! Read receipts.

use serde::{Deserialize, Serialize};

use crate::wire::{receipt_message, Content};

/// Acknowledges that the peer has read one or more messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadReceipt {
    /// Sent timestamps of the messages that were read.
    pub timestamps: Vec<u64>,
}

impl ReadReceipt {
    /// Extract from a content whose receipt is of type READ.
    ///
    /// Delivery receipts do not match.
    pub fn from_content(content: &Content) -> Option<Self> {
        let receipt = content.receipt_message.as_ref()?;
        if receipt.r#type != Some(receipt_message::Type::Read as i32) {
            return None;
        }
        Some(Self {
            timestamps: receipt.timestamp.clone(),
        })
    }

    /// A receipt must reference at least one message.
    pub fn is_valid(&self) -> bool {
        !self.timestamps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::ReceiptMessage;

    fn receipt(r#type: Option<receipt_message::Type>, timestamps: Vec<u64>) -> Content {
        Content {
            receipt_message: Some(ReceiptMessage {
                r#type: r#type.map(|t| t as i32),
                timestamp: timestamps,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_read_receipt_matches() {
        let content = receipt(Some(receipt_message::Type::Read), vec![1, 2]);
        let extracted = ReadReceipt::from_content(&content).unwrap();

        assert_eq!(extracted.timestamps, vec![1, 2]);
        assert!(extracted.is_valid());
    }

    #[test]
    fn test_delivery_receipt_does_not_match() {
        let content = receipt(Some(receipt_message::Type::Delivery), vec![1]);
        assert!(ReadReceipt::from_content(&content).is_none());
        assert!(ReadReceipt::from_content(&receipt(None, vec![1])).is_none());
    }

    #[test]
    fn test_empty_receipt_is_invalid() {
        let content = receipt(Some(receipt_message::Type::Read), vec![]);
        assert!(!ReadReceipt::from_content(&content).unwrap().is_valid());
    }
}
