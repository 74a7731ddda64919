//! Closed-group control messages: group creation, info changes and sender keys.

use serde::{Deserialize, Serialize};

use crate::wire::data_message::closed_group_update::{self, Type as UpdateType};
use crate::wire::Content;

/// A member's sender key for shared-sender-key group encryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedGroupSenderKey {
    /// Current ratchet chain key.
    pub chain_key: Vec<u8>,
    /// Ratchet step of `chain_key`.
    pub key_index: u32,
    /// Public key of the member owning this sender key.
    pub public_key: Vec<u8>,
}

impl ClosedGroupSenderKey {
    fn from_wire(key: &closed_group_update::SenderKey) -> Self {
        Self {
            chain_key: key.chain_key.clone().unwrap_or_default(),
            key_index: key.key_index.unwrap_or(0),
            public_key: key.public_key.clone().unwrap_or_default(),
        }
    }
}

/// What a closed group update announces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosedGroupUpdateKind {
    /// A group was created and the recipient added to it.
    New {
        /// Group public key.
        group_public_key: Vec<u8>,
        /// Group name.
        name: String,
        /// Group private key.
        group_private_key: Vec<u8>,
        /// Sender keys of existing members.
        sender_keys: Vec<ClosedGroupSenderKey>,
        /// Member public keys.
        members: Vec<Vec<u8>>,
        /// Admin public keys.
        admins: Vec<Vec<u8>>,
    },
    /// Name or membership changed.
    Info {
        /// Group public key.
        group_public_key: Vec<u8>,
        /// Group name.
        name: String,
        /// Sender keys of current members.
        sender_keys: Vec<ClosedGroupSenderKey>,
        /// Member public keys.
        members: Vec<Vec<u8>>,
        /// Admin public keys.
        admins: Vec<Vec<u8>>,
    },
    /// A member asks for the recipient's sender key.
    SenderKeyRequest {
        /// Group public key.
        group_public_key: Vec<u8>,
    },
    /// A member distributes its sender key.
    SenderKey {
        /// Group public key.
        group_public_key: Vec<u8>,
        /// The distributed key.
        sender_key: ClosedGroupSenderKey,
    },
}

/// Closed group control message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedGroupUpdate {
    /// The announced change.
    pub kind: ClosedGroupUpdateKind,
}

impl ClosedGroupUpdate {
    /// Extract from a data message carrying a closed group update.
    ///
    /// Requires a group public key and a known update type. `NEW` additionally
    /// requires the group private key and `SENDER_KEY` requires a sender key.
    pub fn from_content(content: &Content) -> Option<Self> {
        let update = content.data_message.as_ref()?.closed_group_update.as_ref()?;
        let group_public_key = update.group_public_key.clone()?;
        let name = update.name.clone().unwrap_or_default();
        let sender_keys = || -> Vec<ClosedGroupSenderKey> {
            update
                .sender_keys
                .iter()
                .map(ClosedGroupSenderKey::from_wire)
                .collect()
        };

        let kind = match UpdateType::try_from(update.r#type?).ok()? {
            UpdateType::New => ClosedGroupUpdateKind::New {
                group_public_key,
                name,
                group_private_key: update.group_private_key.clone()?,
                sender_keys: sender_keys(),
                members: update.members.clone(),
                admins: update.admins.clone(),
            },
            UpdateType::Info => ClosedGroupUpdateKind::Info {
                group_public_key,
                name,
                sender_keys: sender_keys(),
                members: update.members.clone(),
                admins: update.admins.clone(),
            },
            UpdateType::SenderKeyRequest => {
                ClosedGroupUpdateKind::SenderKeyRequest { group_public_key }
            }
            UpdateType::SenderKey => ClosedGroupUpdateKind::SenderKey {
                group_public_key,
                sender_key: ClosedGroupSenderKey::from_wire(update.sender_keys.first()?),
            },
        };
        Some(Self { kind })
    }

    /// Per-kind completeness of the announced group state.
    pub fn is_valid(&self) -> bool {
        match &self.kind {
            ClosedGroupUpdateKind::New {
                group_public_key,
                name,
                group_private_key,
                members,
                admins,
                ..
            } => {
                !group_public_key.is_empty()
                    && !name.is_empty()
                    && !group_private_key.is_empty()
                    && !members.is_empty()
                    && !admins.is_empty()
            }
            ClosedGroupUpdateKind::Info {
                group_public_key,
                name,
                members,
                ..
            } => !group_public_key.is_empty() && !name.is_empty() && !members.is_empty(),
            ClosedGroupUpdateKind::SenderKeyRequest { group_public_key }
            | ClosedGroupUpdateKind::SenderKey {
                group_public_key, ..
            } => !group_public_key.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::data_message::ClosedGroupUpdate as WireUpdate;
    use crate::wire::DataMessage;

    fn content(update: WireUpdate) -> Content {
        Content {
            data_message: Some(DataMessage {
                closed_group_update: Some(update),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn new_group() -> WireUpdate {
        WireUpdate {
            name: Some("friends".into()),
            group_public_key: Some(vec![5; 33]),
            group_private_key: Some(vec![6; 32]),
            sender_keys: vec![],
            members: vec![vec![1; 33], vec![2; 33]],
            admins: vec![vec![1; 33]],
            r#type: Some(UpdateType::New as i32),
        }
    }

    #[test]
    fn test_new_group() {
        let update = ClosedGroupUpdate::from_content(&content(new_group())).unwrap();
        assert!(matches!(update.kind, ClosedGroupUpdateKind::New { .. }));
        assert!(update.is_valid());
    }

    #[test]
    fn test_new_group_requires_private_key() {
        let mut wire = new_group();
        wire.group_private_key = None;
        assert!(ClosedGroupUpdate::from_content(&content(wire)).is_none());
    }

    #[test]
    fn test_new_group_without_admins_is_invalid() {
        let mut wire = new_group();
        wire.admins.clear();
        let update = ClosedGroupUpdate::from_content(&content(wire)).unwrap();
        assert!(!update.is_valid());
    }

    #[test]
    fn test_info_ignores_admins() {
        let mut wire = new_group();
        wire.r#type = Some(UpdateType::Info as i32);
        wire.group_private_key = None;
        wire.admins.clear();

        let update = ClosedGroupUpdate::from_content(&content(wire)).unwrap();
        assert!(matches!(update.kind, ClosedGroupUpdateKind::Info { .. }));
        assert!(update.is_valid());
    }

    #[test]
    fn test_info_requires_name() {
        let mut wire = new_group();
        wire.r#type = Some(UpdateType::Info as i32);
        wire.name = None;

        let update = ClosedGroupUpdate::from_content(&content(wire)).unwrap();
        assert!(!update.is_valid());
    }

    #[test]
    fn test_sender_key_requires_a_key() {
        let mut wire = new_group();
        wire.r#type = Some(UpdateType::SenderKey as i32);
        assert!(ClosedGroupUpdate::from_content(&content(wire.clone())).is_none());

        wire.sender_keys.push(closed_group_update::SenderKey {
            chain_key: Some(vec![3; 32]),
            key_index: Some(4),
            public_key: Some(vec![1; 33]),
        });
        let update = ClosedGroupUpdate::from_content(&content(wire)).unwrap();
        match update.kind {
            ClosedGroupUpdateKind::SenderKey { sender_key, .. } => {
                assert_eq!(sender_key.key_index, 4);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_sender_key_request_validity() {
        let mut wire = new_group();
        wire.r#type = Some(UpdateType::SenderKeyRequest as i32);
        assert!(ClosedGroupUpdate::from_content(&content(wire.clone()))
            .unwrap()
            .is_valid());

        wire.group_public_key = Some(vec![]);
        assert!(!ClosedGroupUpdate::from_content(&content(wire))
            .unwrap()
            .is_valid());
    }

    #[test]
    fn test_unknown_type_or_missing_key_does_not_match() {
        let mut wire = new_group();
        wire.r#type = Some(42);
        assert!(ClosedGroupUpdate::from_content(&content(wire)).is_none());

        let mut wire = new_group();
        wire.group_public_key = None;
        assert!(ClosedGroupUpdate::from_content(&content(wire)).is_none());
    }
}
