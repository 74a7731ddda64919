//! Collaborator interfaces consumed by the receiver.
//!
//! The pipeline owns no persistent state. Identity, the dedup ledger, the
//! block list and key material are reached through these traits, with the
//! caller's transaction handle passed through unchanged.
//!
//! [`InMemoryStorage`] implements all of them for tests and tooling.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use murmur_crypto::X25519StaticPrivateKey;
use murmur_protocol::session_id;

use crate::atomic::Atomic;

/// Local identity and the dedup ledger.
///
/// `Tx` is the caller's transaction handle. The receiver never opens,
/// commits or rolls it back.
pub trait MessageStorage<Tx>: Send + Sync {
    /// Session id of the local user, if an identity exists.
    fn user_public_key(&self) -> Option<String>;

    /// All envelope timestamps recorded so far.
    fn received_message_timestamps(&self, tx: &mut Tx) -> HashSet<u64>;

    /// Record an envelope timestamp.
    fn add_received_message_timestamp(&self, timestamp: u64, tx: &mut Tx);

    /// Record `timestamp` and return `true`, or return `false` if it was
    /// already recorded.
    ///
    /// The default runs the query and the insert separately and is only
    /// atomic if `tx` serializes concurrent callers. Stores shared between
    /// threads should override it with a single check-and-set.
    fn record_if_unseen(&self, timestamp: u64, tx: &mut Tx) -> bool {
        if self.received_message_timestamps(tx).contains(&timestamp) {
            return false;
        }
        self.add_received_message_timestamp(timestamp, tx);
        true
    }
}

/// Block-list lookup.
pub trait BlockList: Send + Sync {
    /// Whether messages from `session_id` must be dropped.
    fn is_blocked(&self, session_id: &str) -> bool;
}

/// Key material for the session protocol.
pub trait KeyStore: Send + Sync {
    /// The local X25519 identity key pair.
    fn user_x25519_key_pair(&self) -> Option<Arc<X25519StaticPrivateKey>>;

    /// Encryption key pairs of a closed group, newest first.
    fn closed_group_encryption_key_pairs(
        &self,
        group_public_key: &str,
    ) -> Vec<Arc<X25519StaticPrivateKey>>;
}

/// Thread-safe in-memory implementation of every collaborator trait.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    user_public_key: Atomic<Option<String>>,
    user_key_pair: Atomic<Option<Arc<X25519StaticPrivateKey>>>,
    received_timestamps: Atomic<HashSet<u64>>,
    blocked: Atomic<HashSet<String>>,
    group_key_pairs: Atomic<HashMap<String, Vec<Arc<X25519StaticPrivateKey>>>>,
}

impl InMemoryStorage {
    /// Create an empty store with no identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose identity is `key_pair`.
    pub fn with_identity(key_pair: X25519StaticPrivateKey) -> Self {
        let storage = Self::new();
        storage.set_identity(key_pair);
        storage
    }

    /// Replace the local identity.
    pub fn set_identity(&self, key_pair: X25519StaticPrivateKey) {
        let public_key = session_id(&key_pair.public_key());
        self.user_public_key.mutate(|current| *current = Some(public_key));
        self.user_key_pair
            .mutate(|current| *current = Some(Arc::new(key_pair)));
    }

    /// Override the local session id without changing key material.
    pub fn set_user_public_key(&self, public_key: impl Into<String>) {
        let public_key = public_key.into();
        self.user_public_key.mutate(|current| *current = Some(public_key));
    }

    /// Add `session_id` to the block list.
    pub fn block(&self, session_id: impl Into<String>) {
        let session_id = session_id.into();
        self.blocked.mutate(|blocked| blocked.insert(session_id));
    }

    /// Remove `session_id` from the block list.
    pub fn unblock(&self, session_id: &str) {
        self.blocked.mutate(|blocked| blocked.remove(session_id));
    }

    /// Store a new encryption key pair for a closed group.
    ///
    /// The most recently added key pair is tried first.
    pub fn add_closed_group_key_pair(
        &self,
        group_public_key: impl Into<String>,
        key_pair: X25519StaticPrivateKey,
    ) {
        let group_public_key = group_public_key.into();
        self.group_key_pairs.mutate(|groups| {
            groups
                .entry(group_public_key)
                .or_default()
                .insert(0, Arc::new(key_pair));
        });
    }

    /// Number of recorded envelope timestamps.
    pub fn received_timestamp_count(&self) -> usize {
        self.received_timestamps.with(HashSet::len)
    }
}

impl<Tx> MessageStorage<Tx> for InMemoryStorage {
    fn user_public_key(&self) -> Option<String> {
        self.user_public_key.get()
    }

    fn received_message_timestamps(&self, _tx: &mut Tx) -> HashSet<u64> {
        self.received_timestamps.get()
    }

    fn add_received_message_timestamp(&self, timestamp: u64, _tx: &mut Tx) {
        self.received_timestamps.mutate(|seen| seen.insert(timestamp));
    }

    fn record_if_unseen(&self, timestamp: u64, _tx: &mut Tx) -> bool {
        self.received_timestamps.mutate(|seen| seen.insert(timestamp))
    }
}

impl BlockList for InMemoryStorage {
    fn is_blocked(&self, session_id: &str) -> bool {
        self.blocked.with(|blocked| blocked.contains(session_id))
    }
}

impl KeyStore for InMemoryStorage {
    fn user_x25519_key_pair(&self) -> Option<Arc<X25519StaticPrivateKey>> {
        self.user_key_pair.get()
    }

    fn closed_group_encryption_key_pairs(
        &self,
        group_public_key: &str,
    ) -> Vec<Arc<X25519StaticPrivateKey>> {
        self.group_key_pairs
            .with(|groups| groups.get(group_public_key).cloned().unwrap_or_default())
    }
}
