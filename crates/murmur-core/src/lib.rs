//! # murmur-core
//!
//! Receive pipeline for the murmur messenger.
//!
//! [`MessageReceiver`] takes raw envelope bytes and returns a classified,
//! validated [`Message`](murmur_protocol::Message) or a [`ReceiveError`]:
//!
//! ```text
//! decode -> dedupe -> decrypt -> filter -> parse -> classify -> stamp -> validate
//! ```
//!
//! Persistent state stays with the caller behind the [`MessageStorage`],
//! [`BlockList`] and [`KeyStore`] traits. [`InMemoryStorage`] implements all
//! three.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use murmur_core::{
//!     DecryptionSelector, InMemoryStorage, MessageReceiver, ReceiveError,
//!     SessionProtocolStrategy,
//! };
//! use murmur_crypto::X25519StaticPrivateKey;
//!
//! let storage = Arc::new(InMemoryStorage::with_identity(X25519StaticPrivateKey::generate()));
//! let selector = DecryptionSelector::new(SessionProtocolStrategy::new(Arc::clone(&storage)));
//! let receiver: MessageReceiver<()> = MessageReceiver::new(storage.clone(), storage, selector);
//!
//! let result = receiver.receive(b"not an envelope", None, &mut ());
//! assert_eq!(result.unwrap_err(), ReceiveError::MalformedEnvelope);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atomic;
pub mod config;
pub mod error;
pub mod receiver;
pub mod session_strategy;
pub mod storage;
pub mod strategy;
pub mod time;

#[cfg(test)]
mod proptests;

pub use atomic::Atomic;
pub use config::{ConfigError, MigrationConfig, ReceiverConfig, ReceiverConfigBuilder};
pub use error::{ReceiveError, Result};
pub use receiver::MessageReceiver;
pub use session_strategy::SessionProtocolStrategy;
pub use storage::{BlockList, InMemoryStorage, KeyStore, MessageStorage};
pub use strategy::{DecryptedPayload, DecryptionScheme, DecryptionSelector, DecryptionStrategy};
