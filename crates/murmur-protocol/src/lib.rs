//! # murmur-protocol
//!
//! Wire protocol and message model for the murmur receive pipeline.
//!
//! This crate provides:
//! - **Envelope codec**: decoding of the outer wire container
//! - **Content codec**: padding removal and protobuf decoding of plaintext
//! - **Message model**: the typed message kinds and their validity rules
//! - **Classifier**: priority-ordered resolution of content to a message kind
//! - **Session protocol**: sealing and opening of signed, encrypted messages
//!
//! Nothing here performs I/O or keeps state between calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod content;
pub mod envelope;
pub mod error;
pub mod limits;
pub mod messages;
pub mod padding;
pub mod session;
pub mod wire;

#[cfg(test)]
mod proptests;

pub use classifier::classify;
pub use content::{decode_content, encode_content, Content};
pub use envelope::{Envelope, EnvelopeType};
pub use error::{ProtocolError, Result};
pub use messages::{Message, MessageKind, MessageMeta};
pub use session::{open_with_key, seal_for_recipient, session_id, OpenedMessage};
