//! Error taxonomy for the receive pipeline.
//!
//! Every failure of [`MessageReceiver::receive`](crate::MessageReceiver::receive)
//! is one of these kinds. The set is closed: adding a variant forces a
//! decision in [`ReceiveError::is_retryable`].

use thiserror::Error;

/// Reasons an envelope was not turned into a message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiveError {
    /// The envelope timestamp was already recorded.
    #[error("Duplicate message")]
    DuplicateMessage,

    /// The classified message failed validation.
    #[error("Invalid message")]
    InvalidMessage,

    /// No message kind matched the decoded content.
    #[error("Unknown message type")]
    UnknownMessage,

    /// The envelope type is not supported.
    #[error("Unknown envelope type")]
    UnknownEnvelopeType,

    /// The local X25519 identity key pair is unavailable.
    #[error("Couldn't find user X25519 key pair")]
    NoUserX25519KeyPair,

    /// The local Ed25519 identity key pair is unavailable.
    #[error("Couldn't find user Ed25519 key pair")]
    NoUserEd25519KeyPair,

    /// The sender's signature did not verify.
    #[error("Invalid message signature")]
    InvalidSignature,

    /// The envelope carries no content.
    #[error("Received an empty envelope")]
    NoData,

    /// The sender is on the local block list.
    #[error("Received a message from a blocked user")]
    SenderBlocked,

    /// No local conversation exists for the message.
    #[error("Couldn't find thread for message")]
    NoThread,

    /// The message was sent by the local user.
    #[error("Message addressed at self")]
    SelfSend,

    /// Every applicable decryption scheme failed.
    #[error("Decryption failed")]
    DecryptionFailed,

    /// The closed group public key is missing or malformed.
    #[error("Invalid group public key")]
    InvalidGroupPublicKey,

    /// No private key is stored for the closed group.
    #[error("Missing group private key")]
    NoGroupPrivateKey,

    /// Key agreement did not produce a usable shared secret.
    #[error("Couldn't generate a shared secret")]
    SharedSecretGenerationFailed,

    /// The raw bytes are not a well-formed envelope.
    #[error("Malformed envelope")]
    MalformedEnvelope,
}

impl ReceiveError {
    /// Whether delivering the same envelope again could succeed.
    ///
    /// Advisory only: the pipeline never retries internally. Failures caused
    /// by missing local state (keys, threads) are retryable; failures caused
    /// by the envelope itself are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::DuplicateMessage
            | Self::InvalidMessage
            | Self::UnknownMessage
            | Self::UnknownEnvelopeType
            | Self::InvalidSignature
            | Self::NoData
            | Self::SenderBlocked
            | Self::SelfSend
            | Self::DecryptionFailed
            | Self::MalformedEnvelope => false,
            Self::NoUserX25519KeyPair
            | Self::NoUserEd25519KeyPair
            | Self::NoThread
            | Self::InvalidGroupPublicKey
            | Self::NoGroupPrivateKey
            | Self::SharedSecretGenerationFailed => true,
        }
    }
}

/// Result type for receive operations.
pub type Result<T> = std::result::Result<T, ReceiveError>;
