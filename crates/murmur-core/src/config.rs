//! Configuration for the message receiver.
//!
//! # Example
//!
//! ```
//! use murmur_core::config::{ReceiverConfig, ReceiverConfigBuilder};
//!
//! // Use defaults
//! let config = ReceiverConfig::default();
//!
//! // Or use builder for customization
//! let config = ReceiverConfigBuilder::new()
//!     .with_max_envelope_size(64 * 1024)
//!     .disable_legacy_protocol_fallback()
//!     .build_validated()
//!     .unwrap();
//! assert!(!config.migration.legacy_protocol_fallback);
//! ```

use serde::{Deserialize, Serialize};

use murmur_protocol::limits::MAX_ENVELOPE_SIZE;

/// Receiver configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// Raw envelopes larger than this are rejected before decoding.
    pub max_envelope_size: usize,

    /// Migration fallbacks.
    pub migration: MigrationConfig,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            max_envelope_size: MAX_ENVELOPE_SIZE,
            migration: MigrationConfig::default(),
        }
    }
}

impl ReceiverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> ReceiverConfigBuilder {
        ReceiverConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_envelope_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_envelope_size".into(),
                reason: "maximum envelope size must be greater than zero".into(),
            });
        }

        Ok(())
    }
}

/// Which migration fallbacks are attempted after the session protocol fails.
///
/// Disabling a fallback removes the second attempt; it never changes the
/// order in which schemes are tried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Try the legacy protocol on direct envelopes.
    pub legacy_protocol_fallback: bool,

    /// Try shared sender keys on closed-group envelopes.
    pub shared_sender_key_fallback: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            legacy_protocol_fallback: true,
            shared_sender_key_fallback: true,
        }
    }
}

/// Configuration builder.
///
/// Provides a fluent interface for building configuration.
#[derive(Clone, Debug, Default)]
pub struct ReceiverConfigBuilder {
    config: ReceiverConfig,
}

impl ReceiverConfigBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: ReceiverConfig::default(),
        }
    }

    /// Build the final configuration.
    pub fn build(self) -> ReceiverConfig {
        self.config
    }

    /// Build and validate the configuration.
    ///
    /// Returns an error if validation fails.
    pub fn build_validated(self) -> Result<ReceiverConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }

    /// Set the maximum raw envelope size in bytes.
    pub fn with_max_envelope_size(mut self, size: usize) -> Self {
        self.config.max_envelope_size = size;
        self
    }

    /// Try the legacy protocol after the session protocol fails.
    pub fn enable_legacy_protocol_fallback(mut self) -> Self {
        self.config.migration.legacy_protocol_fallback = true;
        self
    }

    /// Never try the legacy protocol.
    pub fn disable_legacy_protocol_fallback(mut self) -> Self {
        self.config.migration.legacy_protocol_fallback = false;
        self
    }

    /// Try shared sender keys after the session protocol fails.
    pub fn enable_shared_sender_key_fallback(mut self) -> Self {
        self.config.migration.shared_sender_key_fallback = true;
        self
    }

    /// Never try shared sender keys.
    pub fn disable_shared_sender_key_fallback(mut self) -> Self {
        self.config.migration.shared_sender_key_fallback = false;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The field name.
        field: String,
        /// The reason it's invalid.
        reason: String,
    },
}
