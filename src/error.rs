//! Error types for the board link engine.
//!
//! Almost every failure inside the protocol core is handled locally and
//! degrades to "drop and continue": framing desync, checksum mismatches and
//! unknown opcodes never surface as errors. The variants here cover the
//! remaining boundaries where the host needs structured context: the
//! transport, the inbound byte source, and request validation.

use crate::protocol::command_set::FieldName;
use thiserror::Error;

/// Result type alias for link operations.
pub type Result<T, E = LinkError> = std::result::Result<T, E>;

/// Main error type for board link operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LinkError {
    #[error("Transport write failed: {context}")]
    Transport {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Byte source failed: {reason}")]
    Source {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Command {opcode:#04x} is missing required field '{field}'")]
    MissingField { opcode: u8, field: FieldName },
}

impl LinkError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            LinkError::Transport { .. } => true,
            LinkError::Source { .. } => true,
            LinkError::MissingField { .. } => false,
        }
    }

    /// Helper constructor for transport errors.
    pub fn transport(context: impl Into<String>) -> Self {
        LinkError::Transport { context: context.into(), source: None }
    }

    /// Helper constructor for transport errors with source.
    pub fn transport_with_source(
        context: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        LinkError::Transport { context: context.into(), source: Some(source) }
    }

    /// Helper constructor for byte source errors.
    pub fn source_failed(reason: impl Into<String>) -> Self {
        LinkError::Source { reason: reason.into(), source: None }
    }

    /// Helper constructor for missing request fields.
    pub fn missing_field(opcode: u8, field: FieldName) -> Self {
        LinkError::MissingField { opcode, field }
    }
}
