//! Error types for agent invocation

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while invoking an agent and draining its reply
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// A required caller-supplied parameter is missing. Never reaches the service.
    #[error("Missing required parameters: {0}")]
    Validation(String),

    /// The agent service rejected the call, or failed mid-stream, with a classified error
    #[error("An error occurred ({code}) when calling the InvokeAgent operation: {message}")]
    Service { code: String, message: String },

    /// Configured deadline elapsed before the stream finished
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// Anything else: transport failures, undecodable chunks, bad event fields
    #[error("{0}")]
    Unexpected(String),
}

impl InvokeError {
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        InvokeError::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        InvokeError::Unexpected(message.into())
    }

    /// Status code used when this error is folded into a response envelope
    pub fn status_code(&self) -> u16 {
        match self {
            InvokeError::Validation(_) => 400,
            _ => 500,
        }
    }

    /// Message carried in the `error` field of a response envelope
    pub fn envelope_message(&self) -> String {
        match self {
            InvokeError::Validation(_) => self.to_string(),
            InvokeError::Service { code, message } => format!("AWS Error ({}): {}", code, message),
            other => format!("Unexpected error: {}", other),
        }
    }
}

/// Error surfaced by the advanced invocation helper, which propagates instead of
/// producing an envelope
#[derive(Debug, Error)]
#[error("Failed to invoke agent: {0}")]
pub struct InvocationFailed(#[from] pub InvokeError);

impl InvocationFailed {
    pub fn cause(&self) -> &InvokeError {
        &self.0
    }
}

/// Result type alias for invocation operations
pub type InvokeResult<T> = Result<T, InvokeError>;
