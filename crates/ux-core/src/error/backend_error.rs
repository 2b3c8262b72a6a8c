//! Typed backend error shape
//!
//! Replaces ad hoc probing of unknown error objects: every failure the
//! transport can produce is one of these variants, and classification is a
//! pure match over them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Rejection code the backend emits when the service process is stopped.
pub const STOPPED_SERVICE_CODE: &str = "IC0508";

static SERVICE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)canister\s+([a-z0-9-]+)\s+is stopped").unwrap());

/// A failure raised by the backend connection or by the timeout wrapper.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum BackendError {
    /// The backend explicitly rejected the call.
    #[error("{message}")]
    Rejected {
        /// Machine-readable rejection code, when the backend supplied one
        code: Option<String>,
        message: String,
        /// Whether the backend judged the call safe to retry
        retryable: bool,
    },

    /// Raised by the timeout wrapper when a deadline elapsed. Carries the
    /// deadline so callers can match on the variant instead of the text.
    #[error("{message}")]
    Timeout { timeout_ms: u64, message: String },

    /// The call never reached the backend.
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// No live actor handle exists for the current principal.
    #[error("actor not available")]
    ActorNotAvailable,
}

impl BackendError {
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout {
            timeout_ms,
            message: format!("Operation timed out after {timeout_ms}ms"),
        }
    }

    pub fn timeout_with_message(timeout_ms: u64, message: impl Into<String>) -> Self {
        Self::Timeout {
            timeout_ms,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            code: None,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Stable timeout test; callers must never substring-match for this.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Stopped-service rejection: recognized by the dedicated code or by
    /// the "is stopped" marker in the reject message.
    pub fn is_stopped_service(&self) -> bool {
        match self {
            Self::Rejected { code, message, .. } => {
                code.as_deref() == Some(STOPPED_SERVICE_CODE) || message.contains("is stopped")
            }
            _ => false,
        }
    }

    /// Service identifier extracted from a stopped-service reject message,
    /// when present.
    pub fn service_id(&self) -> Option<String> {
        SERVICE_ID_RE
            .captures(self.message())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// The raw message carried by this error. Log-only; never rendered.
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message,
            Self::Timeout { message, .. } => message,
            Self::Transport { message } => message,
            Self::ActorNotAvailable => "actor not available",
        }
    }
}
