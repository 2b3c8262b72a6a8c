//! Error classification
//!
//! Buckets a [`BackendError`] into a fixed category taxonomy and produces
//! the sanitized message shown to users. The category order is a contract:
//! the first matching bucket wins, so a message matching several patterns
//! classifies the same way on every call.

use serde::{Deserialize, Serialize};

use super::backend_error::BackendError;

/// Failure categories, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    /// Backend reports its service process is stopped. Distinct from a
    /// generic server error: a retry shortly is likely to succeed.
    StoppedService,
    Timeout,
    Auth,
    Network,
    Validation,
    Server,
    Unknown,
}

/// Which terminal UI treatment a category maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureTreatment {
    /// Show a Retry action
    RetryableTransient,
    /// Show Logout only; retrying cannot help
    AccessTerminal,
    /// Keep the form open and show a field-level error
    InlineValidation,
}

impl ErrorCategory {
    pub fn treatment(&self) -> FailureTreatment {
        match self {
            Self::Auth => FailureTreatment::AccessTerminal,
            Self::Validation => FailureTreatment::InlineValidation,
            Self::StoppedService
            | Self::Timeout
            | Self::Network
            | Self::Server
            | Self::Unknown => FailureTreatment::RetryableTransient,
        }
    }
}

/// A classified, sanitized failure ready to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    /// Sanitized user-facing message
    pub message: String,
    /// Raw technical text, carried only for categories where a secondary
    /// detail view is allowed (server, stopped-service). Never for auth.
    pub detail: Option<String>,
}

impl std::fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

const AUTH_MARKERS: &[&str] = &[
    "unauthorized",
    "authentication",
    "not authenticated",
    "valid university email required",
    "only users can",
];

const NETWORK_MARKERS: &[&str] = &[
    "network",
    "fetch",
    "connection",
    "actor not available",
    "not initialized",
];

/// Classify a backend error. Pure; same input, same output.
pub fn classify(error: &BackendError) -> ClassifiedError {
    let raw = error.message().to_string();
    let lower = raw.to_lowercase();

    // Stopped service first: it also tends to contain "canister", which
    // would otherwise land in the generic server bucket.
    if error.is_stopped_service() {
        let message = match error.service_id() {
            Some(id) => format!(
                "The backend service is temporarily stopped (service {id}). \
                 Retrying in a moment is likely to succeed."
            ),
            None => "The backend service is temporarily stopped. \
                     Retrying in a moment is likely to succeed."
                .to_string(),
        };
        return ClassifiedError {
            category: ErrorCategory::StoppedService,
            message,
            detail: Some(raw),
        };
    }

    if error.is_timeout() || lower.contains("timeout") || lower.contains("timed out") {
        return ClassifiedError {
            category: ErrorCategory::Timeout,
            message: "Connection timed out. Please check your network and try again.".to_string(),
            detail: None,
        };
    }

    if AUTH_MARKERS.iter().any(|m| lower.contains(m)) {
        return ClassifiedError {
            category: ErrorCategory::Auth,
            message: "Authentication failed. Please log in again.".to_string(),
            detail: None,
        };
    }

    if matches!(
        error,
        BackendError::Transport { .. } | BackendError::ActorNotAvailable
    ) || NETWORK_MARKERS.iter().any(|m| lower.contains(m))
    {
        return ClassifiedError {
            category: ErrorCategory::Network,
            message: "Unable to connect to the server. Please check your connection and try again."
                .to_string(),
            detail: None,
        };
    }

    if lower.contains("required") || lower.contains("invalid") {
        // Validation text is field-level and already user-authored; keep it.
        return ClassifiedError {
            category: ErrorCategory::Validation,
            message: raw,
            detail: None,
        };
    }

    let looks_like_backend = matches!(error, BackendError::Rejected { code: Some(_), .. })
        || lower.contains("canister")
        || lower.contains("replica")
        || lower.contains("service");
    if looks_like_backend {
        return ClassifiedError {
            category: ErrorCategory::Server,
            message: "Server error occurred. Please try again in a moment.".to_string(),
            detail: Some(raw),
        };
    }

    // Short, clean messages pass through verbatim; anything that looks like
    // an internal trace gets the generic fallback.
    let message = if raw.len() < 100 && !raw.contains("Error:") {
        raw
    } else {
        "An unexpected error occurred. Please try again.".to_string()
    };
    ClassifiedError {
        category: ErrorCategory::Unknown,
        message,
        detail: None,
    }
}
