//! Identity domain models
//!
//! The identity provider is an external collaborator; this module only
//! defines the session-scoped principal handle and the login lifecycle
//! types the rest of the system reads.

use serde::{Deserialize, Serialize};

use crate::ids::PrincipalId;

/// An authenticated session principal.
///
/// Exists only while a session is active: created by login, destroyed by
/// logout. Absence of an `Identity` means anonymous browsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque principal issued by the identity provider
    pub principal: PrincipalId,
    /// Email hint supplied by the provider, if any. Never access-granting
    /// on its own; access is decided by the stored profile's email.
    pub email_hint: Option<String>,
}

impl Identity {
    pub fn new(principal: PrincipalId) -> Self {
        Self {
            principal,
            email_hint: None,
        }
    }

    pub fn with_email_hint(principal: PrincipalId, email_hint: impl Into<String>) -> Self {
        Self {
            principal,
            email_hint: Some(email_hint.into()),
        }
    }
}

/// Why the user initiated authentication.
///
/// Threaded explicitly through `login()` instead of an ambient
/// process-wide flag, so the flow cannot desync from the actual click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthIntent {
    Login,
    Signup,
}

/// Login lifecycle as reported by the identity provider adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoginStatus {
    Idle,
    LoggingIn,
    Success,
    Error,
}

/// Errors surfaced by the identity provider adapter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginError {
    /// A session already exists. Callers must `clear()` then retry;
    /// this is not fatal.
    #[error("a session already exists; clear it before logging in again")]
    SessionExists,

    #[error("no active session")]
    NoSession,

    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("session storage error: {0}")]
    Storage(String),
}
