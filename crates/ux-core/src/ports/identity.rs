//! Identity provider port
//!
//! Wraps the external authentication mechanism. Login intent travels
//! through the call itself; there is no ambient auth-intent flag.

use async_trait::async_trait;

use crate::identity::{AuthIntent, Identity, LoginError, LoginStatus};

#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// Current session identity, if a session is active.
    async fn identity(&self) -> Option<Identity>;

    /// Start a session. Fails with [`LoginError::SessionExists`] when one
    /// is already active; callers `clear()` then retry rather than treat
    /// that as fatal.
    async fn login(&self, intent: AuthIntent) -> Result<Identity, LoginError>;

    /// End the session and destroy the stored identity.
    async fn clear(&self) -> Result<(), LoginError>;

    async fn login_status(&self) -> LoginStatus;
}
