//! Role queries
//!
//! Roles never gate the app; they only unlock admin affordances like
//! moderating listings.

use std::sync::Arc;

use tracing::error;

use ux_core::error::{classify, ClassifiedError};
use ux_core::ids::PrincipalId;
use ux_core::profile::UserRole;

use crate::session::actor_init_guard::ActorInitGuard;

pub struct RoleQueries {
    guard: Arc<ActorInitGuard>,
}

impl RoleQueries {
    pub fn new(guard: Arc<ActorInitGuard>) -> Self {
        Self { guard }
    }

    pub async fn caller_role(&self) -> Result<UserRole, ClassifiedError> {
        let handle = self
            .guard
            .require_ready()
            .await
            .map_err(|err| classify(&err))?;
        handle
            .backend()
            .get_caller_user_role()
            .await
            .map_err(|err| {
                error!(error = %err.message(), "role lookup failed");
                classify(&err)
            })
    }

    pub async fn is_caller_admin(&self) -> Result<bool, ClassifiedError> {
        let handle = self
            .guard
            .require_ready()
            .await
            .map_err(|err| classify(&err))?;
        handle.backend().is_caller_admin().await.map_err(|err| {
            error!(error = %err.message(), "admin check failed");
            classify(&err)
        })
    }

    pub async fn assign_role(
        &self,
        user: &PrincipalId,
        role: UserRole,
    ) -> Result<(), ClassifiedError> {
        let handle = self
            .guard
            .require_ready()
            .await
            .map_err(|err| classify(&err))?;
        handle
            .backend()
            .assign_caller_user_role(user, role)
            .await
            .map_err(|err| {
                error!(error = %err.message(), "role assignment failed");
                classify(&err)
            })
    }
}
