//! Profile editing
//!
//! Same validation contract as creation, against the save endpoint.

use std::sync::Arc;

use tracing::warn;

use ux_core::access::university_email_error;
use ux_core::error::classify;
use ux_core::profile::UserProfile;

use crate::session::actor_init_guard::ActorInitGuard;
use crate::session::profile_resolver::ProfileResolver;
use crate::usecases::profile::create_profile::{CreateProfileError, ProfileField};

pub struct SaveProfile {
    guard: Arc<ActorInitGuard>,
    resolver: Arc<ProfileResolver>,
}

impl SaveProfile {
    pub fn new(guard: Arc<ActorInitGuard>, resolver: Arc<ProfileResolver>) -> Self {
        Self { guard, resolver }
    }

    pub async fn execute(&self, input: &UserProfile) -> Result<(), CreateProfileError> {
        if input.name.trim().is_empty() {
            return Err(CreateProfileError::Field {
                field: ProfileField::Name,
                message: "Please enter your full name".to_string(),
            });
        }
        if let Some(message) = university_email_error(&input.email) {
            return Err(CreateProfileError::Field {
                field: ProfileField::Email,
                message,
            });
        }

        let handle = self
            .guard
            .require_ready()
            .await
            .map_err(|err| CreateProfileError::Backend(classify(&err)))?;

        let profile = input.normalized();
        match handle.backend().save_caller_user_profile(&profile).await {
            Ok(()) => {
                self.resolver.invalidate_profile().await;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err.message(), "profile save rejected");
                Err(CreateProfileError::Backend(classify(&err)))
            }
        }
    }
}
