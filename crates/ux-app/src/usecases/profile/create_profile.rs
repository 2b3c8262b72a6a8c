//! Profile creation
//!
//! Validates the form client-side (including the university email
//! predicate) before calling the backend, and maps a backend-side domain
//! rejection back onto the email field instead of a fatal error screen.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use ux_core::access::university_email_error;
use ux_core::error::{classify, ClassifiedError};
use ux_core::profile::UserProfile;

use crate::session::actor_init_guard::ActorInitGuard;
use crate::session::profile_resolver::ProfileResolver;

/// Which form field an inline error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Name,
    Email,
    University,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateProfileError {
    /// Field-level problem; the form stays open.
    #[error("{message}")]
    Field {
        field: ProfileField,
        message: String,
    },

    /// Anything else, already classified and sanitized.
    #[error("{0}")]
    Backend(ClassifiedError),
}

/// Backend rejection markers that mean "the email domain was refused".
const DOMAIN_REJECTION_MARKERS: &[&str] = &["jainuniversity", "unauthorized", "domain"];

pub struct CreateProfile {
    guard: Arc<ActorInitGuard>,
    resolver: Arc<ProfileResolver>,
}

impl CreateProfile {
    pub fn new(guard: Arc<ActorInitGuard>, resolver: Arc<ProfileResolver>) -> Self {
        Self { guard, resolver }
    }

    pub async fn execute(&self, input: &UserProfile) -> Result<(), CreateProfileError> {
        if input.name.trim().is_empty() {
            return Err(field(ProfileField::Name, "Please enter your full name"));
        }
        if input.email.trim().is_empty() {
            return Err(field(
                ProfileField::Email,
                "Please enter your university email",
            ));
        }
        if input.university.trim().is_empty() {
            return Err(field(
                ProfileField::University,
                "Please enter your university name",
            ));
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
        match handle.backend().create_user_profile(&profile).await {
            Ok(()) => {
                // Both gate queries are stale now: the profile exists and
                // onboarding becomes reachable.
                self.resolver.invalidate().await;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err.message(), "profile creation rejected");
                let lower = err.message().to_lowercase();
                if DOMAIN_REJECTION_MARKERS.iter().any(|m| lower.contains(m)) {
                    return Err(field(
                        ProfileField::Email,
                        "Email must be from @jainuniversity.ac.in domain or be an \
                         approved admin email",
                    ));
                }
                Err(CreateProfileError::Backend(classify(&err)))
            }
        }
    }
}

fn field(field: ProfileField, message: &str) -> CreateProfileError {
    CreateProfileError::Field {
        field,
        message: message.to_string(),
    }
}
