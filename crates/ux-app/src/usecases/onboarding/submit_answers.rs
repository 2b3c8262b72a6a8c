//! Onboarding submission
//!
//! All three answers are mandatory; blanks are field-level errors that
//! keep the form open, never full-screen failures.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use ux_core::error::{classify, ClassifiedError};
use ux_core::profile::OnboardingAnswers;

use crate::session::actor_init_guard::ActorInitGuard;
use crate::session::profile_resolver::ProfileResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingField {
    Year,
    City,
    Address,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitOnboardingError {
    #[error("{message}")]
    Field {
        field: OnboardingField,
        message: String,
    },

    #[error("{0}")]
    Backend(ClassifiedError),
}

pub struct SubmitOnboarding {
    guard: Arc<ActorInitGuard>,
    resolver: Arc<ProfileResolver>,
}

impl SubmitOnboarding {
    pub fn new(guard: Arc<ActorInitGuard>, resolver: Arc<ProfileResolver>) -> Self {
        Self { guard, resolver }
    }

    pub async fn execute(&self, input: &OnboardingAnswers) -> Result<(), SubmitOnboardingError> {
        if input.year.trim().is_empty() {
            return Err(field(OnboardingField::Year, "Please enter your year of study"));
        }
        if input.city.trim().is_empty() {
            return Err(field(OnboardingField::City, "Please enter your city"));
        }
        if input.address.trim().is_empty() {
            return Err(field(OnboardingField::Address, "Please enter your address"));
        }

        let handle = self
            .guard
            .require_ready()
            .await
            .map_err(|err| SubmitOnboardingError::Backend(classify(&err)))?;

        let answers = input.trimmed();
        match handle.backend().set_onboarding_answers(&answers).await {
            Ok(()) => {
                self.resolver.invalidate_onboarding().await;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err.message(), "onboarding submission rejected");
                Err(SubmitOnboardingError::Backend(classify(&err)))
            }
        }
    }
}

fn field(field: OnboardingField, message: &str) -> SubmitOnboardingError {
    SubmitOnboardingError::Field {
        field,
        message: message.to_string(),
    }
}
