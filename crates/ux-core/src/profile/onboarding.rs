//! Onboarding answers domain model
//!
//! Onboarding is a secondary profile-completion step (year/city/address)
//! gated behind a valid primary profile. Whether it is required at all is
//! a configuration flag, not a separate code path.

use serde::{Deserialize, Serialize};

/// Answers collected by the onboarding form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingAnswers {
    /// Year of study
    pub year: String,
    /// Home city
    pub city: String,
    /// Delivery / contact address
    pub address: String,
}

impl OnboardingAnswers {
    /// Complete iff all three fields are non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        !self.year.trim().is_empty()
            && !self.city.trim().is_empty()
            && !self.address.trim().is_empty()
    }

    /// Trimmed copy ready for submission.
    pub fn trimmed(&self) -> Self {
        Self {
            year: self.year.trim().to_string(),
            city: self.city.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}
