//! Onboarding use cases

pub mod submit_answers;

pub use submit_answers::{OnboardingField, SubmitOnboarding, SubmitOnboardingError};
