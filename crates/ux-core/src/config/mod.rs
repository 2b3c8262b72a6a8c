//! Application configuration domain model

pub mod app_config;

pub use app_config::{
    AppConfig, BackendConfig, OnboardingConfig, TimeoutConfig, ACTOR_INIT_TIMEOUT_MS,
    PROFILE_FETCH_TIMEOUT_MS,
};
