//! Application configuration domain model

use serde::{Deserialize, Serialize};

/// Actor initialization deadline. Contract constant; compatible behavior
/// requires exactly this value.
pub const ACTOR_INIT_TIMEOUT_MS: u64 = 20_000;

/// Profile fetch deadline, deliberately distinct from the init deadline so
/// a slow profile read is never conflated with a slow connection.
pub const PROFILE_FETCH_TIMEOUT_MS: u64 = 15_000;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend connection settings
    pub backend: BackendConfig,

    /// Gate deadlines
    pub timeouts: TimeoutConfig,

    /// Onboarding settings
    pub onboarding: OnboardingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend service
    pub base_url: String,

    /// Admin token forwarded during access-control initialization, if any
    pub admin_token: Option<String>,
}

/// Gate deadline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Actor initialization deadline in milliseconds
    pub actor_init_ms: u64,

    /// Profile fetch deadline in milliseconds
    pub profile_fetch_ms: u64,
}

/// Onboarding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    /// Whether onboarding answers gate access at all
    pub required: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            timeouts: TimeoutConfig::default(),
            onboarding: OnboardingConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4943".to_string(),
            admin_token: None,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            actor_init_ms: ACTOR_INIT_TIMEOUT_MS,
            profile_fetch_ms: PROFILE_FETCH_TIMEOUT_MS,
        }
    }
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self { required: true }
    }
}
