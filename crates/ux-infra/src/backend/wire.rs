//! Wire shapes shared by the HTTP backend adapter.

use serde::{Deserialize, Serialize};

/// Rejection body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub reject_message: Option<String>,
    #[serde(default)]
    pub retryable: bool,
}
