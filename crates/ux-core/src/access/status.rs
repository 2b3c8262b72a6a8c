use serde::{Deserialize, Serialize};

/// Actor initialization status.
///
/// `Initializing → Ready` on success, `→ Timeout` when the init deadline
/// elapses, `→ Error` on any other failure. `Error`/`Timeout` re-enter
/// `Initializing` only through an explicit user retry, which also
/// invalidates the handle and every dependent cached read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorInitStatus {
    Initializing,
    Ready,
    Error,
    Timeout,
}

impl ActorInitStatus {
    /// Terminal failure states that require an explicit user action.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Error | Self::Timeout)
    }
}
