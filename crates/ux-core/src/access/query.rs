use serde::{Deserialize, Serialize};

use crate::error::ClassifiedError;

/// Externally visible state of a cached backend read.
///
/// `Fetched` with an inner `None` (for optional payloads) is a real
/// answer — "the backend says there is nothing" — and must stay distinct
/// from `Loading` and from `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuerySnapshot<T> {
    /// Never issued against the current actor generation
    Unfetched,
    /// Request in flight
    Loading,
    /// Settled successfully
    Fetched(T),
    /// Settled with a classified failure
    Failed(ClassifiedError),
}

impl<T> QuerySnapshot<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Unfetched | Self::Loading)
    }

    pub fn as_fetched(&self) -> Option<&T> {
        match self {
            Self::Fetched(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_failed(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}
