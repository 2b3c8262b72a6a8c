//! Backend error taxonomy and classification
//!
//! Raw backend failures arrive as a typed [`BackendError`] and are bucketed
//! by [`classify`] into a small category set with sanitized, user-facing
//! text. Raw error text is for logs only; it is never rendered directly.

pub mod backend_error;
pub mod classify;

pub use backend_error::{BackendError, STOPPED_SERVICE_CODE};
pub use classify::{classify, ClassifiedError, ErrorCategory, FailureTreatment};
