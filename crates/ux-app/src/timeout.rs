//! Deadline wrapper for backend operations
//!
//! Races an operation against a timer and raises a distinguishable
//! [`BackendError::Timeout`] if the deadline elapses first. Callers test
//! `is_timeout()` on the result; the marker is the variant, never the
//! message text.

use std::future::Future;
use std::time::Duration;

use ux_core::error::BackendError;

/// Run `operation` under a deadline of `timeout_ms` milliseconds.
///
/// If the operation settles first, its outcome is forwarded and the timer
/// is dropped with it (no leaked timers). If the deadline elapses first,
/// the operation is dropped and a `Timeout` error is produced exactly
/// once, with `message` or the default `"Operation timed out after {ms}ms"`.
///
/// Each invocation owns its own timer; concurrent calls share nothing.
pub async fn with_timeout<T, F>(
    operation: F,
    timeout_ms: u64,
    message: Option<&str>,
) -> Result<T, BackendError>
where
    F: Future<Output = Result<T, BackendError>>,
{
    let timer = tokio::time::sleep(Duration::from_millis(timeout_ms));
    tokio::pin!(timer);

    tokio::select! {
        result = operation => result,
        _ = &mut timer => Err(match message {
            Some(text) => BackendError::timeout_with_message(timeout_ms, text),
            None => BackendError::timeout(timeout_ms),
        }),
    }
}
