//! Actor initialization guard
//!
//! Single source of truth for the backend connection. Establishes the
//! actor for the current principal under a hard deadline, surfaces
//! failures as explicit states instead of retrying silently, and keys
//! everything by a generation counter so stale results and stale
//! dependents are discarded, never applied.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info};

use ux_core::access::ActorInitStatus;
use ux_core::config::TimeoutConfig;
use ux_core::error::{classify, BackendError, ClassifiedError};
use ux_core::ids::PrincipalId;
use ux_core::ports::{ActorConnectorPort, IdentityPort};

use crate::session::actor_handle::ActorHandle;
use crate::timeout::with_timeout;

/// Point-in-time view of the guard.
#[derive(Debug, Clone)]
pub struct GuardSnapshot {
    pub status: ActorInitStatus,
    pub actor: Option<Arc<ActorHandle>>,
    /// Sanitized init failure, when status is error/timeout
    pub error: Option<ClassifiedError>,
    pub generation: u64,
}

impl GuardSnapshot {
    pub fn is_ready(&self) -> bool {
        self.status == ActorInitStatus::Ready
    }
}

struct GuardState {
    generation: u64,
    principal: Option<PrincipalId>,
    status: ActorInitStatus,
    handle: Option<Arc<ActorHandle>>,
    error: Option<ClassifiedError>,
}

impl GuardState {
    fn new() -> Self {
        Self {
            generation: 1,
            principal: None,
            status: ActorInitStatus::Initializing,
            handle: None,
            error: None,
        }
    }

    /// Discard everything and re-enter `Initializing` keyed to `principal`.
    /// Bumping the generation is what invalidates dependent cached reads.
    fn rekey(&mut self, principal: Option<PrincipalId>) {
        self.generation += 1;
        self.principal = principal;
        self.status = ActorInitStatus::Initializing;
        self.handle = None;
        self.error = None;
    }

    fn snapshot(&self) -> GuardSnapshot {
        GuardSnapshot {
            status: self.status,
            actor: self.handle.clone(),
            error: self.error.clone(),
            generation: self.generation,
        }
    }
}

/// Owns the [`ActorHandle`] and its lifecycle.
pub struct ActorInitGuard {
    identity: Arc<dyn IdentityPort>,
    connector: Arc<dyn ActorConnectorPort>,
    timeouts: TimeoutConfig,
    state: Mutex<GuardState>,
    /// Coalesces concurrent initialization attempts.
    init_lock: Mutex<()>,
}

impl ActorInitGuard {
    pub fn new(
        identity: Arc<dyn IdentityPort>,
        connector: Arc<dyn ActorConnectorPort>,
        timeouts: TimeoutConfig,
    ) -> Self {
        Self {
            identity,
            connector,
            timeouts,
            state: Mutex::new(GuardState::new()),
            init_lock: Mutex::new(()),
        }
    }

    /// Current state without driving anything.
    pub async fn snapshot(&self) -> GuardSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }

    /// The current handle, or `ActorNotAvailable` when the guard is not
    /// `Ready`.
    pub async fn require_ready(&self) -> Result<Arc<ActorHandle>, BackendError> {
        let state = self.state.lock().await;
        match (&state.status, &state.handle) {
            (ActorInitStatus::Ready, Some(handle)) => Ok(handle.clone()),
            _ => Err(BackendError::ActorNotAvailable),
        }
    }

    /// Drive initialization for the current identity and return the
    /// settled state.
    ///
    /// Anonymous sessions connect immediately with no deadline; an
    /// authenticated connect runs under the configured init deadline.
    /// A settled failure stays put — there is no automatic retry, so a
    /// persistent outage surfaces instead of hiding behind a spinner.
    pub async fn ensure(&self) -> GuardSnapshot {
        let identity = self.identity.identity().await;
        let principal = identity.as_ref().map(|i| i.principal.clone());

        {
            let mut state = self.state.lock().await;
            if state.principal != principal {
                debug!(?principal, "principal changed; discarding actor state");
                state.rekey(principal.clone());
            }
            if state.status != ActorInitStatus::Initializing {
                return state.snapshot();
            }
        }

        let _init = self.init_lock.lock().await;

        // Another caller may have settled initialization while we waited
        // for the lock.
        let generation = {
            let state = self.state.lock().await;
            if state.status != ActorInitStatus::Initializing || state.principal != principal {
                return state.snapshot();
            }
            state.generation
        };

        let result = match &identity {
            Some(identity) => {
                let deadline_ms = self.timeouts.actor_init_ms;
                let message = format!(
                    "Actor initialization timed out after {} seconds",
                    deadline_ms / 1000
                );
                with_timeout(
                    self.connector.connect(Some(identity)),
                    deadline_ms,
                    Some(message.as_str()),
                )
                .await
            }
            None => self.connector.connect(None).await,
        };

        let mut state = self.state.lock().await;
        if state.generation != generation {
            // A retry or identity switch happened mid-flight; this result
            // belongs to a dead generation.
            debug!(generation, "discarding stale actor init result");
            return state.snapshot();
        }
        match result {
            Ok(backend) => {
                info!(?principal, "actor ready");
                state.handle = Some(Arc::new(ActorHandle::new(backend, principal, generation)));
                state.status = ActorInitStatus::Ready;
                state.error = None;
            }
            Err(err) => {
                // Raw failure goes to the log; callers only ever see the
                // classified message.
                error!(error = %err.message(), "actor initialization failed");
                state.status = if err.is_timeout() {
                    ActorInitStatus::Timeout
                } else {
                    ActorInitStatus::Error
                };
                state.error = Some(classify(&err));
                state.handle = None;
            }
        }
        state.snapshot()
    }

    /// Explicit user retry: discard the handle and any error state and
    /// re-enter `Initializing` for the same principal. Dependent caches
    /// key on the generation and become unfetched as a consequence.
    pub async fn retry(&self) {
        let mut state = self.state.lock().await;
        info!("retrying actor initialization");
        let principal = state.principal.clone();
        state.rekey(principal);
    }

    /// Tear down on logout: drop the handle and re-key to anonymous.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        debug!("resetting actor state");
        state.rekey(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::{ConnectorBehavior, StaticIdentity, StubConnector};
    use std::time::Duration;
    use ux_core::access::ActorInitStatus;
    use ux_core::error::ErrorCategory;
    use ux_core::identity::Identity;

    fn guard_with(
        identity: Arc<StaticIdentity>,
        connector: Arc<StubConnector>,
    ) -> ActorInitGuard {
        ActorInitGuard::new(identity, connector, TimeoutConfig::default())
    }

    #[tokio::test]
    async fn test_anonymous_session_is_ready_immediately() {
        let identity = Arc::new(StaticIdentity::anonymous());
        let connector = Arc::new(StubConnector::new(ConnectorBehavior::Ready));
        let guard = guard_with(identity, connector.clone());

        let snapshot = guard.ensure().await;
        assert_eq!(snapshot.status, ActorInitStatus::Ready);
        let handle = snapshot.actor.expect("anonymous handle");
        assert!(!handle.is_authenticated());
        assert_eq!(connector.calls(), 1);
    }

    #[tokio::test]
    async fn test_authenticated_connect_keys_handle_to_principal() {
        let identity = Arc::new(StaticIdentity::logged_in("principal-1"));
        let connector = Arc::new(StubConnector::new(ConnectorBehavior::Ready));
        let guard = guard_with(identity, connector);

        let snapshot = guard.ensure().await;
        let handle = snapshot.actor.expect("handle");
        assert_eq!(handle.principal().unwrap().as_str(), "principal-1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_never_settling_times_out_at_deadline() {
        let identity = Arc::new(StaticIdentity::logged_in("principal-1"));
        let connector = Arc::new(StubConnector::new(ConnectorBehavior::Never));
        let guard = guard_with(identity, connector);

        let started = tokio::time::Instant::now();
        let snapshot = guard.ensure().await;
        assert_eq!(snapshot.status, ActorInitStatus::Timeout);
        assert_eq!(started.elapsed(), Duration::from_millis(20_000));
        let error = snapshot.error.expect("classified error");
        assert_eq!(error.category, ErrorCategory::Timeout);
    }

    #[tokio::test]
    async fn test_connect_failure_is_classified_not_retried() {
        let identity = Arc::new(StaticIdentity::logged_in("principal-1"));
        let connector = Arc::new(StubConnector::new(ConnectorBehavior::Fail(
            BackendError::rejected("Canister aaaaa-aa is stopped"),
        )));
        let guard = guard_with(identity, connector.clone());

        let snapshot = guard.ensure().await;
        assert_eq!(snapshot.status, ActorInitStatus::Error);
        assert_eq!(
            snapshot.error.unwrap().category,
            ErrorCategory::StoppedService
        );

        // A second ensure must not reconnect on its own.
        let snapshot = guard.ensure().await;
        assert_eq!(snapshot.status, ActorInitStatus::Error);
        assert_eq!(connector.calls(), 1);
    }

    #[tokio::test]
    async fn test_retry_reenters_initializing_and_reconnects() {
        let identity = Arc::new(StaticIdentity::logged_in("principal-1"));
        let connector = Arc::new(StubConnector::new(ConnectorBehavior::Fail(
            BackendError::transport("connection refused"),
        )));
        let guard = guard_with(identity, connector.clone());

        let before = guard.ensure().await;
        assert_eq!(before.status, ActorInitStatus::Error);

        connector.set_behavior(ConnectorBehavior::Ready);
        guard.retry().await;
        assert_eq!(guard.snapshot().await.status, ActorInitStatus::Initializing);

        let after = guard.ensure().await;
        assert_eq!(after.status, ActorInitStatus::Ready);
        assert_eq!(connector.calls(), 2);
        assert!(after.generation > before.generation);
    }

    #[tokio::test]
    async fn test_identity_switch_produces_fresh_handle() {
        let identity = Arc::new(StaticIdentity::logged_in("principal-1"));
        let connector = Arc::new(StubConnector::new(ConnectorBehavior::Ready));
        let guard = guard_with(identity.clone(), connector.clone());

        let first = guard.ensure().await;
        let first_generation = first.generation;

        identity
            .set(Some(Identity::new("principal-2".into())))
            .await;
        let second = guard.ensure().await;
        let handle = second.actor.expect("handle");
        assert_eq!(handle.principal().unwrap().as_str(), "principal-2");
        assert!(second.generation > first_generation);
        assert_eq!(connector.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_mid_flight_discards_late_result() {
        let identity = Arc::new(StaticIdentity::logged_in("principal-1"));
        let connector = Arc::new(StubConnector::new(ConnectorBehavior::Delay(5_000)));
        let guard = Arc::new(guard_with(identity, connector.clone()));

        let racing = {
            let guard = guard.clone();
            tokio::spawn(async move { guard.ensure().await })
        };
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        guard.retry().await;

        let stale = racing.await.unwrap();
        // The slow connect finished after the retry; its result must not
        // have been installed.
        assert_eq!(stale.status, ActorInitStatus::Initializing);
        assert!(stale.actor.is_none());
    }

    #[tokio::test]
    async fn test_require_ready_before_init_is_actor_not_available() {
        let identity = Arc::new(StaticIdentity::logged_in("principal-1"));
        let connector = Arc::new(StubConnector::new(ConnectorBehavior::Ready));
        let guard = guard_with(identity, connector);

        let err = guard.require_ready().await.unwrap_err();
        assert!(matches!(err, BackendError::ActorNotAvailable));

        guard.ensure().await;
        assert!(guard.require_ready().await.is_ok());
    }
}
