//! Access gate orchestrator
//!
//! Composes the identity port, the actor init guard, and the profile
//! resolver into the single decision that gates all marketplace content.
//! The decision itself is the pure `resolve()` in ux-core; this type only
//! drives the ports and applies the retry/logout scoping rules.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use ux_core::access::{
    is_valid_university_email, resolve, QuerySnapshot, ResolutionInput, ResolutionState, RetryScope,
};
use ux_core::config::AppConfig;
use ux_core::identity::LoginError;
use ux_core::ports::{ActorConnectorPort, IdentityPort};

use crate::session::actor_init_guard::ActorInitGuard;
use crate::session::profile_resolver::ProfileResolver;

pub struct AccessOrchestrator {
    identity: Arc<dyn IdentityPort>,
    guard: Arc<ActorInitGuard>,
    resolver: Arc<ProfileResolver>,
    onboarding_required: bool,
    /// One gate-relevant request at a time; duplicate retries are ignored.
    busy: AtomicBool,
}

impl AccessOrchestrator {
    pub fn new(
        identity: Arc<dyn IdentityPort>,
        guard: Arc<ActorInitGuard>,
        resolver: Arc<ProfileResolver>,
        config: &AppConfig,
    ) -> Self {
        Self {
            identity,
            guard,
            resolver,
            onboarding_required: config.onboarding.required,
            busy: AtomicBool::new(false),
        }
    }

    /// Convenience wiring from the two external ports.
    pub fn from_ports(
        identity: Arc<dyn IdentityPort>,
        connector: Arc<dyn ActorConnectorPort>,
        config: &AppConfig,
    ) -> Self {
        let guard = Arc::new(ActorInitGuard::new(
            identity.clone(),
            connector,
            config.timeouts.clone(),
        ));
        let resolver = Arc::new(ProfileResolver::new(guard.clone(), config.timeouts.clone()));
        Self::new(identity, guard, resolver, config)
    }

    pub fn guard(&self) -> &Arc<ActorInitGuard> {
        &self.guard
    }

    pub fn resolver(&self) -> &Arc<ProfileResolver> {
        &self.resolver
    }

    /// Resolution from the current snapshots, driving nothing.
    pub async fn current(&self) -> ResolutionState {
        let identity = self.identity.identity().await;
        let guard_snapshot = self.guard.snapshot().await;
        let input = ResolutionInput {
            identity,
            actor_status: guard_snapshot.status,
            actor_error: guard_snapshot.error,
            profile: self.resolver.profile_snapshot().await,
            onboarding: self.resolver.onboarding_snapshot().await,
            onboarding_required: self.onboarding_required,
        };
        resolve(&input)
    }

    /// Drive the pipeline as far as it can go right now, then resolve.
    ///
    /// The ordering is the contract: the actor fully settles before any
    /// profile request is issued, and onboarding is only read once a
    /// valid profile exists.
    pub async fn resolve_access(&self) -> ResolutionState {
        if self.identity.identity().await.is_none() {
            // Anonymous: no actor init, no profile fetch.
            return ResolutionState::Unauthenticated;
        }

        let guard_snapshot = self.guard.ensure().await;
        if guard_snapshot.is_ready() {
            let profile = self.resolver.fetch_profile().await;
            if self.onboarding_required {
                if let QuerySnapshot::Fetched(Some(profile)) = &profile {
                    if is_valid_university_email(&profile.email) {
                        self.resolver.fetch_onboarding().await;
                    }
                }
            }
        }
        self.current().await
    }

    /// Scoped retry. Actor-level failures reset the whole pipeline;
    /// profile-level failures re-run only the profile fetch. States
    /// without a retry scope (AccessDenied among them) are left alone.
    /// A retry arriving while another is in flight is ignored.
    pub async fn retry(&self) -> ResolutionState {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("ignoring duplicate retry while a request is outstanding");
            return self.current().await;
        }

        let state = match self.current().await.retry_scope() {
            Some(RetryScope::Actor) => {
                info!("retry: resetting actor and dependent caches");
                self.guard.retry().await;
                self.resolver.invalidate().await;
                self.resolve_access().await
            }
            Some(RetryScope::Profile) => {
                info!("retry: re-running profile fetch");
                self.resolver.invalidate_profile().await;
                self.resolve_access().await
            }
            None => self.current().await,
        };
        self.busy.store(false, Ordering::SeqCst);
        state
    }

    /// Clear the session and every cached read, then resolve (to the
    /// public view).
    pub async fn logout(&self) -> Result<ResolutionState, LoginError> {
        info!("logging out; clearing session and cached queries");
        self.identity.clear().await?;
        self.guard.reset().await;
        self.resolver.invalidate().await;
        Ok(self.current().await)
    }
}
