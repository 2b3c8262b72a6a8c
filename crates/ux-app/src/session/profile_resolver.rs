//! Profile resolution
//!
//! Fetches the caller's profile and onboarding answers once the actor is
//! ready, each under its own deadline, and caches the outcome keyed by the
//! guard generation. A result that lands after a retry or identity switch
//! belongs to a dead generation and is discarded, never applied.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use ux_core::access::QuerySnapshot;
use ux_core::config::TimeoutConfig;
use ux_core::error::classify;
use ux_core::profile::{OnboardingAnswers, UserProfile};

use crate::session::actor_init_guard::ActorInitGuard;
use crate::timeout::with_timeout;

struct CachedQuery<T> {
    generation: u64,
    snapshot: QuerySnapshot<T>,
}

impl<T> CachedQuery<T> {
    fn unfetched() -> Self {
        Self {
            generation: 0,
            snapshot: QuerySnapshot::Unfetched,
        }
    }
}

/// Generation-keyed reader for the caller's profile and onboarding state.
pub struct ProfileResolver {
    guard: Arc<ActorInitGuard>,
    timeouts: TimeoutConfig,
    profile: Mutex<CachedQuery<Option<UserProfile>>>,
    onboarding: Mutex<CachedQuery<Option<OnboardingAnswers>>>,
}

impl ProfileResolver {
    pub fn new(guard: Arc<ActorInitGuard>, timeouts: TimeoutConfig) -> Self {
        Self {
            guard,
            timeouts,
            profile: Mutex::new(CachedQuery::unfetched()),
            onboarding: Mutex::new(CachedQuery::unfetched()),
        }
    }

    /// Cached profile state for the current generation. A cache keyed to
    /// an older generation reads as `Unfetched`.
    pub async fn profile_snapshot(&self) -> QuerySnapshot<Option<UserProfile>> {
        let generation = self.guard.generation().await;
        let cached = self.profile.lock().await;
        if cached.generation == generation {
            cached.snapshot.clone()
        } else {
            QuerySnapshot::Unfetched
        }
    }

    /// Cached onboarding state for the current generation.
    pub async fn onboarding_snapshot(&self) -> QuerySnapshot<Option<OnboardingAnswers>> {
        let generation = self.guard.generation().await;
        let cached = self.onboarding.lock().await;
        if cached.generation == generation {
            cached.snapshot.clone()
        } else {
            QuerySnapshot::Unfetched
        }
    }

    /// Fetch the caller profile under the profile deadline. Runs only when
    /// the guard is `Ready`; settled outcomes are cached until an explicit
    /// invalidation or a generation change, so a failure never auto-retries.
    pub async fn fetch_profile(&self) -> QuerySnapshot<Option<UserProfile>> {
        let handle = match self.guard.require_ready().await {
            Ok(handle) => handle,
            Err(_) => return QuerySnapshot::Unfetched,
        };
        let generation = handle.generation();

        {
            let mut cached = self.profile.lock().await;
            if cached.generation == generation {
                match &cached.snapshot {
                    QuerySnapshot::Fetched(_) | QuerySnapshot::Failed(_) => {
                        return cached.snapshot.clone()
                    }
                    // Another fetch is already in flight for this
                    // generation; report it instead of doubling up.
                    QuerySnapshot::Loading => return QuerySnapshot::Loading,
                    QuerySnapshot::Unfetched => {}
                }
            }
            *cached = CachedQuery {
                generation,
                snapshot: QuerySnapshot::Loading,
            };
        }

        let deadline_ms = self.timeouts.profile_fetch_ms;
        let message = format!(
            "Profile loading timed out after {} seconds",
            deadline_ms / 1000
        );
        let result = with_timeout(
            handle.backend().get_caller_user_profile(),
            deadline_ms,
            Some(message.as_str()),
        )
        .await;

        let settled = match result {
            Ok(profile) => QuerySnapshot::Fetched(profile),
            Err(err) => {
                warn!(error = %err.message(), "profile fetch failed");
                QuerySnapshot::Failed(classify(&err))
            }
        };
        self.store_profile(generation, settled).await
    }

    /// Fetch onboarding answers under the same deadline regime.
    pub async fn fetch_onboarding(&self) -> QuerySnapshot<Option<OnboardingAnswers>> {
        let handle = match self.guard.require_ready().await {
            Ok(handle) => handle,
            Err(_) => return QuerySnapshot::Unfetched,
        };
        let generation = handle.generation();

        {
            let mut cached = self.onboarding.lock().await;
            if cached.generation == generation {
                match &cached.snapshot {
                    QuerySnapshot::Fetched(_) | QuerySnapshot::Failed(_) => {
                        return cached.snapshot.clone()
                    }
                    QuerySnapshot::Loading => return QuerySnapshot::Loading,
                    QuerySnapshot::Unfetched => {}
                }
            }
            *cached = CachedQuery {
                generation,
                snapshot: QuerySnapshot::Loading,
            };
        }

        let result = with_timeout(
            handle.backend().get_onboarding_answers(),
            self.timeouts.profile_fetch_ms,
            None,
        )
        .await;

        let settled = match result {
            Ok(answers) => QuerySnapshot::Fetched(answers),
            Err(err) => {
                warn!(error = %err.message(), "onboarding fetch failed");
                QuerySnapshot::Failed(classify(&err))
            }
        };

        let current_generation = self.guard.generation().await;
        let mut cached = self.onboarding.lock().await;
        if current_generation != generation || cached.generation != generation {
            debug!("discarding stale onboarding result");
            return QuerySnapshot::Unfetched;
        }
        cached.snapshot = settled.clone();
        settled
    }

    /// Drop both caches; the next reads start from `Unfetched`.
    pub async fn invalidate(&self) {
        *self.profile.lock().await = CachedQuery::unfetched();
        *self.onboarding.lock().await = CachedQuery::unfetched();
    }

    /// Drop only the profile cache (profile-scoped retry).
    pub async fn invalidate_profile(&self) {
        *self.profile.lock().await = CachedQuery::unfetched();
    }

    /// Drop only the onboarding cache (after submitting answers).
    pub async fn invalidate_onboarding(&self) {
        *self.onboarding.lock().await = CachedQuery::unfetched();
    }

    async fn store_profile(
        &self,
        generation: u64,
        settled: QuerySnapshot<Option<UserProfile>>,
    ) -> QuerySnapshot<Option<UserProfile>> {
        let current_generation = self.guard.generation().await;
        let mut cached = self.profile.lock().await;
        if current_generation != generation || cached.generation != generation {
            debug!("discarding stale profile result");
            return QuerySnapshot::Unfetched;
        }
        cached.snapshot = settled.clone();
        settled
    }
}
