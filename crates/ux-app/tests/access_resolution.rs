//! End-to-end gate scenarios against mock ports with virtual time.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use ux_app::usecases::{CreateProfile, SubmitOnboarding};
use ux_app::AccessOrchestrator;
use ux_core::access::ResolutionState;
use ux_core::config::AppConfig;
use ux_core::error::BackendError;
use ux_core::identity::{AuthIntent, Identity, LoginError, LoginStatus};
use ux_core::ids::{ItemId, PrincipalId};
use ux_core::item::{
    BuySellItem, LostFoundItem, MinimalItem, NewBuySellItem, NewLostFoundItem, NewRentalItem,
    RentalItem, Rupee,
};
use ux_core::ports::{ActorConnectorPort, BackendPort, IdentityPort};
use ux_core::profile::{OnboardingAnswers, UserProfile, UserRole};

struct SessionIdentity {
    current: tokio::sync::Mutex<Option<Identity>>,
}

impl SessionIdentity {
    fn logged_in(principal: &str) -> Self {
        Self {
            current: tokio::sync::Mutex::new(Some(Identity::new(PrincipalId::from(principal)))),
        }
    }
}

#[async_trait]
impl IdentityPort for SessionIdentity {
    async fn identity(&self) -> Option<Identity> {
        self.current.lock().await.clone()
    }

    async fn login(&self, _intent: AuthIntent) -> Result<Identity, LoginError> {
        Err(LoginError::SessionExists)
    }

    async fn clear(&self) -> Result<(), LoginError> {
        *self.current.lock().await = None;
        Ok(())
    }

    async fn login_status(&self) -> LoginStatus {
        LoginStatus::Success
    }
}

/// Backend with configurable profile behavior; everything else is inert.
struct ScenarioBackend {
    profile: Mutex<Result<Option<UserProfile>, BackendError>>,
    profile_delay_ms: AtomicU64,
    onboarding: Mutex<Result<Option<OnboardingAnswers>, BackendError>>,
}

impl ScenarioBackend {
    fn new() -> Self {
        Self {
            profile: Mutex::new(Ok(None)),
            profile_delay_ms: AtomicU64::new(0),
            onboarding: Mutex::new(Ok(None)),
        }
    }

    fn set_profile(&self, result: Result<Option<UserProfile>, BackendError>) {
        *self.profile.lock().unwrap() = result;
    }

    fn set_profile_delay_ms(&self, delay_ms: u64) {
        self.profile_delay_ms.store(delay_ms, Ordering::SeqCst);
    }
}

#[async_trait]
impl BackendPort for ScenarioBackend {
    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, BackendError> {
        let delay_ms = self.profile_delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        self.profile.lock().unwrap().clone()
    }

    async fn create_user_profile(&self, profile: &UserProfile) -> Result<(), BackendError> {
        *self.profile.lock().unwrap() = Ok(Some(profile.clone()));
        Ok(())
    }

    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<(), BackendError> {
        *self.profile.lock().unwrap() = Ok(Some(profile.clone()));
        Ok(())
    }

    async fn get_user_profile(
        &self,
        _user: &PrincipalId,
    ) -> Result<Option<UserProfile>, BackendError> {
        Ok(None)
    }

    async fn get_caller_user_role(&self) -> Result<UserRole, BackendError> {
        Ok(UserRole::User)
    }

    async fn is_caller_admin(&self) -> Result<bool, BackendError> {
        Ok(false)
    }

    async fn assign_caller_user_role(
        &self,
        _user: &PrincipalId,
        _role: UserRole,
    ) -> Result<(), BackendError> {
        Ok(())
    }

    async fn get_onboarding_answers(&self) -> Result<Option<OnboardingAnswers>, BackendError> {
        self.onboarding.lock().unwrap().clone()
    }

    async fn set_onboarding_answers(
        &self,
        answers: &OnboardingAnswers,
    ) -> Result<(), BackendError> {
        *self.onboarding.lock().unwrap() = Ok(Some(answers.clone()));
        Ok(())
    }

    async fn get_buy_sell_items(&self) -> Result<Vec<BuySellItem>, BackendError> {
        Ok(Vec::new())
    }

    async fn get_buy_sell_item(
        &self,
        _item_id: ItemId,
    ) -> Result<Option<BuySellItem>, BackendError> {
        Ok(None)
    }

    async fn filter_buy_sell_items_by_category(
        &self,
        _category: &str,
    ) -> Result<Vec<BuySellItem>, BackendError> {
        Ok(Vec::new())
    }

    async fn filter_buy_sell_items_by_price_range(
        &self,
        _min_price: Rupee,
        _max_price: Rupee,
    ) -> Result<Vec<BuySellItem>, BackendError> {
        Ok(Vec::new())
    }

    async fn add_buy_sell_item(&self, _item: &NewBuySellItem) -> Result<(), BackendError> {
        Ok(())
    }

    async fn get_rental_items(&self) -> Result<Vec<RentalItem>, BackendError> {
        Ok(Vec::new())
    }

    async fn get_rental_item(&self, _item_id: ItemId) -> Result<Option<RentalItem>, BackendError> {
        Ok(None)
    }

    async fn list_for_rent(&self, _item: &NewRentalItem) -> Result<(), BackendError> {
        Ok(())
    }

    async fn get_lost_found_items(&self) -> Result<Vec<LostFoundItem>, BackendError> {
        Ok(Vec::new())
    }

    async fn get_lost_found_item(
        &self,
        _item_id: ItemId,
    ) -> Result<Option<LostFoundItem>, BackendError> {
        Ok(None)
    }

    async fn post_lost_item(&self, _item: &NewLostFoundItem) -> Result<(), BackendError> {
        Ok(())
    }

    async fn post_found_item(&self, _item: &NewLostFoundItem) -> Result<(), BackendError> {
        Ok(())
    }

    async fn mark_as_recovered(&self, _item_id: ItemId) -> Result<(), BackendError> {
        Ok(())
    }

    async fn delete_item(&self, _item_id: ItemId) -> Result<(), BackendError> {
        Ok(())
    }

    async fn delete_lost_found_item(&self, _item_id: ItemId) -> Result<(), BackendError> {
        Ok(())
    }

    async fn to_minimal_item_list(&self) -> Result<Vec<MinimalItem>, BackendError> {
        Ok(Vec::new())
    }
}

/// Connector that resolves after a fixed delay, or never.
struct ScenarioConnector {
    backend: Arc<ScenarioBackend>,
    connect_delay_ms: AtomicU64,
    never: std::sync::atomic::AtomicBool,
    calls: AtomicUsize,
}

impl ScenarioConnector {
    fn new(backend: Arc<ScenarioBackend>) -> Self {
        Self {
            backend,
            connect_delay_ms: AtomicU64::new(0),
            never: std::sync::atomic::AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    fn set_connect_delay_ms(&self, delay_ms: u64) {
        self.connect_delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    fn set_never(&self, never: bool) {
        self.never.store(never, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActorConnectorPort for ScenarioConnector {
    async fn connect(
        &self,
        _identity: Option<&Identity>,
    ) -> Result<Arc<dyn BackendPort>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.never.load(Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
        let delay_ms = self.connect_delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        Ok(self.backend.clone() as Arc<dyn BackendPort>)
    }
}

fn gate_for(connector: Arc<ScenarioConnector>) -> AccessOrchestrator {
    AccessOrchestrator::from_ports(
        Arc::new(SessionIdentity::logged_in("principal-1")),
        connector,
        &AppConfig::default(),
    )
}

#[tokio::test(start_paused = true)]
async fn scenario_a_profile_setup_then_onboarding() {
    let backend = Arc::new(ScenarioBackend::new());
    backend.set_profile_delay_ms(200);
    let connector = Arc::new(ScenarioConnector::new(backend.clone()));
    connector.set_connect_delay_ms(500);
    let gate = gate_for(connector);

    // Actor resolves in 500ms, profile resolves to None after 200ms.
    assert_eq!(
        gate.resolve_access().await,
        ResolutionState::ProfileSetupRequired
    );

    // Submitting a valid profile moves the gate to onboarding.
    backend.set_profile_delay_ms(0);
    let create = CreateProfile::new(gate.guard().clone(), gate.resolver().clone());
    create
        .execute(&UserProfile {
            name: "A".to_string(),
            email: "a@jainuniversity.ac.in".to_string(),
            university: "Jain".to_string(),
        })
        .await
        .unwrap();

    match gate.resolve_access().await {
        ResolutionState::OnboardingRequired { profile } => {
            assert_eq!(profile.email, "a@jainuniversity.ac.in");
        }
        other => panic!("expected OnboardingRequired, got {other:?}"),
    }

    // Completing onboarding reaches Ready.
    let onboarding = SubmitOnboarding::new(gate.guard().clone(), gate.resolver().clone());
    onboarding
        .execute(&OnboardingAnswers {
            year: "3rd".to_string(),
            city: "Bengaluru".to_string(),
            address: "12 MG Road".to_string(),
        })
        .await
        .unwrap();
    assert!(matches!(
        gate.resolve_access().await,
        ResolutionState::Ready { .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn scenario_b_foreign_email_is_access_denied() {
    let backend = Arc::new(ScenarioBackend::new());
    backend.set_profile(Ok(Some(UserProfile {
        name: "A".to_string(),
        email: "a@gmail.com".to_string(),
        university: "Jain".to_string(),
    })));
    let connector = Arc::new(ScenarioConnector::new(backend));
    let gate = gate_for(connector);

    let state = gate.resolve_access().await;
    assert_eq!(
        state,
        ResolutionState::AccessDenied {
            email: "a@gmail.com".to_string()
        }
    );
    assert!(state.offers_logout());
    assert_eq!(state.retry_scope(), None);
}

#[tokio::test(start_paused = true)]
async fn scenario_c_actor_never_resolves_times_out_then_retry_reconnects() {
    let backend = Arc::new(ScenarioBackend::new());
    let connector = Arc::new(ScenarioConnector::new(backend));
    connector.set_never(true);
    let gate = gate_for(connector.clone());

    let started = tokio::time::Instant::now();
    assert_eq!(gate.resolve_access().await, ResolutionState::ActorTimeout);
    assert_eq!(started.elapsed(), Duration::from_millis(20_000));
    assert_eq!(connector.calls(), 1);

    // Retry re-invokes actor construction.
    connector.set_never(false);
    assert_eq!(
        gate.retry().await,
        ResolutionState::ProfileSetupRequired,
        "fresh connect should succeed and find no profile"
    );
    assert_eq!(connector.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn scenario_d_slow_profile_is_timeout_and_late_result_is_discarded() {
    let backend = Arc::new(ScenarioBackend::new());
    backend.set_profile(Ok(Some(UserProfile {
        name: "A".to_string(),
        email: "a@jainuniversity.ac.in".to_string(),
        university: "Jain".to_string(),
    })));
    // Would eventually succeed at 16s, but the deadline is 15s.
    backend.set_profile_delay_ms(16_000);
    let connector = Arc::new(ScenarioConnector::new(backend));
    let gate = gate_for(connector);

    let state = gate.resolve_access().await;
    assert!(
        matches!(state, ResolutionState::ProfileTimeout { .. }),
        "expected ProfileTimeout, got {state:?}"
    );

    // Let virtual time pass the would-have-resolved instant; the late
    // result must not flip the gate to Ready.
    tokio::time::sleep(Duration::from_millis(5_000)).await;
    assert!(matches!(
        gate.current().await,
        ResolutionState::ProfileTimeout { .. }
    ));
}
