//! Shared test doubles for the session layer.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex as StdMutex;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use ux_core::error::BackendError;
use ux_core::identity::{AuthIntent, Identity, LoginError, LoginStatus};
use ux_core::ids::{ItemId, PrincipalId};
use ux_core::item::{
    BuySellItem, LostFoundItem, MinimalItem, NewBuySellItem, NewLostFoundItem, NewRentalItem,
    RentalItem, Rupee,
};
use ux_core::ports::{ActorConnectorPort, BackendPort, IdentityPort};
use ux_core::profile::{OnboardingAnswers, UserProfile, UserRole};

/// Identity port with a settable session.
pub(crate) struct StaticIdentity {
    current: tokio::sync::Mutex<Option<Identity>>,
    status: StdMutex<LoginStatus>,
}

impl StaticIdentity {
    pub fn anonymous() -> Self {
        Self {
            current: tokio::sync::Mutex::new(None),
            status: StdMutex::new(LoginStatus::Idle),
        }
    }

    pub fn logged_in(principal: &str) -> Self {
        Self {
            current: tokio::sync::Mutex::new(Some(Identity::new(PrincipalId::from(principal)))),
            status: StdMutex::new(LoginStatus::Success),
        }
    }

    pub async fn set(&self, identity: Option<Identity>) {
        *self.current.lock().await = identity;
    }
}

#[async_trait]
impl IdentityPort for StaticIdentity {
    async fn identity(&self) -> Option<Identity> {
        self.current.lock().await.clone()
    }

    async fn login(&self, _intent: AuthIntent) -> Result<Identity, LoginError> {
        let mut current = self.current.lock().await;
        if current.is_some() {
            return Err(LoginError::SessionExists);
        }
        let identity = Identity::new(PrincipalId::from("minted-principal"));
        *current = Some(identity.clone());
        *self.status.lock().unwrap() = LoginStatus::Success;
        Ok(identity)
    }

    async fn clear(&self) -> Result<(), LoginError> {
        *self.current.lock().await = None;
        *self.status.lock().unwrap() = LoginStatus::Idle;
        Ok(())
    }

    async fn login_status(&self) -> LoginStatus {
        *self.status.lock().unwrap()
    }
}

/// Configurable backend stub.
pub(crate) struct StubBackend {
    profile: StdMutex<Result<Option<UserProfile>, BackendError>>,
    profile_delay_ms: AtomicU64,
    onboarding: StdMutex<Result<Option<OnboardingAnswers>, BackendError>>,
    create_result: StdMutex<Result<(), BackendError>>,
    created_profile: StdMutex<Option<UserProfile>>,
    submitted_answers: StdMutex<Option<OnboardingAnswers>>,
    buy_sell: StdMutex<Result<Vec<BuySellItem>, BackendError>>,
    rentals: StdMutex<Result<Vec<RentalItem>, BackendError>>,
    lost_found: StdMutex<Result<Vec<LostFoundItem>, BackendError>>,
    profile_calls: AtomicUsize,
    publish_calls: AtomicUsize,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            profile: StdMutex::new(Ok(None)),
            profile_delay_ms: AtomicU64::new(0),
            onboarding: StdMutex::new(Ok(None)),
            create_result: StdMutex::new(Ok(())),
            created_profile: StdMutex::new(None),
            submitted_answers: StdMutex::new(None),
            buy_sell: StdMutex::new(Ok(Vec::new())),
            rentals: StdMutex::new(Ok(Vec::new())),
            lost_found: StdMutex::new(Ok(Vec::new())),
            profile_calls: AtomicUsize::new(0),
            publish_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_profile(&self, result: Result<Option<UserProfile>, BackendError>) {
        *self.profile.lock().unwrap() = result;
    }

    pub fn set_profile_delay_ms(&self, delay_ms: u64) {
        self.profile_delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    pub fn set_onboarding(&self, result: Result<Option<OnboardingAnswers>, BackendError>) {
        *self.onboarding.lock().unwrap() = result;
    }

    pub fn set_create_result(&self, result: Result<(), BackendError>) {
        *self.create_result.lock().unwrap() = result;
    }

    pub fn set_buy_sell(&self, result: Result<Vec<BuySellItem>, BackendError>) {
        *self.buy_sell.lock().unwrap() = result;
    }

    pub fn set_rentals(&self, result: Result<Vec<RentalItem>, BackendError>) {
        *self.rentals.lock().unwrap() = result;
    }

    pub fn set_lost_found(&self, result: Result<Vec<LostFoundItem>, BackendError>) {
        *self.lost_found.lock().unwrap() = result;
    }

    pub fn created_profile(&self) -> Option<UserProfile> {
        self.created_profile.lock().unwrap().clone()
    }

    pub fn submitted_answers(&self) -> Option<OnboardingAnswers> {
        self.submitted_answers.lock().unwrap().clone()
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn publish_calls(&self) -> usize {
        self.publish_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendPort for StubBackend {
    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, BackendError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        let delay_ms = self.profile_delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        self.profile.lock().unwrap().clone()
    }

    async fn create_user_profile(&self, profile: &UserProfile) -> Result<(), BackendError> {
        let result = self.create_result.lock().unwrap().clone();
        if result.is_ok() {
            *self.created_profile.lock().unwrap() = Some(profile.clone());
            *self.profile.lock().unwrap() = Ok(Some(profile.clone()));
        }
        result
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
        *self.submitted_answers.lock().unwrap() = Some(answers.clone());
        *self.onboarding.lock().unwrap() = Ok(Some(answers.clone()));
        Ok(())
    }

    async fn get_buy_sell_items(&self) -> Result<Vec<BuySellItem>, BackendError> {
        self.buy_sell.lock().unwrap().clone()
    }

    async fn get_buy_sell_item(
        &self,
        _item_id: ItemId,
    ) -> Result<Option<BuySellItem>, BackendError> {
        Ok(None)
    }

    async fn filter_buy_sell_items_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<BuySellItem>, BackendError> {
        let items = self.buy_sell.lock().unwrap().clone()?;
        Ok(items.into_iter().filter(|i| i.category == category).collect())
    }

    async fn filter_buy_sell_items_by_price_range(
        &self,
        min_price: Rupee,
        max_price: Rupee,
    ) -> Result<Vec<BuySellItem>, BackendError> {
        let items = self.buy_sell.lock().unwrap().clone()?;
        Ok(items
            .into_iter()
            .filter(|i| i.price >= min_price && i.price <= max_price)
            .collect())
    }

    async fn add_buy_sell_item(&self, _item: &NewBuySellItem) -> Result<(), BackendError> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get_rental_items(&self) -> Result<Vec<RentalItem>, BackendError> {
        self.rentals.lock().unwrap().clone()
    }

    async fn get_rental_item(&self, _item_id: ItemId) -> Result<Option<RentalItem>, BackendError> {
        Ok(None)
    }

    async fn list_for_rent(&self, _item: &NewRentalItem) -> Result<(), BackendError> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get_lost_found_items(&self) -> Result<Vec<LostFoundItem>, BackendError> {
        self.lost_found.lock().unwrap().clone()
    }

    async fn get_lost_found_item(
        &self,
        _item_id: ItemId,
    ) -> Result<Option<LostFoundItem>, BackendError> {
        Ok(None)
    }

    async fn post_lost_item(&self, _item: &NewLostFoundItem) -> Result<(), BackendError> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn post_found_item(&self, _item: &NewLostFoundItem) -> Result<(), BackendError> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
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

#[derive(Clone)]
pub(crate) enum ConnectorBehavior {
    Ready,
    Fail(BackendError),
    Never,
    Delay(u64),
}

/// Connector stub wrapping a shared [`StubBackend`].
pub(crate) struct StubConnector {
    behavior: StdMutex<ConnectorBehavior>,
    backend: Arc<StubBackend>,
    calls: AtomicUsize,
}

impl StubConnector {
    pub fn new(behavior: ConnectorBehavior) -> Self {
        Self::with_backend(behavior, Arc::new(StubBackend::new()))
    }

    pub fn with_backend(behavior: ConnectorBehavior, backend: Arc<StubBackend>) -> Self {
        Self {
            behavior: StdMutex::new(behavior),
            backend,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn backend(&self) -> Arc<StubBackend> {
        self.backend.clone()
    }

    pub fn set_behavior(&self, behavior: ConnectorBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActorConnectorPort for StubConnector {
    async fn connect(
        &self,
        _identity: Option<&Identity>,
    ) -> Result<Arc<dyn BackendPort>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            ConnectorBehavior::Ready => Ok(self.backend.clone() as Arc<dyn BackendPort>),
            ConnectorBehavior::Fail(err) => Err(err),
            ConnectorBehavior::Never => futures::future::pending().await,
            ConnectorBehavior::Delay(delay_ms) => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(self.backend.clone() as Arc<dyn BackendPort>)
            }
        }
    }
}
