//! HTTP implementation of the backend port
//!
//! Every backend method is a `POST {base}/api/v1/{method}` carrying a JSON
//! argument object and returning a JSON value (`null` for void). Non-2xx
//! responses carry a rejection body that maps onto the typed
//! [`BackendError::Rejected`] shape; failures below HTTP map to
//! `Transport`. Deadlines are owned by the application layer, so the
//! client itself sets none.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use ux_core::error::BackendError;
use ux_core::ids::{ItemId, PrincipalId};
use ux_core::item::{
    BuySellItem, LostFoundItem, MinimalItem, NewBuySellItem, NewLostFoundItem, NewRentalItem,
    RentalItem, Rupee,
};
use ux_core::ports::BackendPort;
use ux_core::profile::{OnboardingAnswers, UserProfile, UserRole};

use crate::backend::wire::RejectionBody;

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    /// Bearer token for authenticated calls; anonymous when absent
    auth_token: Option<String>,
}

impl HttpBackend {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub(crate) async fn call<A, T>(&self, method: &str, args: &A) -> Result<T, BackendError>
    where
        A: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}/api/v1/{}", self.base_url.trim_end_matches('/'), method);
        debug!(method, "backend call");

        let mut request = self.client.post(&url).json(args);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| BackendError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::rejection_from(status, &text));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| BackendError::transport(format!("invalid response body: {err}")))
    }

    fn rejection_from(status: reqwest::StatusCode, body: &str) -> BackendError {
        match serde_json::from_str::<RejectionBody>(body) {
            Ok(rejection) => BackendError::Rejected {
                code: rejection.error_code,
                message: rejection
                    .reject_message
                    .unwrap_or_else(|| format!("backend rejected the call ({status})")),
                retryable: rejection.retryable,
            },
            Err(_) => BackendError::Rejected {
                code: None,
                message: if body.trim().is_empty() {
                    format!("backend rejected the call ({status})")
                } else {
                    body.trim().to_string()
                },
                retryable: status.is_server_error(),
            },
        }
    }
}

#[async_trait]
impl BackendPort for HttpBackend {
    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, BackendError> {
        self.call("getCallerUserProfile", &json!({})).await
    }

    async fn create_user_profile(&self, profile: &UserProfile) -> Result<(), BackendError> {
        self.call("createUserProfile", &json!({ "profile": profile }))
            .await
    }

    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<(), BackendError> {
        self.call("saveCallerUserProfile", &json!({ "profile": profile }))
            .await
    }

    async fn get_user_profile(
        &self,
        user: &PrincipalId,
    ) -> Result<Option<UserProfile>, BackendError> {
        self.call("getUserProfile", &json!({ "user": user })).await
    }

    async fn get_caller_user_role(&self) -> Result<UserRole, BackendError> {
        self.call("getCallerUserRole", &json!({})).await
    }

    async fn is_caller_admin(&self) -> Result<bool, BackendError> {
        self.call("isCallerAdmin", &json!({})).await
    }

    async fn assign_caller_user_role(
        &self,
        user: &PrincipalId,
        role: UserRole,
    ) -> Result<(), BackendError> {
        self.call("assignCallerUserRole", &json!({ "user": user, "role": role }))
            .await
    }

    async fn get_onboarding_answers(&self) -> Result<Option<OnboardingAnswers>, BackendError> {
        self.call("getOnboardingAnswers", &json!({})).await
    }

    async fn set_onboarding_answers(
        &self,
        answers: &OnboardingAnswers,
    ) -> Result<(), BackendError> {
        self.call("setOnboardingAnswers", &json!({ "answers": answers }))
            .await
    }

    async fn get_buy_sell_items(&self) -> Result<Vec<BuySellItem>, BackendError> {
        self.call("getBuySellItems", &json!({})).await
    }

    async fn get_buy_sell_item(
        &self,
        item_id: ItemId,
    ) -> Result<Option<BuySellItem>, BackendError> {
        self.call("getBuySellItem", &json!({ "itemId": item_id }))
            .await
    }

    async fn filter_buy_sell_items_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<BuySellItem>, BackendError> {
        self.call(
            "filterBuySellItemsByCategory",
            &json!({ "category": category }),
        )
        .await
    }

    async fn filter_buy_sell_items_by_price_range(
        &self,
        min_price: Rupee,
        max_price: Rupee,
    ) -> Result<Vec<BuySellItem>, BackendError> {
        self.call(
            "filterBuySellItemsByPriceRange",
            &json!({ "minPrice": min_price, "maxPrice": max_price }),
        )
        .await
    }

    async fn add_buy_sell_item(&self, item: &NewBuySellItem) -> Result<(), BackendError> {
        self.call("addBuySellItem", &json!({ "item": item })).await
    }

    async fn get_rental_items(&self) -> Result<Vec<RentalItem>, BackendError> {
        self.call("getRentalItems", &json!({})).await
    }

    async fn get_rental_item(&self, item_id: ItemId) -> Result<Option<RentalItem>, BackendError> {
        self.call("getRentalItem", &json!({ "itemId": item_id }))
            .await
    }

    async fn list_for_rent(&self, item: &NewRentalItem) -> Result<(), BackendError> {
        self.call("listForRent", &json!({ "item": item })).await
    }

    async fn get_lost_found_items(&self) -> Result<Vec<LostFoundItem>, BackendError> {
        self.call("getLostFoundItems", &json!({})).await
    }

    async fn get_lost_found_item(
        &self,
        item_id: ItemId,
    ) -> Result<Option<LostFoundItem>, BackendError> {
        self.call("getLostFoundItem", &json!({ "itemId": item_id }))
            .await
    }

    async fn post_lost_item(&self, item: &NewLostFoundItem) -> Result<(), BackendError> {
        self.call("postLostItem", &json!({ "item": item })).await
    }

    async fn post_found_item(&self, item: &NewLostFoundItem) -> Result<(), BackendError> {
        self.call("postFoundItem", &json!({ "item": item })).await
    }

    async fn mark_as_recovered(&self, item_id: ItemId) -> Result<(), BackendError> {
        self.call("markAsRecovered", &json!({ "itemId": item_id }))
            .await
    }

    async fn delete_item(&self, item_id: ItemId) -> Result<(), BackendError> {
        self.call("deleteItem", &json!({ "itemId": item_id })).await
    }

    async fn delete_lost_found_item(&self, item_id: ItemId) -> Result<(), BackendError> {
        self.call("deleteLostFoundItem", &json!({ "itemId": item_id }))
            .await
    }

    async fn to_minimal_item_list(&self) -> Result<Vec<MinimalItem>, BackendError> {
        self.call("toMinimalItemList", &json!({})).await
    }
}
