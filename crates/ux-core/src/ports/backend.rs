//! Backend actor port
//!
//! The remote actor's callable surface, as the client depends on it. The
//! nullability semantics matter: `get_caller_user_profile` resolving to
//! `None` means "authenticated but no profile created yet", not an error.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::ids::{ItemId, PrincipalId};
use crate::item::{
    BuySellItem, LostFoundItem, MinimalItem, NewBuySellItem, NewLostFoundItem, NewRentalItem,
    RentalItem, Rupee,
};
use crate::profile::{OnboardingAnswers, UserProfile, UserRole};

#[async_trait]
pub trait BackendPort: Send + Sync {
    // ===== Profile =====

    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, BackendError>;

    /// Rejects when the email fails backend-side domain validation; the
    /// rejection message is pattern-matchable ("jainuniversity",
    /// "unauthorized", "domain") for the inline field error.
    async fn create_user_profile(&self, profile: &UserProfile) -> Result<(), BackendError>;

    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<(), BackendError>;

    async fn get_user_profile(
        &self,
        user: &PrincipalId,
    ) -> Result<Option<UserProfile>, BackendError>;

    // ===== Roles =====

    async fn get_caller_user_role(&self) -> Result<UserRole, BackendError>;

    async fn is_caller_admin(&self) -> Result<bool, BackendError>;

    async fn assign_caller_user_role(
        &self,
        user: &PrincipalId,
        role: UserRole,
    ) -> Result<(), BackendError>;

    // ===== Onboarding =====

    async fn get_onboarding_answers(&self) -> Result<Option<OnboardingAnswers>, BackendError>;

    async fn set_onboarding_answers(&self, answers: &OnboardingAnswers)
        -> Result<(), BackendError>;

    // ===== Buy/sell =====

    async fn get_buy_sell_items(&self) -> Result<Vec<BuySellItem>, BackendError>;

    async fn get_buy_sell_item(&self, item_id: ItemId)
        -> Result<Option<BuySellItem>, BackendError>;

    async fn filter_buy_sell_items_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<BuySellItem>, BackendError>;

    async fn filter_buy_sell_items_by_price_range(
        &self,
        min_price: Rupee,
        max_price: Rupee,
    ) -> Result<Vec<BuySellItem>, BackendError>;

    async fn add_buy_sell_item(&self, item: &NewBuySellItem) -> Result<(), BackendError>;

    // ===== Rentals =====

    async fn get_rental_items(&self) -> Result<Vec<RentalItem>, BackendError>;

    async fn get_rental_item(&self, item_id: ItemId) -> Result<Option<RentalItem>, BackendError>;

    async fn list_for_rent(&self, item: &NewRentalItem) -> Result<(), BackendError>;

    // ===== Lost & found =====

    async fn get_lost_found_items(&self) -> Result<Vec<LostFoundItem>, BackendError>;

    async fn get_lost_found_item(
        &self,
        item_id: ItemId,
    ) -> Result<Option<LostFoundItem>, BackendError>;

    async fn post_lost_item(&self, item: &NewLostFoundItem) -> Result<(), BackendError>;

    async fn post_found_item(&self, item: &NewLostFoundItem) -> Result<(), BackendError>;

    async fn mark_as_recovered(&self, item_id: ItemId) -> Result<(), BackendError>;

    // ===== Shared =====

    async fn delete_item(&self, item_id: ItemId) -> Result<(), BackendError>;

    async fn delete_lost_found_item(&self, item_id: ItemId) -> Result<(), BackendError>;

    async fn to_minimal_item_list(&self) -> Result<Vec<MinimalItem>, BackendError>;
}
