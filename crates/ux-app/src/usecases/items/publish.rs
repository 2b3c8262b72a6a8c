//! Catalog mutations
//!
//! Publishing, recovering, and deleting items all require an
//! authenticated handle; anonymous callers are refused client-side with
//! an auth-classified error rather than a round trip the backend would
//! reject anyway.

use std::sync::Arc;

use tracing::error;

use ux_core::error::{classify, BackendError, ClassifiedError};
use ux_core::ids::ItemId;
use ux_core::item::{NewBuySellItem, NewLostFoundItem, NewRentalItem};

use crate::session::actor_handle::ActorHandle;
use crate::session::actor_init_guard::ActorInitGuard;

pub struct ItemPublisher {
    guard: Arc<ActorInitGuard>,
}

impl ItemPublisher {
    pub fn new(guard: Arc<ActorInitGuard>) -> Self {
        Self { guard }
    }

    pub async fn add_buy_sell_item(&self, item: &NewBuySellItem) -> Result<(), ClassifiedError> {
        let handle = self.require_authenticated().await?;
        handle
            .backend()
            .add_buy_sell_item(item)
            .await
            .map_err(log_and_classify)
    }

    pub async fn list_for_rent(&self, item: &NewRentalItem) -> Result<(), ClassifiedError> {
        let handle = self.require_authenticated().await?;
        handle
            .backend()
            .list_for_rent(item)
            .await
            .map_err(log_and_classify)
    }

    pub async fn post_lost_item(&self, item: &NewLostFoundItem) -> Result<(), ClassifiedError> {
        let handle = self.require_authenticated().await?;
        handle
            .backend()
            .post_lost_item(item)
            .await
            .map_err(log_and_classify)
    }

    pub async fn post_found_item(&self, item: &NewLostFoundItem) -> Result<(), ClassifiedError> {
        let handle = self.require_authenticated().await?;
        handle
            .backend()
            .post_found_item(item)
            .await
            .map_err(log_and_classify)
    }

    pub async fn mark_as_recovered(&self, item_id: ItemId) -> Result<(), ClassifiedError> {
        let handle = self.require_authenticated().await?;
        handle
            .backend()
            .mark_as_recovered(item_id)
            .await
            .map_err(log_and_classify)
    }

    pub async fn delete_item(&self, item_id: ItemId) -> Result<(), ClassifiedError> {
        let handle = self.require_authenticated().await?;
        handle
            .backend()
            .delete_item(item_id)
            .await
            .map_err(log_and_classify)
    }

    pub async fn delete_lost_found_item(&self, item_id: ItemId) -> Result<(), ClassifiedError> {
        let handle = self.require_authenticated().await?;
        handle
            .backend()
            .delete_lost_found_item(item_id)
            .await
            .map_err(log_and_classify)
    }

    async fn require_authenticated(&self) -> Result<Arc<ActorHandle>, ClassifiedError> {
        let handle = self
            .guard
            .require_ready()
            .await
            .map_err(|err| classify(&err))?;
        if !handle.is_authenticated() {
            return Err(classify(&BackendError::rejected(
                "Only users can modify marketplace items; not authenticated",
            )));
        }
        Ok(handle)
    }
}

fn log_and_classify(err: BackendError) -> ClassifiedError {
    error!(error = %err.message(), "item mutation failed");
    classify(&err)
}
