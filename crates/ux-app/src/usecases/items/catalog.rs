//! Catalog reads
//!
//! Section listings degrade gracefully: a network-classified failure
//! yields an empty list so the sections stay browsable, while every other
//! failure propagates sanitized. Id lookups and filters always propagate.

use std::sync::Arc;

use tracing::{error, warn};

use ux_core::error::{classify, ClassifiedError, ErrorCategory};
use ux_core::ids::ItemId;
use ux_core::item::{BuySellItem, LostFoundItem, MinimalItem, RentalItem, Rupee};

use crate::session::actor_init_guard::ActorInitGuard;

pub struct ItemCatalog {
    guard: Arc<ActorInitGuard>,
}

impl ItemCatalog {
    pub fn new(guard: Arc<ActorInitGuard>) -> Self {
        Self { guard }
    }

    pub async fn buy_sell_items(&self) -> Result<Vec<BuySellItem>, ClassifiedError> {
        let handle = self.handle().await?;
        Self::degrade(handle.backend().get_buy_sell_items().await, "buy/sell")
    }

    pub async fn rental_items(&self) -> Result<Vec<RentalItem>, ClassifiedError> {
        let handle = self.handle().await?;
        Self::degrade(handle.backend().get_rental_items().await, "rental")
    }

    pub async fn lost_found_items(&self) -> Result<Vec<LostFoundItem>, ClassifiedError> {
        let handle = self.handle().await?;
        Self::degrade(handle.backend().get_lost_found_items().await, "lost/found")
    }

    pub async fn buy_sell_item(
        &self,
        item_id: ItemId,
    ) -> Result<Option<BuySellItem>, ClassifiedError> {
        let handle = self.handle().await?;
        handle
            .backend()
            .get_buy_sell_item(item_id)
            .await
            .map_err(|err| {
                error!(error = %err.message(), %item_id, "item lookup failed");
                classify(&err)
            })
    }

    pub async fn rental_item(
        &self,
        item_id: ItemId,
    ) -> Result<Option<RentalItem>, ClassifiedError> {
        let handle = self.handle().await?;
        handle
            .backend()
            .get_rental_item(item_id)
            .await
            .map_err(|err| {
                error!(error = %err.message(), %item_id, "item lookup failed");
                classify(&err)
            })
    }

    pub async fn lost_found_item(
        &self,
        item_id: ItemId,
    ) -> Result<Option<LostFoundItem>, ClassifiedError> {
        let handle = self.handle().await?;
        handle
            .backend()
            .get_lost_found_item(item_id)
            .await
            .map_err(|err| {
                error!(error = %err.message(), %item_id, "item lookup failed");
                classify(&err)
            })
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<BuySellItem>, ClassifiedError> {
        let handle = self.handle().await?;
        handle
            .backend()
            .filter_buy_sell_items_by_category(category)
            .await
            .map_err(|err| {
                error!(error = %err.message(), category, "category filter failed");
                classify(&err)
            })
    }

    pub async fn by_price_range(
        &self,
        min_price: Rupee,
        max_price: Rupee,
    ) -> Result<Vec<BuySellItem>, ClassifiedError> {
        let handle = self.handle().await?;
        handle
            .backend()
            .filter_buy_sell_items_by_price_range(min_price, max_price)
            .await
            .map_err(|err| {
                error!(error = %err.message(), "price filter failed");
                classify(&err)
            })
    }

    pub async fn minimal_items(&self) -> Result<Vec<MinimalItem>, ClassifiedError> {
        let handle = self.handle().await?;
        handle
            .backend()
            .to_minimal_item_list()
            .await
            .map_err(|err| {
                error!(error = %err.message(), "minimal item listing failed");
                classify(&err)
            })
    }

    async fn handle(
        &self,
    ) -> Result<Arc<crate::session::actor_handle::ActorHandle>, ClassifiedError> {
        self.guard
            .require_ready()
            .await
            .map_err(|err| classify(&err))
    }

    fn degrade<T>(
        result: Result<Vec<T>, ux_core::error::BackendError>,
        section: &str,
    ) -> Result<Vec<T>, ClassifiedError> {
        match result {
            Ok(items) => Ok(items),
            Err(err) => {
                let classified = classify(&err);
                if classified.category == ErrorCategory::Network {
                    warn!(error = %err.message(), section, "listing degraded to empty");
                    Ok(Vec::new())
                } else {
                    error!(error = %err.message(), section, "listing failed");
                    Err(classified)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::{ConnectorBehavior, StaticIdentity, StubConnector};
    use ux_core::config::TimeoutConfig;
    use ux_core::error::BackendError;

    async fn catalog(connector: Arc<StubConnector>) -> ItemCatalog {
        let identity = Arc::new(StaticIdentity::anonymous());
        let guard = Arc::new(ActorInitGuard::new(
            identity,
            connector,
            TimeoutConfig::default(),
        ));
        guard.ensure().await;
        ItemCatalog::new(guard)
    }

    #[tokio::test]
    async fn test_network_failure_degrades_listing_to_empty() {
        let connector = Arc::new(StubConnector::new(ConnectorBehavior::Ready));
        connector
            .backend()
            .set_buy_sell(Err(BackendError::transport("fetch failed")));
        let catalog = catalog(connector).await;

        assert!(catalog.buy_sell_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_failure_propagates_classified() {
        let connector = Arc::new(StubConnector::new(ConnectorBehavior::Ready));
        connector
            .backend()
            .set_rentals(Err(BackendError::Rejected {
                code: Some("IC0503".to_string()),
                message: "replica error".to_string(),
                retryable: false,
            }));
        let catalog = catalog(connector).await;

        let err = catalog.rental_items().await.unwrap_err();
        assert_eq!(err.category, ErrorCategory::Server);
    }

    #[tokio::test]
    async fn test_anonymous_browsing_is_allowed() {
        use ux_core::ids::PrincipalId;
        use ux_core::item::LostFoundStatus;

        let connector = Arc::new(StubConnector::new(ConnectorBehavior::Ready));
        connector.backend().set_lost_found(Ok(vec![LostFoundItem {
            id: ItemId::new(1),
            title: "Blue water bottle".to_string(),
            description: "Left near the library entrance".to_string(),
            location: "Central Library".to_string(),
            status: LostFoundStatus::Found,
            owner_id: PrincipalId::from("principal-2"),
            image_refs: Vec::new(),
        }]));
        let catalog = catalog(connector).await;

        let items = catalog.lost_found_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].status, LostFoundStatus::Found);
    }
}
