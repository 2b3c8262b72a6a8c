//! Marketplace item domain models
//!
//! Buy/sell listings, rentals, and lost & found posts as stored by the
//! backend. Images travel as opaque blob references; blob transport is
//! handled elsewhere.

use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, PrincipalId};

/// Price in whole rupees.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Rupee(pub u64);

impl Rupee {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Rupee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

/// Which marketplace section an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Rent,
    LostFound,
    BuySell,
}

/// Lost & found lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LostFoundStatus {
    Lost,
    Found,
    Recovered,
}

/// A buy/sell listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuySellItem {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub price: Rupee,
    pub seller_id: PrincipalId,
    /// Posted through the sell section rather than the buy section
    pub is_from_sell_section: bool,
    pub image_refs: Vec<String>,
}

/// A rental listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalItem {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub daily_price: Rupee,
    pub available: bool,
    pub owner_id: PrincipalId,
    pub image_refs: Vec<String>,
}

/// A lost or found post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LostFoundItem {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub status: LostFoundStatus,
    pub owner_id: PrincipalId,
    pub image_refs: Vec<String>,
}

/// Slim projection used by cross-section listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimalItem {
    pub id: ItemId,
    pub title: String,
    pub kind: ItemKind,
    pub price: Option<Rupee>,
    pub daily_price: Option<Rupee>,
}

/// Payload for publishing a buy/sell listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBuySellItem {
    pub title: String,
    pub description: String,
    pub price: Rupee,
    pub condition: String,
    pub category: String,
    pub image_refs: Vec<String>,
    pub is_from_sell_section: bool,
}

/// Payload for publishing a rental listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRentalItem {
    pub title: String,
    pub description: String,
    pub daily_price: Rupee,
    pub condition: String,
    pub category: String,
    pub image_refs: Vec<String>,
}

/// Payload for posting a lost or found item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLostFoundItem {
    pub title: String,
    pub description: String,
    pub location: String,
    pub image_refs: Vec<String>,
}
