//! Remote cart wire contract
//!
//! Request and response shapes for the authoritative remote cart. The
//! remote identifies products numerically; local ids are opaque strings,
//! so every sync first attempts the conversion below and skips the remote
//! call when it fails.

use serde::{Deserialize, Serialize};

/// Convert a local (string) product id to the remote numeric id
///
/// Returns `None` when the id has no numeric form; the local mutation
/// still applies, only the remote sync is skipped.
pub fn remote_product_id(id: &str) -> Option<i64> {
    id.trim().parse().ok()
}

/// Remote cart state, as returned by the cart endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCart {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub items: Vec<RemoteCartItem>,
    #[serde(default)]
    pub total_cost: f64,
}

/// One line of the remote cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCartItem {
    pub id: i64,
    pub product: RemoteProduct,
    pub quantity: u32,
}

/// Product as the remote cart embeds it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProduct {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// Add units of a product to the remote cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i64,
    pub quantity: u32,
}

/// Set the absolute quantity of a remote cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub product_id: i64,
    pub quantity: u32,
}
