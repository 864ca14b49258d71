//! Cart line types
//!
//! The cart is an ordered sequence of lines, unique by product id. The
//! persisted snapshot is the JSON-serialized line sequence, so these
//! types double as the durable storage format.

use crate::models::Product;
use crate::money::to_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart line: a product snapshot and how many units of it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Price of this line: unit price times quantity
    pub fn line_total(&self) -> Decimal {
        to_decimal(self.product.price) * Decimal::from(self.quantity)
    }
}
