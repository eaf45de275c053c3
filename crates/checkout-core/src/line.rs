//! # Scanned Lines
//!
//! One [`ScannedLine`] per distinct SKU scanned in a session.
//!
//! ## Price Fields
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_price   catalog price at first scan, never rewritten              │
//! │  unit_price   effective price; a bulk-price rule may lower it           │
//! │  subtotal     what the line costs right now; rewritten by every rule    │
//! │               that targets the line and by every rescan                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rescan recomputes from `list_price`, not `unit_price`, so scanning after
//! a discount pass never compounds the discounted price into the naive
//! subtotal. Discounts have to be applied again after scanning.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::money::Money;

/// Running state for one product within a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedLine {
    pub(crate) sku: String,
    pub(crate) quantity: i64,
    pub(crate) list_price: Money,
    pub(crate) unit_price: Money,
    pub(crate) subtotal: Money,
}

impl ScannedLine {
    /// A line for the first scan of `item`.
    pub fn from_item(item: &CatalogItem) -> Self {
        ScannedLine {
            sku: item.sku().to_string(),
            quantity: 1,
            list_price: item.price(),
            unit_price: item.price(),
            subtotal: item.price(),
        }
    }

    /// A line materialised by a giveaway: `quantity` units, all free.
    pub fn giveaway(sku: impl Into<String>, quantity: i64, list_price: Money) -> Self {
        ScannedLine {
            sku: sku.into(),
            quantity,
            list_price,
            unit_price: list_price,
            subtotal: Money::zero(),
        }
    }

    /// Counts one more unit and resets pricing to the naive list total.
    pub(crate) fn rescan(&mut self) {
        self.quantity += 1;
        self.unit_price = self.list_price;
        self.subtotal = self.list_price.multiply_quantity(self.quantity);
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn list_price(&self) -> Money {
        self.list_price
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// What the line would cost with no rules at its current quantity.
    pub fn undiscounted_subtotal(&self) -> Money {
        self.list_price.multiply_quantity(self.quantity)
    }
}
