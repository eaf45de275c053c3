//! # Catalog Items
//!
//! A [`CatalogItem`] is a product definition (SKU, display name, unit price)
//! plus the discount rules attached to it. The product fields are fixed at
//! construction; only the rule list grows.
//!
//! ## Wiring Rules into a Session
//! ```text
//! iPad.attach_bulk_price(4, $499.99) ─┐
//! AppleTv.attach_bundle(3, 2) ────────┼──► flatten_rules() ──► CheckoutSession::new(rules)
//! MacBookPro.attach_bonus_item("vga")─┘    (item order,         (owned snapshot)
//!                                           then attach order)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::rule::DiscountRule;
use crate::validation::{validate_price, validate_product_name, validate_sku};

/// A product that can be scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    sku: String,
    name: String,
    price: Money,
    rules: Vec<DiscountRule>,
}

impl CatalogItem {
    /// Creates a catalog item.
    ///
    /// ## Errors
    /// [`CoreError::InvalidArgument`](crate::CoreError::InvalidArgument) if
    /// the SKU or name is empty or the price is not strictly positive.
    ///
    /// ```rust
    /// use checkout_core::{CatalogItem, Money};
    ///
    /// let ipad = CatalogItem::new("ipd", "Super iPad", Money::from_cents(54999)).unwrap();
    /// assert_eq!(ipad.price().cents(), 54999);
    ///
    /// assert!(CatalogItem::new("ipd", "", Money::from_cents(54999)).is_err());
    /// ```
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: Money) -> CoreResult<Self> {
        let sku = sku.into();
        let name = name.into();

        validate_sku(&sku, "sku")?;
        validate_product_name(&name)?;
        validate_price(price, "price")?;

        Ok(CatalogItem {
            sku,
            name,
            price,
            rules: Vec::new(),
        })
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Rules attached so far, in attachment order.
    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    /// Charges every unit `discounted_unit_price` once `min_quantity` units
    /// are scanned. The discounted price is not compared to the list price.
    pub fn attach_bulk_price(
        &mut self,
        min_quantity: i64,
        discounted_unit_price: Money,
    ) -> CoreResult<&mut Self> {
        let rule = DiscountRule::bulk_price(self.sku.clone(), min_quantity, discounted_unit_price)?;
        self.rules.push(rule);
        Ok(self)
    }

    /// "Buy `bundle_size`, pay for `payable_count`".
    pub fn attach_bundle(&mut self, bundle_size: i64, payable_count: i64) -> CoreResult<&mut Self> {
        let rule = DiscountRule::bundle(self.sku.clone(), bundle_size, payable_count)?;
        self.rules.push(rule);
        Ok(self)
    }

    /// Gives one `giveaway_sku` unit away per unit of this item scanned.
    pub fn attach_bonus_item(&mut self, giveaway_sku: impl Into<String>) -> CoreResult<&mut Self> {
        let rule = DiscountRule::bonus_item(self.sku.clone(), giveaway_sku)?;
        self.rules.push(rule);
        Ok(self)
    }
}

/// Collects the rules of `items` into one owned list, item by item.
pub fn flatten_rules<'a, I>(items: I) -> Vec<DiscountRule>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    items
        .into_iter()
        .flat_map(|item| item.rules().iter().cloned())
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
