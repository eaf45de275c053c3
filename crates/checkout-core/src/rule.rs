//! # Discount Rules
//!
//! A [`DiscountRule`] targets one SKU and carries one [`Discount`]: a closed
//! enum with a variant per pricing adjustment, each holding its own
//! arguments. Dispatch is an exhaustive `match` in [`crate::discount`].
//!
//! ## Typed Rules vs Rule Records
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CatalogItem::attach_*  ──────────────► DiscountRule (typed)            │
//! │                                              │                          │
//! │  JSON / config ──► RuleRecord ──resolve()──► │                          │
//! │                    (tag + args)    │         ▼                          │
//! │                                    │   CheckoutSession                  │
//! │                                    ▼                                    │
//! │                      unknown tag → CoreError::InvalidRule               │
//! │                      bad args    → CoreError::InvalidArgument           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! ```json
//! {
//!   "sku": "ipd",
//!   "discount_type": "bulkItemDiscount",
//!   "method_arguments": {
//!     "min_quantity_to_trigger_discount": 4,
//!     "discounted_product_price": 49999
//!   }
//! }
//! ```
//! Prices on the wire are integer cents.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_positive_count, validate_price, validate_sku};

// =============================================================================
// Discount Arguments
// =============================================================================

/// Every unit is charged `discounted_unit_price` once at least
/// `min_quantity` units are scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPrice {
    pub min_quantity: i64,
    pub discounted_unit_price: Money,
}

/// "Buy `bundle_size`, pay for `payable_count`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub bundle_size: i64,
    pub payable_count: i64,
}

/// One free `giveaway_sku` unit per unit of the target SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusItem {
    pub giveaway_sku: String,
}

/// The pricing adjustment a rule performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discount {
    BulkPrice(BulkPrice),
    Bundle(Bundle),
    BonusItem(BonusItem),
}

impl Discount {
    pub fn kind(&self) -> DiscountKind {
        match self {
            Discount::BulkPrice(_) => DiscountKind::BulkPrice,
            Discount::Bundle(_) => DiscountKind::Bundle,
            Discount::BonusItem(_) => DiscountKind::BonusItem,
        }
    }
}

// =============================================================================
// Discount Kind
// =============================================================================

/// Argument-free discriminant of [`Discount`], used for wire tags and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountKind {
    BulkPrice,
    Bundle,
    BonusItem,
}

impl DiscountKind {
    /// All kinds, in tag-lookup order.
    pub const ALL: [DiscountKind; 3] = [
        DiscountKind::BulkPrice,
        DiscountKind::Bundle,
        DiscountKind::BonusItem,
    ];

    /// The `discount_type` tag used in rule records.
    pub const fn tag(&self) -> &'static str {
        match self {
            DiscountKind::BulkPrice => "bulkItemDiscount",
            DiscountKind::Bundle => "bundleItemDiscount",
            DiscountKind::BonusItem => "bonusItem",
        }
    }

    /// Looks up the kind for a wire tag.
    ///
    /// ```rust
    /// use checkout_core::rule::DiscountKind;
    ///
    /// assert_eq!(DiscountKind::from_tag("bundleItemDiscount").unwrap(), DiscountKind::Bundle);
    /// assert!(DiscountKind::from_tag("nonExistantMethodName").is_err());
    /// ```
    pub fn from_tag(tag: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| CoreError::InvalidRule {
                tag: tag.to_string(),
            })
    }
}

// =============================================================================
// Discount Rule
// =============================================================================

/// A discount keyed to a product SKU.
///
/// The constructors validate presence and sign of every argument and fail
/// with [`CoreError::InvalidArgument`]. Relationships between arguments are
/// not checked: a "discounted" price above list price, a bundle whose
/// payable count exceeds its size, or a product giving itself away are all
/// accepted as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRule {
    pub sku: String,
    pub discount: Discount,
}

impl DiscountRule {
    pub fn bulk_price(
        sku: impl Into<String>,
        min_quantity: i64,
        discounted_unit_price: Money,
    ) -> CoreResult<Self> {
        let sku = sku.into();
        validate_sku(&sku, "sku")?;
        validate_positive_count(min_quantity, "min_quantity")?;
        validate_price(discounted_unit_price, "discounted_unit_price")?;

        Ok(DiscountRule {
            sku,
            discount: Discount::BulkPrice(BulkPrice {
                min_quantity,
                discounted_unit_price,
            }),
        })
    }

    pub fn bundle(
        sku: impl Into<String>,
        bundle_size: i64,
        payable_count: i64,
    ) -> CoreResult<Self> {
        let sku = sku.into();
        validate_sku(&sku, "sku")?;
        validate_positive_count(bundle_size, "bundle_size")?;
        validate_positive_count(payable_count, "payable_count")?;

        Ok(DiscountRule {
            sku,
            discount: Discount::Bundle(Bundle {
                bundle_size,
                payable_count,
            }),
        })
    }

    pub fn bonus_item(sku: impl Into<String>, giveaway_sku: impl Into<String>) -> CoreResult<Self> {
        let sku = sku.into();
        let giveaway_sku = giveaway_sku.into();
        validate_sku(&sku, "sku")?;
        validate_sku(&giveaway_sku, "giveaway_sku")?;

        Ok(DiscountRule {
            sku,
            discount: Discount::BonusItem(BonusItem { giveaway_sku }),
        })
    }

    pub fn kind(&self) -> DiscountKind {
        self.discount.kind()
    }
}

// =============================================================================
// Rule Record (wire form)
// =============================================================================

/// Untyped rule as it arrives from JSON or configuration.
///
/// Nothing about `discount_type` or `method_arguments` is checked until
/// [`RuleRecord::resolve`] runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub sku: String,
    pub discount_type: String,
    #[serde(default)]
    pub method_arguments: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BulkArgs {
    min_quantity_to_trigger_discount: i64,
    discounted_product_price: Money,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BundleArgs {
    min_quantity_to_trigger_bundle: i64,
    number_of_payable_items: i64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BonusArgs {
    give_away_item_sku: String,
}

impl RuleRecord {
    /// Turns the record into a typed rule.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidRule`] if `discount_type` is not a known tag
    /// - [`CoreError::InvalidArgument`] if the arguments are missing,
    ///   malformed, zero or empty
    pub fn resolve(&self) -> CoreResult<DiscountRule> {
        match DiscountKind::from_tag(&self.discount_type)? {
            DiscountKind::BulkPrice => {
                let args: BulkArgs = self.arguments()?;
                DiscountRule::bulk_price(
                    self.sku.clone(),
                    args.min_quantity_to_trigger_discount,
                    args.discounted_product_price,
                )
            }
            DiscountKind::Bundle => {
                let args: BundleArgs = self.arguments()?;
                DiscountRule::bundle(
                    self.sku.clone(),
                    args.min_quantity_to_trigger_bundle,
                    args.number_of_payable_items,
                )
            }
            DiscountKind::BonusItem => {
                let args: BonusArgs = self.arguments()?;
                DiscountRule::bonus_item(self.sku.clone(), args.give_away_item_sku)
            }
        }
    }

    fn arguments<T: DeserializeOwned>(&self) -> CoreResult<T> {
        serde_json::from_value(self.method_arguments.clone()).map_err(|e| {
            CoreError::InvalidArgument(ValidationError::InvalidFormat {
                field: "method_arguments".to_string(),
                reason: e.to_string(),
            })
        })
    }
}

impl From<&DiscountRule> for RuleRecord {
    fn from(rule: &DiscountRule) -> Self {
        let method_arguments = match &rule.discount {
            Discount::BulkPrice(bulk) => serde_json::json!({
                "min_quantity_to_trigger_discount": bulk.min_quantity,
                "discounted_product_price": bulk.discounted_unit_price,
            }),
            Discount::Bundle(bundle) => serde_json::json!({
                "min_quantity_to_trigger_bundle": bundle.bundle_size,
                "number_of_payable_items": bundle.payable_count,
            }),
            Discount::BonusItem(bonus) => serde_json::json!({
                "give_away_item_sku": bonus.giveaway_sku,
            }),
        };

        RuleRecord {
            sku: rule.sku.clone(),
            discount_type: rule.kind().tag().to_string(),
            method_arguments,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
