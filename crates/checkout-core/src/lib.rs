//! # checkout-core: Pure Pricing Logic for the Checkout Engine
//!
//! Scans items into a checkout session and computes the payable total after
//! per-product pricing rules: bulk-price breaks, "N for M" bundles and free
//! bonus items. No I/O happens in this crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 checkout-demo (binary)                          │   │
//! │  │    logging setup, env config, fixed scenario, prints total      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐  │   │
//! │  │   │ catalog │ │  rule   │ │ session │ │ discount │ │  money  │  │   │
//! │  │   │  Item   │ │ Rule    │ │ Session │ │ bulk     │ │  Money  │  │   │
//! │  │   │ attach  │ │ Record  │ │ Line    │ │ bundle   │ │         │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ │ bonus    │ └─────────┘  │   │
//! │  │                                        └──────────┘              │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Catalog items and rule attachment
//! - [`rule`] - Discount rules and their wire form
//! - [`line`] - Per-SKU scanned lines
//! - [`discount`] - The discount algorithms
//! - [`session`] - Checkout sessions
//! - [`money`] - Integer-cent money
//! - [`validation`] - Argument checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{flatten_rules, CatalogItem, CheckoutSession, Money};
//!
//! let mut ipad = CatalogItem::new("ipd", "Super iPad", Money::from_cents(54999))?;
//! ipad.attach_bulk_price(4, Money::from_cents(49999))?;
//!
//! let mut checkout = CheckoutSession::new(flatten_rules([&ipad]));
//! for _ in 0..4 {
//!     checkout.scan(&ipad);
//! }
//! checkout.apply_discounts();
//!
//! assert_eq!(checkout.total().to_string(), "$1999.96");
//! # Ok::<(), checkout_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod discount;
pub mod error;
pub mod line;
pub mod money;
pub mod rule;
pub mod session;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{flatten_rules, CatalogItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use line::ScannedLine;
pub use money::Money;
pub use rule::{Discount, DiscountKind, DiscountRule, RuleRecord};
pub use session::{CheckoutSession, SessionSummary};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Unit price recorded on a giveaway line whose SKU was never scanned and
/// is not registered with [`CheckoutSession::with_catalog`].
///
/// The line is free either way; this only shows up as its `unit_price`.
pub const GIVEAWAY_PLACEHOLDER_PRICE: Money = Money::from_cents(3000);
