//! # Demo Scenario
//!
//! ```text
//! Catalog                           Rules
//! ───────                           ─────
//! ipd  Super iPad    $549.99        bulk: 4+ → $499.99 each
//! mbp  MacBook Pro   $1399.99       bonus: one free vga per mbp
//! atv  Apple TV      $109.50        bundle: 3 for 2
//! vga  VGA adapter   $30.00
//!
//! Scan: ipd × 4  ──►  $2199.96 before discounts, $1999.96 after
//! ```

use checkout_core::{
    flatten_rules, CatalogItem, CheckoutSession, CoreResult, DiscountRule, Money, RuleRecord,
};
use tracing::info;

use crate::error::AppResult;

/// The four demo products with their rules attached.
#[derive(Debug, Clone)]
pub struct DemoCatalog {
    pub ipad: CatalogItem,
    pub macbook_pro: CatalogItem,
    pub apple_tv: CatalogItem,
    pub vga_adapter: CatalogItem,
}

impl DemoCatalog {
    pub fn build() -> CoreResult<Self> {
        let mut ipad = CatalogItem::new("ipd", "Super iPad", Money::from_major_minor(549, 99))?;
        let mut macbook_pro =
            CatalogItem::new("mbp", "MacBook Pro", Money::from_major_minor(1399, 99))?;
        let mut apple_tv = CatalogItem::new("atv", "Apple TV", Money::from_major_minor(109, 50))?;
        let vga_adapter = CatalogItem::new("vga", "VGA adapter", Money::from_major_minor(30, 0))?;

        ipad.attach_bulk_price(4, Money::from_major_minor(499, 99))?;
        apple_tv.attach_bundle(3, 2)?;
        macbook_pro.attach_bonus_item("vga")?;

        Ok(DemoCatalog {
            ipad,
            macbook_pro,
            apple_tv,
            vga_adapter,
        })
    }

    pub fn items(&self) -> [&CatalogItem; 4] {
        [&self.ipad, &self.macbook_pro, &self.apple_tv, &self.vga_adapter]
    }

    /// Rules in the order the demo feeds them: iPad, Apple TV, MacBook Pro.
    pub fn rules(&self) -> Vec<DiscountRule> {
        flatten_rules([&self.ipad, &self.apple_tv, &self.macbook_pro])
    }
}

/// Runs the fixed scan sequence and returns the discounted total.
///
/// With `records`, those rule records are applied instead of the catalog's
/// own rules.
pub fn run_scenario(records: Option<&[RuleRecord]>) -> AppResult<Money> {
    let catalog = DemoCatalog::build()?;

    let rules = if records.is_some() { Vec::new() } else { catalog.rules() };
    let mut checkout = CheckoutSession::new(rules).with_catalog(catalog.items());

    for _ in 0..4 {
        checkout.scan(&catalog.ipad);
    }

    let before = checkout.total();
    match records {
        Some(records) => checkout.apply_rule_records(records)?,
        None => checkout.apply_discounts(),
    }
    let after = checkout.total();

    let summary = checkout.summary();
    info!(
        session = %summary.session_id,
        opened_at = %checkout.opened_at(),
        before = %before,
        after = %after,
        savings = %summary.savings,
        lines = summary.line_count,
        "Checkout complete"
    );

    Ok(after)
}
