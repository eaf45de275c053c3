//! # Checkout Session
//!
//! Accumulates scanned items, applies discount rules and totals the result.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CheckoutSession::new(rules)      rules: owned snapshot                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  scan(item) × n  ───────────────► lines: one per SKU, naive subtotals   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  apply_discounts() ─────────────► each rule × each matching line        │
//! │        │                          (rule order, later rules win)         │
//! │        ▼                                                                │
//! │  total() ───────────────────────► Σ line.subtotal                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Staleness
//! `total_price` is only refreshed by [`CheckoutSession::total`]. Scans and
//! discount passes leave it alone; call `total()` again after either.
//!
//! ## Ownership
//! Mutating operations take `&mut self`, so a session has exactly one owner
//! at a time. Sharing one across threads needs an external lock around it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::CatalogItem;
use crate::discount::apply_discount;
use crate::error::CoreResult;
use crate::line::ScannedLine;
use crate::money::Money;
use crate::rule::{DiscountRule, RuleRecord};

/// A single checkout in progress.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    id: Uuid,
    opened_at: DateTime<Utc>,
    rules: Vec<DiscountRule>,
    lines: Vec<ScannedLine>,
    known_prices: HashMap<String, Money>,
    total_price: Money,
}

impl CheckoutSession {
    /// Opens a session over a snapshot of `rules`.
    ///
    /// Later changes to the catalog items the rules came from do not reach
    /// this session.
    pub fn new(rules: Vec<DiscountRule>) -> Self {
        let session = CheckoutSession {
            id: Uuid::new_v4(),
            opened_at: Utc::now(),
            rules,
            lines: Vec::new(),
            known_prices: HashMap::new(),
            total_price: Money::zero(),
        };

        debug!(session = %session.id, rules = session.rules.len(), "Opened checkout session");
        session
    }

    /// Registers catalog prices so giveaway lines for items that were never
    /// scanned get their real list price.
    pub fn with_catalog<'a, I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = &'a CatalogItem>,
    {
        for item in items {
            self.known_prices.insert(item.sku().to_string(), item.price());
        }
        self
    }

    /// Scans one unit of `item`.
    ///
    /// ## Behavior
    /// - SKU already scanned: quantity + 1, subtotal reset to
    ///   `list_price × quantity` (any discount on the line is discarded)
    /// - New SKU: appends a line at the catalog price, quantity 1
    ///
    /// ```rust
    /// use checkout_core::{CatalogItem, CheckoutSession, Money};
    ///
    /// let atv = CatalogItem::new("atv", "Apple TV", Money::from_cents(10950)).unwrap();
    /// let mut checkout = CheckoutSession::default();
    /// checkout.scan(&atv);
    /// checkout.scan(&atv);
    ///
    /// assert_eq!(checkout.lines().len(), 1);
    /// assert_eq!(checkout.total().cents(), 21900);
    /// ```
    pub fn scan(&mut self, item: &CatalogItem) {
        self.known_prices
            .entry(item.sku().to_string())
            .or_insert_with(|| item.price());

        if let Some(line) = self.lines.iter_mut().find(|l| l.sku == item.sku()) {
            line.rescan();
            debug!(session = %self.id, sku = %line.sku, quantity = line.quantity, "Scanned item");
            return;
        }

        self.lines.push(ScannedLine::from_item(item));
        debug!(session = %self.id, sku = %item.sku(), quantity = 1, "Scanned new item");
    }

    /// Runs every rule against every line with the same SKU.
    ///
    /// Rules apply in snapshot order and each overwrites the subtotal the
    /// previous one left. Lines appended during the pass (giveaways) are not
    /// visited by the rule that created them.
    pub fn apply_discounts(&mut self) {
        debug!(session = %self.id, rules = self.rules.len(), "Applying discounts");

        for rule in &self.rules {
            apply_rule(&mut self.lines, rule, &self.known_prices);
        }
    }

    /// Resolves and applies untyped rule records in order.
    ///
    /// The session's own rules are not run. A record is only resolved when
    /// some scanned line has its SKU; records for unscanned SKUs are skipped
    /// unchecked. A bad record stops the pass part-way: lines changed by
    /// earlier records keep their new subtotals.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidRule`](crate::CoreError::InvalidRule) for an
    ///   unknown `discount_type`
    /// - [`CoreError::InvalidArgument`](crate::CoreError::InvalidArgument)
    ///   for malformed arguments
    pub fn apply_rule_records(&mut self, records: &[RuleRecord]) -> CoreResult<()> {
        debug!(session = %self.id, records = records.len(), "Applying rule records");

        for record in records {
            if !self.lines.iter().any(|l| l.sku == record.sku) {
                continue;
            }
            let rule = record.resolve()?;
            apply_rule(&mut self.lines, &rule, &self.known_prices);
        }

        Ok(())
    }

    /// Recomputes and returns the total: the sum of every line's subtotal.
    pub fn total(&mut self) -> Money {
        self.total_price = self.lines.iter().map(|l| l.subtotal).sum();

        debug!(session = %self.id, total = %self.total_price, "Computed total");
        self.total_price
    }

    /// The total as of the last [`total`](Self::total) call.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn lines(&self) -> &[ScannedLine] {
        &self.lines
    }

    pub fn line(&self, sku: &str) -> Option<&ScannedLine> {
        self.lines.iter().find(|l| l.sku == sku)
    }

    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from(self)
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Runs one rule over the lines that exist when it starts.
fn apply_rule(
    lines: &mut Vec<ScannedLine>,
    rule: &DiscountRule,
    known_prices: &HashMap<String, Money>,
) {
    let line_count = lines.len();
    for index in 0..line_count {
        if lines[index].sku == rule.sku {
            apply_discount(lines, index, &rule.discount, known_prices);
        }
    }
}

/// Session summary for display and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub opened_at: DateTime<Utc>,
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_price: Money,
    /// List price × quantity over every line.
    pub undiscounted_total: Money,
    /// Taken off by the rules currently applied to the lines.
    pub savings: Money,
}

impl From<&CheckoutSession> for SessionSummary {
    fn from(session: &CheckoutSession) -> Self {
        let undiscounted_total: Money = session
            .lines
            .iter()
            .map(ScannedLine::undiscounted_subtotal)
            .sum();
        let charged: Money = session.lines.iter().map(ScannedLine::subtotal).sum();

        SessionSummary {
            session_id: session.id,
            opened_at: session.opened_at,
            line_count: session.lines.len(),
            total_quantity: session.lines.iter().map(|l| l.quantity).sum(),
            total_price: session.total_price,
            undiscounted_total,
            savings: undiscounted_total - charged,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::flatten_rules;
    use crate::error::CoreError;
    use serde_json::json;

    fn item(sku: &str, name: &str, cents: i64) -> CatalogItem {
        CatalogItem::new(sku, name, Money::from_cents(cents)).unwrap()
    }

    fn ipad() -> CatalogItem {
        item("ipd", "Super iPad", 54999)
    }

    fn apple_tv() -> CatalogItem {
        item("atv", "Apple TV", 10950)
    }

    fn macbook() -> CatalogItem {
        item("mbp", "MacBook Pro", 139999)
    }

    fn vga() -> CatalogItem {
        item("vga", "VGA adapter", 3000)
    }

    fn scan_times(session: &mut CheckoutSession, item: &CatalogItem, times: usize) {
        for _ in 0..times {
            session.scan(item);
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let checkout = CheckoutSession::default();
        assert!(checkout.is_empty());
        assert!(checkout.rules().is_empty());
        assert!(checkout.total_price().is_zero());
    }

    #[test]
    fn test_scan_new_item() {
        let mut checkout = CheckoutSession::default();
        checkout.scan(&ipad());

        let line = checkout.line("ipd").unwrap();
        assert_eq!(line.quantity(), 1);
        assert_eq!(line.unit_price(), Money::from_cents(54999));
        assert_eq!(line.subtotal(), Money::from_cents(54999));
    }

    #[test]
    fn test_repeated_scans_without_rules() {
        for k in 1..=6 {
            let mut checkout = CheckoutSession::default();
            scan_times(&mut checkout, &apple_tv(), k);

            assert_eq!(checkout.lines().len(), 1);
            let line = checkout.line("atv").unwrap();
            assert_eq!(line.quantity(), k as i64);
            assert_eq!(line.subtotal(), Money::from_cents(10950 * k as i64));
        }
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut checkout = CheckoutSession::default();
        checkout.scan(&vga());
        checkout.scan(&ipad());
        checkout.scan(&vga());

        let skus: Vec<_> = checkout.lines().iter().map(ScannedLine::sku).collect();
        assert_eq!(skus, vec!["vga", "ipd"]);
    }

    #[test]
    fn test_total_is_stale_until_called() {
        let mut checkout = CheckoutSession::default();
        checkout.scan(&ipad());
        assert!(checkout.total_price().is_zero());

        checkout.total();
        checkout.scan(&ipad());
        assert_eq!(checkout.total_price(), Money::from_cents(54999));
        assert_eq!(checkout.total(), Money::from_cents(109998));
    }

    #[test]
    fn test_total_is_idempotent() {
        let mut checkout = CheckoutSession::default();
        checkout.scan(&ipad());
        checkout.scan(&vga());

        let first = checkout.total();
        let second = checkout.total();
        assert_eq!(first, second);
        assert_eq!(second, Money::from_cents(57999));
    }

    #[test]
    fn test_empty_rules_leave_subtotals_alone() {
        let mut checkout = CheckoutSession::new(Vec::new());
        scan_times(&mut checkout, &ipad(), 3);

        let before = checkout.total();
        checkout.apply_discounts();
        assert_eq!(checkout.total(), before);
        assert_eq!(before, Money::from_cents(164997));
    }

    #[test]
    fn test_bulk_price_threshold() {
        let mut ipad = ipad();
        ipad.attach_bulk_price(4, Money::from_cents(49999)).unwrap();

        let mut below = CheckoutSession::new(flatten_rules([&ipad]));
        scan_times(&mut below, &ipad, 3);
        below.apply_discounts();
        assert_eq!(below.total(), Money::from_cents(164997));

        let mut at = CheckoutSession::new(flatten_rules([&ipad]));
        scan_times(&mut at, &ipad, 4);
        at.apply_discounts();
        assert_eq!(at.total(), Money::from_cents(199996));
    }

    #[test]
    fn test_bulk_price_lowers_total() {
        let mut ipad = ipad();
        ipad.attach_bulk_price(2, Money::from_cents(49999)).unwrap();

        let mut checkout = CheckoutSession::new(flatten_rules([&ipad]));
        scan_times(&mut checkout, &ipad, 2);

        let before = checkout.total();
        assert_eq!(before, Money::from_cents(109998));

        checkout.apply_discounts();
        let after = checkout.total();
        assert_eq!(after, Money::from_cents(99998));
        assert!(before > after);
    }

    #[test]
    fn test_bundle_three_for_two() {
        let mut atv = apple_tv();
        atv.attach_bundle(3, 2).unwrap();

        let mut three = CheckoutSession::new(flatten_rules([&atv]));
        scan_times(&mut three, &atv, 3);
        three.apply_discounts();
        assert_eq!(three.total(), Money::from_cents(21900));

        let mut four = CheckoutSession::new(flatten_rules([&atv]));
        scan_times(&mut four, &atv, 4);
        four.apply_discounts();
        assert_eq!(four.total(), Money::from_cents(32850));
    }

    #[test]
    fn test_bonus_item_creates_giveaway_line() {
        let mut mbp = macbook();
        mbp.attach_bonus_item("vga").unwrap();

        let mut checkout = CheckoutSession::new(flatten_rules([&mbp])).with_catalog([&vga()]);
        scan_times(&mut checkout, &mbp, 3);
        checkout.apply_discounts();

        let giveaway = checkout.line("vga").unwrap();
        assert_eq!(giveaway.quantity(), 3);
        assert_eq!(giveaway.list_price(), Money::from_cents(3000));
        assert!(giveaway.subtotal().is_zero());
        assert_eq!(checkout.total(), Money::from_cents(419997));
    }

    #[test]
    fn test_bonus_item_raises_scanned_giveaway() {
        let mut mbp = macbook();
        mbp.attach_bonus_item("vga").unwrap();

        let mut checkout = CheckoutSession::new(flatten_rules([&mbp]));
        scan_times(&mut checkout, &mbp, 2);
        checkout.scan(&vga());
        checkout.apply_discounts();

        let giveaway = checkout.line("vga").unwrap();
        assert_eq!(giveaway.quantity(), 2);
        assert!(giveaway.subtotal().is_zero());
    }

    #[test]
    fn test_later_rules_win() {
        let mut atv = apple_tv();
        atv.attach_bulk_price(3, Money::from_cents(9000))
            .unwrap()
            .attach_bundle(3, 2)
            .unwrap();

        let mut checkout = CheckoutSession::new(flatten_rules([&atv]));
        scan_times(&mut checkout, &atv, 3);
        checkout.apply_discounts();

        // bulk sets unit price 90.00, bundle then charges 2 of 3 at that price
        assert_eq!(checkout.total(), Money::from_cents(18000));
    }

    #[test]
    fn test_session_owns_rule_snapshot() {
        let mut ipad = ipad();
        ipad.attach_bulk_price(2, Money::from_cents(49999)).unwrap();

        let mut checkout = CheckoutSession::new(flatten_rules([&ipad]));
        ipad.attach_bulk_price(1, Money::from_cents(100)).unwrap();

        scan_times(&mut checkout, &ipad, 2);
        checkout.apply_discounts();
        assert_eq!(checkout.rules().len(), 1);
        assert_eq!(checkout.total(), Money::from_cents(99998));
    }

    #[test]
    fn test_scan_after_discount_reverts_to_list_price() {
        let mut ipad = ipad();
        ipad.attach_bulk_price(2, Money::from_cents(49999)).unwrap();

        let mut checkout = CheckoutSession::new(flatten_rules([&ipad]));
        scan_times(&mut checkout, &ipad, 2);
        checkout.apply_discounts();
        assert_eq!(checkout.total(), Money::from_cents(99998));

        checkout.scan(&ipad);
        let line = checkout.line("ipd").unwrap();
        assert_eq!(line.unit_price(), Money::from_cents(54999));
        assert_eq!(checkout.total(), Money::from_cents(164997));

        checkout.apply_discounts();
        assert_eq!(checkout.total(), Money::from_cents(149997));
    }

    #[test]
    fn test_rule_records_apply_in_order() {
        let mut checkout = CheckoutSession::default();
        scan_times(&mut checkout, &apple_tv(), 3);

        let records: Vec<RuleRecord> = serde_json::from_value(json!([
            {
                "sku": "atv",
                "discount_type": "bundleItemDiscount",
                "method_arguments": {
                    "min_quantity_to_trigger_bundle": 3,
                    "number_of_payable_items": 2
                }
            }
        ]))
        .unwrap();

        checkout.apply_rule_records(&records).unwrap();
        assert_eq!(checkout.total(), Money::from_cents(21900));
    }

    #[test]
    fn test_unknown_record_aborts_without_rollback() {
        let mut checkout = CheckoutSession::default();
        scan_times(&mut checkout, &ipad(), 4);
        scan_times(&mut checkout, &apple_tv(), 3);

        let records: Vec<RuleRecord> = serde_json::from_value(json!([
            {
                "sku": "ipd",
                "discount_type": "bulkItemDiscount",
                "method_arguments": {
                    "min_quantity_to_trigger_discount": 4,
                    "discounted_product_price": 49999
                }
            },
            { "sku": "atv", "discount_type": "nonExistantMethodName" },
            {
                "sku": "atv",
                "discount_type": "bundleItemDiscount",
                "method_arguments": {
                    "min_quantity_to_trigger_bundle": 3,
                    "number_of_payable_items": 2
                }
            }
        ]))
        .unwrap();

        let err = checkout.apply_rule_records(&records).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRule { .. }));

        assert_eq!(checkout.line("ipd").unwrap().subtotal(), Money::from_cents(199996));
        assert_eq!(checkout.line("atv").unwrap().subtotal(), Money::from_cents(32850));
    }

    #[test]
    fn test_record_for_unscanned_sku_is_never_resolved() {
        let mut checkout = CheckoutSession::default();
        scan_times(&mut checkout, &ipad(), 4);

        let records: Vec<RuleRecord> = serde_json::from_value(json!([
            { "sku": "zzz", "discount_type": "nonExistantMethodName" },
            {
                "sku": "ipd",
                "discount_type": "bulkItemDiscount",
                "method_arguments": {
                    "min_quantity_to_trigger_discount": 4,
                    "discounted_product_price": 49999
                }
            }
        ]))
        .unwrap();

        checkout.apply_rule_records(&records).unwrap();
        assert_eq!(checkout.total(), Money::from_cents(199996));
    }

    #[test]
    fn test_later_rule_sees_giveaway_line() {
        let mut mbp = macbook();
        mbp.attach_bonus_item("vga").unwrap();
        let mut vga = vga();
        vga.attach_bulk_price(2, Money::from_cents(1000)).unwrap();

        let mut checkout =
            CheckoutSession::new(flatten_rules([&mbp, &vga])).with_catalog([&vga]);
        scan_times(&mut checkout, &mbp, 3);
        checkout.apply_discounts();

        // bonus adds vga × 3 for free, the vga bulk rule then reprices it
        let giveaway = checkout.line("vga").unwrap();
        assert_eq!(giveaway.quantity(), 3);
        assert_eq!(giveaway.unit_price(), Money::from_cents(1000));
        assert_eq!(giveaway.subtotal(), Money::from_cents(3000));
    }

    #[test]
    fn test_earlier_rule_misses_giveaway_line() {
        let mut mbp = macbook();
        mbp.attach_bonus_item("vga").unwrap();
        let mut vga = vga();
        vga.attach_bulk_price(2, Money::from_cents(1000)).unwrap();

        let mut checkout =
            CheckoutSession::new(flatten_rules([&vga, &mbp])).with_catalog([&vga]);
        scan_times(&mut checkout, &mbp, 3);
        checkout.apply_discounts();

        let giveaway = checkout.line("vga").unwrap();
        assert_eq!(giveaway.quantity(), 3);
        assert_eq!(giveaway.unit_price(), Money::from_cents(3000));
        assert!(giveaway.subtotal().is_zero());
    }

    #[test]
    fn test_summary() {
        let mut checkout = CheckoutSession::default();
        scan_times(&mut checkout, &ipad(), 2);
        checkout.scan(&vga());
        checkout.total();

        let summary = checkout.summary();
        assert_eq!(summary.session_id, checkout.id());
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.total_price, Money::from_cents(112998));
        assert_eq!(summary.undiscounted_total, Money::from_cents(112998));
        assert!(summary.savings.is_zero());
    }

    #[test]
    fn test_summary_reports_savings() {
        let rules = vec![DiscountRule::bulk_price("ipd", 4, Money::from_cents(49999)).unwrap()];
        let mut checkout = CheckoutSession::new(rules);
        scan_times(&mut checkout, &ipad(), 4);
        checkout.apply_discounts();
        checkout.total();

        let summary = checkout.summary();
        assert_eq!(summary.undiscounted_total, Money::from_cents(219996));
        assert_eq!(summary.total_price, Money::from_cents(199996));
        assert_eq!(summary.savings, Money::from_cents(20000));
    }

    /// The fixed demo scenario: four iPads with every demo rule active.
    #[test]
    fn test_demo_scenario() {
        let mut ipad = ipad();
        let mut atv = apple_tv();
        let mut mbp = macbook();
        let vga = vga();

        ipad.attach_bulk_price(4, Money::from_cents(49999)).unwrap();
        atv.attach_bundle(3, 2).unwrap();
        mbp.attach_bonus_item("vga").unwrap();

        let mut checkout = CheckoutSession::new(flatten_rules([&ipad, &atv, &mbp]))
            .with_catalog([&ipad, &atv, &mbp, &vga]);
        scan_times(&mut checkout, &ipad, 4);

        assert_eq!(checkout.total(), Money::from_cents(219996));
        checkout.apply_discounts();
        assert_eq!(checkout.total(), Money::from_cents(199996));
        assert_eq!(checkout.total_price().to_string(), "$1999.96");
    }
}
