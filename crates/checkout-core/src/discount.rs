//! # Discount Algorithms
//!
//! One function per [`Discount`] variant, each rewriting line state in place.
//! [`apply_discount`] is the dispatcher: an exhaustive match, so a new
//! variant will not compile until it has a handler.
//!
//! ## Worked Examples
//! ```text
//! BulkPrice  min 4 → $499.99, list $549.99
//!   qty 3  → untouched                         3 × 549.99 = $1649.97
//!   qty 4  → unit_price = 499.99               4 × 499.99 = $1999.96
//!
//! Bundle  3 for 2, unit $109.50
//!   qty 4  → remainder 1, bundles 1
//!            1 × 2 × 109.50 + 1 × 109.50      = $328.50
//!
//! BonusItem  mbp → vga
//!   mbp qty 2, vga qty 3 → 2 free, 1 charged  = $30.00
//!   mbp qty 2, vga absent → new vga line qty 2 = $0.00
//! ```

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::line::ScannedLine;
use crate::money::Money;
use crate::rule::{BonusItem, BulkPrice, Bundle, Discount};
use crate::GIVEAWAY_PLACEHOLDER_PRICE;

/// Applies `discount` to the line at `index`.
///
/// `known_prices` prices a giveaway line that has to be created from
/// scratch.
pub fn apply_discount(
    lines: &mut Vec<ScannedLine>,
    index: usize,
    discount: &Discount,
    known_prices: &HashMap<String, Money>,
) {
    match discount {
        Discount::BulkPrice(args) => apply_bulk_price(&mut lines[index], args),
        Discount::Bundle(args) => apply_bundle(&mut lines[index], args),
        Discount::BonusItem(args) => apply_bonus_item(lines, index, args, known_prices),
    }
}

/// Every unit at the discounted price once the threshold is met.
pub fn apply_bulk_price(line: &mut ScannedLine, args: &BulkPrice) {
    if line.quantity < args.min_quantity {
        return;
    }

    line.unit_price = args.discounted_unit_price;
    line.subtotal = args.discounted_unit_price.multiply_quantity(line.quantity);

    debug!(
        sku = %line.sku,
        quantity = line.quantity,
        subtotal = %line.subtotal,
        "Applied bulk price"
    );
}

/// Whole bundles pay for `payable_count` units; the remainder pays full
/// (current) unit price.
pub fn apply_bundle(line: &mut ScannedLine, args: &Bundle) {
    if args.bundle_size <= 0 || line.quantity < args.bundle_size {
        return;
    }

    let remainder = line.quantity % args.bundle_size;
    let bundle_count = (line.quantity - remainder) / args.bundle_size;
    let payable_units = bundle_count * args.payable_count;

    line.subtotal = line.unit_price.multiply_quantity(payable_units)
        + line.unit_price.multiply_quantity(remainder);

    debug!(
        sku = %line.sku,
        bundle_count,
        remainder,
        subtotal = %line.subtotal,
        "Applied bundle price"
    );
}

/// Makes one giveaway unit free per unit of the triggering line.
///
/// An existing giveaway line is topped up to the eligible count, never
/// reduced; units bought beyond it stay charged. A missing one is appended
/// fully free.
pub fn apply_bonus_item(
    lines: &mut Vec<ScannedLine>,
    index: usize,
    args: &BonusItem,
    known_prices: &HashMap<String, Money>,
) {
    let eligible_free = lines[index].quantity;

    if let Some(giveaway) = lines.iter_mut().find(|l| l.sku == args.giveaway_sku) {
        if giveaway.quantity < eligible_free {
            giveaway.quantity = eligible_free;
        }
        giveaway.subtotal = giveaway
            .unit_price
            .multiply_quantity(giveaway.quantity - eligible_free);

        debug!(
            sku = %giveaway.sku,
            free = eligible_free,
            quantity = giveaway.quantity,
            subtotal = %giveaway.subtotal,
            "Applied bonus item to scanned line"
        );
        return;
    }

    let list_price = match known_prices.get(&args.giveaway_sku) {
        Some(price) => *price,
        None => {
            warn!(
                sku = %args.giveaway_sku,
                placeholder = %GIVEAWAY_PLACEHOLDER_PRICE,
                "Giveaway SKU has no known price, using placeholder"
            );
            GIVEAWAY_PLACEHOLDER_PRICE
        }
    };

    debug!(sku = %args.giveaway_sku, free = eligible_free, "Adding giveaway line");
    lines.push(ScannedLine::giveaway(
        args.giveaway_sku.clone(),
        eligible_free,
        list_price,
    ));
}

// =============================================================================
// Unit Tests
// =============================================================================
