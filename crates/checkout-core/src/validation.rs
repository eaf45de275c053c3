//! # Validation Module
//!
//! Argument checks for catalog items and rule attachment.
//!
//! ## Where Validation Happens
//! ```text
//! CatalogItem::new ─────────► validate_sku, validate_product_name, validate_price
//! attach_bulk_price ────────► validate_positive_count, validate_price
//! attach_bundle ────────────► validate_positive_count (×2)
//! attach_bonus_item ────────► validate_sku
//! RuleRecord::resolve ──────► same checks as the attach_* calls
//! ```
//!
//! Everything here is permissive about relationships between arguments
//! (discounted price vs list price, bundle size vs payable count). Only
//! presence and sign are checked.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum SKU length.
pub const MAX_SKU_LEN: usize = 50;

/// Maximum product name length.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 50 characters
/// - Only letters, digits, hyphens and underscores
///
/// ```rust
/// use checkout_core::validation::validate_sku;
///
/// assert!(validate_sku("ipd", "sku").is_ok());
/// assert!(validate_sku("", "sku").is_err());
/// assert!(validate_sku("vga adapter", "giveaway_sku").is_err());
/// ```
pub fn validate_sku(sku: &str, field: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product display name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price. Zero and negative prices are rejected.
pub fn validate_price(price: Money, field: &str) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity-like rule argument (threshold, bundle size, payable
/// count).
///
/// ```rust
/// use checkout_core::validation::validate_positive_count;
///
/// assert!(validate_positive_count(3, "bundle_size").is_ok());
/// assert!(validate_positive_count(0, "bundle_size").is_err());
/// ```
pub fn validate_positive_count(value: i64, field: &str) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
