//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - InvalidArgument / InvalidRule                  │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  checkout-demo errors (separate crate)                                 │
//! │  └── AppError         - Config, JSON and core failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → process exit           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation
//! Every error is returned at the call that detects it. Nothing in this
//! crate catches or retries; a failing rule aborts the rest of a discount
//! pass and lines already discounted in that pass stay discounted.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required constructor or rule-attachment argument is missing,
    /// empty or zero.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// A rule names a discount kind with no matching handler.
    ///
    /// ## When This Occurs
    /// Only at the deserialization boundary, when a [`RuleRecord`] carries a
    /// `discount_type` tag outside the known set. Typed rules cannot hit it.
    ///
    /// [`RuleRecord`]: crate::rule::RuleRecord
    #[error("Unknown discount kind '{tag}'")]
    InvalidRule { tag: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (bad characters, malformed rule arguments).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
