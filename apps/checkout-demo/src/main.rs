//! # Checkout Demo Entry Point
//!
//! ```bash
//! cargo run -p checkout-demo
//! # The total price is : 1999.96
//!
//! # Prefix a currency symbol
//! CHECKOUT_CURRENCY_SYMBOL='$' cargo run -p checkout-demo
//!
//! # Swap in rules from a file
//! CHECKOUT_RULES_FILE=./rules.json cargo run -p checkout-demo
//! ```
//!
//! Any error ends the process with a non-zero exit code.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    checkout_demo::run()?;
    Ok(())
}
