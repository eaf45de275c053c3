//! # Checkout Demo
//!
//! Runs one fixed checkout and prints the total.
//!
//! ## Module Organization
//! ```text
//! checkout_demo/
//! ├── lib.rs        ◄─── You are here (startup & run)
//! ├── config.rs     ◄─── Env-driven settings
//! ├── scenario.rs   ◄─── Catalog, rules and scan sequence
//! └── error.rs      ◄─── App error type
//! ```
//!
//! ## Startup Sequence
//! 1. Read configuration from the environment
//! 2. Initialize tracing (logging to stderr)
//! 3. Load rule records, if a rules file is configured
//! 4. Run the scenario and print the total to stdout

pub mod config;
pub mod error;
pub mod scenario;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::DemoConfig;
use error::AppResult;

/// Runs the demo end to end.
pub fn run() -> AppResult<()> {
    let config = DemoConfig::from_env();
    init_tracing(&config);

    info!(rules_file = ?config.rules_file, "Starting checkout demo");

    let records = config.load_rule_records()?;
    let total = scenario::run_scenario(records.as_deref())?;

    println!("The total price is : {}", config.format_total(total));
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=checkout_core=debug` - Per-scan and per-rule detail
/// - Default: `CHECKOUT_LOG`, else INFO
fn init_tracing(config: &DemoConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
