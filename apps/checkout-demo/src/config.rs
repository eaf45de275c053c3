//! # Demo Configuration
//!
//! Settings for a demo run, resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CHECKOUT_*`)
//! 2. Defaults (this file)
//!
//! `RUST_LOG`, when set, still wins over `CHECKOUT_LOG` for the log filter.

use std::path::{Path, PathBuf};

use checkout_core::{Money, RuleRecord};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Demo run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// JSON array of rule records replacing the built-in demo rules.
    pub rules_file: Option<PathBuf>,

    /// Symbol printed in front of the total. Empty prints a bare decimal.
    pub currency_symbol: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            log_filter: "info,checkout_core=debug,checkout_demo=debug".to_string(),
            rules_file: None,
            currency_symbol: String::new(),
        }
    }
}

impl DemoConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CHECKOUT_LOG`: log filter (e.g. `debug`, `checkout_core=debug`)
    /// - `CHECKOUT_RULES_FILE`: path to a rule-record JSON file
    /// - `CHECKOUT_CURRENCY_SYMBOL`: display symbol for the total
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = DemoConfig::default();

        if let Some(filter) = lookup("CHECKOUT_LOG").filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }

        if let Some(path) = lookup("CHECKOUT_RULES_FILE").filter(|v| !v.trim().is_empty()) {
            config.rules_file = Some(PathBuf::from(path));
        }

        if let Some(symbol) = lookup("CHECKOUT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Loads the rule records named by `rules_file`, if any.
    pub fn load_rule_records(&self) -> AppResult<Option<Vec<RuleRecord>>> {
        self.rules_file
            .as_deref()
            .map(read_rule_records)
            .transpose()
    }

    /// Formats a total for printing.
    pub fn format_total(&self, total: Money) -> String {
        total.format_with_symbol(&self.currency_symbol)
    }
}

fn read_rule_records(path: &Path) -> AppResult<Vec<RuleRecord>> {
    let raw = std::fs::read_to_string(path).map_err(|source| AppError::ReadRules {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rule_records(&raw)
}

/// Parses a JSON array of rule records. Tags are not checked here.
pub fn parse_rule_records(raw: &str) -> AppResult<Vec<RuleRecord>> {
    Ok(serde_json::from_str(raw)?)
}
