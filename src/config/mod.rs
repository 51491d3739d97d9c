//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load contribution rate tables and
//! withholding bracket tables from YAML files. Tables are validated once at
//! load time and shared read-only across calculations.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/idn").unwrap();
//! println!("Loaded regime: {}", config.regime().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionRateTable, ContributionsConfig, NegativeNetPay, PayrollConfig, PayrollPolicy,
    RegimeMetadata, Rounding, SchemeRate, WithholdingBracket, WithholdingBracketTable,
    WithholdingConfig,
};
