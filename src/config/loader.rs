//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ContributionRateTable, ContributionsConfig, PayrollConfig, PayrollPolicy, RegimeMetadata,
    WithholdingBracketTable, WithholdingConfig,
};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates them, and hands out read-only references to the tables.
/// Tables are never mutated after loading; a reload builds a new loader.
///
/// # Directory Structure
///
/// ```text
/// config/idn/
/// ├── regime.yaml         # Regime metadata and payroll policy
/// ├── contributions.yaml  # BPJS scheme rates and caps
/// └── withholding.yaml    # PPh 21 TER brackets per category
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::ContributionScheme;
///
/// let loader = ConfigLoader::load("./config/idn").unwrap();
/// let health = loader.contributions().scheme(ContributionScheme::Health).unwrap();
/// println!("Health employee rate: {}", health.employee_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/idn")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A rate table is missing a scheme, or a bracket table does not
    ///   cover all income exactly once
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegimeMetadata>(&path.join("regime.yaml"))?;

        let contributions_config =
            Self::load_yaml::<ContributionsConfig>(&path.join("contributions.yaml"))?;
        let contributions = ContributionRateTable::new(contributions_config.schemes)?;

        let withholding_config =
            Self::load_yaml::<WithholdingConfig>(&path.join("withholding.yaml"))?;
        let withholding = WithholdingBracketTable::new(withholding_config.categories)?;

        debug!(
            path = %path.display(),
            regime = %metadata.code,
            version = %metadata.version,
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(metadata, contributions, withholding),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        self.config.regime()
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> PayrollPolicy {
        self.config.policy()
    }

    /// Returns the contribution rate table.
    pub fn contributions(&self) -> &ContributionRateTable {
        self.config.contributions()
    }

    /// Returns the withholding bracket table.
    pub fn withholding(&self) -> &WithholdingBracketTable {
        self.config.withholding()
    }
}
