//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::info;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::repository::EmployeeRepository;

/// Shared application state.
///
/// Holds the current configuration snapshot and the employee repository.
/// A reload replaces the snapshot as a whole; handlers that already took
/// a snapshot keep using it until they finish.
#[derive(Clone)]
pub struct AppState {
    config_dir: PathBuf,
    config: Arc<RwLock<Arc<ConfigLoader>>>,
    employees: Arc<dyn EmployeeRepository>,
}

impl AppState {
    /// Creates application state from a loaded configuration.
    ///
    /// `config_dir` is where [`AppState::reload_config`] reads from.
    pub fn new(
        config_dir: impl Into<PathBuf>,
        config: ConfigLoader,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            config_dir: config_dir.into(),
            config: Arc::new(RwLock::new(Arc::new(config))),
            employees,
        }
    }

    /// Returns the current configuration snapshot.
    pub fn config(&self) -> EngineResult<Arc<ConfigLoader>> {
        self.config
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| poisoned())
    }

    /// Returns the employee repository.
    pub fn employees(&self) -> &dyn EmployeeRepository {
        self.employees.as_ref()
    }

    /// Returns the directory configuration is loaded from.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Reloads configuration from disk and swaps it in.
    ///
    /// On failure the previous snapshot stays active.
    pub fn reload_config(&self) -> EngineResult<Arc<ConfigLoader>> {
        let loaded = Arc::new(ConfigLoader::load(&self.config_dir)?);
        let mut current = self.config.write().map_err(|_| poisoned())?;
        *current = Arc::clone(&loaded);

        info!(
            path = %self.config_dir.display(),
            regime = %loaded.regime().code,
            version = %loaded.regime().version,
            "Configuration reloaded"
        );
        Ok(loaded)
    }
}

fn poisoned() -> EngineError {
    EngineError::LockPoisoned {
        resource: "configuration snapshot".to_string(),
    }
}
