//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. All failures are deterministic
//! functions of the input and the loaded configuration; none are retried.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::UnknownTaxStatus {
///     code: "X/9".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown tax filing status: X/9");
/// assert!(error.is_invalid_input());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A contribution rate table has no entry for a required scheme.
    #[error("Contribution rate table is missing scheme: {scheme}")]
    MissingScheme {
        /// The scheme that has no rate entry.
        scheme: String,
    },

    /// A withholding table has no brackets for a tax category.
    #[error("Withholding table is missing category: {category}")]
    MissingTaxCategory {
        /// The category that has no bracket sequence.
        category: String,
    },

    /// A loaded table is internally inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// A description of the inconsistency.
        message: String,
    },

    /// A calculation input was outside its valid domain.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending input field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The tax filing status code is not a recognised PTKP code.
    #[error("Unknown tax filing status: {code}")]
    UnknownTaxStatus {
        /// The code that was not recognised.
        code: String,
    },

    /// Net pay came out negative and the active policy rejects it.
    #[error("Net pay is negative: {net_pay}")]
    NegativeNetPay {
        /// The computed (negative) net pay.
        net_pay: Decimal,
    },

    /// An employee with the same ID already exists.
    #[error("Employee already exists: {id}")]
    DuplicateEmployee {
        /// The duplicated employee ID.
        id: String,
    },

    /// No employee exists with the requested ID.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The requested employee ID.
        id: String,
    },

    /// The payroll line for one employee in a run failed.
    #[error("Payroll calculation failed for employee '{employee_id}': {source}")]
    EmployeeCalculation {
        /// The employee whose line failed.
        employee_id: String,
        /// The underlying failure.
        #[source]
        source: Box<EngineError>,
    },

    /// A shared in-process store was left poisoned by a panicking writer.
    #[error("Lock poisoned: {resource}")]
    LockPoisoned {
        /// The store whose lock was poisoned.
        resource: String,
    },
}

impl EngineError {
    /// Returns true if the error was caused by bad caller or upstream data.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::InvalidInput { .. }
            | Self::UnknownTaxStatus { .. }
            | Self::NegativeNetPay { .. } => true,
            Self::EmployeeCalculation { source, .. } => source.is_invalid_input(),
            _ => false,
        }
    }

    /// Returns true if the error was detected in the loaded configuration.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::ConfigNotFound { .. }
            | Self::ConfigParseError { .. }
            | Self::MissingScheme { .. }
            | Self::MissingTaxCategory { .. }
            | Self::InvalidConfiguration { .. } => true,
            Self::EmployeeCalculation { source, .. } => source.is_configuration_error(),
            _ => false,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
