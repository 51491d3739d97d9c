//! Tax filing status and withholding category types.
//!
//! This module defines the [`TaxFilingStatus`] PTKP codes carried on an
//! employee record and the [`TaxCategory`] (TER category) they resolve to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A PTKP filing status: marital status plus number of dependents.
///
/// `TK` is unmarried (tidak kawin), `K` is married (kawin); the number is
/// the count of dependents. Only `TK/0` and `K/0` through `K/3` are
/// accepted; `TK/1`-`TK/3` are not part of the recognised set.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TaxFilingStatus;
/// use std::str::FromStr;
///
/// let status = TaxFilingStatus::from_str("K/1").unwrap();
/// assert_eq!(status, TaxFilingStatus::K1);
/// assert_eq!(status.to_string(), "K/1");
/// assert!(TaxFilingStatus::from_str("K/4").is_err());
/// assert!(TaxFilingStatus::from_str("TK/1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaxFilingStatus {
    /// Unmarried, no dependents.
    #[serde(rename = "TK/0")]
    Tk0,
    /// Married, no dependents.
    #[serde(rename = "K/0")]
    K0,
    /// Married, one dependent.
    #[serde(rename = "K/1")]
    K1,
    /// Married, two dependents.
    #[serde(rename = "K/2")]
    K2,
    /// Married, three dependents.
    #[serde(rename = "K/3")]
    K3,
}

impl TaxFilingStatus {
    /// Every recognised filing status, in code order.
    pub const ALL: [TaxFilingStatus; 5] = [Self::Tk0, Self::K0, Self::K1, Self::K2, Self::K3];

    /// Returns the wire code for this status (e.g. `"TK/0"`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Tk0 => "TK/0",
            Self::K0 => "K/0",
            Self::K1 => "K/1",
            Self::K2 => "K/2",
            Self::K3 => "K/3",
        }
    }
}

impl fmt::Display for TaxFilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TaxFilingStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| EngineError::UnknownTaxStatus {
                code: s.to_string(),
            })
    }
}

/// A TER withholding category.
///
/// Each category has its own bracket sequence in the withholding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaxCategory {
    /// TK/0, K/0.
    A,
    /// K/1, K/2.
    B,
    /// K/3.
    C,
}

impl TaxCategory {
    /// Every category, in order.
    pub const ALL: [TaxCategory; 3] = [Self::A, Self::B, Self::C];
}

impl fmt::Display for TaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_code() {
        for status in TaxFilingStatus::ALL {
            assert_eq!(TaxFilingStatus::from_str(status.code()).unwrap(), status);
        }
    }

    #[test]
    fn test_parse_unknown_code_returns_error() {
        for code in ["", "K/4", "TK0", "k/1", " K/1", "TK/-1"] {
            match TaxFilingStatus::from_str(code) {
                Err(EngineError::UnknownTaxStatus { code: c }) => assert_eq!(c, code),
                other => panic!("Expected UnknownTaxStatus for {:?}, got {:?}", code, other),
            }
        }
    }

    #[test]
    fn test_unmarried_codes_with_dependents_are_rejected() {
        for code in ["TK/1", "TK/2", "TK/3"] {
            match TaxFilingStatus::from_str(code) {
                Err(EngineError::UnknownTaxStatus { code: c }) => assert_eq!(c, code),
                other => panic!("Expected UnknownTaxStatus for {:?}, got {:?}", code, other),
            }
            let json = format!("\"{}\"", code);
            assert!(serde_json::from_str::<TaxFilingStatus>(&json).is_err());
        }
        assert_eq!(TaxFilingStatus::ALL.len(), 5);
    }

    #[test]
    fn test_serialization_uses_wire_code() {
        assert_eq!(
            serde_json::to_string(&TaxFilingStatus::Tk0).unwrap(),
            "\"TK/0\""
        );
        assert_eq!(
            serde_json::to_string(&TaxFilingStatus::K3).unwrap(),
            "\"K/3\""
        );
    }

    #[test]
    fn test_deserialization_rejects_unknown_code() {
        let status: TaxFilingStatus = serde_json::from_str("\"K/2\"").unwrap();
        assert_eq!(status, TaxFilingStatus::K2);

        assert!(serde_json::from_str::<TaxFilingStatus>("\"K/5\"").is_err());
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<&str> = TaxFilingStatus::ALL.iter().map(|s| s.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), TaxFilingStatus::ALL.len());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(TaxCategory::A.to_string(), "A");
        assert_eq!(TaxCategory::C.to_string(), "C");
    }
}
