//! Payroll Deduction Engine for Indonesian Payroll
//!
//! This crate computes BPJS Kesehatan and BPJS Ketenagakerjaan contributions,
//! PPh 21 withholding under the TER bracket tables, and net pay for each
//! employee in a monthly payroll run.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;

#[cfg(test)]
mod test_support;
