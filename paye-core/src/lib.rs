//! Core PAYE calculation library for Ghana monthly payroll.
//!
//! Holds the per-year bracket tables, validates raw submissions from a
//! host layer, and computes the SSNIT deduction and graduated PAYE tax.
//! Pure request/response: nothing here performs I/O or keeps state between
//! submissions.

pub mod calculations;
pub mod calculator;
pub mod models;

pub use calculator::{Field, PayeCalculator, ValidationError, ValidationErrors};
pub use models::*;
