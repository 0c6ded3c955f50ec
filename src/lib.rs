#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(missing_docs)]
//! Library entry for the launchpad calculator.
//!
//! Pure functions encoding the launchpad's business rules: when a token
//! graduates and how its pool is split, what the curve charges at a given
//! supply, the diamond-hand sell fee, dump detection and launch form checks.
//!
//! # Modules
//! - [`graduation`]: Threshold check & reward split
//! - [`curve`]: Calibrated price table & buy/sell quotes
//! - [`diamond`]: Progress-scaled sell fee & holder bonus split
//! - [`dump`]: Dump detection & intervention sizing
//! - [`form`]: Launch form & wallet address validation
//! - [`timeline`]: Trade plan replay up to graduation
//! - [`verifier`]: Table and split consistency checks
//! - [`plot`]: Visualization (optional in binaries)

/// Calculator error type
pub mod error;

/// Graduation threshold and pool split
pub mod graduation;

/// Bonding curve price interpolation
pub mod curve;

/// Diamond-hand sell fee
pub mod diamond;

/// Dump event detection
pub mod dump;

/// Launch form validators
pub mod form;

/// Launch-to-graduation simulation
pub mod timeline;

/// Verification tools for the table and split invariants
pub mod verifier;

/// Visualization utilities for generating charts
pub mod plot;

pub use error::{CalcError, CalcResult};
