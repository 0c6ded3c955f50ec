//! Error type shared by the calculators

use thiserror::Error;

/// Failures raised by calculators when an input falls outside its domain
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    /// A scalar input was NaN, infinite or otherwise unusable
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A parameter set would produce an inconsistent split
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Selling more tokens than are in circulation
    #[error("cannot sell {requested} tokens from a supply of {available}")]
    InsufficientSupply {
        /// Tokens the caller asked to sell
        requested: u64,
        /// Tokens currently in circulation
        available: u64,
    },

    /// Pro-rata split over holders whose balances sum to zero
    #[error("holder balances sum to zero, nothing to distribute against")]
    EmptyDistribution,

    /// Price table points must be strictly ascending by supply
    #[error("price table is not strictly ascending at index {0}")]
    UnsortedTable(usize),
}

/// Result alias for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;
