//! Diamond-hand sell fee and holder bonus distribution

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// Default base sell fee (decimal, 1%)
pub const DEFAULT_BASE_FEE: f64 = 0.01;
/// Extra multiple of the base fee charged at 100% sale progress
pub const DEFAULT_MAX_MULTIPLIER: f64 = 10.0;

/// Sell fee that grows with (progress/100)^2.
///
/// `fee = base_fee * (1 + (p/100)^2 * max_multiplier)`, so a sale that is
/// complete costs `(1 + max_multiplier)` times the base fee.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiamondHandFee {
    /// Fee at 0% progress (decimal)
    pub base_fee: f64,
    /// Added multiple of the base fee at 100% progress
    pub max_multiplier: f64,
}

impl Default for DiamondHandFee {
    fn default() -> Self { Self { base_fee: DEFAULT_BASE_FEE, max_multiplier: DEFAULT_MAX_MULTIPLIER } }
}

impl DiamondHandFee {
    /// Quadratic progress factor in [0, 1]. Progress is clamped to [0, 100].
    #[inline]
    pub fn progress_factor(progress_pct: f64) -> f64 { (progress_pct.clamp(0.0, 100.0) / 100.0).powi(2) }

    /// Sell fee (decimal) at a sale progress percentage
    pub fn sell_fee(&self, progress_pct: f64) -> f64 {
        self.base_fee * (1.0 + Self::progress_factor(progress_pct) * self.max_multiplier)
    }

    /// Upper bound of the fee, reached at 100% progress
    pub fn max_fee(&self) -> f64 { self.base_fee * (1.0 + self.max_multiplier) }
}

/// Sell fee at `progress_pct` with the default 10x ramp
pub fn sell_fee(progress_pct: f64, base_fee: f64) -> f64 {
    DiamondHandFee { base_fee, ..DiamondHandFee::default() }.sell_fee(progress_pct)
}

/// A holder eligible for the diamond-hand bonus
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    /// Wallet address
    pub address: String,
    /// Token balance held
    pub balance: f64,
}

/// Bonus share assigned to one holder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Wallet address
    pub address: String,
    /// Tokens assigned
    pub distribution: f64,
}

/// Splits `total` across holders in proportion to their balances
pub fn holder_distribution(holders: &[Holder], total: f64) -> CalcResult<Vec<Allocation>> {
    if let Some(h) = holders.iter().find(|h| !h.balance.is_finite() || h.balance < 0.0) {
        return Err(CalcError::InvalidInput(format!(
            "balance of {} must be finite and ≥ 0 (got {})",
            h.address, h.balance
        )));
    }
    let total_balance: f64 = holders.iter().map(|h| h.balance).sum();
    if total_balance <= 0.0 {
        return Err(CalcError::EmptyDistribution);
    }
    Ok(holders
        .iter()
        .map(|h| Allocation {
            address: h.address.clone(),
            distribution: h.balance / total_balance * total,
        })
        .collect())
}
