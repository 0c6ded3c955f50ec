//! Graduation threshold check and reward split

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// Market cap (GALA) at which a token graduates to the DEX
pub const GRADUATION_THRESHOLD: f64 = 1_640_985.84;
/// Fixed creator reward (GALA) paid at graduation
pub const CREATOR_REWARD: f64 = 17_777.0;
/// Platform fee taken from the pool at graduation (decimal)
pub const PLATFORM_FEE_RATE: f64 = 0.05;
/// Share of the pool the DEX must receive for a split to count as healthy
pub const DEX_POOL_MIN_PERCENT: f64 = 90.0;
/// Default creator incentive as a share of the liquidity pool (decimal)
pub const CREATOR_INCENTIVE_RATE: f64 = 0.02;

const REASON_BELOW: &str = "below threshold";
const REASON_INVALID: &str = "invalid market cap";
const REASON_UNFUNDED: &str = "insufficient funds in graduation pool";

/// Graduation rule set. Defaults to the launchpad's production values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraduationParams {
    /// Market cap (GALA) at which graduation triggers, inclusive
    pub threshold: f64,
    /// Absolute creator reward (GALA)
    pub creator_reward: f64,
    /// Platform fee as a decimal share of the market cap
    pub platform_fee_rate: f64,
}

impl Default for GraduationParams {
    fn default() -> Self {
        Self {
            threshold: GRADUATION_THRESHOLD,
            creator_reward: CREATOR_REWARD,
            platform_fee_rate: PLATFORM_FEE_RATE,
        }
    }
}

/// Outcome of a graduation check
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraduationResult {
    /// Whether the token graduated
    pub graduated: bool,
    /// Creator reward paid out (0 when not graduated)
    pub creator_reward: f64,
    /// Platform fee taken (0 when not graduated)
    pub platform_fee: f64,
    /// Liquidity moved to the DEX pool (0 when not graduated)
    pub dex_pool_amount: f64,
    /// Why graduation did not happen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl GraduationResult {
    fn rejected(reason: &str) -> Self {
        Self {
            graduated: false,
            creator_reward: 0.0,
            platform_fee: 0.0,
            dex_pool_amount: 0.0,
            reason: Some(reason.to_string()),
        }
    }

    /// Sum of the three allocations
    pub fn total(&self) -> f64 { self.creator_reward + self.platform_fee + self.dex_pool_amount }
}

/// Percent breakdown of a graduation split with health checks
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    /// Creator reward (GALA)
    pub creator_reward: f64,
    /// Platform fee (GALA)
    pub platform_fee: f64,
    /// DEX pool allocation (GALA)
    pub dex_pool: f64,
    /// Creator share of the market cap, in percent
    pub creator_percent: f64,
    /// Platform share of the market cap, in percent
    pub platform_percent: f64,
    /// DEX share of the market cap, in percent
    pub dex_percent: f64,
    /// creator + platform + dex
    pub total_distributed: f64,
    /// |total_distributed - market_cap|
    pub distribution_error: f64,
    /// Conservation holds, fee is exact and the DEX keeps more than 90%
    pub is_valid: bool,
}

impl GraduationParams {
    /// Rejects parameter sets that cannot fund the creator reward at the threshold.
    pub fn validate(&self) -> CalcResult<()> {
        for (name, v) in [
            ("threshold", self.threshold),
            ("creator_reward", self.creator_reward),
            ("platform_fee_rate", self.platform_fee_rate),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(CalcError::InvalidParams(format!(
                    "{name} must be finite and ≥ 0 (got {v})"
                )));
            }
        }
        if self.platform_fee_rate >= 1.0 {
            return Err(CalcError::InvalidParams(format!(
                "platform_fee_rate must be < 1 (got {})",
                self.platform_fee_rate
            )));
        }
        let funded = self.threshold * (1.0 - self.platform_fee_rate);
        if funded < self.creator_reward {
            return Err(CalcError::InvalidParams(format!(
                "threshold {} leaves {:.2} after fees, below creator reward {}",
                self.threshold, funded, self.creator_reward
            )));
        }
        Ok(())
    }

    /// Inclusive threshold check
    pub fn should_graduate(&self, market_cap: f64) -> bool { market_cap >= self.threshold }

    /// Platform fee for a market cap
    pub fn platform_fee(&self, market_cap: f64) -> f64 { market_cap * self.platform_fee_rate }

    /// What remains for the DEX after the creator reward and platform fee
    pub fn dex_pool_allocation(&self, market_cap: f64) -> f64 {
        market_cap - self.creator_reward - self.platform_fee(market_cap)
    }

    /// Creator reward as a percentage of the market cap
    pub fn creator_reward_percentage(&self, market_cap: f64) -> f64 {
        self.creator_reward / market_cap * 100.0
    }

    /// Decides graduation and splits the pool.
    ///
    /// Never fails: invalid or unfunded market caps come back as
    /// `graduated: false` with a reason.
    pub fn evaluate(&self, market_cap: f64) -> GraduationResult {
        if !market_cap.is_finite() || market_cap < 0.0 {
            log::debug!("rejecting market cap {market_cap}: not a finite non-negative value");
            return GraduationResult::rejected(REASON_INVALID);
        }
        if !self.should_graduate(market_cap) {
            log::debug!("market cap {market_cap} below threshold {}", self.threshold);
            return GraduationResult::rejected(REASON_BELOW);
        }
        let platform_fee = self.platform_fee(market_cap);
        let dex_pool_amount = market_cap - self.creator_reward - platform_fee;
        if dex_pool_amount < 0.0 {
            log::debug!("market cap {market_cap} cannot cover reward + fee ({dex_pool_amount:.2} left)");
            return GraduationResult::rejected(REASON_UNFUNDED);
        }
        log::debug!(
            "graduated at {market_cap}: creator={} fee={platform_fee} dex={dex_pool_amount}",
            self.creator_reward
        );
        GraduationResult {
            graduated: true,
            creator_reward: self.creator_reward,
            platform_fee,
            dex_pool_amount,
            reason: None,
        }
    }

    /// Percent breakdown of the split at a market cap, whether or not it graduates
    pub fn distribution_report(&self, market_cap: f64) -> DistributionReport {
        let creator_reward = self.creator_reward;
        let platform_fee = self.platform_fee(market_cap);
        let dex_pool = self.dex_pool_allocation(market_cap);

        let creator_percent = self.creator_reward_percentage(market_cap);
        let platform_percent = platform_fee / market_cap * 100.0;
        let dex_percent = dex_pool / market_cap * 100.0;

        let total_distributed = creator_reward + platform_fee + dex_pool;
        let distribution_error = (total_distributed - market_cap).abs();
        let expected_fee_pct = self.platform_fee_rate * 100.0;

        DistributionReport {
            creator_reward,
            platform_fee,
            dex_pool,
            creator_percent,
            platform_percent,
            dex_percent,
            total_distributed,
            distribution_error,
            is_valid: distribution_error < 0.01
                && (platform_percent - expected_fee_pct).abs() < 0.01
                && dex_percent > DEX_POOL_MIN_PERCENT,
        }
    }
}

/// Graduation check against the production parameters
pub fn evaluate_graduation(market_cap: f64) -> GraduationResult {
    GraduationParams::default().evaluate(market_cap)
}

/// Inclusive threshold check against the production parameters
pub fn should_graduate(market_cap: f64) -> bool { GraduationParams::default().should_graduate(market_cap) }

/// Creator incentive paid out of a liquidity pool
pub fn creator_incentive(liquidity_pool_value: f64, rate: f64) -> f64 { liquidity_pool_value * rate }

/// Converts a GALA amount into USD at a given GALA price
pub fn usd_value(gala_amount: f64, gala_price: f64) -> f64 { gala_amount * gala_price }
