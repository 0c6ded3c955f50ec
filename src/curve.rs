//! Bonding curve pricing from a calibrated (supply, price) table

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Generic interface for supply → price curves
pub trait PriceCurve {
    /// Returns the name/type of this curve implementation
    fn name(&self) -> &'static str;

    /// Spot price (GALA per token) at a circulating supply
    fn price_at(&self, supply: u64) -> f64;

    /// Cost of buying `tokens` starting from `current_supply`.
    ///
    /// Uses the average of the spot prices at both ends of the trade.
    fn buy_cost(&self, current_supply: u64, tokens: u64) -> f64 {
        let new_supply = current_supply.saturating_add(tokens);
        let avg = (self.price_at(current_supply) + self.price_at(new_supply)) / 2.0;
        avg * tokens as f64
    }

    /// Proceeds of selling `tokens` back into the curve from `current_supply`
    fn sell_proceeds(&self, current_supply: u64, tokens: u64) -> CalcResult<f64> {
        let new_supply = current_supply
            .checked_sub(tokens)
            .ok_or(CalcError::InsufficientSupply { requested: tokens, available: current_supply })?;
        let avg = (self.price_at(new_supply) + self.price_at(current_supply)) / 2.0;
        Ok(avg * tokens as f64)
    }

    /// Tokens minted by spending `amount` GALA from `current_supply`.
    ///
    /// Estimates at spot, then re-prices at the average of spot and the
    /// estimated end price, the same averaging `buy_cost` uses.
    fn tokens_for_amount(&self, current_supply: u64, amount: f64) -> u64 {
        let spot = self.price_at(current_supply);
        if amount.is_nan() || amount <= 0.0 || spot <= 0.0 { return 0; }
        let estimate = (amount / spot) as u64;
        let end = self.price_at(current_supply.saturating_add(estimate));
        (amount / ((spot + end) / 2.0)) as u64
    }

    /// Tokens burned to take `amount` GALA out of the curve, capped at `current_supply`
    fn tokens_for_proceeds(&self, current_supply: u64, amount: f64) -> u64 {
        let spot = self.price_at(current_supply);
        if amount.is_nan() || amount <= 0.0 || spot <= 0.0 { return 0; }
        let estimate = ((amount / spot) as u64).min(current_supply);
        let end = self.price_at(current_supply - estimate);
        ((amount / ((spot + end) / 2.0)) as u64).min(current_supply)
    }
}

/// One calibration point of the launch curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Circulating supply (tokens)
    pub supply: u64,
    /// Price at that supply (GALA)
    pub price: f64,
}

/// Calibration data for the production curve.
///
/// Price dips between 1M and 5M; this is measured data, not a smooth curve.
pub const CALIBRATION_POINTS: [PricePoint; 8] = [
    PricePoint { supply: 100_000, price: 31.2750343 },
    PricePoint { supply: 200_000, price: 90.373179 },
    PricePoint { supply: 300_000, price: 322.1326362 },
    PricePoint { supply: 400_000, price: 933.837364 },
    PricePoint { supply: 500_000, price: 2317.347211 },
    PricePoint { supply: 1_000_000, price: 31741.65481 },
    PricePoint { supply: 5_000_000, price: 9348.46001 },
    PricePoint { supply: 9_000_000, price: 35586.8634 },
];

/// Piecewise-linear price table, clamped at both ends
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceTable {
    points: Cow<'static, [PricePoint]>,
}

impl Default for PriceTable {
    fn default() -> Self { Self::calibrated() }
}

impl PriceTable {
    /// The production calibration table
    pub fn calibrated() -> Self { Self { points: Cow::Borrowed(&CALIBRATION_POINTS) } }

    /// Builds a table from custom points, strictly ascending by supply
    pub fn new(points: Vec<PricePoint>) -> CalcResult<Self> {
        if points.is_empty() {
            return Err(CalcError::InvalidInput("price table needs at least one point".into()));
        }
        if let Some(p) = points.iter().find(|p| !p.price.is_finite()) {
            return Err(CalcError::InvalidInput(format!(
                "price at supply {} is not finite",
                p.supply
            )));
        }
        if let Some(i) = points.windows(2).position(|w| w[1].supply <= w[0].supply) {
            return Err(CalcError::UnsortedTable(i + 1));
        }
        Ok(Self { points: Cow::Owned(points) })
    }

    /// Calibration points, ascending by supply
    pub fn points(&self) -> &[PricePoint] { &self.points }

    /// Lowest calibrated supply
    pub fn min_supply(&self) -> u64 { self.points[0].supply }

    /// Highest calibrated supply
    pub fn max_supply(&self) -> u64 { self.points[self.points.len() - 1].supply }
}

impl TryFrom<Vec<PricePoint>> for PriceTable {
    type Error = CalcError;
    fn try_from(points: Vec<PricePoint>) -> CalcResult<Self> { Self::new(points) }
}

impl From<PriceTable> for Vec<PricePoint> {
    fn from(table: PriceTable) -> Self { table.points.into_owned() }
}

impl PriceCurve for PriceTable {
    fn name(&self) -> &'static str { "Interpolated-Table" }

    fn price_at(&self, supply: u64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if supply <= first.supply { return first.price; }
        if supply >= last.supply { return last.price; }

        // first index whose supply is ≥ the query; never 0 after the low clamp
        let hi = self.points.partition_point(|p| p.supply < supply);
        let (p1, p2) = (self.points[hi - 1], self.points[hi]);
        if p2.supply == supply { return p2.price; }
        let ratio = (supply - p1.supply) as f64 / (p2.supply - p1.supply) as f64;
        p1.price + ratio * (p2.price - p1.price)
    }
}

/// Spot price on the production curve
pub fn price_for_supply(supply: u64) -> f64 {
    PriceTable::calibrated().price_at(supply)
}
