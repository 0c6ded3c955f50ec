//! Launch-to-graduation simulation over a trade plan

use crate::curve::PriceCurve;
use crate::diamond::DiamondHandFee;
use crate::graduation::{GraduationParams, GraduationResult};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Direction of a trade against the curve
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    /// GALA flows into the curve
    Buy,
    /// GALA flows out of the curve
    Sell,
}

/// One step of a trade plan, denominated in GALA
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeStep {
    /// Buy or sell
    pub action: TradeAction,
    /// GALA amount
    pub amount: f64,
}

impl TradeStep {
    /// Shorthand for a buy step
    pub const fn buy(amount: f64) -> Self { Self { action: TradeAction::Buy, amount } }
}

/// Four buys that together cross the production threshold
pub const DEFAULT_PLAN: [TradeStep; 4] = [
    TradeStep::buy(200_000.0),
    TradeStep::buy(300_000.0),
    TradeStep::buy(400_000.0),
    TradeStep::buy(740_986.0),
];

/// State after one step of the plan
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    /// 1-based step index
    pub step: usize,
    /// Buy or sell
    pub action: TradeAction,
    /// GALA traded this step
    pub amount: f64,
    /// Circulating supply after the step
    pub supply: u64,
    /// Spot price at that supply
    pub price: f64,
    /// GALA held by the curve after the step
    pub raised_cum: f64,
    /// Progress toward the threshold, percent, capped at 100
    pub progress_pct: f64,
    /// Diamond-hand sell fee at this progress (decimal)
    pub sell_fee: f64,
    /// Whether this step graduated the token
    pub graduated: bool,
}

/// Full simulation outcome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// One row per executed step
    pub rows: Vec<TimelineRow>,
    /// Split at the graduating step, if any
    pub graduation: Option<GraduationResult>,
}

/// Replays `plan` on `curve` until it graduates or runs out.
///
/// Buys mint tokens at the curve's average price, sells burn them. Neither
/// supply nor GALA raised can go below zero. Steps after graduation are not run.
pub fn simulate<C: PriceCurve>(
    plan: &[TradeStep],
    curve: &C,
    params: &GraduationParams,
    fee: &DiamondHandFee,
) -> Result<Timeline> {
    params.validate()?;
    let mut rows = Vec::with_capacity(plan.len());
    let mut raised = 0.0_f64;
    let mut supply = 0u64;

    for (i, trade) in plan.iter().enumerate() {
        if !trade.amount.is_finite() || trade.amount < 0.0 {
            return Err(anyhow!("step {}: amount must be finite and ≥ 0 (got {})", i + 1, trade.amount));
        }
        match trade.action {
            TradeAction::Buy => {
                supply = supply.saturating_add(curve.tokens_for_amount(supply, trade.amount));
                raised += trade.amount;
            }
            TradeAction::Sell => {
                supply -= curve.tokens_for_proceeds(supply, trade.amount);
                raised = (raised - trade.amount).max(0.0);
            }
        }
        let progress_pct = (raised / params.threshold * 100.0).min(100.0);
        let result = params.evaluate(raised);
        rows.push(TimelineRow {
            step: i + 1,
            action: trade.action,
            amount: trade.amount,
            supply,
            price: curve.price_at(supply),
            raised_cum: raised,
            progress_pct,
            sell_fee: fee.sell_fee(progress_pct),
            graduated: result.graduated,
        });
        if result.graduated {
            log::info!("graduated at step {} with {raised} GALA raised, supply {supply}", i + 1);
            return Ok(Timeline { rows, graduation: Some(result) });
        }
    }
    log::info!("plan finished without graduating ({raised} GALA raised, supply {supply})");
    Ok(Timeline { rows, graduation: None })
}

/// Reads a trade plan from CSV with an `action,amount` header
pub fn read_plan<R: Read>(reader: R) -> Result<Vec<TradeStep>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).comment(Some(b'#')).from_reader(reader);
    let mut plan = Vec::new();
    for (i, rec) in rdr.deserialize().enumerate() {
        let step: TradeStep = rec.with_context(|| format!("plan row {}", i + 1))?;
        plan.push(step);
    }
    if plan.is_empty() {
        return Err(anyhow!("trade plan is empty"));
    }
    Ok(plan)
}
