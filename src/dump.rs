//! Dump detection and intervention sizing

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// True when the price fell by at least `threshold_pct`.
///
/// Rises never count, whatever their size. A drop equal to the threshold counts.
pub fn is_dump_event(price_change_pct: f64, threshold_pct: f64) -> bool {
    price_change_pct < 0.0 && price_change_pct.abs() >= threshold_pct
}

/// How hard the stabiliser leans on collected fees
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionLevel {
    /// severity < 1.5
    Minimal,
    /// 1.5 ≤ severity < 2
    Standard,
    /// 2 ≤ severity < 3
    Strong,
    /// severity ≥ 3
    Emergency,
}

impl InterventionLevel {
    /// Picks the level for a severity (drop / threshold)
    pub fn from_severity(severity: f64) -> Self {
        if severity >= 3.0 {
            Self::Emergency
        } else if severity >= 2.0 {
            Self::Strong
        } else if severity >= 1.5 {
            Self::Standard
        } else {
            Self::Minimal
        }
    }

    /// Share of available fees spent at this level
    pub fn fee_utilization(self) -> f64 {
        match self {
            Self::Minimal => 0.25,
            Self::Standard => 0.5,
            Self::Strong => 0.75,
            Self::Emergency => 0.9,
        }
    }
}

/// Sized response to a price drop
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    /// Chosen level
    pub level: InterventionLevel,
    /// Fees committed to buy support
    pub fees_to_use: f64,
    /// Expected recovery, in percentage points
    pub expected_recovery: f64,
}

/// Sizes an intervention for a drop of `drop_pct` against `threshold_pct`
pub fn intervention_strength(drop_pct: f64, available_fees: f64, threshold_pct: f64) -> CalcResult<Intervention> {
    if !threshold_pct.is_finite() || threshold_pct <= 0.0 {
        return Err(CalcError::InvalidInput(format!(
            "dump threshold must be finite and > 0 (got {threshold_pct})"
        )));
    }
    if !drop_pct.is_finite() || !available_fees.is_finite() {
        return Err(CalcError::InvalidInput("drop and fees must be finite".into()));
    }
    let severity = drop_pct.abs() / threshold_pct;
    let level = InterventionLevel::from_severity(severity);
    let fees_to_use = available_fees * level.fee_utilization();
    let expected_recovery = (fees_to_use / 1000.0).min(drop_pct.abs() * 0.8);
    log::debug!("drop {drop_pct}% severity {severity:.2} → {level:?}, spending {fees_to_use}");
    Ok(Intervention { level, fees_to_use, expected_recovery })
}
