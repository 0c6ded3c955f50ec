//! Consistency checks for the price table and graduation split

use crate::curve::{PriceCurve, PriceTable};
use crate::graduation::GraduationParams;
use anyhow::{anyhow, Result};

/// Conservation tolerance for a single split, in GALA
pub const SPLIT_TOLERANCE: f64 = 1e-6;

/// Report on a price table
#[derive(Debug)]
pub struct TableReport {
    /// Number of calibration points
    pub points: usize,
    /// Largest |price_at(point.supply) - point.price| over all points
    pub max_point_err: f64,
    /// Segments where the price falls as supply grows
    pub falling_segments: usize,
    /// Low clamp returns the first price, high clamp the last
    pub clamps_ok: bool,
}

/// Check every calibration point reproduces and both ends clamp
pub fn verify_table(table: &PriceTable) -> Result<TableReport> {
    let pts = table.points();
    let mut max_err = 0.0_f64;
    for p in pts {
        let err = (table.price_at(p.supply) - p.price).abs();
        if !err.is_finite() { return Err(anyhow!("price at supply {} is not finite", p.supply)); }
        max_err = max_err.max(err);
    }
    let falling = pts.windows(2).filter(|w| w[1].price < w[0].price).count();

    let first = pts[0];
    let last = pts[pts.len() - 1];
    let clamps_ok = table.price_at(first.supply / 2) == first.price
        && table.price_at(last.supply.saturating_mul(2)) == last.price;

    Ok(TableReport { points: pts.len(), max_point_err: max_err, falling_segments: falling, clamps_ok })
}

/// Report on a batch of graduation splits
#[derive(Debug)]
pub struct DistributionCheck {
    /// Market caps that graduated
    pub graduated: usize,
    /// Market caps that did not graduate
    pub skipped: usize,
    /// Largest per-split conservation error
    pub max_split_err: f64,
    /// Compensated sum of every graduated market cap
    pub market_cap_sum: f64,
    /// Compensated sum of every allocation
    pub allocated_sum: f64,
}

/// Neumaier running sum
#[derive(Default)]
struct Compensated {
    sum: f64,
    comp: f64,
}

impl Compensated {
    fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() { self.comp += (self.sum - t) + x; } else { self.comp += (x - t) + self.sum; }
        self.sum = t;
    }
    fn total(&self) -> f64 { self.sum + self.comp }
}

/// Verify conservation, the fixed creator reward and the exact fee rate
/// for every graduating market cap in `market_caps`
pub fn verify_distribution(params: &GraduationParams, market_caps: &[f64]) -> Result<DistributionCheck> {
    params.validate()?;
    let mut caps = Compensated::default();
    let mut alloc = Compensated::default();
    let mut max_err = 0.0_f64;
    let mut graduated = 0;

    for &mc in market_caps {
        let r = params.evaluate(mc);
        if !r.graduated { continue; }
        graduated += 1;

        let err = (r.total() - mc).abs();
        if err > SPLIT_TOLERANCE {
            return Err(anyhow!("split at {} leaks {:.3e} GALA", mc, err));
        }
        if r.creator_reward != params.creator_reward {
            return Err(anyhow!("creator reward at {} is {}, expected {}", mc, r.creator_reward, params.creator_reward));
        }
        let fee_ratio = r.platform_fee / mc;
        if (fee_ratio - params.platform_fee_rate).abs() > 1e-12 {
            return Err(anyhow!("fee ratio at {} is {}, expected {}", mc, fee_ratio, params.platform_fee_rate));
        }
        max_err = max_err.max(err);
        caps.add(mc);
        alloc.add(r.creator_reward);
        alloc.add(r.platform_fee);
        alloc.add(r.dex_pool_amount);
    }

    Ok(DistributionCheck {
        graduated,
        skipped: market_caps.len() - graduated,
        max_split_err: max_err,
        market_cap_sum: caps.total(),
        allocated_sum: alloc.total(),
    })
}
