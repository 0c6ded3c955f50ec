//! Visualization utilities for generating charts

use crate::curve::PriceCurve;
use crate::timeline::TimelineRow;
use anyhow::Result;
use plotters::prelude::*;

/// Generates a price vs supply chart sampled over `[0, max_supply]`
pub fn plot_price_vs_supply<C: PriceCurve>(c: &C, max_supply: u64, out_path: &str) -> Result<()> {
    let root = BitMapBackend::new(out_path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let samples = 1_000u64;
    let step = (max_supply / samples).max(1);
    let data: Vec<(f64, f64)> = (0..=samples)
        .map(|i| {
            let s = (i * step).min(max_supply);
            (s as f64, c.price_at(s))
        })
        .collect();
    let x_max = (max_supply as f64).max(1.0);
    let y_max = data.iter().map(|(_, y)| *y).fold(0.0, f64::max).max(1e-12);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(format!("Price vs Supply ({})", c.name()), ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..(y_max * 1.05))?;
    chart.configure_mesh().draw()?;
    chart.draw_series(LineSeries::new(data, &BLACK))?;
    root.present()?;
    Ok(())
}

/// Generates a chart showing the sell fee as a function of sale progress
pub fn plot_fee_vs_progress(compute_fee: impl Fn(f64) -> f64, out_path: &str) -> Result<()> {
    let root = BitMapBackend::new(out_path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let pts: Vec<(f64, f64)> = (0..=1000)
        .map(|v| {
            let p = v as f64 / 10.0;
            (p, compute_fee(p))
        })
        .collect();
    let y_max = pts.iter().map(|(_, y)| *y).fold(0.0, f64::max).max(1e-12);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Diamond-Hand Sell Fee vs Sale Progress (%)", ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..100.0, 0.0..(y_max * 1.05))?;
    chart.configure_mesh().draw()?;
    chart.draw_series(LineSeries::new(pts, &BLACK))?;
    root.present()?;
    Ok(())
}

/// Generates a step chart of GALA raised per plan step
pub fn plot_timeline(rows: &[TimelineRow], threshold: f64, out_path: &str) -> Result<()> {
    let root = BitMapBackend::new(out_path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut data: Vec<(f64, f64)> = vec![(0.0, 0.0)];
    for r in rows {
        let prev = data.last().map(|(_, y)| *y).unwrap_or(0.0);
        data.push((r.step as f64, prev));
        data.push((r.step as f64, r.raised_cum)); // step
    }
    let x_max = (rows.len() as f64).max(1.0);
    let y_max = data.iter().map(|(_, y)| *y).fold(threshold, f64::max).max(1e-12);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("GALA Raised per Step", ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..x_max, 0.0..(y_max * 1.05))?;
    chart.configure_mesh().draw()?;
    chart.draw_series(LineSeries::new(data, &BLACK))?;
    chart.draw_series(LineSeries::new(vec![(0.0, threshold), (x_max, threshold)], &RED))?;
    root.present()?;
    Ok(())
}
