//! The one-shot analysis pipeline: load -> clean -> aggregate -> render/export.
//!
//! All paths are fixed constants; there is no runtime configuration. Chart
//! rendering failures are logged and skipped, load and export failures abort
//! the run.

use anyhow::Result;
use log::{info, warn};
use std::path::Path;

use crate::charts;
use crate::data::{clean, load_sales_csv};
use crate::export::{write_category_values, write_cleaned};
use crate::stats::{compute, describe};

pub const INPUT_PATH: &str = "Confectionary.csv";

pub const MARGIN_CHART_PNG: &str = "1_avg_profit_margin.png";
pub const TREND_CHART_PNG: &str = "2_revenue_trend.png";
pub const HEATMAP_CHART_PNG: &str = "3_monthly_heatmap.png";
pub const SCATTER_CHART_PNG: &str = "4_units_vs_profit.png";

pub const PROFIT_REGION_HTML: &str = "interactive_profit_region.html";
pub const REVENUE_TREND_HTML: &str = "interactive_revenue_trend.html";
pub const MARGIN_DISTRIBUTION_HTML: &str = "interactive_margin_distribution.html";
pub const DASHBOARD_HTML: &str = "interactive_dashboard.html";

pub const CLEANED_CSV: &str = "Cleaned_Confectionary.csv";
pub const AVG_MARGIN_CSV: &str = "Avg_Profit_Margin.csv";
pub const REGION_REVENUE_CSV: &str = "Region_Revenue.csv";

pub fn run() -> Result<()> {
    info!("loading {INPUT_PATH}");
    let raw = load_sales_csv(INPUT_PATH)?;
    info!("loaded {} rows, {} columns", raw.height(), raw.width());

    let cleaned = clean(raw)?;

    for summary in describe(&cleaned.records) {
        info!(
            "{}: n={} mean={:.2} std={:.2} min={:.2} max={:.2}",
            summary.column, summary.count, summary.mean, summary.std, summary.min, summary.max
        );
    }

    let aggregates = compute(&cleaned.records);
    for margin in &aggregates.margin_by_type {
        info!("avg margin {}: {:.2}%", margin.label, margin.value);
    }
    for region in &aggregates.revenue_by_region {
        info!("revenue {}: £{:.2}", region.label, region.value);
    }
    if let Some(peak) = &aggregates.peak_period {
        info!(
            "peak revenue period: {} {} (£{:.2})",
            peak.month, peak.year, peak.revenue_gbp
        );
    }

    // One rendering failure must not take the sibling charts down with it.
    let records = &cleaned.records;
    render_step(
        MARGIN_CHART_PNG,
        charts::render_margin_bar(&aggregates.margin_by_type, Path::new(MARGIN_CHART_PNG)),
    );
    render_step(
        TREND_CHART_PNG,
        charts::render_revenue_trend_png(records, Path::new(TREND_CHART_PNG)),
    );
    render_step(
        HEATMAP_CHART_PNG,
        charts::render_monthly_heatmap(records, Path::new(HEATMAP_CHART_PNG)),
    );
    render_step(
        SCATTER_CHART_PNG,
        charts::render_units_profit_scatter(records, Path::new(SCATTER_CHART_PNG)),
    );
    render_step(
        PROFIT_REGION_HTML,
        charts::render_profit_by_region(records, Path::new(PROFIT_REGION_HTML)),
    );
    render_step(
        REVENUE_TREND_HTML,
        charts::render_revenue_trend(records, Path::new(REVENUE_TREND_HTML)),
    );
    render_step(
        MARGIN_DISTRIBUTION_HTML,
        charts::render_margin_distribution(records, Path::new(MARGIN_DISTRIBUTION_HTML)),
    );
    render_step(
        DASHBOARD_HTML,
        charts::render_dashboard(records, Path::new(DASHBOARD_HTML)),
    );

    write_cleaned(&cleaned.frame, Path::new(CLEANED_CSV))?;
    write_category_values(
        &aggregates.margin_by_type,
        "Confectionary",
        "Profit_Margin_%",
        Path::new(AVG_MARGIN_CSV),
    )?;
    write_category_values(
        &aggregates.revenue_by_region,
        "CountryUK",
        "RevenueGBP",
        Path::new(REGION_REVENUE_CSV),
    )?;

    info!("analysis complete, charts and CSVs exported");
    Ok(())
}

fn render_step(name: &str, outcome: Result<()>) {
    match outcome {
        Ok(()) => info!("wrote {name}"),
        Err(err) => warn!("chart {name} failed, continuing: {err:#}"),
    }
}
