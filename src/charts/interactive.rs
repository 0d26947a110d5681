//! Interactive Chart Renderer
//! Writes self-contained plotly.js HTML documents, with trace data serialised
//! through serde_json.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::path::Path;

use super::{confectionary_types, palette_hex};
use crate::data::SalesRecord;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

/// Grouped bar chart: profit per confectionary, one bar group per country.
pub fn render_profit_by_region(records: &[SalesRecord], path: &Path) -> Result<()> {
    let types = confectionary_types(records);
    let mut countries: Vec<String> = Vec::new();
    for r in records {
        if !countries.contains(&r.country) {
            countries.push(r.country.clone());
        }
    }

    let traces: Vec<Value> = countries
        .iter()
        .enumerate()
        .map(|(i, country)| {
            let profits: Vec<f64> = types
                .iter()
                .map(|t| {
                    records
                        .iter()
                        .filter(|r| &r.country == country && &r.confectionary == t)
                        .map(|r| r.profit_gbp)
                        .sum()
                })
                .collect();
            json!({
                "type": "bar",
                "name": country,
                "x": types,
                "y": profits,
                "marker": {"color": palette_hex(i)},
            })
        })
        .collect();

    let layout = json!({
        "title": {"text": "Profit by Confectionary and Region"},
        "barmode": "group",
        "xaxis": {"title": {"text": "Confectionary"}},
        "yaxis": {"title": {"text": "Profit (£)"}},
    });

    write_plotly_html(path, "Profit by Confectionary and Region", &traces, &layout)
}

/// Line chart: revenue over time, one trace per confectionary.
pub fn render_revenue_trend(records: &[SalesRecord], path: &Path) -> Result<()> {
    let traces = revenue_traces(records, "lines");
    let layout = json!({
        "title": {"text": "Revenue Trend Over Time"},
        "xaxis": {"title": {"text": "Date"}},
        "yaxis": {"title": {"text": "Revenue (£)"}},
    });
    write_plotly_html(path, "Revenue Trend Over Time", &traces, &layout)
}

/// Box plot: profit margin distribution per confectionary.
pub fn render_margin_distribution(records: &[SalesRecord], path: &Path) -> Result<()> {
    let traces: Vec<Value> = confectionary_types(records)
        .iter()
        .enumerate()
        .map(|(i, confectionary)| {
            let margins: Vec<f64> = records
                .iter()
                .filter(|r| &r.confectionary == confectionary)
                .filter_map(|r| r.profit_margin_pct)
                .collect();
            json!({
                "type": "box",
                "name": confectionary,
                "y": margins,
                "marker": {"color": palette_hex(i)},
            })
        })
        .collect();

    let layout = json!({
        "title": {"text": "Profit Margin Distribution by Confectionary"},
        "xaxis": {"title": {"text": "Confectionary"}},
        "yaxis": {"title": {"text": "Profit Margin (%)"}},
    });

    write_plotly_html(
        path,
        "Profit Margin Distribution by Confectionary",
        &traces,
        &layout,
    )
}

/// Combined dashboard view: lines+markers revenue trend per confectionary.
pub fn render_dashboard(records: &[SalesRecord], path: &Path) -> Result<()> {
    let traces = revenue_traces(records, "lines+markers");
    let layout = json!({
        "title": {"text": "Combined Revenue Trend Dashboard View"},
        "xaxis": {"title": {"text": "Date"}},
        "yaxis": {"title": {"text": "Revenue (£)"}},
    });
    write_plotly_html(path, "Combined Revenue Trend Dashboard View", &traces, &layout)
}

/// One revenue-vs-date scatter trace per confectionary type.
fn revenue_traces(records: &[SalesRecord], mode: &str) -> Vec<Value> {
    confectionary_types(records)
        .iter()
        .enumerate()
        .map(|(i, confectionary)| {
            let subset: Vec<&SalesRecord> = records
                .iter()
                .filter(|r| &r.confectionary == confectionary)
                .collect();
            let dates: Vec<String> = subset
                .iter()
                .map(|r| r.date.format("%Y-%m-%d").to_string())
                .collect();
            let revenues: Vec<f64> = subset.iter().map(|r| r.revenue_gbp).collect();
            json!({
                "type": "scatter",
                "mode": mode,
                "name": confectionary,
                "x": dates,
                "y": revenues,
                "line": {"color": palette_hex(i)},
            })
        })
        .collect()
}

fn write_plotly_html(path: &Path, title: &str, traces: &[Value], layout: &Value) -> Result<()> {
    let data = serde_json::to_string(traces)?;
    let layout = serde_json::to_string(layout)?;
    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>{title}</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:95vh;"></div>
<script>
Plotly.newPlot("chart", {data}, {layout});
</script>
</body>
</html>
"#
    );

    std::fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_record;

    fn sample_records() -> Vec<SalesRecord> {
        vec![
            test_record((2023, 1, 5), "Fudge", "England", 10, 100.0, 20.0),
            test_record((2023, 1, 6), "Toffee", "Wales", 5, 50.0, 10.0),
            test_record((2023, 2, 1), "Fudge", "Wales", 8, 80.0, 16.0),
        ]
    }

    #[test]
    fn writes_a_plotly_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.html");
        render_revenue_trend(&sample_records(), &path).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Plotly.newPlot"));
        assert!(html.contains("Revenue Trend Over Time"));
        assert!(html.contains("Fudge"));
        assert!(html.contains("2023-01-05"));
    }

    #[test]
    fn grouped_bar_has_one_trace_per_country() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profit.html");
        render_profit_by_region(&sample_records(), &path).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("\"barmode\":\"group\""));
        assert!(html.contains("England"));
        assert!(html.contains("Wales"));
    }

    #[test]
    fn box_plot_skips_undefined_margins() {
        let mut records = sample_records();
        records[0].profit_margin_pct = None;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("margins.html");
        render_margin_distribution(&records, &path).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("\"type\":\"box\""));
        assert!(!html.contains("null"));
    }
}
