//! Static Chart Renderer
//! Writes the four PNG charts with plotters.

use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate};
use plotters::prelude::*;
use std::path::Path;

use super::{confectionary_types, palette_rgb};
use crate::data::SalesRecord;
use crate::stats::CategoryValue;

const CHART_SIZE: (u32, u32) = (1000, 625);

fn series_color(index: usize) -> RGBColor {
    let (r, g, b) = palette_rgb(index);
    RGBColor(r, g, b)
}

/// Bar chart: average profit margin per confectionary type.
pub fn render_margin_bar(margins: &[CategoryValue], path: &Path) -> Result<()> {
    if margins.is_empty() {
        return Ok(());
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = margins.iter().map(|m| m.value).fold(0.0f64, f64::max);
    let labels: Vec<String> = margins.iter().map(|m| m.label.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Profit Margin by Confectionary", ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0..margins.len() as i32, 0f64..(y_max * 1.1).max(1.0))?;

    chart
        .configure_mesh()
        .x_desc("Confectionary Type")
        .y_desc("Profit Margin (%)")
        .x_labels(margins.len())
        .x_label_formatter(&|idx| {
            labels
                .get(*idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()?;

    for (i, margin) in margins.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(i as i32, 0.0), (i as i32 + 1, margin.value)],
            series_color(i).filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}

/// Multi-series line chart: revenue over time, one line per confectionary.
pub fn render_revenue_trend_png(records: &[SalesRecord], path: &Path) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    // Records are date-sorted, so the range is first..last
    let first = records[0].date;
    let mut last = records[records.len() - 1].date;
    if last <= first {
        last = first + Days::new(1);
    }
    let y_max = records
        .iter()
        .map(|r| r.revenue_gbp)
        .fold(0.0f64, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption("Revenue Over Time by Confectionary", ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(first..last, 0f64..(y_max * 1.1).max(1.0))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Revenue (£)")
        .draw()?;

    for (i, confectionary) in confectionary_types(records).iter().enumerate() {
        let color = series_color(i);
        let points: Vec<(NaiveDate, f64)> = records
            .iter()
            .filter(|r| &r.confectionary == confectionary)
            .map(|r| (r.date, r.revenue_gbp))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(confectionary.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart.draw_series(
            points
                .into_iter()
                .map(|point| Circle::new(point, 3, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.85))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Heatmap: revenue sum per month (rows, calendar order) and country (cols).
pub fn render_monthly_heatmap(records: &[SalesRecord], path: &Path) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let months = months_in_calendar_order(records);
    let mut countries: Vec<String> = Vec::new();
    for r in records {
        if !countries.contains(&r.country) {
            countries.push(r.country.clone());
        }
    }
    countries.sort();

    // Pivot: sums[month][country]
    let mut sums = vec![vec![0.0f64; countries.len()]; months.len()];
    for r in records {
        let row = months.iter().position(|m| *m == r.month).unwrap_or(0);
        let col = countries.iter().position(|c| *c == r.country).unwrap_or(0);
        sums[row][col] += r.revenue_gbp;
    }
    let max_sum = sums
        .iter()
        .flatten()
        .copied()
        .fold(0.0f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let month_labels = months.clone();
    let country_labels = countries.clone();
    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly Revenue Heatmap by Region", ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(90)
        .build_cartesian_2d(0..countries.len() as i32, 0..months.len() as i32)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Region")
        .y_desc("Month")
        .x_labels(countries.len())
        .y_labels(months.len())
        .x_label_formatter(&|idx| {
            country_labels
                .get(*idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_label_formatter(&|idx| {
            month_labels
                .get(*idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(sums.iter().enumerate().flat_map(|(row, row_sums)| {
        row_sums.iter().enumerate().map(move |(col, &sum)| {
            Rectangle::new(
                [(col as i32, row as i32), (col as i32 + 1, row as i32 + 1)],
                heat_color(sum / max_sum).filled(),
            )
        })
    }))?;

    root.present()?;
    Ok(())
}

/// Scatter: units sold vs profit, coloured by type, sized by revenue.
pub fn render_units_profit_scatter(records: &[SalesRecord], path: &Path) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = records.iter().map(|r| r.units_sold as f64).fold(0.0, f64::max);
    let y_min = records
        .iter()
        .map(|r| r.profit_gbp)
        .fold(0.0f64, f64::min);
    let y_max = records
        .iter()
        .map(|r| r.profit_gbp)
        .fold(0.0f64, f64::max);
    let revenue_max = records
        .iter()
        .map(|r| r.revenue_gbp)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Units Sold vs Profit by Confectionary", ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(
            0f64..(x_max * 1.05).max(1.0),
            (y_min * 1.05)..(y_max * 1.05).max(1.0),
        )?;

    chart
        .configure_mesh()
        .x_desc("Units Sold")
        .y_desc("Profit (£)")
        .draw()?;

    for (i, confectionary) in confectionary_types(records).iter().enumerate() {
        let color = series_color(i);
        chart
            .draw_series(
                records
                    .iter()
                    .filter(|r| &r.confectionary == confectionary)
                    .map(|r| {
                        // Point radius encodes revenue
                        let radius = 3 + (r.revenue_gbp / revenue_max * 9.0).round() as i32;
                        Circle::new(
                            (r.units_sold as f64, r.profit_gbp),
                            radius,
                            color.mix(0.7).filled(),
                        )
                    }),
            )?
            .label(confectionary.clone())
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.85))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Months present in the records, in calendar order.
fn months_in_calendar_order(records: &[SalesRecord]) -> Vec<String> {
    let mut months: Vec<(u32, String)> = Vec::new();
    for r in records {
        if !months.iter().any(|(_, name)| *name == r.month) {
            months.push((r.date.month(), r.month.clone()));
        }
    }
    months.sort_by_key(|(number, _)| *number);
    months.into_iter().map(|(_, name)| name).collect()
}

/// Light-to-dark amber ramp for heatmap cells, t in [0, 1].
fn heat_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(lerp(255, 179), lerp(247, 77), lerp(219, 8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_record;

    #[test]
    fn month_rows_follow_calendar_order() {
        let records = vec![
            test_record((2023, 11, 5), "Fudge", "England", 10, 100.0, 10.0),
            test_record((2023, 3, 6), "Toffee", "Wales", 10, 100.0, 40.0),
            test_record((2023, 7, 7), "Mints", "England", 10, 100.0, 25.0),
        ];
        assert_eq!(
            months_in_calendar_order(&records),
            vec!["March", "July", "November"]
        );
    }

    #[test]
    fn heat_color_spans_the_ramp() {
        assert_eq!(heat_color(0.0), RGBColor(255, 247, 219));
        assert_eq!(heat_color(1.0), RGBColor(179, 77, 8));
        assert_eq!(heat_color(-1.0), heat_color(0.0));
        assert_eq!(heat_color(2.0), heat_color(1.0));
    }
}
