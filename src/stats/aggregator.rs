//! Aggregator Module
//! Pure, read-only queries over the cleaned sales records.

use crate::data::SalesRecord;

/// One entry of an ordered category -> value mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
}

/// The (year, month) group with the highest revenue sum.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakPeriod {
    pub year: i32,
    pub month: String,
    pub revenue_gbp: f64,
}

/// The three aggregates fanned out to the renderers and exporters.
#[derive(Debug, Clone)]
pub struct SalesAggregates {
    pub margin_by_type: Vec<CategoryValue>,
    pub revenue_by_region: Vec<CategoryValue>,
    pub peak_period: Option<PeakPeriod>,
}

/// Descriptive summary of one numeric column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub column: &'static str,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

pub fn compute(records: &[SalesRecord]) -> SalesAggregates {
    SalesAggregates {
        margin_by_type: average_margin_by_type(records),
        revenue_by_region: revenue_by_region(records),
        peak_period: peak_revenue_period(records),
    }
}

/// Mean profit margin per confectionary type, sorted descending. Rows with an
/// undefined margin are excluded from the mean, not counted as zero.
pub fn average_margin_by_type(records: &[SalesRecord]) -> Vec<CategoryValue> {
    let mut means = grouped_mean(
        records
            .iter()
            .filter_map(|r| r.profit_margin_pct.map(|m| (r.confectionary.as_str(), m))),
    );
    sort_descending(&mut means);
    means
}

/// Total revenue per country/region, sorted descending.
pub fn revenue_by_region(records: &[SalesRecord]) -> Vec<CategoryValue> {
    let mut totals = grouped_sum(
        records
            .iter()
            .map(|r| (r.country.as_str(), r.revenue_gbp)),
    );
    sort_descending(&mut totals);
    totals
}

/// The (year, month) group with the maximum revenue sum. Records arrive in
/// date order, so groups accumulate chronologically and a stable descending
/// sort resolves ties to the first-encountered group.
pub fn peak_revenue_period(records: &[SalesRecord]) -> Option<PeakPeriod> {
    let mut periods: Vec<(i32, String, f64)> = Vec::new();
    for r in records {
        match periods
            .iter_mut()
            .find(|(year, month, _)| *year == r.year && *month == r.month)
        {
            Some((_, _, sum)) => *sum += r.revenue_gbp,
            None => periods.push((r.year, r.month.clone(), r.revenue_gbp)),
        }
    }

    periods.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
    periods
        .into_iter()
        .next()
        .map(|(year, month, revenue_gbp)| PeakPeriod {
            year,
            month,
            revenue_gbp,
        })
}

/// Count / mean / std / min / max for each numeric column, mirroring the
/// summary the pipeline logs at startup. Undefined margins are skipped.
pub fn describe(records: &[SalesRecord]) -> Vec<ColumnSummary> {
    let units: Vec<f64> = records.iter().map(|r| r.units_sold as f64).collect();
    let revenue: Vec<f64> = records.iter().map(|r| r.revenue_gbp).collect();
    let profit: Vec<f64> = records.iter().map(|r| r.profit_gbp).collect();
    let margin: Vec<f64> = records.iter().filter_map(|r| r.profit_margin_pct).collect();

    vec![
        summarise("Units_Sold", &units),
        summarise("RevenueGBP", &revenue),
        summarise("ProfitGBP", &profit),
        summarise("Profit_Margin_%", &margin),
    ]
}

fn summarise(column: &'static str, values: &[f64]) -> ColumnSummary {
    let n = values.len();
    if n == 0 {
        return ColumnSummary {
            column,
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        };
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    ColumnSummary {
        column,
        count: n,
        mean,
        std: variance.sqrt(),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Sum values per label, preserving first-encounter order.
fn grouped_sum<'a>(items: impl Iterator<Item = (&'a str, f64)>) -> Vec<CategoryValue> {
    let mut groups: Vec<CategoryValue> = Vec::new();
    for (label, value) in items {
        match groups.iter_mut().find(|g| g.label == label) {
            Some(g) => g.value += value,
            None => groups.push(CategoryValue {
                label: label.to_string(),
                value,
            }),
        }
    }
    groups
}

/// Mean of values per label, preserving first-encounter order.
fn grouped_mean<'a>(items: impl Iterator<Item = (&'a str, f64)>) -> Vec<CategoryValue> {
    let mut groups: Vec<(CategoryValue, usize)> = Vec::new();
    for (label, value) in items {
        match groups.iter_mut().find(|(g, _)| g.label == label) {
            Some((g, count)) => {
                g.value += value;
                *count += 1;
            }
            None => groups.push((
                CategoryValue {
                    label: label.to_string(),
                    value,
                },
                1,
            )),
        }
    }

    groups
        .into_iter()
        .map(|(mut g, count)| {
            g.value /= count as f64;
            g
        })
        .collect()
}

fn sort_descending(groups: &mut [CategoryValue]) {
    groups.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_record;

    #[test]
    fn margin_mean_excludes_undefined_margins() {
        let mut records = vec![
            test_record((2023, 1, 5), "Fudge", "England", 10, 100.0, 10.0),
            test_record((2023, 1, 6), "Fudge", "England", 4, 0.0, 5.0),
            test_record((2023, 1, 7), "Fudge", "Wales", 8, 100.0, 30.0),
        ];
        records[1].profit_margin_pct = None;

        let margins = average_margin_by_type(&records);
        assert_eq!(margins.len(), 1);
        assert_eq!(margins[0].label, "Fudge");
        assert!((margins[0].value - 20.0).abs() < 1e-9);
    }

    #[test]
    fn margin_by_type_sorted_descending() {
        let records = vec![
            test_record((2023, 1, 5), "Toffee", "England", 10, 100.0, 10.0),
            test_record((2023, 1, 6), "Fudge", "England", 10, 100.0, 40.0),
            test_record((2023, 1, 7), "Mints", "Wales", 10, 100.0, 25.0),
        ];

        let labels: Vec<String> = average_margin_by_type(&records)
            .into_iter()
            .map(|g| g.label)
            .collect();
        assert_eq!(labels, vec!["Fudge", "Mints", "Toffee"]);
    }

    #[test]
    fn region_revenue_sums_and_sorts() {
        let records = vec![
            test_record((2023, 1, 5), "Fudge", "Wales", 10, 100.0, 10.0),
            test_record((2023, 1, 6), "Toffee", "England", 10, 300.0, 40.0),
            test_record((2023, 1, 7), "Mints", "Wales", 10, 150.0, 25.0),
        ];

        let totals = revenue_by_region(&records);
        assert_eq!(totals[0].label, "England");
        assert_eq!(totals[0].value, 300.0);
        assert_eq!(totals[1].label, "Wales");
        assert_eq!(totals[1].value, 250.0);
    }

    #[test]
    fn peak_period_picks_highest_month() {
        let records = vec![
            test_record((2023, 1, 5), "Fudge", "England", 10, 200.0, 10.0),
            test_record((2023, 1, 20), "Toffee", "England", 10, 300.0, 40.0),
            test_record((2023, 2, 3), "Mints", "Wales", 10, 700.0, 25.0),
        ];

        let peak = peak_revenue_period(&records).unwrap();
        assert_eq!(peak.year, 2023);
        assert_eq!(peak.month, "February");
        assert_eq!(peak.revenue_gbp, 700.0);
    }

    #[test]
    fn peak_period_tie_goes_to_first_encountered() {
        let records = vec![
            test_record((2023, 1, 5), "Fudge", "England", 10, 500.0, 10.0),
            test_record((2023, 2, 3), "Mints", "Wales", 10, 500.0, 25.0),
        ];

        let peak = peak_revenue_period(&records).unwrap();
        assert_eq!(peak.month, "January");
    }

    #[test]
    fn empty_input_yields_empty_aggregates() {
        let aggregates = compute(&[]);
        assert!(aggregates.margin_by_type.is_empty());
        assert!(aggregates.revenue_by_region.is_empty());
        assert!(aggregates.peak_period.is_none());
    }

    #[test]
    fn describe_covers_numeric_columns() {
        let records = vec![
            test_record((2023, 1, 5), "Fudge", "England", 10, 100.0, 20.0),
            test_record((2023, 1, 6), "Toffee", "Wales", 20, 300.0, 60.0),
        ];

        let summaries = describe(&records);
        assert_eq!(summaries.len(), 4);
        let revenue = &summaries[1];
        assert_eq!(revenue.column, "RevenueGBP");
        assert_eq!(revenue.count, 2);
        assert_eq!(revenue.mean, 200.0);
        assert_eq!(revenue.min, 100.0);
        assert_eq!(revenue.max, 300.0);
    }
}
