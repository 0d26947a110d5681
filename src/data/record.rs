//! Typed sales record, materialised once from the cleaned frame so the
//! aggregator and renderers work over explicit types instead of untyped
//! column lookups.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// One row of cleaned sales data.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub confectionary: String,
    pub country: String,
    pub units_sold: i64,
    pub revenue_gbp: f64,
    pub profit_gbp: f64,
    /// None when revenue is zero and the margin is undefined.
    pub profit_margin_pct: Option<f64>,
    pub year: i32,
    pub month: String,
}

impl SalesRecord {
    /// Materialise typed records from a cleaned frame. Expects the cleaned
    /// schema: parsed Date plus the derived columns.
    pub fn from_frame(df: &DataFrame) -> PolarsResult<Vec<SalesRecord>> {
        let dates: Vec<Option<NaiveDate>> = df
            .column("Date")?
            .as_materialized_series()
            .date()?
            .as_date_iter()
            .collect();
        let confectionary = df.column("Confectionary")?.str()?.clone();
        let country = df.column("CountryUK")?.str()?.clone();
        let units = df.column("Units_Sold")?.cast(&DataType::Int64)?;
        let units = units.i64()?;
        let revenue = df.column("RevenueGBP")?.cast(&DataType::Float64)?;
        let revenue = revenue.f64()?;
        let profit = df.column("ProfitGBP")?.cast(&DataType::Float64)?;
        let profit = profit.f64()?;
        let margin = df.column("Profit_Margin_%")?.f64()?.clone();

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            // The cleaner drops null dates before this point
            let Some(date) = dates[i] else { continue };
            records.push(SalesRecord {
                date,
                confectionary: confectionary.get(i).unwrap_or_default().to_string(),
                country: country.get(i).unwrap_or_default().to_string(),
                units_sold: units.get(i).unwrap_or(0),
                revenue_gbp: revenue.get(i).unwrap_or(0.0),
                profit_gbp: profit.get(i).unwrap_or(0.0),
                profit_margin_pct: margin.get(i),
                year: date.year(),
                month: date.format("%B").to_string(),
            });
        }
        Ok(records)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Shorthand for building records in aggregator and chart tests.
    pub(crate) fn record(
        date: (i32, u32, u32),
        confectionary: &str,
        country: &str,
        units_sold: i64,
        revenue_gbp: f64,
        profit_gbp: f64,
    ) -> SalesRecord {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        SalesRecord {
            date,
            confectionary: confectionary.to_string(),
            country: country.to_string(),
            units_sold,
            revenue_gbp,
            profit_gbp,
            profit_margin_pct: (revenue_gbp != 0.0).then(|| profit_gbp / revenue_gbp * 100.0),
            year: date.year(),
            month: date.format("%B").to_string(),
        }
    }
}
