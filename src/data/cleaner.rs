//! Data Cleaner Module
//! Normalises, deduplicates and enriches the raw sales table.

use polars::prelude::*;
use thiserror::Error;

use super::record::SalesRecord;

/// Day-first date convention used by the source spreadsheet.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Column names collide after normalisation: {0}")]
    ColumnCollision(String),
    #[error("Date column has unexpected dtype: {0}")]
    BadDateDtype(String),
}

/// The cleaned table, frozen after [`clean`] returns: the frame feeds the CSV
/// export, the typed records feed aggregation and chart rendering.
pub struct CleanedSales {
    pub frame: DataFrame,
    pub records: Vec<SalesRecord>,
}

/// Normalise one raw header: trim, spaces to underscores, the currency token
/// `(£)` to `GBP`, then strip any remaining parentheses.
pub fn normalise_column_name(raw: &str) -> String {
    raw.trim()
        .replace(' ', "_")
        .replace("(£)", "GBP")
        .replace(['(', ')'], "")
}

/// Clean the raw sales table. Operations in order: normalise column names,
/// parse dates (unparseable -> null), drop exact-duplicate rows, drop rows
/// without a date, sort ascending by date, derive Year / Month /
/// Profit_Margin_%. Idempotent on already-clean input.
pub fn clean(df: DataFrame) -> Result<CleanedSales, CleanError> {
    let rows_in = df.height();

    let df = normalise_columns(df)?;
    let df = parse_dates(df)?;

    let frame = df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .filter(col("Date").is_not_null())
        .sort(["Date"], SortMultipleOptions::default())
        .with_columns([
            col("Date").dt().year().alias("Year"),
            col("Date").dt().to_string("%B").alias("Month"),
            // Zero revenue leaves the margin undefined; keep it null rather
            // than letting an infinity leak into the aggregates.
            when(col("RevenueGBP").cast(DataType::Float64).neq(lit(0.0)))
                .then(
                    col("ProfitGBP").cast(DataType::Float64)
                        / col("RevenueGBP").cast(DataType::Float64)
                        * lit(100.0),
                )
                .otherwise(lit(NULL))
                .alias("Profit_Margin_%"),
        ])
        .collect()?;

    let records = SalesRecord::from_frame(&frame)?;
    log::info!(
        "cleaned sales table: {} rows in, {} rows kept",
        rows_in,
        frame.height()
    );

    Ok(CleanedSales { frame, records })
}

fn normalise_columns(mut df: DataFrame) -> Result<DataFrame, CleanError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalise_column_name(name.as_str()))
        .collect();

    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(CleanError::ColumnCollision(name.clone()));
        }
    }

    df.set_column_names(names)?;
    Ok(df)
}

/// Parse the Date column day-first, coercing unparseable values to null. A
/// second cleaning pass sees an already-parsed Date column and leaves it be.
fn parse_dates(df: DataFrame) -> Result<DataFrame, CleanError> {
    match df.column("Date")?.dtype() {
        DataType::Date => Ok(df),
        DataType::String => {
            let options = StrptimeOptions {
                format: Some(DATE_FORMAT.into()),
                strict: false,
                ..Default::default()
            };
            Ok(df
                .lazy()
                .with_column(col("Date").str().to_date(options))
                .collect()?)
        }
        other => Err(CleanError::BadDateDtype(format!("{other}"))),
    }
}
