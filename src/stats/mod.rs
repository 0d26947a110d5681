//! Stats module - grouped aggregates over the cleaned records

mod aggregator;

pub use aggregator::{
    average_margin_by_type, compute, describe, peak_revenue_period, revenue_by_region,
    CategoryValue, ColumnSummary, PeakPeriod, SalesAggregates,
};
