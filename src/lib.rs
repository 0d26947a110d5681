//! Confectionary Insights - sales data cleaning, aggregation and chart export.
//!
//! One-shot pipeline: load the sales CSV, clean and enrich it, compute grouped
//! aggregates, render static PNG and interactive HTML charts, and export the
//! cleaned table plus aggregates as CSV.

pub mod charts;
pub mod data;
pub mod export;
pub mod pipeline;
pub mod stats;
