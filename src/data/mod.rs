//! Data module - CSV loading, cleaning and typed records

mod cleaner;
mod loader;
mod record;

pub use cleaner::{clean, normalise_column_name, CleanError, CleanedSales, DATE_FORMAT};
pub use loader::{load_sales_csv, LoaderError, REQUIRED_COLUMNS};
pub use record::SalesRecord;

#[cfg(test)]
pub(crate) use record::tests::record as test_record;
