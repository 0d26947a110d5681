//! Export module - CSV artifacts

mod writer;

pub use writer::{write_category_values, write_cleaned, ExportError};
