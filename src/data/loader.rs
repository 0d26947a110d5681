//! CSV Data Loader Module
//! Reads the raw sales table from disk using Polars.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

use super::cleaner::normalise_column_name;

/// Columns the pipeline cannot run without, identified by their
/// post-normalisation names.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Date",
    "Confectionary",
    "CountryUK",
    "Units_Sold",
    "RevenueGBP",
    "ProfitGBP",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Input file not found: {0}")]
    MissingFile(String),
    #[error("Required column missing from input: {0}")]
    MissingColumn(String),
}

/// Load the sales CSV into a DataFrame.
///
/// Fatal on a missing/unreadable file or an absent required column; there is
/// no recovery path for a bad input file.
pub fn load_sales_csv(file_path: &str) -> Result<DataFrame, LoaderError> {
    if !Path::new(file_path).is_file() {
        return Err(LoaderError::MissingFile(file_path.to_string()));
    }

    // Lazy scan for memory efficiency, then collect
    let df = LazyCsvReader::new(file_path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    ensure_required_columns(&df)?;
    Ok(df)
}

/// Check the six required source columns are present. Raw headers vary
/// ("Units Sold", "Revenue(£)"), so compare normalised names.
fn ensure_required_columns(df: &DataFrame) -> Result<(), LoaderError> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalise_column_name(name.as_str()))
        .collect();

    for required in REQUIRED_COLUMNS {
        if !present.iter().any(|name| name == required) {
            return Err(LoaderError::MissingColumn(required.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_fatal() {
        let err = load_sales_csv("no_such_file.csv").unwrap_err();
        assert!(matches!(err, LoaderError::MissingFile(_)));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Date,Confectionary,Units Sold").unwrap();
        writeln!(file, "01/02/2023,Fudge,10").unwrap();

        let err = load_sales_csv(path.to_str().unwrap()).unwrap_err();
        match err {
            LoaderError::MissingColumn(col) => assert_eq!(col, "CountryUK"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loads_full_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Date,Confectionary,CountryUK,Units Sold,Revenue(£),Profit(£)").unwrap();
        writeln!(file, "01/02/2023,Fudge,England,10,100.0,25.0").unwrap();
        writeln!(file, "02/02/2023,Toffee,Wales,5,50.0,10.0").unwrap();

        let df = load_sales_csv(path.to_str().unwrap()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 6);
    }
}
