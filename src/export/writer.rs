//! CSV Writer Module
//! Serialises the cleaned table and the aggregates. Pure serialisation; any
//! write failure is fatal to the pipeline.

use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

use crate::stats::CategoryValue;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Write the cleaned table, all rows and derived columns included.
pub fn write_cleaned(df: &DataFrame, path: &Path) -> Result<(), ExportError> {
    let mut file = create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df.clone())?;
    Ok(())
}

/// Write one category -> value aggregate as a two-column CSV.
pub fn write_category_values(
    rows: &[CategoryValue],
    label_column: &str,
    value_column: &str,
    path: &Path,
) -> Result<(), ExportError> {
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    let values: Vec<f64> = rows.iter().map(|r| r.value).collect();

    let mut df = DataFrame::new(vec![
        Column::new(label_column.into(), labels),
        Column::new(value_column.into(), values),
    ])?;

    let mut file = create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    Ok(())
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleaned_export_round_trips() {
        let df = df!(
            "Date" => ["2023-02-01", "2023-02-03"],
            "Confectionary" => ["Toffee", "Fudge"],
            "RevenueGBP" => [50.0f64, 100.0],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");
        write_cleaned(&df, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Date,Confectionary,RevenueGBP"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn aggregate_export_keeps_order() {
        let rows = vec![
            CategoryValue {
                label: "England".to_string(),
                value: 300.0,
            },
            CategoryValue {
                label: "Wales".to_string(),
                value: 250.0,
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.csv");
        write_category_values(&rows, "CountryUK", "RevenueGBP", &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "CountryUK,RevenueGBP");
        assert!(lines[1].starts_with("England,300"));
        assert!(lines[2].starts_with("Wales,250"));
    }

    #[test]
    fn unwritable_destination_is_fatal() {
        let rows = [];
        let err = write_category_values(&rows, "A", "B", Path::new("/no/such/dir/out.csv"))
            .unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
