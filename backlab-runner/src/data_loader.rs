//! CSV bar loading.
//!
//! Expected header: `date,open,high,low,close,volume` with ISO dates.
//! Field-level problems are reported with their row number; the assembled
//! series then goes through the feed contract (ascending unique dates,
//! finite fields) before anything downstream sees it.

use backlab_core::domain::Bar;
use backlab_core::feed::{BarSeries, FeedError};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvBar {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: invalid date '{value}'")]
    Date { row: usize, value: String },

    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// Load a bar series from a CSV file.
pub fn load_bars_csv(path: &Path) -> Result<BarSeries, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        if matches!(e.kind(), csv::ErrorKind::Io(_)) {
            LoadError::Io {
                path: path.display().to_string(),
                source: std::io::Error::other(e),
            }
        } else {
            LoadError::Csv(e)
        }
    })?;

    let mut bars = Vec::new();
    for (index, record) in reader.deserialize::<CsvBar>().enumerate() {
        let row = index + 2; // 1-based, after the header
        let record = record?;
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").map_err(|_| {
            LoadError::Date {
                row,
                value: record.date.clone(),
            }
        })?;
        bars.push(Bar {
            date,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        });
    }

    let series = BarSeries::new(bars)?;
    debug!(path = %path.display(), bars = series.len(), "loaded bar series");
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_csv() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-02,100.0,101.0,99.0,100.5,10000\n\
             2024-01-03,100.5,102.0,100.0,101.5,12000\n",
        );
        let series = load_bars_csv(file.path()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.first().close, 100.5);
        assert_eq!(series.last().volume, 12_000.0);
    }

    #[test]
    fn rejects_missing_column() {
        // No volume column: a configuration error before any simulation.
        let file = write_csv(
            "date,open,high,low,close\n\
             2024-01-02,100.0,101.0,99.0,100.5\n",
        );
        assert!(matches!(load_bars_csv(file.path()), Err(LoadError::Csv(_))));
    }

    #[test]
    fn rejects_bad_date_with_row_number() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-02,100.0,101.0,99.0,100.5,10000\n\
             02/01/2024,100.5,102.0,100.0,101.5,12000\n",
        );
        match load_bars_csv(file.path()) {
            Err(LoadError::Date { row, value }) => {
                assert_eq!(row, 3);
                assert_eq!(value, "02/01/2024");
            }
            other => panic!("expected date error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unparsable_price() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-02,abc,101.0,99.0,100.5,10000\n",
        );
        assert!(matches!(load_bars_csv(file.path()), Err(LoadError::Csv(_))));
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let file = write_csv(
            "date,open,high,low,close,volume\n\
             2024-01-03,100.0,101.0,99.0,100.5,10000\n\
             2024-01-02,100.5,102.0,100.0,101.5,12000\n",
        );
        assert!(matches!(
            load_bars_csv(file.path()),
            Err(LoadError::Feed(FeedError::OutOfOrderDate { index: 1, .. }))
        ));
    }

    #[test]
    fn rejects_missing_file() {
        assert!(matches!(
            load_bars_csv(Path::new("/nonexistent/bars.csv")),
            Err(LoadError::Io { .. })
        ));
    }
}
