//! Validated bar feed.
//!
//! [`BarSeries`] is the only way bars enter the engine. Construction
//! enforces the feed contract — non-empty, strictly ascending unique
//! dates, all OHLCV fields finite — so the run loop never has to re-check
//! data quality.

use crate::domain::Bar;
use serde::{Deserialize, Serialize};

/// An ordered, validated sequence of bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bar>", into = "Vec<Bar>")]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Validate and wrap a bar sequence.
    ///
    /// Rejects empty input, out-of-order or duplicate dates, and any bar
    /// with a non-finite field. Errors report the offending index.
    pub fn new(bars: Vec<Bar>) -> Result<Self, FeedError> {
        if bars.is_empty() {
            return Err(FeedError::Empty);
        }
        for (index, bar) in bars.iter().enumerate() {
            if let Some(field) = bar.first_invalid_field() {
                return Err(FeedError::InvalidField { index, field });
            }
            if index > 0 {
                let prev = bars[index - 1].date;
                if bar.date == prev {
                    return Err(FeedError::DuplicateDate {
                        index,
                        date: bar.date,
                    });
                }
                if bar.date < prev {
                    return Err(FeedError::OutOfOrderDate {
                        index,
                        date: bar.date,
                    });
                }
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// A series is never empty; kept for slice-like ergonomics.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &Bar {
        &self.bars[0]
    }

    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }
}

impl TryFrom<Vec<Bar>> for BarSeries {
    type Error = FeedError;

    fn try_from(bars: Vec<Bar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

impl From<BarSeries> for Vec<Bar> {
    fn from(series: BarSeries) -> Self {
        series.bars
    }
}

/// Violations of the feed contract, all fatal at ingestion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedError {
    #[error("bar sequence is empty")]
    Empty,

    #[error("bar {index}: date {date} is not after the previous bar")]
    OutOfOrderDate { index: usize, date: chrono::NaiveDate },

    #[error("bar {index}: duplicate date {date}")]
    DuplicateDate { index: usize, date: chrono::NaiveDate },

    #[error("bar {index}: field '{field}' is not a finite number")]
    InvalidField { index: usize, field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000.0,
        }
    }

    #[test]
    fn accepts_valid_series() {
        let series = BarSeries::new(vec![bar(2, 100.0), bar(3, 101.0), bar(4, 99.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first().close, 100.0);
        assert_eq!(series.last().close, 99.0);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(BarSeries::new(vec![]), Err(FeedError::Empty));
    }

    #[test]
    fn rejects_duplicate_date() {
        let err = BarSeries::new(vec![bar(2, 100.0), bar(2, 101.0)]).unwrap_err();
        assert!(matches!(err, FeedError::DuplicateDate { index: 1, .. }));
    }

    #[test]
    fn rejects_out_of_order_date() {
        let err = BarSeries::new(vec![bar(5, 100.0), bar(3, 101.0)]).unwrap_err();
        assert!(matches!(err, FeedError::OutOfOrderDate { index: 1, .. }));
    }

    #[test]
    fn rejects_non_finite_field() {
        let mut bad = bar(3, 101.0);
        bad.high = f64::NAN;
        let err = BarSeries::new(vec![bar(2, 100.0), bad]).unwrap_err();
        assert_eq!(
            err,
            FeedError::InvalidField {
                index: 1,
                field: "high"
            }
        );
    }

    #[test]
    fn serde_rejects_invalid_series() {
        // Deserialization goes through the same validation as new().
        let json = r#"[
            {"date":"2024-01-03","open":1.0,"high":1.0,"low":1.0,"close":1.0,"volume":1.0},
            {"date":"2024-01-02","open":1.0,"high":1.0,"low":1.0,"close":1.0,"volume":1.0}
        ]"#;
        assert!(serde_json::from_str::<BarSeries>(json).is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let series = BarSeries::new(vec![bar(2, 100.0), bar(3, 101.0)]).unwrap();
        let json = serde_json::to_string(&series).unwrap();
        let deser: BarSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(series, deser);
    }
}
