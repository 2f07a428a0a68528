//! Bar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single instrument on a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Returns true if every OHLCV field is a finite number.
    pub fn is_valid(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }

    /// Name of the first non-finite field, if any.
    pub fn first_invalid_field(&self) -> Option<&'static str> {
        if !self.open.is_finite() {
            Some("open")
        } else if !self.high.is_finite() {
            Some("high")
        } else if !self.low.is_finite() {
            Some("low")
        } else if !self.close.is_finite() {
            Some("close")
        } else if !self.volume.is_finite() {
            Some("volume")
        } else {
            None
        }
    }
}
