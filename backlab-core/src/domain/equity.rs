//! EquityPoint — portfolio value at one bar close.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Portfolio value (cash + marked-to-market position) at a bar's close.
/// The run loop appends exactly one per bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equity_point_serialization_roundtrip() {
        let p = EquityPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            equity: 100_000.0,
        };
        let json = serde_json::to_string(&p).unwrap();
        let deser: EquityPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(p, deser);
    }
}
