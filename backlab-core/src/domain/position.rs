//! Position — an open long holding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An open long position. At most one exists at any time; the broker
/// converts it into a [`super::Trade`] when it is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub entry_date: NaiveDate,
    pub entry_bar: usize,
    pub entry_price: f64,
    /// Number of units held; always > 0 (long-only).
    pub quantity: f64,
    /// Commission charged on the entry fill, carried into the trade record.
    pub entry_commission: f64,
}

impl Position {
    pub fn market_value(&self, current_price: f64) -> f64 {
        self.quantity * current_price
    }

    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        self.quantity * (current_price - self.entry_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_position() -> Position {
        Position {
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            entry_bar: 3,
            entry_price: 100.0,
            quantity: 50.0,
            entry_commission: 2.5,
        }
    }

    #[test]
    fn market_value_tracks_price() {
        assert_eq!(sample_position().market_value(110.0), 5_500.0);
    }

    #[test]
    fn unrealized_pnl_sign() {
        let pos = sample_position();
        assert!(pos.unrealized_pnl(110.0) > 0.0);
        assert!(pos.unrealized_pnl(90.0) < 0.0);
        assert_eq!(pos.unrealized_pnl(100.0), 0.0);
    }
}
