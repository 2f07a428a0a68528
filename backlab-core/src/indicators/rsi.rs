//! Relative Strength Index (RSI).
//!
//! Uses the simple average of gains and losses over the last `period`
//! bar-to-bar changes (no exponential smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss); avg_loss == 0 -> 100.
//! Warm-up: period bars (needs `period` changes).

use super::Indicator;
use crate::domain::Bar;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
    prev_close: Option<f64>,
    /// Last `period` bar-to-bar changes.
    changes: VecDeque<f64>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
            prev_close: None,
            changes: VecDeque::with_capacity(period + 1),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn update(&mut self, bar: &Bar) -> Option<f64> {
        if let Some(prev) = self.prev_close {
            self.changes.push_back(bar.close - prev);
            if self.changes.len() > self.period {
                self.changes.pop_front();
            }
        }
        self.prev_close = Some(bar.close);

        if self.changes.len() < self.period {
            return None;
        }

        let n = self.period as f64;
        let avg_gain = self.changes.iter().filter(|&&c| c > 0.0).sum::<f64>() / n;
        let avg_loss = -self.changes.iter().filter(|&&c| c < 0.0).sum::<f64>() / n;

        if avg_loss == 0.0 {
            return Some(100.0);
        }
        let rs = avg_gain / avg_loss;
        Some(100.0 - 100.0 / (1.0 + rs))
    }
}
