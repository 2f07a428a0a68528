//! Rate of Change (ROC).
//!
//! Percentage price change over N bars.
//! ROC[t] = (close[t] - close[t-period]) / close[t-period] * 100
//! Warm-up: period.

use super::Indicator;
use crate::domain::Bar;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Roc {
    period: usize,
    name: String,
    /// Last `period + 1` closes; the front is close[t-period].
    closes: VecDeque<f64>,
}

impl Roc {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ROC period must be >= 1");
        Self {
            period,
            name: format!("roc_{period}"),
            closes: VecDeque::with_capacity(period + 2),
        }
    }
}

impl Indicator for Roc {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn update(&mut self, bar: &Bar) -> Option<f64> {
        self.closes.push_back(bar.close);
        if self.closes.len() > self.period + 1 {
            self.closes.pop_front();
        }
        if self.closes.len() < self.period + 1 {
            return None;
        }
        let reference = *self.closes.front()?;
        if reference == 0.0 {
            return None;
        }
        Some((bar.close - reference) / reference * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, collect_values, DEFAULT_EPSILON};

    #[test]
    fn roc_basic() {
        // ROC(1): (110-100)/100*100 = 10%, (121-110)/110*100 = 10%
        let values = collect_values(&mut Roc::new(1), &[100.0, 110.0, 121.0]);
        assert!(values[0].is_none());
        assert_approx(values[1].unwrap(), 10.0, DEFAULT_EPSILON);
        assert_approx(values[2].unwrap(), 10.0, DEFAULT_EPSILON);
    }

    #[test]
    fn roc_period_2() {
        // ROC(2) at index 2: (121-100)/100*100 = 21%
        let values = collect_values(&mut Roc::new(2), &[100.0, 110.0, 121.0]);
        assert!(values[0].is_none());
        assert!(values[1].is_none());
        assert_approx(values[2].unwrap(), 21.0, DEFAULT_EPSILON);
    }

    #[test]
    fn roc_negative() {
        let values = collect_values(&mut Roc::new(1), &[100.0, 90.0]);
        assert_approx(values[1].unwrap(), -10.0, DEFAULT_EPSILON);
    }

    #[test]
    fn roc_zero_reference_not_ready() {
        let values = collect_values(&mut Roc::new(1), &[0.0, 90.0]);
        assert!(values[1].is_none());
    }

    #[test]
    fn roc_warmup() {
        assert_eq!(Roc::new(14).warmup(), 14);
    }
}
