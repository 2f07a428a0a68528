//! Incremental rolling indicators.
//!
//! Indicators consume bars one at a time, in order, and yield one value
//! per bar. While the warm-up window is still filling they yield `None`
//! ("not ready"), never a numeric placeholder — strategies treat a
//! not-ready value as no signal.
//!
//! # Look-ahead guard
//! `update` only ever sees the current bar, so no indicator value at bar
//! t can depend on data from bar t+1 or later.

use crate::domain::Bar;
use std::collections::HashMap;

pub mod bollinger;
pub mod roc;
pub mod rsi;
pub mod sma;

pub use bollinger::{Bollinger, BollingerBand};
pub use roc::Roc;
pub use rsi::Rsi;
pub use sma::Sma;

/// An incrementally updated rolling indicator.
pub trait Indicator: Send + Sync {
    /// Key the value series is registered under (e.g. "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading bars for which `update` returns `None`.
    fn warmup(&self) -> usize;

    /// Feed the next bar; returns the value aligned with that bar, or
    /// `None` while the window is still filling.
    fn update(&mut self, bar: &Bar) -> Option<f64>;
}

struct SeriesTracker {
    indicator: Box<dyn Indicator>,
    /// One entry per bar seen, aligned 1:1 with the bar stream.
    values: Vec<Option<f64>>,
}

/// Owns the indicator set for one run and their per-bar value series.
///
/// The run loop calls [`IndicatorEngine::update`] exactly once per bar;
/// strategies then query current/previous values by name. Series are
/// append-only — no retroactive mutation.
#[derive(Default)]
pub struct IndicatorEngine {
    series: HashMap<String, SeriesTracker>,
    bars_seen: usize,
}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from a set of indicators.
    pub fn with_indicators(indicators: Vec<Box<dyn Indicator>>) -> Self {
        let mut engine = Self::new();
        for indicator in indicators {
            engine.register(indicator);
        }
        engine
    }

    /// Register an indicator. Must be called before the first `update`;
    /// an indicator whose name is already registered is dropped.
    pub fn register(&mut self, indicator: Box<dyn Indicator>) {
        debug_assert_eq!(self.bars_seen, 0, "register before the bar loop starts");
        let name = indicator.name().to_string();
        self.series.entry(name).or_insert(SeriesTracker {
            indicator,
            values: Vec::new(),
        });
    }

    /// Advance every registered indicator by one bar.
    pub fn update(&mut self, bar: &Bar) {
        for tracker in self.series.values_mut() {
            let value = tracker.indicator.update(bar);
            tracker.values.push(value);
        }
        self.bars_seen += 1;
    }

    /// Number of bars processed so far.
    pub fn len(&self) -> usize {
        self.bars_seen
    }

    pub fn is_empty(&self) -> bool {
        self.bars_seen == 0
    }

    /// Value of `name` at the most recent bar, if ready.
    pub fn current(&self, name: &str) -> Option<f64> {
        self.value(name, self.bars_seen.checked_sub(1)?)
    }

    /// Value of `name` at the bar before the most recent one, if ready.
    pub fn previous(&self, name: &str) -> Option<f64> {
        self.value(name, self.bars_seen.checked_sub(2)?)
    }

    /// Value of `name` at a specific bar index, if ready.
    pub fn value(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)?
            .values
            .get(bar_index)
            .copied()
            .flatten()
    }

    /// Longest warm-up among registered indicators.
    pub fn max_warmup(&self) -> usize {
        self.series
            .values()
            .map(|t| t.indicator.warmup())
            .max()
            .unwrap_or(0)
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first
/// bar), high = max(open, close) + 1.0, low = min(open, close) - 1.0.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1_000.0,
            }
        })
        .collect()
}

/// Run an indicator over a close series and collect the aligned output.
#[cfg(test)]
pub fn collect_values(indicator: &mut dyn Indicator, closes: &[f64]) -> Vec<Option<f64>> {
    make_bars(closes)
        .iter()
        .map(|bar| indicator.update(bar))
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
