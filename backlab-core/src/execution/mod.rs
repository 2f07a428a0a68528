//! Order execution simulation.

pub mod broker;

pub use broker::Broker;

use serde::{Deserialize, Serialize};

/// When a signal's fill is priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillTiming {
    /// Fill at the close of the bar that produced the signal. This is the
    /// classic simplification: a strategy deciding off that same close
    /// trades on information from the instant it acts, so results carry a
    /// one-bar optimism.
    #[default]
    SignalClose,
    /// Fill at the next bar's open; a signal on the final bar is dropped.
    NextBarOpen,
}

/// Broker-side run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Starting cash. Must be > 0.
    pub initial_capital: f64,
    /// Commission as a fraction of traded notional per fill. Must be >= 0.
    pub commission_rate: f64,
    /// Fraction of available cash committed to each entry, in (0, 1].
    pub position_size_fraction: f64,
    #[serde(default)]
    pub fill_timing: FillTiming,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            commission_rate: 0.0005,
            position_size_fraction: 0.95,
            fill_timing: FillTiming::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fill_timing_is_signal_close() {
        assert_eq!(ExecutionConfig::default().fill_timing, FillTiming::SignalClose);
    }

    #[test]
    fn config_deserializes_without_fill_timing() {
        let parsed: ExecutionConfig = serde_json::from_str(
            r#"{"initial_capital":50000.0,"commission_rate":0.001,"position_size_fraction":1.0}"#,
        )
        .unwrap();
        assert_eq!(parsed.initial_capital, 50_000.0);
        assert_eq!(parsed.fill_timing, FillTiming::SignalClose);
    }
}
