//! Bar-by-bar run loop — the heart of the simulator.
//!
//! A run moves through four stages: configuration validation (nothing is
//! simulated if any check fails), the per-bar loop (indicators, then the
//! strategy decision, then the broker fill, then one equity point),
//! finalization (force-close of any open position at the last close), and
//! the assembled result.
//!
//! The loop never reads past the current bar index; with the default
//! same-close fill timing the only forward-looking artifact is the
//! documented fill assumption itself.

use crate::domain::{EquityPoint, Trade};
use crate::execution::{Broker, ExecutionConfig, FillTiming};
use crate::feed::BarSeries;
use crate::indicators::IndicatorEngine;
use crate::strategy::{Signal, Strategy, StrategyError};
use serde::{Deserialize, Serialize};

/// Invalid run configuration, rejected before any simulation step.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("initial capital must be positive, got {0}")]
    NonPositiveCapital(f64),

    #[error("commission rate must be >= 0, got {0}")]
    NegativeCommission(f64),

    #[error("position size fraction must be in (0, 1], got {0}")]
    InvalidPositionFraction(f64),

    #[error("strategy needs {warmup} warm-up bars but the series has only {bars}")]
    WarmupExceedsBars { warmup: usize, bars: usize },

    #[error(transparent)]
    Strategy(#[from] StrategyError),
}

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRun {
    pub initial_capital: f64,
    /// Equal to the last equity point: all positions are realized by then.
    pub final_equity: f64,
    /// Completed round-trip trades, in exit order.
    pub trades: Vec<Trade>,
    /// One point per bar.
    pub equity_curve: Vec<EquityPoint>,
}

impl BacktestRun {
    pub fn total_return_fraction(&self) -> f64 {
        if self.initial_capital <= 0.0 {
            return 0.0;
        }
        (self.final_equity - self.initial_capital) / self.initial_capital
    }
}

fn validate(
    series: &BarSeries,
    strategy: &Strategy,
    config: &ExecutionConfig,
) -> Result<(), ConfigError> {
    if !(config.initial_capital > 0.0) {
        return Err(ConfigError::NonPositiveCapital(config.initial_capital));
    }
    if !(config.commission_rate >= 0.0) {
        return Err(ConfigError::NegativeCommission(config.commission_rate));
    }
    if !(config.position_size_fraction > 0.0 && config.position_size_fraction <= 1.0) {
        return Err(ConfigError::InvalidPositionFraction(
            config.position_size_fraction,
        ));
    }
    strategy.validate()?;
    let warmup = strategy.warmup_bars();
    if warmup >= series.len() {
        return Err(ConfigError::WarmupExceedsBars {
            warmup,
            bars: series.len(),
        });
    }
    Ok(())
}

/// Run a strategy over a bar series.
///
/// Deterministic: identical inputs always produce an identical result.
pub fn run_backtest(
    series: &BarSeries,
    strategy: &Strategy,
    config: &ExecutionConfig,
) -> Result<BacktestRun, ConfigError> {
    validate(series, strategy, config)?;

    let mut indicators = IndicatorEngine::with_indicators(strategy.indicators());
    let mut broker = Broker::new(config);
    let mut equity_curve = Vec::with_capacity(series.len());

    let bars = series.bars();
    let last_index = bars.len() - 1;
    let mut pending: Option<Signal> = None;

    for (index, bar) in bars.iter().enumerate() {
        // A signal deferred from the previous bar fills at this open.
        if let Some(signal) = pending.take() {
            broker.apply_signal(signal, bar, index, bar.open);
        }

        indicators.update(bar);

        let signal = strategy.decide(bar, &indicators, broker.has_position());
        match config.fill_timing {
            FillTiming::SignalClose => broker.apply_signal(signal, bar, index, bar.close),
            FillTiming::NextBarOpen => {
                if signal != Signal::Hold {
                    pending = Some(signal);
                }
            }
        }

        if index == last_index {
            broker.force_close(bar, index);
        }

        equity_curve.push(EquityPoint {
            date: bar.date,
            equity: broker.equity(bar.close),
        });
    }

    let final_equity = equity_curve[last_index].equity;
    Ok(BacktestRun {
        initial_capital: config.initial_capital,
        final_equity,
        trades: broker.into_trades(),
        equity_curve,
    })
}
