//! Single-run entry point: configuration + bars in, full report out.

use crate::config::RunConfig;
use crate::metrics::PerformanceReport;
use crate::result::BacktestReport;
use anyhow::{ensure, Context, Result};
use backlab_core::engine::run_backtest;
use backlab_core::feed::BarSeries;
use tracing::info;

/// Run one backtest and assemble the full report.
pub fn run_single(config: &RunConfig, series: &BarSeries) -> Result<BacktestReport> {
    ensure!(
        config.analytics.trading_days_per_year > 0,
        "trading_days_per_year must be > 0"
    );

    info!(
        symbol = %config.symbol,
        strategy = %config.strategy.describe(),
        bars = series.len(),
        "starting backtest"
    );

    let run = run_backtest(series, &config.strategy, &config.execution)
        .with_context(|| format!("backtest for {} failed validation", config.symbol))?;

    let metrics = PerformanceReport::compute(&run.equity_curve, &run.trades, &config.analytics);

    info!(
        final_equity = run.final_equity,
        trades = run.trades.len(),
        total_return_pct = metrics.total_return,
        "backtest complete"
    );

    Ok(BacktestReport {
        run_id: config.run_id(),
        symbol: config.symbol.clone(),
        strategy: config.strategy.describe(),
        start_date: series.first().date,
        end_date: series.last().date,
        bar_count: series.len(),
        initial_capital: config.execution.initial_capital,
        final_equity: run.final_equity,
        metrics,
        trades: run.trades,
        equity_curve: run.equity_curve,
    })
}
