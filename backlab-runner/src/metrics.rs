//! Performance metrics — pure functions from equity curve and trade log.
//!
//! Every ratio that involves returns is derived from the one daily-return
//! series computed off the equity curve; nothing is re-derived from a
//! second returns path, so the figures cannot drift apart.
//!
//! Arithmetic edge cases never panic and never leak NaN: undefined
//! windows resolve to 0, and the only non-finite sentinel is
//! `f64::INFINITY` for the profit factor of a run with gains and no
//! losses.

use backlab_core::domain::{EquityPoint, Trade};
use serde::{Deserialize, Serialize};

/// Analyzer inputs that are not part of the run itself. Passed explicitly
/// so results are reproducible without ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Annual risk-free rate as a fraction (0.05 = 5%).
    pub risk_free_annual_rate: f64,
    /// Trading days per year used for annualization. Must be > 0.
    pub trading_days_per_year: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_free_annual_rate: 0.0,
            trading_days_per_year: 252,
        }
    }
}

/// Aggregate performance report for a single run.
///
/// Percentages are in percent units (21.374 = 21.374%); the ratios
/// (sharpe, sortino, calmar, recovery, profit factor) are unitless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub total_return: f64,
    pub annual_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,
    /// Always <= 0; 0 only for a never-declining equity curve.
    pub max_drawdown: f64,
    /// Longest stretch of bars spent below the running equity peak.
    pub drawdown_duration: usize,
    pub recovery_factor: f64,
    pub win_rate: f64,
    /// `f64::INFINITY` when there are gains and no losses.
    pub profit_factor: f64,
    pub best_day: f64,
    pub worst_day: f64,
    pub trade_count: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
}

impl PerformanceReport {
    /// Compute the full report. Pure and lock-free; safe to call from
    /// concurrent sweep workers.
    pub fn compute(
        equity_curve: &[EquityPoint],
        trades: &[Trade],
        config: &AnalyticsConfig,
    ) -> Self {
        let returns = daily_returns(equity_curve);
        let (max_dd, dd_duration) = drawdown_profile(&returns);
        let total = total_return(equity_curve);
        let annual = annual_return(equity_curve, config.trading_days_per_year);

        let winning_trades = trades.iter().filter(|t| t.is_winner()).count();

        Self {
            total_return: total,
            annual_return: annual,
            volatility: volatility(&returns, config.trading_days_per_year),
            sharpe_ratio: sharpe_ratio(&returns, config),
            sortino_ratio: sortino_ratio(&returns, config),
            calmar_ratio: ratio_over_drawdown(annual, max_dd),
            max_drawdown: max_dd,
            drawdown_duration: dd_duration,
            recovery_factor: ratio_over_drawdown(total, max_dd),
            win_rate: win_rate(trades),
            profit_factor: profit_factor(trades),
            best_day: best_day(&returns),
            worst_day: worst_day(&returns),
            trade_count: trades.len(),
            winning_trades,
            losing_trades: trades.len() - winning_trades,
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Daily returns off the equity curve: equity_t / equity_{t-1} - 1.
pub fn daily_returns(equity_curve: &[EquityPoint]) -> Vec<f64> {
    if equity_curve.len() < 2 {
        return Vec::new();
    }
    equity_curve
        .windows(2)
        .map(|w| {
            if w[0].equity > 0.0 {
                w[1].equity / w[0].equity - 1.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Total return in percent: (last / first - 1) * 100.
pub fn total_return(equity_curve: &[EquityPoint]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let first = equity_curve[0].equity;
    let last = equity_curve[equity_curve.len() - 1].equity;
    if first <= 0.0 {
        return 0.0;
    }
    (last / first - 1.0) * 100.0
}

/// Annualized return in percent, compounding the total return over
/// n_years = (N - 1) / trading_days_per_year.
pub fn annual_return(equity_curve: &[EquityPoint], trading_days_per_year: usize) -> f64 {
    if equity_curve.len() < 2 || trading_days_per_year == 0 {
        return 0.0;
    }
    let first = equity_curve[0].equity;
    let last = equity_curve[equity_curve.len() - 1].equity;
    if first <= 0.0 || last <= 0.0 {
        return 0.0;
    }
    let n_years = (equity_curve.len() - 1) as f64 / trading_days_per_year as f64;
    if n_years <= 0.0 {
        return 0.0;
    }
    let annualized = ((last / first).powf(1.0 / n_years) - 1.0) * 100.0;
    // Degenerate curves (extreme single-bar moves) can overflow the
    // compounding; resolve those to 0 rather than leak an infinity.
    if annualized.is_finite() {
        annualized
    } else {
        0.0
    }
}

/// Annualized volatility in percent: std(daily returns) * sqrt(days) * 100.
pub fn volatility(returns: &[f64], trading_days_per_year: usize) -> f64 {
    if trading_days_per_year == 0 {
        return 0.0;
    }
    sample_std(returns) * (trading_days_per_year as f64).sqrt() * 100.0
}

/// Annualized Sharpe ratio: excess mean daily return over its standard
/// deviation. 0 when there are fewer than 2 returns or no dispersion.
pub fn sharpe_ratio(returns: &[f64], config: &AnalyticsConfig) -> f64 {
    if returns.len() < 2 || config.trading_days_per_year == 0 {
        return 0.0;
    }
    let days = config.trading_days_per_year as f64;
    let std = sample_std(returns);
    if std == 0.0 {
        return 0.0;
    }
    let excess = mean(returns) - config.risk_free_annual_rate / days;
    excess / std * days.sqrt()
}

/// Annualized Sortino ratio: same numerator as Sharpe, but the deviation
/// of negative daily returns only. 0 when fewer than two returns are
/// negative (the downside deviation is undefined below that).
pub fn sortino_ratio(returns: &[f64], config: &AnalyticsConfig) -> f64 {
    if returns.len() < 2 || config.trading_days_per_year == 0 {
        return 0.0;
    }
    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    if downside.len() < 2 {
        return 0.0;
    }
    let downside_std = sample_std(&downside);
    if downside_std == 0.0 {
        return 0.0;
    }
    let days = config.trading_days_per_year as f64;
    let excess = mean(returns) - config.risk_free_annual_rate / days;
    excess / downside_std * days.sqrt()
}

/// Maximum drawdown (percent, <= 0) and the longest drawdown stretch in
/// bars, both taken from the cumulative product of (1 + r) against its
/// running maximum.
pub fn drawdown_profile(returns: &[f64]) -> (f64, usize) {
    if returns.is_empty() {
        return (0.0, 0);
    }
    let mut cum = 1.0_f64;
    let mut running_max = 1.0_f64;
    let mut max_dd = 0.0_f64;
    let mut longest = 0_usize;
    let mut current = 0_usize;

    for r in returns {
        cum *= 1.0 + r;
        if cum > running_max {
            running_max = cum;
        }
        if cum < running_max {
            current += 1;
            longest = longest.max(current);
            let dd = (cum - running_max) / running_max;
            if dd < max_dd {
                max_dd = dd;
            }
        } else {
            current = 0;
        }
    }
    (max_dd * 100.0, longest)
}

/// Winning trades over total, in percent. 0 with no trades.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64 * 100.0
}

/// Gross profit over gross loss. 0 when both are zero; `f64::INFINITY`
/// when there are gains and no losses — the one documented non-finite
/// sentinel.
pub fn profit_factor(trades: &[Trade]) -> f64 {
    let gross_profit: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
    let gross_loss: f64 = trades
        .iter()
        .filter(|t| t.pnl < 0.0)
        .map(|t| t.pnl.abs())
        .sum();

    if gross_loss == 0.0 {
        if gross_profit == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        gross_profit / gross_loss
    }
}

/// Best single-day return in percent. 0 with no returns.
pub fn best_day(returns: &[f64]) -> f64 {
    returns
        .iter()
        .copied()
        .fold(None, |best: Option<f64>, r| Some(best.map_or(r, |b| b.max(r))))
        .unwrap_or(0.0)
        * 100.0
}

/// Worst single-day return in percent. 0 with no returns.
pub fn worst_day(returns: &[f64]) -> f64 {
    returns
        .iter()
        .copied()
        .fold(None, |worst: Option<f64>, r| {
            Some(worst.map_or(r, |w| w.min(r)))
        })
        .unwrap_or(0.0)
        * 100.0
}

fn ratio_over_drawdown(percent_value: f64, max_drawdown_pct: f64) -> f64 {
    if max_drawdown_pct == 0.0 {
        return 0.0;
    }
    (percent_value / 100.0) / (max_drawdown_pct / 100.0).abs()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). 0 for fewer than two
/// values.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
