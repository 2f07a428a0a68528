//! Full report of a single run — the structure consumers read.

use crate::metrics::PerformanceReport;
use backlab_core::domain::{EquityPoint, Trade};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Complete, serializable output of one run: identification, the
/// performance report, the trade log, and the equity curve. Printers and
/// exporters only read this; they never reach back into the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Content-addressed hash of the configuration that produced this.
    pub run_id: String,
    pub symbol: String,
    pub strategy: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub bar_count: usize,
    pub initial_capital: f64,
    pub final_equity: f64,
    pub metrics: PerformanceReport,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

impl BacktestReport {
    pub fn total_profit(&self) -> f64 {
        self.final_equity - self.initial_capital
    }
}
