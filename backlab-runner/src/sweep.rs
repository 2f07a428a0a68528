//! Parameter sweep over strategy configurations.
//!
//! Runs share no mutable state (the engine is a pure function of its
//! inputs), so the grid is dispatched with rayon without any locking.

use crate::config::RunConfig;
use crate::metrics::PerformanceReport;
use crate::runner::run_single;
use backlab_core::feed::BarSeries;
use backlab_core::strategy::Strategy;
use rayon::prelude::*;
use tracing::warn;

/// Grid of moving-average crossover parameters.
#[derive(Debug, Clone)]
pub struct ParamGrid {
    pub fast_periods: Vec<usize>,
    pub slow_periods: Vec<usize>,
}

impl ParamGrid {
    /// Fast periods 5/10/20 against slow periods 30/50/100.
    pub fn ma_crossover_default() -> Self {
        Self {
            fast_periods: vec![5, 10, 20],
            slow_periods: vec![30, 50, 100],
        }
    }

    /// Upper bound on grid size (invalid fast >= slow pairs are skipped).
    pub fn size(&self) -> usize {
        self.fast_periods.len() * self.slow_periods.len()
    }

    /// Expand into concrete configurations, skipping fast >= slow.
    pub fn generate_configs(&self, base: &RunConfig) -> Vec<RunConfig> {
        let mut configs = Vec::new();
        for &fast in &self.fast_periods {
            for &slow in &self.slow_periods {
                if fast >= slow {
                    continue;
                }
                let mut config = base.clone();
                config.strategy = Strategy::MaCrossover {
                    fast_period: fast,
                    slow_period: slow,
                };
                configs.push(config);
            }
        }
        configs
    }
}

/// One row of sweep output.
#[derive(Debug, Clone)]
pub struct SweepEntry {
    pub run_id: String,
    pub strategy: String,
    pub metrics: PerformanceReport,
}

/// Run every configuration against the same series, in parallel, and
/// rank by Sharpe ratio (best first). Configurations that fail
/// validation (e.g. a window longer than the series) are logged and
/// skipped.
pub fn run_sweep(configs: &[RunConfig], series: &BarSeries) -> Vec<SweepEntry> {
    let mut entries: Vec<SweepEntry> = configs
        .par_iter()
        .filter_map(|config| match run_single(config, series) {
            Ok(report) => Some(SweepEntry {
                run_id: report.run_id,
                strategy: report.strategy,
                metrics: report.metrics,
            }),
            Err(error) => {
                warn!(strategy = %config.strategy.describe(), %error, "sweep run skipped");
                None
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.metrics
            .sharpe_ratio
            .partial_cmp(&a.metrics.sharpe_ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> RunConfig {
        RunConfig::new(
            "TEST",
            Strategy::MaCrossover {
                fast_period: 5,
                slow_period: 30,
            },
        )
    }

    #[test]
    fn grid_skips_degenerate_pairs() {
        let grid = ParamGrid {
            fast_periods: vec![10, 50],
            slow_periods: vec![30, 100],
        };
        let configs = grid.generate_configs(&base_config());
        // (10,30), (10,100), (50,100) — (50,30) is skipped.
        assert_eq!(configs.len(), 3);
        for config in &configs {
            if let Strategy::MaCrossover {
                fast_period,
                slow_period,
            } = config.strategy
            {
                assert!(fast_period < slow_period);
            } else {
                panic!("unexpected strategy variant");
            }
        }
    }

    #[test]
    fn default_grid_is_fully_valid() {
        let grid = ParamGrid::ma_crossover_default();
        assert_eq!(grid.generate_configs(&base_config()).len(), grid.size());
    }
}
