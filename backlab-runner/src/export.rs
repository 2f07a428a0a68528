//! Artifact export: one directory per run with the serialized report and
//! flat CSVs for the trade log and equity curve.

use crate::result::BacktestReport;
use anyhow::{Context, Result};
use backlab_core::domain::{EquityPoint, Trade};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `report.json`, `trades.csv`, and `equity.csv` under
/// `<out_dir>/<first 12 chars of run_id>/`. Returns the run directory.
pub fn save_artifacts(report: &BacktestReport, out_dir: &Path) -> Result<PathBuf> {
    let short_id: String = report.run_id.chars().take(12).collect();
    let run_dir = out_dir.join(short_id);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create {}", run_dir.display()))?;

    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    std::fs::write(run_dir.join("report.json"), json)
        .with_context(|| format!("failed to write report.json in {}", run_dir.display()))?;

    write_trades_csv(&run_dir.join("trades.csv"), &report.trades)?;
    write_equity_csv(&run_dir.join("equity.csv"), &report.equity_curve)?;

    info!(dir = %run_dir.display(), "artifacts saved");
    Ok(run_dir)
}

fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writeln!(
        file,
        "entry_date,exit_date,entry_bar,exit_bar,entry_price,exit_price,quantity,commission,pnl,return_pct"
    )?;
    for trade in trades {
        writeln!(
            file,
            "{},{},{},{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.6}",
            trade.entry_date,
            trade.exit_date,
            trade.entry_bar,
            trade.exit_bar,
            trade.entry_price,
            trade.exit_price,
            trade.quantity,
            trade.commission,
            trade.pnl,
            trade.return_pct(),
        )?;
    }
    Ok(())
}

fn write_equity_csv(path: &Path, equity_curve: &[EquityPoint]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writeln!(file, "date,equity")?;
    for point in equity_curve {
        writeln!(file, "{},{:.4}", point.date, point.equity)?;
    }
    Ok(())
}
