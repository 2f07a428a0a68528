//! BackLab CLI — run, sweep, and synthetic-data commands.
//!
//! Commands:
//! - `run` — execute a backtest over a CSV file, from a TOML config or a
//!   named strategy preset, print the summary, and save artifacts
//! - `sweep` — grid-search MA crossover parameters over a CSV file
//! - `synthetic` — write a deterministic synthetic bar CSV

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use backlab_core::strategy::Strategy;
use backlab_runner::{
    load_bars_csv, run_single, run_sweep, save_artifacts, synthetic_series, BacktestReport,
    ParamGrid, RunConfig,
};

#[derive(Parser)]
#[command(name = "backlab", about = "BackLab — single-instrument backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest over a CSV bar file.
    Run {
        /// CSV file with date,open,high,low,close,volume columns.
        #[arg(long)]
        data: PathBuf,

        /// Path to a TOML run configuration.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Named preset: ma_crossover, rsi, bollinger, momentum.
        #[arg(long)]
        strategy: Option<String>,

        /// Symbol label for reports (used with --strategy).
        #[arg(long, default_value = "SYMBOL")]
        symbol: String,

        /// Initial capital override.
        #[arg(long)]
        capital: Option<f64>,

        /// Commission rate override (fraction of notional per fill).
        #[arg(long)]
        commission: Option<f64>,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output: PathBuf,
    },
    /// Grid-search MA crossover parameters over a CSV bar file.
    Sweep {
        /// CSV file with date,open,high,low,close,volume columns.
        #[arg(long)]
        data: PathBuf,

        /// Symbol label for reports.
        #[arg(long, default_value = "SYMBOL")]
        symbol: String,
    },
    /// Write a deterministic synthetic bar CSV.
    Synthetic {
        /// Output CSV path.
        #[arg(long)]
        out: PathBuf,

        /// Number of bars to generate.
        #[arg(long, default_value_t = 756)]
        bars: usize,

        /// RNG seed; the same seed always yields the same file.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// First bar date (YYYY-MM-DD).
        #[arg(long, default_value = "2020-01-02")]
        start: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            data,
            config,
            strategy,
            symbol,
            capital,
            commission,
            output,
        } => run_cmd(data, config, strategy, symbol, capital, commission, output),
        Commands::Sweep { data, symbol } => sweep_cmd(&data, symbol),
        Commands::Synthetic {
            out,
            bars,
            seed,
            start,
        } => synthetic_cmd(&out, bars, seed, &start),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_cmd(
    data: PathBuf,
    config_path: Option<PathBuf>,
    preset: Option<String>,
    symbol: String,
    capital: Option<f64>,
    commission: Option<f64>,
    output: PathBuf,
) -> Result<()> {
    if config_path.is_some() && preset.is_some() {
        bail!("--config and --strategy are mutually exclusive");
    }

    let mut config = if let Some(path) = config_path {
        RunConfig::from_file(&path)?
    } else {
        let name = preset.as_deref().unwrap_or("ma_crossover");
        RunConfig::new(symbol, preset_strategy(name)?)
    };
    if let Some(capital) = capital {
        config.execution.initial_capital = capital;
    }
    if let Some(commission) = commission {
        config.execution.commission_rate = commission;
    }

    let series = load_bars_csv(&data)?;
    let report = run_single(&config, &series)?;

    print_summary(&report);

    let run_dir = save_artifacts(&report, &output)?;
    println!("Artifacts saved to: {}", run_dir.display());
    Ok(())
}

fn preset_strategy(name: &str) -> Result<Strategy> {
    Ok(match name {
        "ma_crossover" => Strategy::MaCrossover {
            fast_period: 10,
            slow_period: 30,
        },
        "rsi" => Strategy::Rsi {
            period: 14,
            lower: 30.0,
            upper: 70.0,
        },
        "bollinger" => Strategy::Bollinger {
            period: 20,
            std_multiplier: 2.0,
        },
        "momentum" => Strategy::Momentum {
            roc_period: 10,
            roc_threshold: 0.5,
        },
        _ => bail!("unknown strategy '{name}'. Valid: ma_crossover, rsi, bollinger, momentum"),
    })
}

fn sweep_cmd(data: &Path, symbol: String) -> Result<()> {
    let series = load_bars_csv(data)?;
    let base = RunConfig::new(
        symbol,
        Strategy::MaCrossover {
            fast_period: 10,
            slow_period: 30,
        },
    );
    let configs = ParamGrid::ma_crossover_default().generate_configs(&base);
    let entries = run_sweep(&configs, &series);

    if entries.is_empty() {
        println!("No configuration completed (series too short for every window).");
        return Ok(());
    }

    println!(
        "{:<24} {:>8} {:>10} {:>10} {:>8}",
        "Strategy", "Sharpe", "Return%", "MaxDD%", "Trades"
    );
    println!("{}", "-".repeat(64));
    for entry in &entries {
        println!(
            "{:<24} {:>8.3} {:>10.2} {:>10.2} {:>8}",
            entry.strategy,
            entry.metrics.sharpe_ratio,
            entry.metrics.total_return,
            entry.metrics.max_drawdown,
            entry.metrics.trade_count,
        );
    }
    Ok(())
}

fn synthetic_cmd(out: &Path, bars: usize, seed: u64, start: &str) -> Result<()> {
    if bars == 0 {
        bail!("--bars must be >= 1");
    }
    let start_date = NaiveDate::parse_from_str(start, "%Y-%m-%d")?;
    let series = synthetic_series(bars, seed, start_date);

    let mut content = String::from("date,open,high,low,close,volume\n");
    for bar in series.bars() {
        content.push_str(&format!(
            "{},{:.4},{:.4},{:.4},{:.4},{}\n",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
        ));
    }
    std::fs::write(out, content)?;
    println!("Wrote {bars} bars to {}", out.display());
    Ok(())
}

fn print_summary(report: &BacktestReport) {
    let m = &report.metrics;
    println!();
    println!("=== Backtest Result ===");
    println!("Symbol:          {}", report.symbol);
    println!("Strategy:        {}", report.strategy);
    println!(
        "Period:          {} to {} ({} bars)",
        report.start_date, report.end_date, report.bar_count
    );
    println!();
    println!("--- Capital ---");
    println!("Initial Capital: {:.2}", report.initial_capital);
    println!("Final Value:     {:.2}", report.final_equity);
    println!("Total Profit:    {:.2}", report.total_profit());
    println!();
    println!("--- Returns ---");
    println!("Total Return:    {:.2}%", m.total_return);
    println!("Annual Return:   {:.2}%", m.annual_return);
    println!("Volatility:      {:.2}%", m.volatility);
    println!();
    println!("--- Risk-Adjusted ---");
    println!("Sharpe Ratio:    {:.3}", m.sharpe_ratio);
    println!("Sortino Ratio:   {:.3}", m.sortino_ratio);
    println!("Calmar Ratio:    {:.3}", m.calmar_ratio);
    println!();
    println!("--- Drawdown ---");
    println!("Max Drawdown:    {:.2}%", m.max_drawdown);
    println!("DD Duration:     {} bars", m.drawdown_duration);
    println!("Recovery Factor: {:.3}", m.recovery_factor);
    println!();
    println!("--- Trades ---");
    println!("Total Trades:    {}", m.trade_count);
    println!("Winners/Losers:  {}/{}", m.winning_trades, m.losing_trades);
    println!("Win Rate:        {:.2}%", m.win_rate);
    if m.profit_factor.is_infinite() {
        println!("Profit Factor:   inf (no losing trades)");
    } else {
        println!("Profit Factor:   {:.2}", m.profit_factor);
    }
    println!();
    println!("--- Daily Range ---");
    println!("Best Day:        {:.2}%", m.best_day);
    println!("Worst Day:       {:.2}%", m.worst_day);
    println!();
}
