//! Criterion benchmarks for the hot paths.
//!
//! Benchmarks:
//! 1. Full run loop per strategy variant
//! 2. Incremental indicator updates in isolation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use backlab_core::domain::Bar;
use backlab_core::engine::run_backtest;
use backlab_core::execution::ExecutionConfig;
use backlab_core::feed::BarSeries;
use backlab_core::indicators::{Bollinger, IndicatorEngine, Rsi, Sma};
use backlab_core::strategy::Strategy;

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000.0,
            }
        })
        .collect()
}

fn bench_run_loop(c: &mut Criterion) {
    let series = BarSeries::new(make_bars(2_000)).unwrap();
    let config = ExecutionConfig::default();

    let strategies = [
        Strategy::MaCrossover {
            fast_period: 10,
            slow_period: 30,
        },
        Strategy::Rsi {
            period: 14,
            lower: 30.0,
            upper: 70.0,
        },
        Strategy::Bollinger {
            period: 20,
            std_multiplier: 2.0,
        },
        Strategy::Momentum {
            roc_period: 10,
            roc_threshold: 0.5,
        },
    ];

    let mut group = c.benchmark_group("run_loop_2000_bars");
    for strategy in &strategies {
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy.name()),
            strategy,
            |b, strategy| {
                b.iter(|| run_backtest(black_box(&series), black_box(strategy), &config).unwrap())
            },
        );
    }
    group.finish();
}

fn bench_indicator_updates(c: &mut Criterion) {
    let bars = make_bars(2_000);

    c.bench_function("indicator_engine_2000_bars", |b| {
        b.iter(|| {
            let mut engine = IndicatorEngine::with_indicators(vec![
                Box::new(Sma::new(20)),
                Box::new(Rsi::new(14)),
                Box::new(Bollinger::upper(20, 2.0)),
                Box::new(Bollinger::lower(20, 2.0)),
            ]);
            for bar in &bars {
                engine.update(black_box(bar));
            }
            black_box(engine.len())
        })
    });
}

criterion_group!(benches, bench_run_loop, bench_indicator_updates);
criterion_main!(benches);
