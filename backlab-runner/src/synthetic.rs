//! Deterministic synthetic bar generation.
//!
//! A seeded random walk with a plausible OHLC envelope, for demos and
//! tests that need market-like data without touching the network. The
//! same seed always produces the same series.

use backlab_core::domain::Bar;
use backlab_core::feed::BarSeries;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DAILY_DRIFT: f64 = 0.0003;
const DAILY_VOL: f64 = 0.015;

/// Generate `n` bars of a seeded random walk starting at `start_date`.
pub fn synthetic_series(n: usize, seed: u64, start_date: NaiveDate) -> BarSeries {
    assert!(n >= 1, "need at least one bar");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut close = 100.0_f64;
    let mut bars = Vec::with_capacity(n);

    for i in 0..n {
        let open = close;
        let shock: f64 = rng.gen_range(-1.0..1.0);
        close = (open * (1.0 + DAILY_DRIFT + DAILY_VOL * shock)).max(1.0);

        let spread_up: f64 = rng.gen_range(0.0..0.005);
        let spread_down: f64 = rng.gen_range(0.0..0.005);
        bars.push(Bar {
            date: start_date + chrono::Duration::days(i as i64),
            open,
            high: open.max(close) * (1.0 + spread_up),
            low: open.min(close) * (1.0 - spread_down),
            close,
            volume: rng.gen_range(500_000.0..5_000_000.0_f64).round(),
        });
    }

    BarSeries::new(bars).expect("generated bars satisfy the feed contract")
}
