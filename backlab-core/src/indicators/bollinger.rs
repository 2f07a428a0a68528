//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! Three bands, exposed as separate single-series instances:
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses population stddev (divide by N).
//! Warm-up: period - 1.

use super::Indicator;
use crate::domain::Bar;
use std::collections::VecDeque;

/// Which band of the Bollinger Bands to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
    window: VecDeque<f64>,
}

impl Bollinger {
    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Upper)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Middle)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Lower)
    }

    fn with_band(period: usize, multiplier: f64, band: BollingerBand) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        let name = match band {
            BollingerBand::Upper => format!("bb_upper_{period}"),
            BollingerBand::Middle => format!("bb_middle_{period}"),
            BollingerBand::Lower => format!("bb_lower_{period}"),
        };
        Self {
            period,
            multiplier,
            band,
            name,
            window: VecDeque::with_capacity(period + 1),
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn update(&mut self, bar: &Bar) -> Option<f64> {
        self.window.push_back(bar.close);
        if self.window.len() > self.period {
            self.window.pop_front();
        }
        if self.window.len() < self.period {
            return None;
        }

        let n = self.period as f64;
        let mean = self.window.iter().sum::<f64>() / n;
        if self.band == BollingerBand::Middle {
            return Some(mean);
        }

        let variance = self
            .window
            .iter()
            .map(|close| {
                let diff = close - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        let stddev = variance.sqrt();

        Some(match self.band {
            BollingerBand::Upper => mean + self.multiplier * stddev,
            BollingerBand::Lower => mean - self.multiplier * stddev,
            BollingerBand::Middle => unreachable!(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, collect_values, DEFAULT_EPSILON};

    #[test]
    fn bollinger_middle_is_sma() {
        let values = collect_values(&mut Bollinger::middle(3, 2.0), &[10.0, 11.0, 12.0, 13.0]);
        assert!(values[0].is_none());
        assert!(values[1].is_none());
        assert_approx(values[2].unwrap(), 11.0, DEFAULT_EPSILON);
        assert_approx(values[3].unwrap(), 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_bands_symmetric() {
        let closes = [10.0, 11.0, 12.0, 13.0, 14.0];
        let upper = collect_values(&mut Bollinger::upper(3, 2.0), &closes);
        let middle = collect_values(&mut Bollinger::middle(3, 2.0), &closes);
        let lower = collect_values(&mut Bollinger::lower(3, 2.0), &closes);

        for i in 2..closes.len() {
            let half_width = upper[i].unwrap() - middle[i].unwrap();
            assert_approx(
                middle[i].unwrap() - lower[i].unwrap(),
                half_width,
                DEFAULT_EPSILON,
            );
        }
    }

    #[test]
    fn bollinger_known_values() {
        // Window [10, 11, 12]: mean = 11, population var = 2/3
        let closes = [10.0, 11.0, 12.0];
        let upper = collect_values(&mut Bollinger::upper(3, 2.0), &closes);
        let expected = 11.0 + 2.0 * (2.0_f64 / 3.0).sqrt();
        assert_approx(upper[2].unwrap(), expected, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_constant_price_zero_width() {
        let closes = [100.0, 100.0, 100.0, 100.0];
        let upper = collect_values(&mut Bollinger::upper(3, 2.0), &closes);
        let lower = collect_values(&mut Bollinger::lower(3, 2.0), &closes);
        // Constant price: stddev = 0, bands collapse to the SMA
        assert_approx(upper[2].unwrap(), 100.0, DEFAULT_EPSILON);
        assert_approx(lower[2].unwrap(), 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_warmup_and_names() {
        assert_eq!(Bollinger::upper(20, 2.0).warmup(), 19);
        assert_eq!(Bollinger::upper(20, 2.0).name(), "bb_upper_20");
        assert_eq!(Bollinger::lower(20, 2.0).name(), "bb_lower_20");
        assert_eq!(Bollinger::middle(20, 2.0).name(), "bb_middle_20");
    }
}
