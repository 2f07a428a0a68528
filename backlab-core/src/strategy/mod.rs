//! Signal strategies.
//!
//! A closed set of tagged variants, one decision function per tag. Each
//! decision function is pure — it sees indicator values, the current bar,
//! and whether a position is open, and returns a [`Signal`]. The
//! dispatcher enforces a fixed evaluation order: the buy condition is
//! checked first, and the sell condition only if buy did not fire, so a
//! single bar never produces both.
//!
//! An indicator that is still warming up yields no value, and a decision
//! that depends on it resolves to [`Signal::Hold`].

use crate::domain::Bar;
use crate::indicators::{Bollinger as BollingerIndicator, Indicator, IndicatorEngine, Roc, Rsi as RsiIndicator, Sma};
use serde::{Deserialize, Serialize};

pub mod bollinger;
pub mod ma_crossover;
pub mod momentum;
pub mod rsi;

/// Trading decision for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// Invalid strategy parameters, rejected before a run starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StrategyError {
    #[error("period must be >= 1")]
    ZeroPeriod,

    #[error("fast period {fast} must be shorter than slow period {slow}")]
    FastNotBelowSlow { fast: usize, slow: usize },

    #[error("RSI lower threshold {lower} must be below upper threshold {upper}")]
    ThresholdOrder { lower: f64, upper: f64 },

    #[error("band multiplier must be positive, got {0}")]
    NonPositiveMultiplier(f64),
}

/// The strategy set. Serializable as a tagged enum so run configurations
/// round-trip through TOML/JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Strategy {
    /// Buy when the fast SMA crosses above the slow SMA, sell on the
    /// opposite cross.
    MaCrossover { fast_period: usize, slow_period: usize },

    /// Buy oversold (RSI below `lower`), sell overbought (above `upper`).
    Rsi { period: usize, lower: f64, upper: f64 },

    /// Mean reversion against the Bollinger Bands: buy at or below the
    /// lower band, sell at or above the upper band.
    Bollinger { period: usize, std_multiplier: f64 },

    /// Trend following on rate-of-change, confirmed by the price sitting
    /// above its 20-bar SMA.
    Momentum { roc_period: usize, roc_threshold: f64 },
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::MaCrossover { .. } => "ma_crossover",
            Strategy::Rsi { .. } => "rsi",
            Strategy::Bollinger { .. } => "bollinger",
            Strategy::Momentum { .. } => "momentum",
        }
    }

    /// Short human-readable form, e.g. `ma_crossover(10/30)`.
    pub fn describe(&self) -> String {
        match self {
            Strategy::MaCrossover {
                fast_period,
                slow_period,
            } => format!("ma_crossover({fast_period}/{slow_period})"),
            Strategy::Rsi {
                period,
                lower,
                upper,
            } => format!("rsi({period}, {lower}..{upper})"),
            Strategy::Bollinger {
                period,
                std_multiplier,
            } => format!("bollinger({period}, {std_multiplier}x)"),
            Strategy::Momentum {
                roc_period,
                roc_threshold,
            } => format!("momentum({roc_period}, {roc_threshold}%)"),
        }
    }

    pub fn validate(&self) -> Result<(), StrategyError> {
        match *self {
            Strategy::MaCrossover {
                fast_period,
                slow_period,
            } => {
                if fast_period == 0 || slow_period == 0 {
                    return Err(StrategyError::ZeroPeriod);
                }
                if fast_period >= slow_period {
                    return Err(StrategyError::FastNotBelowSlow {
                        fast: fast_period,
                        slow: slow_period,
                    });
                }
                Ok(())
            }
            Strategy::Rsi {
                period,
                lower,
                upper,
            } => {
                if period == 0 {
                    return Err(StrategyError::ZeroPeriod);
                }
                if lower >= upper {
                    return Err(StrategyError::ThresholdOrder { lower, upper });
                }
                Ok(())
            }
            Strategy::Bollinger {
                period,
                std_multiplier,
            } => {
                if period == 0 {
                    return Err(StrategyError::ZeroPeriod);
                }
                if std_multiplier <= 0.0 {
                    return Err(StrategyError::NonPositiveMultiplier(std_multiplier));
                }
                Ok(())
            }
            Strategy::Momentum { roc_period, .. } => {
                if roc_period == 0 {
                    return Err(StrategyError::ZeroPeriod);
                }
                Ok(())
            }
        }
    }

    /// The indicator set the run loop must register for this strategy.
    pub fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        match *self {
            Strategy::MaCrossover {
                fast_period,
                slow_period,
            } => vec![
                Box::new(Sma::new(fast_period)),
                Box::new(Sma::new(slow_period)),
            ],
            Strategy::Rsi { period, .. } => vec![Box::new(RsiIndicator::new(period))],
            Strategy::Bollinger {
                period,
                std_multiplier,
            } => vec![
                Box::new(BollingerIndicator::upper(period, std_multiplier)),
                Box::new(BollingerIndicator::lower(period, std_multiplier)),
            ],
            Strategy::Momentum { roc_period, .. } => vec![
                Box::new(Roc::new(roc_period)),
                Box::new(Sma::new(momentum::TREND_SMA_PERIOD)),
            ],
        }
    }

    /// Bars consumed before the first decidable bar.
    ///
    /// The crossover variant needs one bar beyond its slow window because
    /// it compares against the previous bar's averages.
    pub fn warmup_bars(&self) -> usize {
        match *self {
            Strategy::MaCrossover { slow_period, .. } => slow_period,
            Strategy::Rsi { period, .. } => period,
            Strategy::Bollinger { period, .. } => period - 1,
            Strategy::Momentum { roc_period, .. } => {
                roc_period.max(momentum::TREND_SMA_PERIOD - 1)
            }
        }
    }

    /// Evaluate the strategy on the current bar.
    ///
    /// `indicators` must already be updated through this bar.
    pub fn decide(&self, bar: &Bar, indicators: &IndicatorEngine, position_open: bool) -> Signal {
        match *self {
            Strategy::MaCrossover {
                fast_period,
                slow_period,
            } => {
                let fast_key = format!("sma_{fast_period}");
                let slow_key = format!("sma_{slow_period}");
                let (Some(fast_cur), Some(slow_cur), Some(fast_prev), Some(slow_prev)) = (
                    indicators.current(&fast_key),
                    indicators.current(&slow_key),
                    indicators.previous(&fast_key),
                    indicators.previous(&slow_key),
                ) else {
                    return Signal::Hold;
                };
                ma_crossover::decide(fast_prev, slow_prev, fast_cur, slow_cur)
            }
            Strategy::Rsi {
                period,
                lower,
                upper,
            } => {
                let Some(value) = indicators.current(&format!("rsi_{period}")) else {
                    return Signal::Hold;
                };
                rsi::decide(value, lower, upper, position_open)
            }
            Strategy::Bollinger { period, .. } => {
                let (Some(upper_band), Some(lower_band)) = (
                    indicators.current(&format!("bb_upper_{period}")),
                    indicators.current(&format!("bb_lower_{period}")),
                ) else {
                    return Signal::Hold;
                };
                bollinger::decide(bar.close, lower_band, upper_band, position_open)
            }
            Strategy::Momentum {
                roc_period,
                roc_threshold,
            } => {
                let (Some(roc), Some(trend_sma)) = (
                    indicators.current(&format!("roc_{roc_period}")),
                    indicators.current(&format!("sma_{}", momentum::TREND_SMA_PERIOD)),
                ) else {
                    return Signal::Hold;
                };
                momentum::decide(roc, roc_threshold, bar.close, trend_sma, position_open)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn validate_rejects_bad_params() {
        assert_eq!(
            Strategy::MaCrossover {
                fast_period: 30,
                slow_period: 10
            }
            .validate(),
            Err(StrategyError::FastNotBelowSlow { fast: 30, slow: 10 })
        );
        assert_eq!(
            Strategy::MaCrossover {
                fast_period: 0,
                slow_period: 10
            }
            .validate(),
            Err(StrategyError::ZeroPeriod)
        );
        assert_eq!(
            Strategy::Rsi {
                period: 14,
                lower: 70.0,
                upper: 30.0
            }
            .validate(),
            Err(StrategyError::ThresholdOrder {
                lower: 70.0,
                upper: 30.0
            })
        );
        assert_eq!(
            Strategy::Bollinger {
                period: 20,
                std_multiplier: -1.0
            }
            .validate(),
            Err(StrategyError::NonPositiveMultiplier(-1.0))
        );
    }

    #[test]
    fn validate_accepts_defaults() {
        for strategy in [
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
        ] {
            assert_eq!(strategy.validate(), Ok(()), "{}", strategy.describe());
        }
    }

    #[test]
    fn warmup_bars_per_variant() {
        assert_eq!(
            Strategy::MaCrossover {
                fast_period: 10,
                slow_period: 30
            }
            .warmup_bars(),
            30
        );
        assert_eq!(
            Strategy::Rsi {
                period: 14,
                lower: 30.0,
                upper: 70.0
            }
            .warmup_bars(),
            14
        );
        assert_eq!(
            Strategy::Bollinger {
                period: 20,
                std_multiplier: 2.0
            }
            .warmup_bars(),
            19
        );
        // Trend confirmation SMA dominates a short ROC window
        assert_eq!(
            Strategy::Momentum {
                roc_period: 10,
                roc_threshold: 0.5
            }
            .warmup_bars(),
            19
        );
        assert_eq!(
            Strategy::Momentum {
                roc_period: 25,
                roc_threshold: 0.5
            }
            .warmup_bars(),
            25
        );
    }

    #[test]
    fn decide_holds_while_warming_up() {
        let strategy = Strategy::Rsi {
            period: 14,
            lower: 30.0,
            upper: 70.0,
        };
        let mut engine = IndicatorEngine::with_indicators(strategy.indicators());
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        for bar in &bars {
            engine.update(bar);
            assert_eq!(strategy.decide(bar, &engine, false), Signal::Hold);
        }
    }

    #[test]
    fn serde_tagged_roundtrip() {
        let strategy = Strategy::Bollinger {
            period: 20,
            std_multiplier: 2.0,
        };
        let json = serde_json::to_string(&strategy).unwrap();
        assert!(json.contains(r#""type":"bollinger""#));
        let deser: Strategy = serde_json::from_str(&json).unwrap();
        assert_eq!(strategy, deser);
    }
}
