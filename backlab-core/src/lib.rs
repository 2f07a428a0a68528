//! BackLab Core — single-instrument backtesting engine.
//!
//! This crate contains the heart of the simulator:
//! - Domain types (bars, positions, trades, equity points)
//! - Validated bar feed (strictly ascending unique dates, finite fields)
//! - Incremental rolling indicators (SMA, Bollinger, RSI, ROC)
//! - A closed set of signal strategies with a fixed buy-before-sell
//!   evaluation order
//! - A single-position broker simulation with commission accounting
//! - The bar-by-bar run loop that wires the above together
//!
//! The simulation is deterministic: identical inputs always produce an
//! identical [`engine::BacktestRun`].

pub mod domain;
pub mod engine;
pub mod execution;
pub mod feed;
pub mod indicators;
pub mod strategy;
