//! Single-position broker simulation.
//!
//! Holds a cash balance and at most one open long position. Signals are
//! applied at a caller-supplied fill price; a buy while positioned or a
//! sell while flat is a silent no-op (the strategy evaluation order
//! already prevents deliberate misuse).

use crate::domain::{Bar, Position, Trade};
use crate::strategy::Signal;

use super::ExecutionConfig;

#[derive(Debug, Clone)]
pub struct Broker {
    cash: f64,
    commission_rate: f64,
    position_size_fraction: f64,
    position: Option<Position>,
    trades: Vec<Trade>,
}

impl Broker {
    pub fn new(config: &ExecutionConfig) -> Self {
        Self {
            cash: config.initial_capital,
            commission_rate: config.commission_rate,
            position_size_fraction: config.position_size_fraction,
            position: None,
            trades: Vec::new(),
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Cash plus mark-to-market position value at `price`.
    pub fn equity(&self, price: f64) -> f64 {
        match &self.position {
            Some(pos) => self.cash + pos.market_value(price),
            None => self.cash,
        }
    }

    /// Apply one signal at the given fill price on the given bar.
    pub fn apply_signal(&mut self, signal: Signal, bar: &Bar, bar_index: usize, price: f64) {
        match signal {
            Signal::Buy => self.open_position(bar, bar_index, price),
            Signal::Sell => self.close_position(bar, bar_index, price),
            Signal::Hold => {}
        }
    }

    /// Close any open position at the bar's close price. Called once at
    /// the end of the run so every simulation ends with a fully realized
    /// trade log.
    pub fn force_close(&mut self, bar: &Bar, bar_index: usize) {
        self.close_position(bar, bar_index, bar.close);
    }

    /// Consume the broker and return the completed trade log.
    pub fn into_trades(self) -> Vec<Trade> {
        self.trades
    }

    fn open_position(&mut self, bar: &Bar, bar_index: usize, price: f64) {
        if self.position.is_some() {
            return; // buy while positioned: no-op
        }
        if price <= 0.0 {
            return;
        }
        let quantity = self.cash * self.position_size_fraction / price;
        if quantity <= 0.0 {
            return;
        }
        let commission = price * quantity * self.commission_rate;
        self.cash -= price * quantity + commission;
        self.position = Some(Position {
            entry_date: bar.date,
            entry_bar: bar_index,
            entry_price: price,
            quantity,
            entry_commission: commission,
        });
    }

    fn close_position(&mut self, bar: &Bar, bar_index: usize, price: f64) {
        let Some(pos) = self.position.take() else {
            return; // sell while flat: no-op
        };
        let exit_commission = price * pos.quantity * self.commission_rate;
        self.cash += price * pos.quantity - exit_commission;

        let commission = pos.entry_commission + exit_commission;
        self.trades.push(Trade {
            entry_date: pos.entry_date,
            exit_date: bar.date,
            entry_bar: pos.entry_bar,
            exit_bar: bar_index,
            entry_price: pos.entry_price,
            exit_price: price,
            quantity: pos.quantity,
            commission,
            pnl: (price - pos.entry_price) * pos.quantity - commission,
        });
    }
}
