//! Moving average crossover — golden cross in, death cross out.

use super::Signal;

/// Crossover decision from the two SMA series.
///
/// Buy when the fast average crosses above the slow one (previous bar
/// fast <= slow, current bar fast > slow); sell on the mirror-image
/// cross below. The two conditions are mutually exclusive.
pub fn decide(fast_prev: f64, slow_prev: f64, fast_cur: f64, slow_cur: f64) -> Signal {
    if fast_prev <= slow_prev && fast_cur > slow_cur {
        Signal::Buy
    } else if fast_prev >= slow_prev && fast_cur < slow_cur {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_buy_on_cross_above() {
        assert_eq!(decide(99.0, 100.0, 101.0, 100.0), Signal::Buy);
        // Touching from below then crossing also counts
        assert_eq!(decide(100.0, 100.0, 101.0, 100.0), Signal::Buy);
    }

    #[test]
    fn fires_sell_on_cross_below() {
        assert_eq!(decide(101.0, 100.0, 99.0, 100.0), Signal::Sell);
        assert_eq!(decide(100.0, 100.0, 99.0, 100.0), Signal::Sell);
    }

    #[test]
    fn holds_when_fast_stays_above() {
        assert_eq!(decide(105.0, 100.0, 106.0, 100.0), Signal::Hold);
    }

    #[test]
    fn holds_when_fast_stays_below() {
        assert_eq!(decide(95.0, 100.0, 96.0, 100.0), Signal::Hold);
    }

    #[test]
    fn holds_when_exactly_equal() {
        assert_eq!(decide(100.0, 100.0, 100.0, 100.0), Signal::Hold);
    }
}
