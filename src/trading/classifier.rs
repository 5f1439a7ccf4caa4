//! Signal classification: quote -> breakout / pullback / watch with a trade plan.
//!
//! Rules are an ordered decision list; the first matching rule wins:
//! 1. change% > breakout threshold on high volume -> BREAKOUT
//! 2. pullback threshold < change% < breakout threshold on high volume -> PULLBACK
//! 3. anything else -> WATCH
//!
//! A move of exactly the breakout threshold matches neither actionable rule.

use std::cmp::Reverse;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::models::{Quote, Signal, TradeCandidate};
use super::config::round_money;
use super::ScreenerConfig;

/// Percent change vs previous close, rounded to 2 decimals.
///
/// A zero previous close, or a move too large to represent, yields zero.
pub fn change_percent(price: Decimal, change: Decimal) -> Decimal {
    price
        .checked_sub(change)
        .and_then(|previous_close| change.checked_div(previous_close))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(round_money)
        .unwrap_or(Decimal::ZERO)
}

/// Stateless classifier parameterized by screener thresholds.
#[derive(Debug, Clone, Default)]
pub struct SignalClassifier {
    config: ScreenerConfig,
}

impl SignalClassifier {
    pub fn new(config: ScreenerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScreenerConfig {
        &self.config
    }

    /// Pick the signal for a percent move and volume.
    pub fn signal_for(&self, change_pct: Decimal, volume: u64) -> Signal {
        let high_volume = volume > self.config.volume_threshold;

        if high_volume && change_pct > self.config.breakout_change_pct {
            Signal::Breakout
        } else if high_volume
            && change_pct > self.config.pullback_change_pct
            && change_pct < self.config.breakout_change_pct
        {
            Signal::Pullback
        } else {
            Signal::Watch
        }
    }

    /// Stop and target for an entry under the given signal.
    ///
    /// Returns `None` when a level overflows.
    pub fn levels(&self, signal: Signal, entry: Decimal) -> Option<(Decimal, Decimal)> {
        let (stop_multiplier, target_multiplier) = match signal {
            Signal::Breakout => (
                self.config.breakout_stop_multiplier,
                self.config.breakout_target_multiplier,
            ),
            Signal::Pullback => (
                self.config.pullback_stop_multiplier,
                self.config.pullback_target_multiplier,
            ),
            Signal::Watch => return Some((entry, entry)),
        };

        let stop_loss = entry.checked_mul(stop_multiplier)?;
        let target = entry.checked_mul(target_multiplier)?;
        Some((round_money(stop_loss), round_money(target)))
    }

    /// Classify a single quote.
    pub fn classify(&self, quote: &Quote) -> TradeCandidate {
        let change_pct = change_percent(quote.price, quote.change);
        let signal = self.signal_for(change_pct, quote.volume);

        // Signal is taken at the current tick
        let entry = round_money(quote.price);
        let (signal, stop_loss, target) = match self.levels(signal, entry) {
            Some((stop_loss, target)) => (signal, stop_loss, target),
            None => (Signal::Watch, entry, entry),
        };

        debug!(
            symbol = %quote.symbol,
            change_pct = %change_pct,
            volume = quote.volume,
            signal = %signal,
            "Classified quote"
        );

        TradeCandidate {
            symbol: quote.symbol.clone(),
            name: quote.name.clone(),
            price: quote.price,
            change: quote.change,
            change_percent: change_pct,
            volume: quote.volume,
            signal,
            entry,
            stop_loss,
            target,
            risk_reward: signal.risk_reward().to_string(),
            timeframe: signal.timeframe().to_string(),
        }
    }

    /// Classify a batch, strongest signals first.
    ///
    /// The sort is stable: equal signals keep their input order.
    pub fn classify_all(&self, quotes: &[Quote]) -> Vec<TradeCandidate> {
        let mut candidates: Vec<TradeCandidate> =
            quotes.iter().map(|q| self.classify(q)).collect();
        candidates.sort_by_key(|c| Reverse(c.signal.priority()));
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, price: Decimal, change: Decimal, volume: u64) -> Quote {
        Quote::new(symbol, format!("{} Ltd", symbol), price, change, volume)
    }

    #[test]
    fn test_breakout() {
        let classifier = SignalClassifier::default();
        let c = classifier.classify(&quote("RELIANCE", dec!(1000), dec!(20), 3_000_000));

        assert_eq!(c.change_percent, dec!(2.04)); // 20 / 980
        assert_eq!(c.signal, Signal::Breakout);
        assert_eq!(c.entry, dec!(1000));
        assert_eq!(c.stop_loss, dec!(990));
        assert_eq!(c.target, dec!(1020));
        assert_eq!(c.risk_reward, "1:2");
        assert_eq!(c.timeframe, "9:20-10:00 AM");
        assert!(c.stop_loss < c.entry && c.entry < c.target);
    }

    #[test]
    fn test_pullback() {
        let classifier = SignalClassifier::default();
        let c = classifier.classify(&quote("HDFCBANK", dec!(1000), dec!(8), 3_000_000));

        assert_eq!(c.change_percent, dec!(0.81)); // 8 / 992
        assert_eq!(c.signal, Signal::Pullback);
        assert_eq!(c.stop_loss, dec!(995));
        assert_eq!(c.target, dec!(1015));
        assert_eq!(c.risk_reward, "1:3");
    }

    #[test]
    fn test_small_move_is_watch() {
        let classifier = SignalClassifier::default();
        let c = classifier.classify(&quote("ITC", dec!(1000), dec!(2), 3_000_000));

        assert_eq!(c.signal, Signal::Watch);
        assert_eq!(c.entry, dec!(1000));
        assert_eq!(c.stop_loss, dec!(1000));
        assert_eq!(c.target, dec!(1000));
    }

    #[test]
    fn test_volume_gate() {
        let classifier = SignalClassifier::default();

        // Big move, thin volume
        let c = classifier.classify(&quote("WIPRO", dec!(1000), dec!(20), 1_000_000));
        assert_eq!(c.signal, Signal::Watch);

        // Threshold itself is not high volume
        let c = classifier.classify(&quote("WIPRO", dec!(1000), dec!(20), 2_500_000));
        assert_eq!(c.signal, Signal::Watch);

        let c = classifier.classify(&quote("WIPRO", dec!(1000), dec!(20), 2_500_001));
        assert_eq!(c.signal, Signal::Breakout);
    }

    #[test]
    fn test_boundaries() {
        let classifier = SignalClassifier::default();

        assert_eq!(classifier.signal_for(dec!(1.5), 3_000_000), Signal::Watch);
        assert_eq!(classifier.signal_for(dec!(1.51), 3_000_000), Signal::Breakout);
        assert_eq!(classifier.signal_for(dec!(1.49), 3_000_000), Signal::Pullback);
        assert_eq!(classifier.signal_for(dec!(0.5), 3_000_000), Signal::Watch);
        assert_eq!(classifier.signal_for(dec!(0.51), 3_000_000), Signal::Pullback);
        assert_eq!(classifier.signal_for(dec!(-3), 3_000_000), Signal::Watch);
    }

    #[test]
    fn test_zero_previous_close() {
        assert_eq!(change_percent(dec!(50), dec!(50)), Decimal::ZERO);

        let classifier = SignalClassifier::default();
        let c = classifier.classify(&quote("LT", dec!(50), dec!(50), 9_000_000));
        assert_eq!(c.change_percent, Decimal::ZERO);
        assert_eq!(c.signal, Signal::Watch);
    }

    #[test]
    fn test_unrepresentable_move_is_watch() {
        // Previous close of 1e-20 gives a 1e30 percent move
        let c = SignalClassifier::default().classify(&quote(
            "LT",
            dec!(100000000.00000000000000000001),
            dec!(100000000),
            3_000_000,
        ));
        assert_eq!(c.change_percent, Decimal::ZERO);
        assert_eq!(c.signal, Signal::Watch);

        assert_eq!(change_percent(Decimal::MAX, -Decimal::MAX), Decimal::ZERO);
    }

    #[test]
    fn test_level_overflow_is_watch() {
        let classifier = SignalClassifier::default();
        assert_eq!(classifier.levels(Signal::Breakout, Decimal::MAX), None);

        let c = classifier.classify(&quote("LT", Decimal::MAX, Decimal::MAX / dec!(2), 3_000_000));
        assert_eq!(c.signal, Signal::Watch);
        assert_eq!(c.stop_loss, c.entry);
        assert_eq!(c.target, c.entry);
    }

    #[test]
    fn test_change_percent_rounded_before_thresholds() {
        // 14.99 / 1000.01 = 1.499%, rounds to 1.50
        let c = SignalClassifier::default().classify(&quote("HCLTECH", dec!(1015.0), dec!(14.99), 3_000_000));
        assert_eq!(c.change_percent, dec!(1.50));
        assert_eq!(c.signal, Signal::Watch);
    }

    #[test]
    fn test_levels_are_rounded() {
        let classifier = SignalClassifier::default();
        let c = classifier.classify(&quote("MARUTI", dec!(1234.57), dec!(25), 4_000_000));

        assert_eq!(c.signal, Signal::Breakout);
        assert_eq!(c.stop_loss, dec!(1222.22)); // 1222.2243
        assert_eq!(c.target, dec!(1259.26)); // 1259.2614
    }

    #[test]
    fn test_custom_thresholds() {
        let config = ScreenerConfig {
            volume_threshold: 100,
            ..Default::default()
        };
        let classifier = SignalClassifier::new(config);
        let c = classifier.classify(&quote("AXISBANK", dec!(1000), dec!(20), 500));
        assert_eq!(c.signal, Signal::Breakout);
    }

    #[test]
    fn test_classify_all_sorted_and_stable() {
        let classifier = SignalClassifier::default();
        let quotes = vec![
            quote("W1", dec!(1000), dec!(2), 3_000_000),
            quote("P1", dec!(1000), dec!(8), 3_000_000),
            quote("B1", dec!(1000), dec!(20), 3_000_000),
            quote("W2", dec!(1000), dec!(20), 1_000_000),
            quote("P2", dec!(500), dec!(5), 2_600_000),
            quote("B2", dec!(500), dec!(15), 2_600_000),
        ];

        let candidates = classifier.classify_all(&quotes);
        let order: Vec<&str> = candidates.iter().map(|c| c.symbol.as_str()).collect();

        assert_eq!(candidates.len(), quotes.len());
        assert_eq!(order, vec!["B1", "B2", "P1", "P2", "W1", "W2"]);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let classifier = SignalClassifier::default();
        let q = quote("TCS", dec!(3456.78), dec!(41.2), 2_750_000);
        assert_eq!(classifier.classify(&q), classifier.classify(&q));
    }
}
