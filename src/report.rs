//! Screen report: classified candidates sized against risk settings.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::models::{PositionPlan, Quote, Signal, TradeCandidate};
use crate::trading::{PositionSizer, RiskSettings, SignalClassifier};

/// A candidate with its sized position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecommendation {
    #[serde(flatten)]
    pub candidate: TradeCandidate,

    #[serde(flatten)]
    pub plan: PositionPlan,

    /// Investment fits in available capital
    pub within_capital: bool,
}

/// Candidate counts per signal bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalSummary {
    pub breakout: usize,
    pub pullback: usize,
    pub watch: usize,
}

impl SignalSummary {
    pub fn count(&self, signal: Signal) -> usize {
        match signal {
            Signal::Breakout => self.breakout,
            Signal::Pullback => self.pullback,
            Signal::Watch => self.watch,
        }
    }

    pub fn total(&self) -> usize {
        self.breakout + self.pullback + self.watch
    }

    /// Actionable (breakout + pullback) candidates.
    pub fn actionable(&self) -> usize {
        self.breakout + self.pullback
    }
}

/// Result of one screening pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenReport {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub settings: RiskSettings,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_risk_per_trade: Decimal,
    pub summary: SignalSummary,
    /// Sorted by signal priority
    pub stocks: Vec<TradeRecommendation>,
}

impl ScreenReport {
    /// Classify `quotes` and size every candidate against `settings`.
    pub fn build(
        classifier: &SignalClassifier,
        settings: RiskSettings,
        quotes: &[Quote],
    ) -> Self {
        let sizer = PositionSizer::new(settings);
        let mut summary = SignalSummary::default();

        let stocks: Vec<TradeRecommendation> = classifier
            .classify_all(quotes)
            .into_iter()
            .map(|candidate| {
                match candidate.signal {
                    Signal::Breakout => summary.breakout += 1,
                    Signal::Pullback => summary.pullback += 1,
                    Signal::Watch => summary.watch += 1,
                }
                let plan = sizer.plan(&candidate);
                TradeRecommendation {
                    within_capital: plan.investment <= settings.capital,
                    candidate,
                    plan,
                }
            })
            .collect();

        info!(
            quotes = quotes.len(),
            breakout = summary.breakout,
            pullback = summary.pullback,
            watch = summary.watch,
            "Screening completed"
        );

        Self {
            success: true,
            timestamp: Utc::now(),
            message: "Stock screening completed successfully".to_string(),
            settings,
            max_risk_per_trade: settings.max_risk_per_trade(),
            summary,
            stocks,
        }
    }

    /// Recommendations for one signal, in report order.
    pub fn bucket(&self, signal: Signal) -> impl Iterator<Item = &TradeRecommendation> {
        self.stocks
            .iter()
            .filter(move |r| r.candidate.signal == signal)
    }
}

impl fmt::Display for ScreenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Intraday Screen ({}) ===", self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(
            f,
            "Capital: {} | Risk/trade: {}% | Max risk/trade: {:.2}",
            self.settings.capital, self.settings.risk_percent, self.max_risk_per_trade
        )?;
        writeln!(
            f,
            "Breakouts: {} | Pullbacks: {} | Watch: {}",
            self.summary.breakout, self.summary.pullback, self.summary.watch
        )?;

        for signal in Signal::ALL {
            if self.summary.count(signal) == 0 {
                continue;
            }

            writeln!(f, "\n--- {} ({}) ---", signal, signal.timeframe())?;

            if signal.is_actionable() {
                writeln!(
                    f,
                    "{:<12} {:>10} {:>7} {:>10} {:>10} {:>10} {:>6} {:>8} {:>12} {:>10} {:>10}",
                    "SYMBOL", "PRICE", "CHG%", "VOLUME", "STOP", "TARGET", "R:R", "QTY",
                    "INVESTMENT", "PROFIT", "MAX LOSS"
                )?;
                writeln!(f, "{}", "-".repeat(117))?;
                for r in self.bucket(signal) {
                    let c = &r.candidate;
                    writeln!(
                        f,
                        "{:<12} {:>10.2} {:>6.2}% {:>10} {:>10.2} {:>10.2} {:>6} {:>8} {:>12.2} {:>10.2} {:>10.2}{}",
                        c.symbol,
                        c.entry,
                        c.change_percent,
                        c.volume,
                        c.stop_loss,
                        c.target,
                        c.risk_reward,
                        r.plan.quantity,
                        r.plan.investment,
                        r.plan.potential_profit,
                        r.plan.potential_loss,
                        if r.within_capital { "" } else { "  (exceeds capital)" }
                    )?;
                }
            } else {
                writeln!(f, "{:<12} {:<28} {:>10} {:>7} {:>10}", "SYMBOL", "NAME", "PRICE", "CHG%", "VOLUME")?;
                writeln!(f, "{}", "-".repeat(71))?;
                for r in self.bucket(signal) {
                    let c = &r.candidate;
                    writeln!(
                        f,
                        "{:<12} {:<28} {:>10.2} {:>6.2}% {:>10}",
                        c.symbol,
                        truncate(&c.name, 28),
                        c.price,
                        c.change_percent,
                        c.volume
                    )?;
                }
            }
        }

        Ok(())
    }
}

/// Truncate a string with ellipsis if too long.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
