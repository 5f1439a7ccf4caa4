//! Classified trade candidate with its signal and trade plan.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Intraday signal bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    /// Large move on confirming volume
    Breakout,
    /// Moderate move on confirming volume
    Pullback,
    /// No actionable setup
    Watch,
}

impl Signal {
    /// All signals, highest priority first.
    pub const ALL: [Signal; 3] = [Signal::Breakout, Signal::Pullback, Signal::Watch];

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Breakout => "BREAKOUT",
            Signal::Pullback => "PULLBACK",
            Signal::Watch => "WATCH",
        }
    }

    /// Sort priority (higher sorts first).
    pub fn priority(&self) -> u8 {
        match self {
            Signal::Breakout => 3,
            Signal::Pullback => 2,
            Signal::Watch => 1,
        }
    }

    /// Risk-reward label for the trade plan.
    pub fn risk_reward(&self) -> &'static str {
        match self {
            Signal::Breakout => "1:2",
            Signal::Pullback => "1:3",
            Signal::Watch => "N/A",
        }
    }

    /// Advisory entry window (IST session).
    pub fn timeframe(&self) -> &'static str {
        match self {
            Signal::Breakout => "9:20-10:00 AM",
            Signal::Pullback => "10:30-2:00 PM",
            Signal::Watch => "Monitor",
        }
    }

    /// Whether the signal carries a trade plan.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Signal::Watch)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quote after classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeCandidate {
    pub symbol: String,

    pub name: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub change: Decimal,

    /// Percent change vs previous close, 2 decimals
    #[serde(with = "rust_decimal::serde::float")]
    pub change_percent: Decimal,

    pub volume: u64,

    pub signal: Signal,

    #[serde(with = "rust_decimal::serde::float")]
    pub entry: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub stop_loss: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub target: Decimal,

    pub risk_reward: String,

    pub timeframe: String,
}
