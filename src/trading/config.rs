//! Screener and risk configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Volume above which a move counts as confirmed (shares).
pub const HIGH_VOLUME_THRESHOLD: u64 = 2_500_000;

/// Percent change above which a confirmed move is a breakout.
pub const BREAKOUT_CHANGE_PCT: Decimal = dec!(1.5);

/// Percent change above which a confirmed move is a pullback entry.
pub const PULLBACK_CHANGE_PCT: Decimal = dec!(0.5);

pub const BREAKOUT_STOP_MULTIPLIER: Decimal = dec!(0.99);
pub const BREAKOUT_TARGET_MULTIPLIER: Decimal = dec!(1.02);
pub const PULLBACK_STOP_MULTIPLIER: Decimal = dec!(0.995);
pub const PULLBACK_TARGET_MULTIPLIER: Decimal = dec!(1.015);

/// Upper bound accepted for risk per trade (percent).
pub const MAX_RISK_PERCENT: Decimal = dec!(5);

/// Round a currency or percent value to 2 decimals, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Thresholds and multipliers used by the signal classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    /// Minimum volume (exclusive) for a confirmed move
    pub volume_threshold: u64,

    /// Percent change (exclusive) for a breakout
    pub breakout_change_pct: Decimal,

    /// Percent change (exclusive) for a pullback
    pub pullback_change_pct: Decimal,

    /// Stop as a multiple of entry for breakouts
    pub breakout_stop_multiplier: Decimal,

    /// Target as a multiple of entry for breakouts
    pub breakout_target_multiplier: Decimal,

    /// Stop as a multiple of entry for pullbacks
    pub pullback_stop_multiplier: Decimal,

    /// Target as a multiple of entry for pullbacks
    pub pullback_target_multiplier: Decimal,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            volume_threshold: HIGH_VOLUME_THRESHOLD,       // 2.5M shares
            breakout_change_pct: BREAKOUT_CHANGE_PCT,      // > 1.5%
            pullback_change_pct: PULLBACK_CHANGE_PCT,      // 0.5% - 1.5%
            breakout_stop_multiplier: BREAKOUT_STOP_MULTIPLIER,     // 1% stop
            breakout_target_multiplier: BREAKOUT_TARGET_MULTIPLIER, // 2% target
            pullback_stop_multiplier: PULLBACK_STOP_MULTIPLIER,     // 0.5% stop
            pullback_target_multiplier: PULLBACK_TARGET_MULTIPLIER, // 1.5% target
        }
    }
}

impl ScreenerConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Trader's capital and per-trade risk, supplied with each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSettings {
    /// Trading capital
    #[serde(with = "rust_decimal::serde::float")]
    pub capital: Decimal,

    /// Percent of capital risked per trade (1 = 1%)
    #[serde(with = "rust_decimal::serde::float")]
    pub risk_percent: Decimal,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            capital: dec!(100000), // 1 lakh
            risk_percent: dec!(1),
        }
    }
}

impl RiskSettings {
    pub fn new(capital: Decimal, risk_percent: Decimal) -> Self {
        Self {
            capital,
            risk_percent,
        }
    }

    /// Capital at risk on a single trade.
    pub fn risk_amount(&self) -> Decimal {
        self.capital.saturating_mul(self.risk_percent / dec!(100))
    }

    /// Capital at risk, rounded for display.
    pub fn max_risk_per_trade(&self) -> Decimal {
        round_money(self.risk_amount())
    }

    /// Reject settings the sizer should never be called with.
    pub fn validate(&self) -> Result<()> {
        if self.capital <= Decimal::ZERO {
            bail!("Capital must be positive, got {}", self.capital);
        }
        if self.risk_percent <= Decimal::ZERO || self.risk_percent > MAX_RISK_PERCENT {
            bail!(
                "Risk per trade must be in (0, {}]%, got {}%",
                MAX_RISK_PERCENT,
                self.risk_percent
            );
        }
        Ok(())
    }
}
