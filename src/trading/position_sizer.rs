//! Position sizing: fixed-fractional risk per trade.
//!
//! ```text
//! risk_amount    = capital * risk_percent / 100
//! risk_per_share = entry - stop_loss
//! quantity       = floor(risk_amount / risk_per_share)
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::models::{PositionPlan, TradeCandidate};
use super::RiskSettings;

/// Whole shares whose stop-out loss stays within `capital * risk_percent / 100`.
///
/// Returns 0 when the stop is at or above entry (no defined risk per share)
/// or when the risk budget is not positive. Not capped by capital; a quantity
/// beyond `u64::MAX` saturates.
pub fn position_size(
    entry: Decimal,
    stop_loss: Decimal,
    capital: Decimal,
    risk_percent: Decimal,
) -> u64 {
    let Some(risk_per_share) = entry.checked_sub(stop_loss) else {
        return 0;
    };
    if risk_per_share <= Decimal::ZERO {
        return 0;
    }

    let risk_fraction = risk_percent / dec!(100);
    if capital <= Decimal::ZERO || risk_fraction <= Decimal::ZERO {
        return 0;
    }

    // Both factors are positive here, so any overflow is a huge position
    capital
        .checked_mul(risk_fraction)
        .and_then(|risk_amount| risk_amount.checked_div(risk_per_share))
        .and_then(|shares| shares.floor().to_u64())
        .unwrap_or(u64::MAX)
}

/// Sizes candidates against a trader's risk settings.
#[derive(Debug, Clone, Copy)]
pub struct PositionSizer {
    settings: RiskSettings,
}

impl PositionSizer {
    pub fn new(settings: RiskSettings) -> Self {
        Self { settings }
    }

    /// Quantity for an entry/stop pair.
    pub fn size(&self, entry: Decimal, stop_loss: Decimal) -> u64 {
        position_size(
            entry,
            stop_loss,
            self.settings.capital,
            self.settings.risk_percent,
        )
    }

    /// Full plan for explicit levels.
    pub fn plan_levels(&self, entry: Decimal, stop_loss: Decimal, target: Decimal) -> PositionPlan {
        let quantity = self.size(entry, stop_loss);
        if quantity == 0 {
            return PositionPlan::empty();
        }
        PositionPlan::new(quantity, entry, stop_loss, target)
    }

    /// Full plan for a classified candidate.
    pub fn plan(&self, candidate: &TradeCandidate) -> PositionPlan {
        let plan = self.plan_levels(candidate.entry, candidate.stop_loss, candidate.target);

        if plan.investment > self.settings.capital {
            warn!(
                symbol = %candidate.symbol,
                investment = %plan.investment,
                capital = %self.settings.capital,
                "Sized position exceeds available capital"
            );
        }

        plan
    }
}
