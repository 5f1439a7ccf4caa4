//! Position plan: sized quantity and its derived money metrics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sized trade for a single candidate. Recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPlan {
    /// Whole shares to buy
    pub quantity: u64,

    /// Capital deployed (quantity x entry)
    #[serde(with = "rust_decimal::serde::float")]
    pub investment: Decimal,

    /// Gain if target is hit
    #[serde(with = "rust_decimal::serde::float")]
    pub potential_profit: Decimal,

    /// Loss if stop is hit
    #[serde(with = "rust_decimal::serde::float")]
    pub potential_loss: Decimal,
}

impl PositionPlan {
    /// Build a plan for `quantity` shares at the given levels.
    ///
    /// Money amounts saturate at the `Decimal` bounds.
    pub fn new(quantity: u64, entry: Decimal, stop_loss: Decimal, target: Decimal) -> Self {
        let qty = Decimal::from(quantity);
        Self {
            quantity,
            investment: qty.saturating_mul(entry),
            potential_profit: qty.saturating_mul(target.saturating_sub(entry)),
            potential_loss: qty.saturating_mul(entry.saturating_sub(stop_loss)),
        }
    }

    /// Plan with no position.
    pub fn empty() -> Self {
        Self {
            quantity: 0,
            investment: Decimal::ZERO,
            potential_profit: Decimal::ZERO,
            potential_loss: Decimal::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}
