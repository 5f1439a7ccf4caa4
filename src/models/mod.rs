//! Data models for quotes, classified trade candidates, and position plans.

mod candidate;
mod plan;
mod quote;

pub use candidate::{Signal, TradeCandidate};
pub use plan::PositionPlan;
pub use quote::Quote;
