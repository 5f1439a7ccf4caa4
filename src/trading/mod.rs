//! Screening logic: signal classification and position sizing.

mod classifier;
mod config;
mod position_sizer;

pub use classifier::SignalClassifier;
pub use config::{RiskSettings, ScreenerConfig};
pub use position_sizer::PositionSizer;
