//! Pure, synchronous engines: coordinate analysis and the position ledger.

use crate::domain::PositionId;
use thiserror::Error;

pub mod analyzer;
pub mod beam;
pub mod coordinate;
pub mod direction;
pub mod ledger;
pub mod liquidation;
pub mod recommender;
pub mod zone;

pub use analyzer::{AnalyzerConfig, MarketAnalyzer, MarketReading};
pub use beam::BeamTracker;
pub use direction::DirectionEstimator;
pub use ledger::{LedgerConfig, LedgerSnapshot, PositionLedger};

/// Failures raised by the engines. A failed call never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Price is non-positive, non-finite or outside the decimal range.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
    /// Order parameters out of range, or no price established yet.
    #[error("Invalid order: {0}")]
    InvalidOrder(String),
    #[error("Position not found: {0}")]
    NotFound(PositionId),
}
