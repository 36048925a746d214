//! Domain types for the coordinate analyzer and the position ledger.
//!
//! This module provides:
//! - Exact decimal handling for prices, stakes and P&L
//! - Primitives: TimeMs, Side, PositionId
//! - Market readings: coordinate, zone, beams, direction, recommendation
//! - Open/closed positions and aggregate stats

pub mod decimal;
pub mod market;
pub mod position;
pub mod primitives;

pub use decimal::Decimal;
pub use market::{
    Action, BeamState, Confidence, CoordinateState, Direction, PriceTick, Recommendation, Zone,
    ZoneInfo, ZoneSignal,
};
pub use position::{CloseReason, ClosedPosition, Position, Settlement, Stats, Valuation};
pub use primitives::{PositionId, Side, TimeMs};
