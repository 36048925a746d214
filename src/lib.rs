pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use config::Config;
pub use domain::{
    Action, BeamState, CloseReason, ClosedPosition, Confidence, CoordinateState, Decimal,
    Direction, Position, PositionId, PriceTick, Recommendation, Side, Stats, TimeMs, Zone,
    ZoneInfo, ZoneSignal,
};
pub use engine::{EngineError, LedgerConfig, LedgerSnapshot, PositionLedger};
pub use error::AppError;
pub use orchestration::{Session, TickReport};
