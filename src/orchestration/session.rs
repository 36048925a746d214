use crate::domain::{
    BeamState, CloseReason, ClosedPosition, CoordinateState, Decimal, Direction, Position,
    PositionId, PriceTick, Recommendation, Side, TimeMs, ZoneInfo,
};
use crate::engine::coordinate::{self, parse_price};
use crate::engine::{
    liquidation, AnalyzerConfig, EngineError, LedgerConfig, LedgerSnapshot, MarketAnalyzer,
    PositionLedger,
};
use serde::Serialize;

/// Outcome of one price tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    pub price: Decimal,
    pub timestamp: TimeMs,
    pub coordinate_state: CoordinateState,
    pub zone_info: ZoneInfo,
    pub beam_state: BeamState,
    pub sledgehammer: bool,
    pub direction: Direction,
    pub recommendation: Recommendation,
    pub liquidated_ids: Vec<PositionId>,
}

/// Single owner of one play session's analyzer and ledger state.
///
/// Every method takes `&mut self`; callers sharing a session across tasks
/// serialize access behind one lock so that an open or close can never land
/// in the middle of a reprice/liquidation pass.
pub struct Session {
    analyzer: MarketAnalyzer,
    ledger: PositionLedger,
    last_price: Option<Decimal>,
}

impl Session {
    pub fn new(analyzer_config: &AnalyzerConfig, ledger_config: LedgerConfig) -> Self {
        Self {
            analyzer: MarketAnalyzer::new(analyzer_config),
            ledger: PositionLedger::new(ledger_config),
            last_price: None,
        }
    }

    /// Feed one price observation through the ledger and the analyzer.
    ///
    /// Order: validate, scan, force-close breached positions and reprice the
    /// rest, then analyze. A price that is invalid, or that puts some position
    /// outside the representable P&L range, is rejected before anything is
    /// touched.
    pub fn process_tick(&mut self, tick: PriceTick) -> Result<TickReport, EngineError> {
        let price = parse_price(tick.price)?;
        coordinate::map_price(price)?;

        let breached = liquidation::scan(self.ledger.open_positions(), price);
        let liquidated = self.ledger.apply_tick(price, &breached, tick.timestamp)?;
        let reading = self.analyzer.observe(price)?;

        let mut liquidated_ids = Vec::with_capacity(liquidated.len());
        for closed in liquidated {
            tracing::warn!(
                id = %closed.id,
                side = %closed.side,
                leverage = closed.leverage,
                entry = %closed.entry_price,
                exit = %closed.exit_price,
                pnl = %closed.final_pnl,
                "position liquidated"
            );
            liquidated_ids.push(closed.id);
        }
        self.last_price = Some(price);

        tracing::debug!(
            price = %price,
            coordinate = reading.coordinate.coordinate,
            zone = %reading.zone.name,
            direction = ?reading.direction,
            action = ?reading.recommendation.action,
            "tick processed"
        );

        Ok(TickReport {
            price,
            timestamp: tick.timestamp,
            coordinate_state: reading.coordinate,
            zone_info: reading.zone,
            beam_state: reading.beams,
            sledgehammer: reading.beams.is_sledgehammer(),
            direction: reading.direction,
            recommendation: reading.recommendation,
            liquidated_ids,
        })
    }

    /// Open a position at the last tick's price.
    pub fn open_position(
        &mut self,
        side: Side,
        leverage: u32,
        size: Decimal,
        at: TimeMs,
    ) -> Result<Position, EngineError> {
        let price = self.last_price.ok_or_else(|| {
            EngineError::InvalidOrder("no price established yet".to_string())
        })?;
        let entry = coordinate::map_price(price)?;
        let position = self
            .ledger
            .open(side, price, entry.coordinate, leverage, size, at)?;

        tracing::info!(
            id = %position.id,
            side = %position.side,
            leverage = position.leverage,
            size = %position.size,
            entry = %position.entry_price,
            "position opened"
        );
        Ok(position)
    }

    /// Close a position at the last tick's price.
    ///
    /// Every tick force-closes breached positions before releasing the session,
    /// so a position still open here has not crossed its liquidation threshold
    /// at that price; a position already liquidated is `NotFound`.
    pub fn close_position(
        &mut self,
        id: PositionId,
        at: TimeMs,
    ) -> Result<ClosedPosition, EngineError> {
        let price = match self.last_price {
            Some(price) => price,
            None => return Err(EngineError::NotFound(id)),
        };
        let closed = self.ledger.close(id, price, CloseReason::Manual, at)?;
        tracing::info!(
            id = %closed.id,
            reason = ?closed.close_reason,
            exit = %closed.exit_price,
            fee = %closed.fee,
            pnl = %closed.final_pnl,
            "position closed"
        );
        Ok(closed)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    pub fn open_positions(&self) -> &[Position] {
        self.ledger.open_positions()
    }

    pub fn last_price(&self) -> Option<Decimal> {
        self.last_price
    }

}

impl Default for Session {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default(), LedgerConfig::default())
    }
}
