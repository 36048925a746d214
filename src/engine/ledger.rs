use crate::domain::{
    CloseReason, ClosedPosition, Decimal, Position, PositionId, Side, Stats, TimeMs, Valuation,
};
use serde::Serialize;
use std::collections::VecDeque;

use super::EngineError;

/// Limits and fee model for a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub max_leverage: u32,
    /// Fraction of notional charged when a position closes.
    pub fee_rate: Decimal,
    /// Closed positions retained in memory, most recent first.
    pub history_limit: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_leverage: 200,
            // 0.05%
            fee_rate: Decimal::new(rust_decimal::Decimal::new(5, 4)),
            history_limit: 50,
        }
    }
}

/// Read-only view of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub open_positions: Vec<Position>,
    pub history: Vec<ClosedPosition>,
    pub stats: Stats,
}

/// Closures computed against the current state, not yet applied.
struct StagedCloses {
    closed: Vec<ClosedPosition>,
    stats: Stats,
}

/// Open positions, bounded close history and running stats.
pub struct PositionLedger {
    config: LedgerConfig,
    next_position_id: u64,
    open: Vec<Position>,
    history: VecDeque<ClosedPosition>,
    stats: Stats,
}

impl PositionLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            next_position_id: 1,
            open: Vec::new(),
            history: VecDeque::new(),
            stats: Stats::default(),
        }
    }

    /// Open a position at `price`.
    ///
    /// Nothing is mutated unless every constraint holds. Besides the range
    /// checks, the stake must be small enough that its notional, fee and
    /// liquidation price stay inside the decimal range.
    pub fn open(
        &mut self,
        side: Side,
        price: Decimal,
        coordinate: u32,
        leverage: u32,
        size: Decimal,
        at: TimeMs,
    ) -> Result<Position, EngineError> {
        if !price.is_positive() {
            return Err(EngineError::InvalidOrder(
                "no valid price established".to_string(),
            ));
        }
        if leverage < 1 || leverage > self.config.max_leverage {
            return Err(EngineError::InvalidOrder(format!(
                "leverage must be between 1 and {}, got {}",
                self.config.max_leverage, leverage
            )));
        }
        if !size.is_positive() {
            return Err(EngineError::InvalidOrder(format!(
                "size must be positive, got {}",
                size
            )));
        }

        let position = Position {
            id: PositionId::new(self.next_position_id),
            side,
            entry_price: price,
            entry_coordinate: coordinate,
            entry_timestamp: at,
            leverage,
            size,
            current_pnl: Decimal::zero(),
            current_pnl_percent: Decimal::zero(),
        };
        if position.liquidation_price().is_none()
            || position.settle_at(price, self.config.fee_rate).is_none()
        {
            return Err(EngineError::InvalidOrder(format!(
                "size {} at leverage {} is too large",
                size, leverage
            )));
        }

        self.next_position_id += 1;
        self.open.push(position.clone());
        Ok(position)
    }

    /// Revalue every open position from its entry at `price`.
    ///
    /// Either every position is revalued or, when some valuation leaves the
    /// decimal range, none is.
    pub fn reprice(&mut self, price: Decimal) -> Result<(), EngineError> {
        let valuations = self.valuations(price)?;
        for (position, valuation) in self.open.iter_mut().zip(valuations) {
            position.current_pnl = valuation.pnl;
            position.current_pnl_percent = valuation.pnl_percent;
        }
        Ok(())
    }

    /// Close a position at `price`, charging the closing fee.
    ///
    /// The position leaves the open set, lands at the front of the history and
    /// is folded into stats, all in one step. A second close of the same id is
    /// `NotFound`.
    pub fn close(
        &mut self,
        id: PositionId,
        price: Decimal,
        reason: CloseReason,
        at: TimeMs,
    ) -> Result<ClosedPosition, EngineError> {
        let staged = self.stage_closes(&[id], price, reason, at)?;
        let mut closed = self.commit_closes(staged);
        closed.pop().ok_or(EngineError::NotFound(id))
    }

    /// One tick against the ledger: force-close `breached` as liquidated and
    /// revalue everything left, at `price`.
    ///
    /// All of it is computed before anything is applied, so a failure leaves
    /// positions, history and stats exactly as they were.
    pub fn apply_tick(
        &mut self,
        price: Decimal,
        breached: &[PositionId],
        at: TimeMs,
    ) -> Result<Vec<ClosedPosition>, EngineError> {
        let staged = self.stage_closes(breached, price, CloseReason::Liquidated, at)?;
        self.reprice(price)?;
        Ok(self.commit_closes(staged))
    }

    fn valuations(&self, price: Decimal) -> Result<Vec<Valuation>, EngineError> {
        if !price.is_positive() {
            return Err(EngineError::InvalidPrice(format!(
                "{} is not positive",
                price
            )));
        }
        self.open
            .iter()
            .map(|p| {
                p.valuation_at(price).ok_or_else(|| {
                    EngineError::InvalidPrice(format!(
                        "{} puts position {} outside the representable P&L range",
                        price, p.id
                    ))
                })
            })
            .collect()
    }

    /// Build the closed records and the resulting stats without touching state.
    fn stage_closes(
        &self,
        ids: &[PositionId],
        price: Decimal,
        reason: CloseReason,
        at: TimeMs,
    ) -> Result<StagedCloses, EngineError> {
        if !price.is_positive() {
            return Err(EngineError::InvalidPrice(format!(
                "{} is not positive",
                price
            )));
        }
        let mut stats = self.stats.clone();
        let mut closed = Vec::with_capacity(ids.len());
        for &id in ids {
            if closed.iter().any(|c: &ClosedPosition| c.id == id) {
                continue;
            }
            let position = self.get(id).ok_or(EngineError::NotFound(id))?;
            let overflow = || {
                EngineError::InvalidPrice(format!(
                    "closing position {} at {} leaves the representable P&L range",
                    id, price
                ))
            };
            let settlement = position
                .settle_at(price, self.config.fee_rate)
                .ok_or_else(overflow)?;
            let record = ClosedPosition {
                id: position.id,
                side: position.side,
                entry_price: position.entry_price,
                entry_coordinate: position.entry_coordinate,
                entry_timestamp: position.entry_timestamp,
                leverage: position.leverage,
                size: position.size,
                exit_price: price,
                exit_timestamp: at,
                final_pnl: settlement.final_pnl,
                final_pnl_percent: settlement.final_pnl_percent,
                fee: settlement.fee,
                close_reason: reason,
            };
            stats = stats.checked_record(&record).ok_or_else(overflow)?;
            closed.push(record);
        }
        Ok(StagedCloses { closed, stats })
    }

    fn commit_closes(&mut self, staged: StagedCloses) -> Vec<ClosedPosition> {
        let StagedCloses { closed, stats } = staged;
        self.open.retain(|p| !closed.iter().any(|c| c.id == p.id));
        for record in &closed {
            self.history.push_front(record.clone());
        }
        self.history.truncate(self.config.history_limit);
        self.stats = stats;
        closed
    }

    pub fn get(&self, id: PositionId) -> Option<&Position> {
        self.open.iter().find(|p| p.id == id)
    }

    /// Open positions in the order they were opened.
    pub fn open_positions(&self) -> &[Position] {
        &self.open
    }

    /// Closed positions, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &ClosedPosition> {
        self.history.iter()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            open_positions: self.open.clone(),
            history: self.history.iter().cloned().collect(),
            stats: self.stats.clone(),
        }
    }
}

impl Default for PositionLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_default_fee_rate() {
        assert_eq!(LedgerConfig::default().fee_rate, d("0.0005"));
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut ledger = PositionLedger::default();
        let a = ledger
            .open(Side::Long, d("100"), 100, 1, d("10"), TimeMs::new(0))
            .unwrap();
        let b = ledger
            .open(Side::Short, d("100"), 100, 1, d("10"), TimeMs::new(0))
            .unwrap();
        assert_eq!(a.id, PositionId::new(1));
        assert_eq!(b.id, PositionId::new(2));
    }

    #[test]
    fn test_rejected_open_does_not_consume_id() {
        let mut ledger = PositionLedger::default();
        assert!(ledger
            .open(Side::Long, d("100"), 100, 0, d("10"), TimeMs::new(0))
            .is_err());
        let p = ledger
            .open(Side::Long, d("100"), 100, 1, d("10"), TimeMs::new(0))
            .unwrap();
        assert_eq!(p.id, PositionId::new(1));
    }

    #[test]
    fn test_reprice_rejects_invalid_price() {
        let mut ledger = PositionLedger::default();
        ledger
            .open(Side::Long, d("100"), 100, 2, d("10"), TimeMs::new(0))
            .unwrap();
        ledger.reprice(d("110")).unwrap();
        assert!(matches!(
            ledger.reprice(Decimal::zero()),
            Err(EngineError::InvalidPrice(_))
        ));
        assert_eq!(ledger.open_positions()[0].current_pnl_percent, d("20"));
    }

    #[test]
    fn test_oversized_stake_is_rejected_at_open() {
        let mut ledger = PositionLedger::default();
        let err = ledger
            .open(
                Side::Long,
                d("90000"),
                0,
                200,
                d("700000000000000000000000000"),
                TimeMs::new(0),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidOrder(_)));
        assert!(ledger.open_positions().is_empty());

        let p = ledger
            .open(Side::Long, d("90000"), 0, 200, d("10"), TimeMs::new(0))
            .unwrap();
        assert_eq!(p.id, PositionId::new(1));
    }

    #[test]
    fn test_reprice_overflow_leaves_every_position_untouched() {
        let mut ledger = PositionLedger::default();
        let small = ledger
            .open(Side::Long, d("100"), 100, 1, d("10"), TimeMs::new(0))
            .unwrap();
        ledger
            .open(
                Side::Long,
                d("100"),
                0,
                200,
                d("1000000000000000000000000"),
                TimeMs::new(0),
            )
            .unwrap();
        ledger.reprice(d("110")).unwrap();
        let before = ledger.snapshot();

        let err = ledger.reprice(d("9000000000000000000")).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPrice(_)));
        assert_eq!(ledger.snapshot(), before);
        assert_eq!(ledger.get(small.id).unwrap().current_pnl, d("1"));
    }

    #[test]
    fn test_apply_tick_closes_breached_and_reprices_rest() {
        let mut ledger = PositionLedger::default();
        let risky = ledger
            .open(Side::Long, d("90000"), 0, 100, d("100"), TimeMs::new(0))
            .unwrap();
        let safe = ledger
            .open(Side::Long, d("90000"), 0, 10, d("100"), TimeMs::new(0))
            .unwrap();

        let closed = ledger
            .apply_tick(d("89100"), &[risky.id], TimeMs::new(5))
            .unwrap();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].close_reason, CloseReason::Liquidated);
        assert_eq!(closed[0].final_pnl, d("-105"));
        assert_eq!(ledger.open_positions().len(), 1);
        assert_eq!(ledger.get(safe.id).unwrap().current_pnl_percent, d("-10"));
        assert_eq!(ledger.stats().liquidations, 1);
    }

    #[test]
    fn test_apply_tick_with_unknown_id_changes_nothing() {
        let mut ledger = PositionLedger::default();
        let p = ledger
            .open(Side::Long, d("90000"), 0, 100, d("100"), TimeMs::new(0))
            .unwrap();
        let before = ledger.snapshot();
        let err = ledger
            .apply_tick(d("89000"), &[p.id, PositionId::new(9)], TimeMs::new(1))
            .unwrap_err();
        assert_eq!(err, EngineError::NotFound(PositionId::new(9)));
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_get() {
        let mut ledger = PositionLedger::default();
        let p = ledger
            .open(Side::Long, d("100"), 100, 2, d("10"), TimeMs::new(0))
            .unwrap();
        assert!(ledger.get(p.id).is_some());
        assert!(ledger.get(PositionId::new(99)).is_none());
    }
}
