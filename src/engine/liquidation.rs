use crate::domain::{Decimal, Position, PositionId};

/// Loss, in percent of posted size, at which a position is force-closed.
pub fn liquidation_threshold() -> Decimal {
    -Decimal::hundred()
}

/// Whether `position` has lost its entire posted size at `price`.
///
/// Evaluated from the entry, independent of the last stored valuation. A
/// percentage too large to represent can only be beyond the threshold when the
/// move is adverse.
pub fn is_liquidatable(position: &Position, price: Decimal) -> bool {
    match position.pnl_percent_at(price) {
        Some(pnl_percent) => pnl_percent <= liquidation_threshold(),
        None => position.is_adverse(price),
    }
}

/// Ids of every position that must be force-closed at `price`, in input order.
pub fn scan(positions: &[Position], price: Decimal) -> Vec<PositionId> {
    positions
        .iter()
        .filter(|p| is_liquidatable(p, price))
        .map(|p| p.id)
        .collect()
}
