//! Simulated leveraged positions and their closed records.

use crate::domain::{Decimal, PositionId, Side, TimeMs};
use serde::{Deserialize, Serialize};

/// Mark-to-market of a position at some price, before fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Valuation {
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
}

/// Realized figures for closing a position at some price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub gross: Valuation,
    pub fee: Decimal,
    /// `gross.pnl - fee`.
    pub final_pnl: Decimal,
    pub final_pnl_percent: Decimal,
}

/// An open position.
///
/// `current_pnl` and `current_pnl_percent` are recomputed from the entry on
/// every reprice; they are never accumulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: PositionId,
    pub side: Side,
    pub entry_price: Decimal,
    pub entry_coordinate: u32,
    pub entry_timestamp: TimeMs,
    pub leverage: u32,
    /// Collateral posted, in dollars.
    pub size: Decimal,
    pub current_pnl: Decimal,
    pub current_pnl_percent: Decimal,
}

impl Position {
    /// Whether a move to `price` goes against the position.
    pub fn is_adverse(&self, price: Decimal) -> bool {
        match self.side {
            Side::Long => price < self.entry_price,
            Side::Short => price > self.entry_price,
        }
    }

    /// `(price diff / entry) * 100 * leverage`, or `None` when it leaves the
    /// decimal range.
    pub fn pnl_percent_at(&self, price: Decimal) -> Option<Decimal> {
        self.levered_return(price)?.checked_mul(Decimal::hundred())
    }

    /// Value the position at `price`:
    /// `pnl% = (price diff / entry) * 100 * leverage`, `pnl = size * pnl% / 100`.
    ///
    /// `None` when either figure leaves the decimal range.
    pub fn valuation_at(&self, price: Decimal) -> Option<Valuation> {
        let levered = self.levered_return(price)?;
        Some(Valuation {
            pnl: self.size.checked_mul(levered)?,
            pnl_percent: levered.checked_mul(Decimal::hundred())?,
        })
    }

    /// Notional exposure (`size * leverage`).
    pub fn notional(&self) -> Option<Decimal> {
        self.size.checked_mul(Decimal::from_u32(self.leverage))
    }

    /// Fee that closing would charge at `fee_rate` of notional.
    pub fn closing_fee(&self, fee_rate: Decimal) -> Option<Decimal> {
        self.notional()?.checked_mul(fee_rate)
    }

    /// Price at which the loss consumes the whole posted size.
    pub fn liquidation_price(&self) -> Option<Decimal> {
        let move_fraction = Decimal::one().checked_div(Decimal::from_u32(self.leverage))?;
        match self.side {
            Side::Long => self
                .entry_price
                .checked_mul(Decimal::one().checked_sub(move_fraction)?),
            Side::Short => self
                .entry_price
                .checked_mul(Decimal::one().checked_add(move_fraction)?),
        }
    }

    /// Everything a close at `price` realizes, net of the fee.
    pub fn settle_at(&self, price: Decimal, fee_rate: Decimal) -> Option<Settlement> {
        let gross = self.valuation_at(price)?;
        let fee = self.closing_fee(fee_rate)?;
        let final_pnl = gross.pnl.checked_sub(fee)?;
        let final_pnl_percent = final_pnl
            .checked_div(self.size)?
            .checked_mul(Decimal::hundred())?;
        Some(Settlement {
            gross,
            fee,
            final_pnl,
            final_pnl_percent,
        })
    }

    fn levered_return(&self, price: Decimal) -> Option<Decimal> {
        let price_diff = match self.side {
            Side::Long => price.checked_sub(self.entry_price)?,
            Side::Short => self.entry_price.checked_sub(price)?,
        };
        price_diff
            .checked_div(self.entry_price)?
            .checked_mul(Decimal::from_u32(self.leverage))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseReason {
    Manual,
    Liquidated,
}

/// A position after closure. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedPosition {
    pub id: PositionId,
    pub side: Side,
    pub entry_price: Decimal,
    pub entry_coordinate: u32,
    pub entry_timestamp: TimeMs,
    pub leverage: u32,
    pub size: Decimal,
    pub exit_price: Decimal,
    pub exit_timestamp: TimeMs,
    /// Realized P&L net of `fee`.
    pub final_pnl: Decimal,
    pub final_pnl_percent: Decimal,
    pub fee: Decimal,
    pub close_reason: CloseReason,
}

impl ClosedPosition {
    pub fn is_win(&self) -> bool {
        self.final_pnl.is_positive()
    }
}

/// Running totals over every closed position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_trades: u64,
    pub winning_trades: u64,
    pub losing_trades: u64,
    pub total_pnl: Decimal,
    /// Forced closures; always counted among `losing_trades` as well.
    pub liquidations: u64,
}

impl Stats {
    /// Totals with one more closure folded in. Break-even counts as a loss.
    ///
    /// `None` when `total_pnl` would leave the decimal range.
    pub fn checked_record(&self, closed: &ClosedPosition) -> Option<Stats> {
        let won = closed.is_win();
        Some(Stats {
            total_trades: self.total_trades + 1,
            winning_trades: self.winning_trades + u64::from(won),
            losing_trades: self.losing_trades + u64::from(!won),
            total_pnl: self.total_pnl.checked_add(closed.final_pnl)?,
            liquidations: self.liquidations
                + u64::from(closed.close_reason == CloseReason::Liquidated),
        })
    }

    /// Share of winning trades in percent, 0 when nothing has closed.
    pub fn win_rate(&self) -> f64 {
        if self.total_trades == 0 {
            return 0.0;
        }
        self.winning_trades as f64 / self.total_trades as f64 * 100.0
    }
}
