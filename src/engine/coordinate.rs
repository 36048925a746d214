use crate::domain::market::CYCLE;
use crate::domain::{CoordinateState, Decimal};

use super::EngineError;

/// Validate a raw feed price and convert it to a decimal.
pub fn parse_price(raw: f64) -> Result<Decimal, EngineError> {
    if !raw.is_finite() {
        return Err(EngineError::InvalidPrice(format!("{} is not finite", raw)));
    }
    if raw <= 0.0 {
        return Err(EngineError::InvalidPrice(format!("{} is not positive", raw)));
    }
    Decimal::from_f64(raw)
        .ok_or_else(|| EngineError::InvalidPrice(format!("{} is out of range", raw)))
}

/// Map a raw feed price onto its whole-number cycle.
pub fn map(price: f64) -> Result<CoordinateState, EngineError> {
    map_price(parse_price(price)?)
}

/// Map a decimal price onto its whole-number cycle.
pub fn map_price(price: Decimal) -> Result<CoordinateState, EngineError> {
    if !price.is_positive() {
        return Err(EngineError::InvalidPrice(format!("{} is not positive", price)));
    }
    let out_of_range = || EngineError::InvalidPrice(format!("{} is out of range", price));
    let truncated = price.floor_i64().ok_or_else(out_of_range)?;

    let whole_number = truncated.div_euclid(CYCLE) * CYCLE;
    let coordinate = (truncated - whole_number) as u32;
    let next_whole_number = whole_number.checked_add(CYCLE).ok_or_else(out_of_range)?;

    Ok(CoordinateState {
        whole_number,
        coordinate,
        next_whole_number,
    })
}
