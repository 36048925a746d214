//! Exact decimal type for prices, stakes and P&L, backed by rust_decimal.
//!
//! Prices arrive as `f64` from the feed and are converted exactly once, after
//! validation. Everything downstream (P&L, fees, stats) stays in decimal so that
//! totals fold without floating-point drift.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal value used for every monetary quantity in the ledger.
///
/// Serializes to a JSON number (not a string).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Parse a Decimal from a string losslessly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Decimal)
    }

    /// Convert a float using its shortest round-trip representation
    /// (`90450.25_f64` becomes exactly `90450.25`).
    ///
    /// Returns `None` for NaN, infinities and values outside the decimal range.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        RustDecimal::from_f64(value).map(Decimal)
    }

    pub fn from_u32(value: u32) -> Self {
        Decimal(RustDecimal::from(value))
    }

    /// Format the Decimal as a canonical string (no exponent notation).
    pub fn to_canonical_string(&self) -> String {
        let normalized = self.0.normalize();
        format!("{}", normalized)
    }

    /// Largest integer not greater than the value, if it fits in an i64.
    pub fn floor_i64(&self) -> Option<i64> {
        self.0.floor().to_i64()
    }

    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    pub fn one() -> Self {
        Decimal(RustDecimal::ONE)
    }

    pub fn hundred() -> Self {
        Decimal(RustDecimal::ONE_HUNDRED)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    pub fn abs(&self) -> Self {
        Decimal(self.0.abs())
    }

    /// `None` when the sum leaves the decimal range.
    pub fn checked_add(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_add(rhs.0).map(Decimal)
    }

    pub fn checked_sub(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_sub(rhs.0).map(Decimal)
    }

    /// `None` when the product leaves the decimal range.
    pub fn checked_mul(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_mul(rhs.0).map(Decimal)
    }

    /// `None` on division by zero or when the quotient leaves the decimal range.
    pub fn checked_div(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_div(rhs.0).map(Decimal)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Decimal {
    fn add_assign(&mut self, rhs: Decimal) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 * rhs.0)
    }
}

impl std::ops::Div for Decimal {
    type Output = Decimal;

    fn div(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 / rhs.0)
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}

impl std::iter::Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Decimal {
        iter.fold(Decimal::zero(), |acc, d| acc + d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_from_f64_uses_shortest_representation() {
        assert_eq!(Decimal::from_f64(90450.25), Some(d("90450.25")));
        assert_eq!(Decimal::from_f64(0.1), Some(d("0.1")));
        assert_eq!(Decimal::from_f64(90000.0), Some(d("90000")));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert_eq!(Decimal::from_f64(f64::NAN), None);
        assert_eq!(Decimal::from_f64(f64::INFINITY), None);
        assert_eq!(Decimal::from_f64(f64::NEG_INFINITY), None);
        assert_eq!(Decimal::from_f64(1e40), None);
    }

    #[test]
    fn test_floor_i64() {
        assert_eq!(d("90450.99").floor_i64(), Some(90450));
        assert_eq!(d("999.999").floor_i64(), Some(999));
        assert_eq!(d("1000").floor_i64(), Some(1000));
    }

    #[test]
    fn test_pnl_arithmetic_is_exact() {
        // (450 / 90000) * 100 * 10
        let pct = d("450") / d("90000") * Decimal::hundred() * d("10");
        assert_eq!(pct, d("5"));
        let pnl = d("1000") * pct / Decimal::hundred();
        assert_eq!(pnl, d("50"));
    }

    #[test]
    fn test_checked_ops_report_overflow() {
        let big = d("70000000000000000000000000000");
        assert_eq!(big.checked_mul(d("2")), None);
        assert_eq!(big.checked_add(big), None);
        assert_eq!((-big).checked_sub(big), None);
        assert_eq!(d("1").checked_div(Decimal::zero()), None);

        assert_eq!(d("1.5").checked_mul(d("4")), Some(d("6")));
        assert_eq!(d("1").checked_div(d("8")), Some(d("0.125")));
        assert_eq!(d("2").checked_sub(d("3.5")), Some(d("-1.5")));
    }

    #[test]
    fn test_sum_and_add_assign() {
        let total: Decimal = vec![d("5"), d("-5.5"), d("1.25")].into_iter().sum();
        assert_eq!(total, d("0.75"));

        let mut acc = Decimal::zero();
        acc += d("2.5");
        acc += d("-1");
        assert_eq!(acc, d("1.5"));
    }

    #[test]
    fn test_sign_helpers() {
        assert!(d("0.01").is_positive());
        assert!(d("-0.01").is_negative());
        assert!(!Decimal::zero().is_positive());
        assert!(!Decimal::zero().is_negative());
    }

    #[test]
    fn test_json_serialization_is_number() {
        let json = serde_json::to_value(d("-5")).unwrap();
        assert!(json.is_number());
        assert_eq!(json.to_string(), "-5.0");
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(d("99.9900").to_string(), "99.99");
    }
}
