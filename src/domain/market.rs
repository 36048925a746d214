//! Market readings produced by the coordinate analyzer.

use crate::domain::TimeMs;
use serde::{Deserialize, Serialize};

/// Size of one whole-number cycle.
pub const CYCLE: i64 = 1000;

/// A single price observation. Not stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTick {
    pub price: f64,
    pub timestamp: TimeMs,
}

impl PriceTick {
    pub fn new(price: f64, timestamp: TimeMs) -> Self {
        PriceTick { price, timestamp }
    }
}

/// Position of a price inside its whole-number cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateState {
    /// Largest multiple of 1000 not above the price.
    pub whole_number: i64,
    /// Truncated offset from `whole_number`, in [0, 999].
    pub coordinate: u32,
    pub next_whole_number: i64,
}

/// Named coordinate band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Zone {
    /// [0, 226): resistance cluster under the beams.
    Beam,
    /// [226, 500)
    Weak,
    /// [500, 700)
    Middle,
    /// [700, 888]
    DipBuy,
    /// (888, 1000)
    Rocket,
}

/// Directional bias attached to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneSignal {
    Bullish,
    Bearish,
    Neutral,
    Opportunity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInfo {
    pub zone: Zone,
    pub name: String,
    pub signal: ZoneSignal,
    pub description: String,
}

/// Latched beam-break flags for the current whole-number cycle.
///
/// Each flag flips to true the first time the coordinate drops below its
/// threshold and stays true until the cycle changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamState {
    pub beam226: bool,
    pub beam113: bool,
    pub beam086: bool,
}

impl BeamState {
    /// All three beams broken within the same cycle.
    pub fn is_sledgehammer(&self) -> bool {
        self.beam226 && self.beam113 && self.beam086
    }

    pub fn broken_count(&self) -> u8 {
        self.beam226 as u8 + self.beam113 as u8 + self.beam086 as u8
    }
}

/// Short-term price direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Long,
    Short,
    Caution,
    Wait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub action: Action,
    pub confidence: Confidence,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sledgehammer_requires_all_beams() {
        let mut beams = BeamState {
            beam226: true,
            beam113: true,
            beam086: false,
        };
        assert!(!beams.is_sledgehammer());
        assert_eq!(beams.broken_count(), 2);

        beams.beam086 = true;
        assert!(beams.is_sledgehammer());
        assert_eq!(beams.broken_count(), 3);
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(serde_json::to_string(&Zone::DipBuy).unwrap(), "\"dipBuy\"");
        assert_eq!(
            serde_json::to_string(&ZoneSignal::Opportunity).unwrap(),
            "\"opportunity\""
        );
        assert_eq!(serde_json::to_string(&Action::Caution).unwrap(), "\"caution\"");
        assert_eq!(serde_json::to_string(&Direction::default()).unwrap(), "\"neutral\"");
    }

    #[test]
    fn test_coordinate_state_camel_case() {
        let state = CoordinateState {
            whole_number: 90000,
            coordinate: 450,
            next_whole_number: 91000,
        };
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["wholeNumber"], 90000);
        assert_eq!(json["coordinate"], 450);
        assert_eq!(json["nextWholeNumber"], 91000);
    }
}
