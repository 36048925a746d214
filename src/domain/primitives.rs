//! Domain primitives: TimeMs, Side, PositionId.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time in milliseconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeMs(pub i64);

impl TimeMs {
    pub fn new(ms: i64) -> Self {
        TimeMs(ms)
    }

    /// Wall-clock time, for callers that do not carry their own timestamps.
    pub fn now() -> Self {
        TimeMs(chrono::Utc::now().timestamp_millis())
    }
}

/// Direction of a simulated position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Profits when price rises.
    Long,
    /// Profits when price falls.
    Short,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(Side::Long),
            "short" => Ok(Side::Short),
            other => Err(format!("side must be long or short, got {}", other)),
        }
    }
}

/// Ledger-local position identifier, assigned sequentially from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(pub u64);

impl PositionId {
    pub fn new(id: u64) -> Self {
        PositionId(id)
    }
}

impl std::fmt::Display for PositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_string(&Side::Long).unwrap(), "\"long\"");
        assert_eq!(serde_json::to_string(&Side::Short).unwrap(), "\"short\"");
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!("LONG".parse::<Side>(), Ok(Side::Long));
        assert_eq!(" short ".parse::<Side>(), Ok(Side::Short));
        assert!("buy".parse::<Side>().is_err());
    }

    #[test]
    fn test_position_id_is_transparent() {
        assert_eq!(serde_json::to_string(&PositionId::new(7)).unwrap(), "7");
        assert_eq!(PositionId::new(7).to_string(), "7");
    }

    #[test]
    fn test_timems_ordering() {
        assert!(TimeMs::new(1000) < TimeMs::new(2000));
    }
}
