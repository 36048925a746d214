use crate::domain::{BeamState, CoordinateState, Decimal, Direction, Recommendation, ZoneInfo};

use super::beam::BeamTracker;
use super::direction::DirectionEstimator;
use super::{coordinate, recommender, zone, EngineError};

/// Tuning for the direction window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub direction_window: usize,
    /// Relative first-to-last change that counts as a trend in a choppy window.
    pub direction_threshold: Decimal,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            direction_window: 10,
            // 0.1%
            direction_threshold: Decimal::new(rust_decimal::Decimal::new(1, 3)),
        }
    }
}

/// Everything the analyzer derives from one price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketReading {
    pub coordinate: CoordinateState,
    pub zone: ZoneInfo,
    pub beams: BeamState,
    pub direction: Direction,
    pub recommendation: Recommendation,
}

/// Per-session analyzer state: the beam cycle and the direction window.
#[derive(Debug, Clone)]
pub struct MarketAnalyzer {
    beams: BeamTracker,
    direction: DirectionEstimator,
}

impl MarketAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            beams: BeamTracker::new(),
            direction: DirectionEstimator::new(
                config.direction_window,
                config.direction_threshold,
            ),
        }
    }

    /// Fold one validated price into the analyzer.
    ///
    /// The price is mapped before any state is touched, so a rejected price
    /// leaves the beam cycle and window untouched.
    pub fn observe(&mut self, price: Decimal) -> Result<MarketReading, EngineError> {
        let coordinate = coordinate::map_price(price)?;
        let zone = zone::classify(coordinate.coordinate);
        let beams = self
            .beams
            .update(coordinate.coordinate, coordinate.whole_number);
        self.direction.observe(price);
        let direction = self.direction.direction();
        let recommendation = recommender::recommend(&zone, direction);

        Ok(MarketReading {
            coordinate,
            zone,
            beams,
            direction,
            recommendation,
        })
    }

    pub fn beams(&self) -> BeamState {
        self.beams.state()
    }

    pub fn direction(&self) -> Direction {
        self.direction.direction()
    }
}

impl Default for MarketAnalyzer {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}
