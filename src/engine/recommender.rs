use crate::domain::{Action, Confidence, Direction, Recommendation, ZoneInfo, ZoneSignal};

/// Derive a trade recommendation from the zone's bias and the price direction.
///
/// Every (signal, direction) pair has its own arm; there is no fallthrough.
pub fn recommend(zone: &ZoneInfo, direction: Direction) -> Recommendation {
    use Action::*;
    use Confidence::*;

    let (action, confidence, description) = match (zone.signal, direction) {
        (ZoneSignal::Opportunity, Direction::Bullish) => (
            Long,
            High,
            "Dip Buy Zone with price turning up: buy the dip",
        ),
        (ZoneSignal::Opportunity, Direction::Neutral) => (
            Long,
            Medium,
            "Dip Buy Zone but no momentum yet: scale in carefully",
        ),
        (ZoneSignal::Opportunity, Direction::Bearish) => (
            Caution,
            Low,
            "Dip Buy Zone while price is still falling: wait for the turn",
        ),
        (ZoneSignal::Bearish, Direction::Bearish) => (
            Short,
            Medium,
            "Falling through the beams: resistance is breaking down",
        ),
        (ZoneSignal::Bearish, Direction::Neutral) => (
            Short,
            Low,
            "Stalling under the beams: weak short bias",
        ),
        (ZoneSignal::Bearish, Direction::Bullish) => (
            Caution,
            Low,
            "Bouncing inside the Beam Zone: bias and momentum disagree",
        ),
        (ZoneSignal::Bullish, Direction::Bullish) => (
            Long,
            Medium,
            "Rocket Zone with momentum: breakout toward the next whole number",
        ),
        (ZoneSignal::Bullish, Direction::Neutral) => (
            Wait,
            Low,
            "Rocket Zone without momentum: wait for the breakout",
        ),
        (ZoneSignal::Bullish, Direction::Bearish) => (
            Caution,
            Low,
            "Rejected under the next whole number: bias and momentum disagree",
        ),
        (ZoneSignal::Neutral, Direction::Bullish) => (
            Wait,
            Low,
            "No-edge zone, rising: wait for the Dip Buy or Rocket Zone",
        ),
        (ZoneSignal::Neutral, Direction::Neutral) => (
            Wait,
            Low,
            "No-edge zone, flat: stay out",
        ),
        (ZoneSignal::Neutral, Direction::Bearish) => (
            Wait,
            Low,
            "No-edge zone, falling: watch the 226 beam",
        ),
    };

    Recommendation {
        action,
        confidence,
        description: description.to_string(),
    }
}
