use crate::domain::{Decimal, Direction};
use std::collections::VecDeque;

/// Rolling-window trend detector.
///
/// With fewer than two samples the direction is neutral. Otherwise:
/// 1. a strictly increasing window is bullish, a strictly decreasing one bearish;
/// 2. any other window is judged on the relative change from its oldest to its
///    newest sample: at least `+threshold` is bullish, at most `-threshold` is
///    bearish, anything in between is neutral.
#[derive(Debug, Clone)]
pub struct DirectionEstimator {
    window: VecDeque<Decimal>,
    capacity: usize,
    threshold: Decimal,
}

impl DirectionEstimator {
    /// `capacity` is clamped to at least 2 so a direction can ever be formed.
    pub fn new(capacity: usize, threshold: Decimal) -> Self {
        let capacity = capacity.max(2);
        Self {
            window: VecDeque::with_capacity(capacity + 1),
            capacity,
            threshold: threshold.abs(),
        }
    }

    /// Push a sample, evicting the oldest when full. Non-positive prices are
    /// ignored.
    pub fn observe(&mut self, price: Decimal) {
        if !price.is_positive() {
            return;
        }
        if self.window.len() >= self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(price);
    }

    pub fn direction(&self) -> Direction {
        let (Some(&first), Some(&last)) = (self.window.front(), self.window.back()) else {
            return Direction::Neutral;
        };
        if self.window.len() < 2 {
            return Direction::Neutral;
        }

        let pairs = || self.window.iter().zip(self.window.iter().skip(1));
        if pairs().all(|(a, b)| b > a) {
            return Direction::Bullish;
        }
        if pairs().all(|(a, b)| b < a) {
            return Direction::Bearish;
        }

        let Some(change) = last
            .checked_sub(first)
            .and_then(|diff| diff.checked_div(first))
        else {
            return Direction::Neutral;
        };
        if change >= self.threshold && change.is_positive() {
            Direction::Bullish
        } else if change <= -self.threshold && change.is_negative() {
            Direction::Bearish
        } else {
            Direction::Neutral
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
