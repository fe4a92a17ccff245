//! Match/escalate decision

use serde::{Deserialize, Serialize};

/// Distances at or below this value count as a match
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Outcome of comparing a distance against the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Match,
    NoMatch,
}

/// Turns a nearest-neighbour distance into a match decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchDecider {
    threshold: f32,
}

impl MatchDecider {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// `Match` iff `distance <= threshold`; NaN is never a match
    pub fn decide(&self, distance: f32) -> Decision {
        if distance <= self.threshold {
            Decision::Match
        } else {
            Decision::NoMatch
        }
    }
}

impl Default for MatchDecider {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_match() {
        let decider = MatchDecider::default();
        assert_eq!(decider.decide(0.5), Decision::Match);
        assert_eq!(decider.decide(0.500_001), Decision::NoMatch);
    }

    #[test]
    fn test_sweep_around_threshold() {
        let decider = MatchDecider::default();
        for step in 0..=100 {
            let d = step as f32 / 100.0;
            let expected = if d <= 0.5 { Decision::Match } else { Decision::NoMatch };
            assert_eq!(decider.decide(d), expected, "distance {}", d);
        }
        assert_eq!(decider.decide(0.0), Decision::Match);
        assert_eq!(decider.decide(12.0), Decision::NoMatch);
    }

    #[test]
    fn test_repeatable() {
        let decider = MatchDecider::default();
        assert_eq!(decider.decide(0.3), decider.decide(0.3));
        assert_eq!(decider.decide(0.9), decider.decide(0.9));
    }

    #[test]
    fn test_custom_threshold() {
        let decider = MatchDecider::new(0.2);
        assert_eq!(decider.threshold(), 0.2);
        assert_eq!(decider.decide(0.3), Decision::NoMatch);
    }

    #[test]
    fn test_nan_is_no_match() {
        assert_eq!(MatchDecider::default().decide(f32::NAN), Decision::NoMatch);
    }
}
