use serde::{Deserialize, Serialize};

/// Coefficients of the scoring formula
/// `(revealed + flags * flag_weight) * max(floor_multiplier, time_bonus - minutes / decay_minutes)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub flag_weight: u32,
    pub time_bonus: f64,
    pub floor_multiplier: f64,
    pub decay_minutes: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            flag_weight: 5,
            time_bonus: 1.2,
            floor_multiplier: 0.6,
            decay_minutes: 5.0,
        }
    }
}

impl ScoreWeights {
    pub fn time_multiplier(&self, elapsed_seconds: u64) -> f64 {
        let minutes = elapsed_seconds as f64 / 60.0;
        (self.time_bonus - minutes / self.decay_minutes).max(self.floor_multiplier)
    }

    pub fn score(&self, revealed_safe: usize, correct_flags: usize, elapsed_seconds: u64) -> u32 {
        let base = revealed_safe as f64 + correct_flags as f64 * f64::from(self.flag_weight);
        let score = (base * self.time_multiplier(elapsed_seconds)).floor();
        // `as` saturates, so a negative product from odd weights lands on 0.
        score as u32
    }
}

/// Score with the default weights.
pub fn score(revealed_safe: usize, correct_flags: usize, elapsed_seconds: u64) -> u32 {
    ScoreWeights::default().score(revealed_safe, correct_flags, elapsed_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_example() {
        assert_eq!(score(10, 1, 30), 16);
        assert_eq!(score(10, 1, 30), score(10, 1, 30));
    }

    #[test]
    fn fast_games_get_full_bonus() {
        assert_eq!(score(100, 0, 0), 120);
    }

    #[test]
    fn slow_games_hit_the_floor() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.time_multiplier(3600), 0.6);
        assert_eq!(score(100, 0, 3600), score(100, 0, 7200));
        assert!(score(100, 0, 3600) > 0);
    }

    #[test]
    fn monotonic_in_correctness_and_time() {
        for elapsed in [0, 45, 180, 600] {
            assert!(score(20, 0, elapsed) <= score(21, 0, elapsed));
            assert!(score(20, 2, elapsed) <= score(20, 3, elapsed));
        }
        for elapsed in 0..600 {
            assert!(score(50, 5, elapsed) >= score(50, 5, elapsed + 1));
        }
    }

    #[test]
    fn nothing_revealed_scores_zero() {
        assert_eq!(score(0, 0, 0), 0);
    }
}
