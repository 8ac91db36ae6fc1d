//! Scoring policy: outcome + game length -> a score per seat
//!
//! By default a win is 1, a loss 0, a draw 0.5, and the Second seat gets a
//! 0.05 bonus on wins and draws since it moves at a disadvantage. An
//! illegal move costs the offender one unit per possible ply; the opponent
//! gets no credit rather than a win.

use neurotac_core::{EngineError, Outcome, Player, MAX_PLIES};
use serde::{Deserialize, Serialize};

/// Score constants for one game
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub win: f32,
    pub loss: f32,
    pub draw: f32,
    /// Added to Second's score on a win or a draw
    pub second_seat_bonus: f32,
    /// Added to both scores per ply played (wins, draws and losses only)
    pub round_bonus: f32,
    /// Score of a player who made an illegal move
    pub illegal_penalty: f32,
    /// Score of the opponent of a player who made an illegal move
    pub illegal_credit: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            win: 1.0,
            loss: 0.0,
            draw: 0.5,
            second_seat_bonus: 0.05,
            round_bonus: 0.0,
            illegal_penalty: -(MAX_PLIES as f32),
            illegal_credit: 0.0,
        }
    }
}

impl ScoringConfig {
    /// Check the ordering the training signal depends on
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |msg: &str| Err(EngineError::InvalidScoring(msg.to_string()));

        let fields = [
            self.win,
            self.loss,
            self.draw,
            self.second_seat_bonus,
            self.round_bonus,
            self.illegal_penalty,
            self.illegal_credit,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return invalid("scores must be finite");
        }
        if !(self.loss < self.draw && self.draw < self.win) {
            return invalid("expected loss < draw < win");
        }
        if self.round_bonus < 0.0 || self.second_seat_bonus < 0.0 {
            return invalid("bonuses must not be negative");
        }
        if self.illegal_penalty >= self.loss {
            return invalid("illegal penalty must be below a loss");
        }
        if self.illegal_credit >= self.win {
            return invalid("illegal-move credit must stay below a win");
        }
        if self.illegal_penalty >= self.illegal_credit {
            return invalid("illegal penalty must be below the opponent's credit");
        }
        Ok(())
    }

    /// Largest score a seat can receive in one game
    pub fn max_score(&self) -> f32 {
        self.win + self.second_seat_bonus + self.round_bonus * MAX_PLIES as f32
    }

    /// Scores for (First, Second) after a game of `plies` plies
    pub fn score(&self, outcome: Outcome, plies: u32) -> (f32, f32) {
        let length = self.round_bonus * plies as f32;
        match outcome {
            Outcome::Win(Player::First) => (self.win + length, self.loss + length),
            Outcome::Win(Player::Second) => (
                self.loss + length,
                self.win + self.second_seat_bonus + length,
            ),
            Outcome::Draw => (
                self.draw + length,
                self.draw + self.second_seat_bonus + length,
            ),
            Outcome::IllegalMove(Player::First) => (self.illegal_penalty, self.illegal_credit),
            Outcome::IllegalMove(Player::Second) => (self.illegal_credit, self.illegal_penalty),
        }
    }

    /// Score of `player` after the game
    pub fn score_for(&self, outcome: Outcome, plies: u32, player: Player) -> f32 {
        let (first, second) = self.score(outcome, plies);
        match player {
            Player::First => first,
            Player::Second => second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let scoring = ScoringConfig::default();
        assert!(scoring.validate().is_ok());
        assert_eq!(scoring.score(Outcome::Draw, 9), (0.5, 0.55));
        assert_eq!(scoring.score(Outcome::Win(Player::First), 5), (1.0, 0.0));
        assert_eq!(scoring.score(Outcome::Win(Player::Second), 6), (0.0, 1.05));
    }

    #[test]
    fn test_winner_beats_loser_at_every_length() {
        let scoring = ScoringConfig {
            round_bonus: 0.01,
            ..Default::default()
        };
        for plies in 5..=9 {
            for winner in [Player::First, Player::Second] {
                let outcome = Outcome::Win(winner);
                let won = scoring.score_for(outcome, plies, winner);
                let lost = scoring.score_for(outcome, plies, winner.opponent());
                assert!(won > lost);
            }
        }
    }

    #[test]
    fn test_illegal_move_is_minimum_and_opponent_not_rewarded() {
        let scoring = ScoringConfig {
            round_bonus: 0.02,
            ..Default::default()
        };
        let outcome = Outcome::IllegalMove(Player::First);
        let (offender, opponent) = scoring.score(outcome, 3);
        assert_eq!(offender, scoring.illegal_penalty);
        assert!(opponent < scoring.win);

        // nothing else a seat can get is as low
        for plies in 0..=9 {
            for other in [Outcome::Draw, Outcome::Win(Player::First), Outcome::Win(Player::Second)] {
                let (a, b) = scoring.score(other, plies);
                assert!(offender < a && offender < b);
            }
        }
    }

    #[test]
    fn test_round_bonus_rewards_longer_games() {
        let scoring = ScoringConfig {
            round_bonus: 0.1,
            ..Default::default()
        };
        let short = scoring.score_for(Outcome::Win(Player::First), 5, Player::Second);
        let long = scoring.score_for(Outcome::Win(Player::First), 9, Player::Second);
        assert!(long > short);
    }

    #[test]
    fn test_validate_rejects_bad_orderings() {
        let draw_above_win = ScoringConfig {
            draw: 1.2,
            ..Default::default()
        };
        assert!(matches!(draw_above_win.validate(), Err(EngineError::InvalidScoring(_))));

        let soft_penalty = ScoringConfig {
            illegal_penalty: 0.0,
            ..Default::default()
        };
        assert!(soft_penalty.validate().is_err());

        let rewarding_credit = ScoringConfig {
            illegal_credit: 1.0,
            ..Default::default()
        };
        assert!(rewarding_credit.validate().is_err());
    }

    #[test]
    fn test_validate_keeps_offender_lowest() {
        let harsh_credit = ScoringConfig {
            illegal_credit: -20.0,
            ..Default::default()
        };
        assert!(matches!(harsh_credit.validate(), Err(EngineError::InvalidScoring(_))));

        let equal = ScoringConfig {
            illegal_credit: -9.0,
            ..Default::default()
        };
        assert!(equal.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        for config in [
            ScoringConfig { round_bonus: f32::NAN, ..Default::default() },
            ScoringConfig { second_seat_bonus: f32::NAN, ..Default::default() },
            ScoringConfig { illegal_penalty: f32::NEG_INFINITY, ..Default::default() },
            ScoringConfig { win: f32::INFINITY, ..Default::default() },
        ] {
            assert!(matches!(config.validate(), Err(EngineError::InvalidScoring(_))));
        }
    }

    #[test]
    fn test_max_score() {
        assert_eq!(ScoringConfig::default().max_score(), 1.05);
    }
}
