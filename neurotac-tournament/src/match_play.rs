//! Match play - both seat orders between two strategies
//!
//! Level 2 - Phase-level implementation

use neurotac_core::{EngineError, Outcome, Player, Strategy};

use crate::game_runner::{Contender, GameOutcome, GameRunner};

/// Result of a match, from the perspective of the two named strategies
#[derive(Clone, Debug, Default)]
pub struct MatchResult {
    /// Summed score of strategy A
    pub a_score: f32,
    /// Summed score of strategy B
    pub b_score: f32,
    pub a_wins: u32,
    pub b_wins: u32,
    pub draws: u32,
    /// Games A lost by playing an illegal move
    pub a_illegal: u32,
    /// Games B lost by playing an illegal move
    pub b_illegal: u32,
    /// Individual games, with A seated first in even-indexed games
    pub games: Vec<GameOutcome>,
}

impl MatchResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn games_played(&self) -> u32 {
        self.games.len() as u32
    }

    /// Record a game in which A sat in `a_seat`
    fn record(&mut self, game: GameOutcome, a_seat: Player) {
        let b_seat = a_seat.opponent();
        self.a_score += game.score(a_seat);
        self.b_score += game.score(b_seat);

        match game.outcome {
            Outcome::Win(p) if p == a_seat => self.a_wins += 1,
            Outcome::Win(_) => self.b_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::IllegalMove(p) if p == a_seat => self.a_illegal += 1,
            Outcome::IllegalMove(_) => self.b_illegal += 1,
        }
        self.games.push(game);
    }

    /// Average plies per game
    pub fn avg_plies(&self) -> f32 {
        if self.games.is_empty() {
            0.0
        } else {
            self.games.iter().map(|g| g.plies as f32).sum::<f32>() / self.games.len() as f32
        }
    }
}

/// Play A against B (Level 2 phase)
///
/// A takes the First seat; with `both_seats` a second game swaps seats.
pub fn play_match(
    runner: &mut GameRunner,
    a: &dyn Strategy,
    b: &dyn Strategy,
    both_seats: bool,
) -> Result<MatchResult, EngineError> {
    let mut result = MatchResult::empty();

    let game = runner.play_game(Contender::Strategy(a), Contender::Strategy(b))?;
    result.record(game, Player::First);

    if both_seats {
        let game = runner.play_game(Contender::Strategy(b), Contender::Strategy(a))?;
        result.record(game, Player::Second);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;
    use crate::testing::{ScanPolicy, Stubborn};
    use neurotac_core::EngineConfig;

    fn runner() -> GameRunner {
        GameRunner::new(EngineConfig::policy(), ScoringConfig::default(), 1)
    }

    #[test]
    fn test_both_seats_between_identical_players() {
        let a = ScanPolicy("a".into());
        let b = ScanPolicy("b".into());
        let result = play_match(&mut runner(), &a, &b, true).unwrap();

        // First always wins the scan-vs-scan game, so each takes one
        assert_eq!(result.games_played(), 2);
        assert_eq!(result.a_wins, 1);
        assert_eq!(result.b_wins, 1);
        assert_eq!(result.a_score, 1.0);
        assert_eq!(result.b_score, 1.0);
        assert_eq!(result.avg_plies(), 7.0);
    }

    #[test]
    fn test_single_seat() {
        let a = ScanPolicy("a".into());
        let b = ScanPolicy("b".into());
        let result = play_match(&mut runner(), &a, &b, false).unwrap();
        assert_eq!(result.games_played(), 1);
        assert_eq!(result.a_wins, 1);
        assert_eq!(result.b_wins, 0);
    }

    #[test]
    fn test_illegal_moves_attributed() {
        let stubborn = Stubborn(0);
        let scan = ScanPolicy("scan".into());
        let result = play_match(&mut runner(), &stubborn, &scan, true).unwrap();
        // As First: X0, O1, X0 illegal. As Second: X0 by scan, then O0 illegal.
        assert_eq!(result.a_illegal, 2);
        assert_eq!(result.b_illegal, 0);
        assert_eq!(result.a_score, 2.0 * ScoringConfig::default().illegal_penalty);
        assert_eq!(result.b_score, 0.0);
    }

    #[test]
    fn test_empty_result() {
        let result = MatchResult::empty();
        assert_eq!(result.games_played(), 0);
        assert_eq!(result.avg_plies(), 0.0);
    }
}
