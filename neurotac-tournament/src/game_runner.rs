//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use neurotac_core::{
    choose_move, random_legal_move, EngineConfig, EngineError, GameSession, Outcome, Player,
    Strategy,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::scoring::ScoringConfig;

/// A participant in a game
#[derive(Clone, Copy)]
pub enum Contender<'a> {
    /// External strategy, moves chosen by the engine
    Strategy(&'a dyn Strategy),
    /// Baseline that picks uniformly among legal moves
    Random,
}

impl<'a> Contender<'a> {
    pub fn name(&self) -> &str {
        match self {
            Contender::Strategy(s) => s.name(),
            Contender::Random => "random",
        }
    }
}

/// Outcome of a single game
#[derive(Clone, Debug)]
pub struct GameOutcome {
    /// Final outcome
    pub outcome: Outcome,
    /// Number of plies played
    pub plies: u32,
    /// Cells proposed, in order (the last one may be illegal)
    pub moves: Vec<usize>,
    /// Score of the First seat
    pub first_score: f32,
    /// Score of the Second seat
    pub second_score: f32,
}

impl GameOutcome {
    /// Get winner (None for draws and illegal moves)
    pub fn winner(&self) -> Option<Player> {
        self.outcome.winner()
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == Outcome::Draw
    }

    /// Score of the given seat
    pub fn score(&self, player: Player) -> f32 {
        match player {
            Player::First => self.first_score,
            Player::Second => self.second_score,
        }
    }
}

/// Plays games on one reusable session
///
/// Each concurrent evaluation needs its own runner; the session board is
/// never shared.
pub struct GameRunner {
    engine: EngineConfig,
    scoring: ScoringConfig,
    session: GameSession,
    rng: ChaCha8Rng,
}

impl GameRunner {
    /// Create a new game runner
    pub fn new(engine: EngineConfig, scoring: ScoringConfig, seed: u64) -> Self {
        Self {
            engine,
            scoring,
            session: GameSession::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Play one game to completion
    ///
    /// Illegal moves end the game as an outcome. Errors are reserved for
    /// strategies that break their width contract and for unusable
    /// scoring constants.
    pub fn play_game(&mut self, first: Contender, second: Contender) -> Result<GameOutcome, EngineError> {
        self.scoring.validate()?;
        for contender in [first, second] {
            if let Contender::Strategy(s) = contender {
                self.engine.check_strategy(s)?;
            }
        }

        self.session.reset();
        let mut moves = Vec::new();

        let outcome = loop {
            if let Some(outcome) = self.session.outcome() {
                break outcome;
            }

            let player = self.session.to_move();
            let contender = match player {
                Player::First => first,
                Player::Second => second,
            };
            let cell = self.next_move(contender, player)?;
            moves.push(cell);
            self.session.play(cell);
            tracing::trace!("{} ({}) -> {}\n{}", contender.name(), player, cell, self.session.board());
        };

        let plies = self.session.plies();
        let (first_score, second_score) = self.scoring.score(outcome, plies);
        tracing::debug!(
            "{:>20} vs {:<20} {:?} after {} plies ({:.2}/{:.2})",
            first.name(),
            second.name(),
            outcome,
            plies,
            first_score,
            second_score
        );

        self.session.reset();
        Ok(GameOutcome {
            outcome,
            plies,
            moves,
            first_score,
            second_score,
        })
    }

    fn next_move(&mut self, contender: Contender, player: Player) -> Result<usize, EngineError> {
        let board = self.session.board();
        match contender {
            Contender::Strategy(strategy) => {
                let decision = choose_move(strategy, board, player, self.session.plies(), &self.engine)?;
                Ok(decision.cell)
            }
            Contender::Random => match random_legal_move(board, &mut self.rng) {
                Some(cell) => Ok(cell),
                None => unreachable!("a full board is always terminal"),
            },
        }
    }

    /// One game, `a` as First; returns (score of a, score of b)
    pub fn combat(&mut self, a: &dyn Strategy, b: &dyn Strategy) -> Result<(f32, f32), EngineError> {
        let game = self.play_game(Contender::Strategy(a), Contender::Strategy(b))?;
        Ok((game.first_score, game.second_score))
    }

    /// Seat-independent fitness: one game per seat against the random baseline
    pub fn teach(&mut self, strategy: &dyn Strategy) -> Result<f32, EngineError> {
        let (as_first, as_second) = self.teach_games(strategy)?;
        Ok(as_first.first_score + as_second.second_score)
    }

    /// The two games behind [`GameRunner::teach`]
    pub fn teach_games(&mut self, strategy: &dyn Strategy) -> Result<(GameOutcome, GameOutcome), EngineError> {
        let as_first = self.play_game(Contender::Strategy(strategy), Contender::Random)?;
        let as_second = self.play_game(Contender::Random, Contender::Strategy(strategy))?;
        Ok((as_first, as_second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Likes, ScanPolicy, Sequence, Stubborn};
    use neurotac_core::MAX_PLIES;

    fn policy_runner() -> GameRunner {
        GameRunner::new(EngineConfig::policy(), ScoringConfig::default(), 42)
    }

    #[test]
    fn test_scan_vs_scan_first_wins_on_diagonal() {
        // Both take the lowest empty cell: X0 O1 X2 O3 X4 O5 X6 -> 2-4-6
        let a = ScanPolicy("a".into());
        let b = ScanPolicy("b".into());
        let game = policy_runner()
            .play_game(Contender::Strategy(&a), Contender::Strategy(&b))
            .unwrap();
        assert_eq!(game.outcome, Outcome::Win(Player::First));
        assert_eq!(game.moves, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(game.plies, 7);
        assert_eq!((game.first_score, game.second_score), (1.0, 0.0));
    }

    #[test]
    fn test_repeated_cell_is_illegal_for_first() {
        let stubborn = Stubborn(0);
        let scan = ScanPolicy("scan".into());
        let mut runner = policy_runner();
        // X0, O1 (lowest empty), X0 again
        let game = runner
            .play_game(Contender::Strategy(&stubborn), Contender::Strategy(&scan))
            .unwrap();
        assert_eq!(game.outcome, Outcome::IllegalMove(Player::First));
        assert_eq!(game.first_score, runner.scoring().illegal_penalty);
        assert!(game.second_score < runner.scoring().win);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_first_hitting_second_mark_takes_penalty() {
        // X4, O0 (lowest empty), then X targets Second's 0
        let scan = ScanPolicy("scan".into());
        let opener = Sequence(vec![4, 0]);
        let mut runner = policy_runner();
        let game = runner
            .play_game(Contender::Strategy(&opener), Contender::Strategy(&scan))
            .unwrap();
        assert_eq!(game.moves, vec![4, 0, 0]);
        assert_eq!(game.outcome, Outcome::IllegalMove(Player::First));
        assert_eq!(game.plies, 2);
        assert_eq!(game.first_score, runner.scoring().illegal_penalty);
        assert_eq!(game.second_score, runner.scoring().illegal_credit);
    }

    #[test]
    fn test_invalid_scoring_is_rejected_before_play() {
        let scoring = ScoringConfig {
            illegal_credit: -20.0,
            ..Default::default()
        };
        let mut runner = GameRunner::new(EngineConfig::policy(), scoring, 1);
        let scan = ScanPolicy("scan".into());
        let err = runner.combat(&scan, &Stubborn(0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidScoring(_)));
    }

    #[test]
    fn test_occupied_by_opponent_is_illegal() {
        // Second always targets 0, which First takes on the opening move
        let scan = ScanPolicy("scan".into());
        let stubborn = Stubborn(0);
        let game = policy_runner()
            .play_game(Contender::Strategy(&scan), Contender::Strategy(&stubborn))
            .unwrap();
        assert_eq!(game.outcome, Outcome::IllegalMove(Player::Second));
        assert_eq!(game.plies, 1);
    }

    #[test]
    fn test_random_games_always_terminate() {
        let mut runner = policy_runner();
        for _ in 0..100 {
            let game = runner.play_game(Contender::Random, Contender::Random).unwrap();
            assert!(game.plies <= MAX_PLIES);
            assert!(!matches!(game.outcome, Outcome::IllegalMove(_)));
        }
    }

    #[test]
    fn test_width_mismatch_is_fatal() {
        let leaf = Likes(vec![4]);
        let scan = ScanPolicy("scan".into());
        let err = policy_runner()
            .play_game(Contender::Strategy(&leaf), Contender::Strategy(&scan))
            .unwrap_err();
        assert!(matches!(err, EngineError::OutputWidth { ref strategy, .. } if strategy == "likes"));
    }

    #[test]
    fn test_minimax_never_plays_illegally() {
        let mut runner = GameRunner::new(EngineConfig::minimax(2), ScoringConfig::default(), 7);
        let leaf = Likes(vec![0, 4, 8]);
        for _ in 0..20 {
            let (as_first, as_second) = runner.teach_games(&leaf).unwrap();
            assert!(as_first.outcome.offender().is_none());
            assert!(as_second.outcome.offender().is_none());
        }
    }

    #[test]
    fn test_teach_sums_both_seats() {
        let scan = ScanPolicy("scan".into());
        let mut a = policy_runner();
        let mut b = policy_runner();
        let fitness = a.teach(&scan).unwrap();
        let (first, second) = b.teach_games(&scan).unwrap();
        assert_eq!(fitness, first.first_score + second.second_score);
    }

    #[test]
    fn test_combat_returns_scores_in_argument_order() {
        let stubborn = Stubborn(0);
        let scan = ScanPolicy("scan".into());
        let (s, c) = policy_runner().combat(&scan, &stubborn).unwrap();
        assert_eq!(s, 0.0);
        assert_eq!(c, ScoringConfig::default().illegal_penalty);
    }
}
