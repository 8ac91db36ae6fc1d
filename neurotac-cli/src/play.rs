//! Play command - a human against a saved strategy or the random baseline

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::Rng;

use neurotac_core::{choose_move, random_legal_move, EngineConfig, GameSession, Outcome, Player, Strategy};

use crate::args::{load_network, EngineArgs, NetworkArgs};
use crate::create_rng;

#[derive(Args)]
pub struct PlayArgs {
    /// Batch file holding the opponent; omit to play the random baseline
    #[arg(long, value_name = "FILE")]
    pub batch: Option<PathBuf>,

    /// Name or index of the opponent within its batch
    #[arg(long, default_value = "0")]
    pub pick: String,

    /// Take the second seat instead of the first
    #[arg(long)]
    pub second: bool,

    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(flatten)]
    pub network: NetworkArgs,
}

pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let engine = args.engine.to_config()?;
    let opponent = match &args.batch {
        Some(path) => Some(load_network(path, &args.pick, &args.network.layers(&engine))?),
        None => None,
    };
    let human = if args.second { Player::Second } else { Player::First };
    let mut rng = create_rng(seed);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = play_session(
        &mut stdin.lock(),
        &mut stdout.lock(),
        human,
        opponent.as_ref().map(|n| n as &dyn Strategy),
        &engine,
        &mut rng,
    )?;
    tracing::info!("game over: {:?}", outcome);
    Ok(())
}

/// Run one interactive game; `None` as opponent means the random baseline
///
/// Returns `None` if input ran out before the game finished.
pub fn play_session<I: BufRead, O: Write, R: Rng>(
    input: &mut I,
    output: &mut O,
    human: Player,
    opponent: Option<&dyn Strategy>,
    engine: &EngineConfig,
    rng: &mut R,
) -> Result<Option<Outcome>> {
    let mut session = GameSession::new();
    writeln!(output, "Cells are numbered 0-8, left to right, top to bottom.")?;

    while !session.is_over() {
        let mover = session.to_move();
        let cell = if mover == human {
            write!(output, "{}your move ({}): ", session.board(), human)?;
            output.flush()?;
            match read_cell(input, output, &session)? {
                Some(cell) => cell,
                None => return Ok(None),
            }
        } else {
            let cell = match opponent {
                Some(strategy) => choose_move(strategy, session.board(), mover, session.plies(), engine)?.cell,
                None => random_legal_move(session.board(), rng).context("no legal move on a live board")?,
            };
            writeln!(output, "opponent plays {}", cell)?;
            cell
        };
        session.play(cell);
    }

    let outcome = session.outcome();
    write!(output, "{}", session.board())?;
    match outcome {
        Some(Outcome::Win(p)) if p == human => writeln!(output, "You win!")?,
        Some(Outcome::Win(_)) => writeln!(output, "You lose.")?,
        Some(Outcome::Draw) => writeln!(output, "Draw.")?,
        Some(Outcome::IllegalMove(p)) => writeln!(output, "Illegal move by {}.", p)?,
        None => {}
    }
    Ok(outcome)
}

/// Read lines until one names an open cell
fn read_cell<I: BufRead, O: Write>(input: &mut I, output: &mut O, session: &GameSession) -> Result<Option<usize>> {
    let legal = session.legal_moves();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().parse::<usize>() {
            Ok(cell) if legal.contains(&cell) => return Ok(Some(cell)),
            _ => {
                write!(output, "pick one of {:?}: ", legal)?;
                output.flush()?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::io::Cursor;

    /// Policy that always wants the lowest open cell
    struct Scan;

    impl Strategy for Scan {
        fn name(&self) -> &str {
            "scan"
        }
        fn input_width(&self) -> usize {
            9
        }
        fn output_width(&self) -> usize {
            9
        }
        fn evaluate(&self, input: &[f32]) -> Vec<f32> {
            input
                .iter()
                .enumerate()
                .map(|(i, &v)| if v == 0.0 { 10.0 - i as f32 } else { 0.0 })
                .collect()
        }
        fn weights(&self) -> Vec<f32> {
            Vec::new()
        }
    }

    #[test]
    fn test_human_wins_middle_column() {
        // Human 1, scan 0; human 4, scan 2; human 7 completes 1-4-7
        let mut input = Cursor::new("1\n4\n7\n");
        let mut output = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = play_session(
            &mut input,
            &mut output,
            Player::First,
            Some(&Scan),
            &EngineConfig::policy(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(outcome, Some(Outcome::Win(Player::First)));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("opponent plays 0"));
        assert!(text.contains("You win!"));
    }

    #[test]
    fn test_bad_input_reprompts() {
        // "x" and the occupied 0 are rejected before 3 is accepted
        let mut input = Cursor::new("x\n0\n3\n");
        let mut output = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = play_session(
            &mut input,
            &mut output,
            Player::Second,
            Some(&Scan),
            &EngineConfig::policy(),
            &mut rng,
        )
        .unwrap();

        // Input runs out on the human's second turn
        assert_eq!(outcome, None);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("pick one of").count(), 2);
    }

    #[test]
    fn test_random_opponent_game_finishes() {
        let moves: String = (0..9).map(|c| format!("{}\n", c)).collect::<String>().repeat(5);
        let mut input = Cursor::new(moves);
        let mut output = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let outcome = play_session(&mut input, &mut output, Player::First, None, &EngineConfig::policy(), &mut rng)
            .unwrap();
        assert!(matches!(outcome, Some(Outcome::Win(_)) | Some(Outcome::Draw)));
    }
}
