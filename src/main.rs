//! Command-line front end: pick one move for a given board.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tictac::rules::status;
use tictac::search::TranspositionTable;
use tictac::search::INF;
use tictac::{AIEngine, Difficulty, EngineConfig, GameStatus, Mark, Position};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Row-major board: X, O, and '.', '-' or '_' for empty cells
    #[arg(short, long)]
    board: String,

    /// Player to move (X or O); implied by mark counts when omitted
    #[arg(short, long)]
    to_move: Option<char>,

    /// Difficulty tier: easy, medium or hard (default from the config file)
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Time budget for the iterative-deepening search, in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,

    /// Run a single fixed-depth search instead of a difficulty tier
    #[arg(long)]
    depth: Option<u8>,

    /// TOML file with engine settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, &args.log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();

    let position = parse_position(&args.board, args.to_move)?;

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(ms) = args.time_ms {
        config.hard_time_budget_ms = ms;
    }
    let engine = AIEngine::with_config(config);

    if let GameStatus::Won(line) = status(&position) {
        log::warn!("{} has already won on cells {:?}", line.player, line.cells);
    }

    let chosen = if let Some(depth) = args.depth {
        let mut tt = TranspositionTable::new();
        let result = engine.search(&position, depth, -INF, INF, &mut tt);
        log::info!("depth {depth}: score {} nodes {}", result.score, result.nodes);
        result.best_move
    } else if let (Some(ms), None) = (args.time_ms, args.difficulty) {
        engine.search_best_move(&position, Duration::from_millis(ms))
    } else {
        let difficulty = args.difficulty.unwrap_or(engine.config().default_difficulty);
        let result = engine.choose_move_with_stats(&position, difficulty);
        log::info!(
            "{difficulty}: {:?} score {} in {}ms ({} nodes)",
            result.source,
            result.score,
            result.time_ms,
            result.nodes
        );
        result.best_move
    };

    match chosen {
        Some(cell) => {
            let (row, col) = position.row_col(cell);
            let after = position.play(cell)?;
            println!("{} plays {cell} (row {row}, col {col})", position.to_move());
            println!("{after}");
            match status(&after) {
                GameStatus::Won(line) => println!("{} wins", line.player),
                GameStatus::Draw => println!("draw"),
                GameStatus::Ongoing => {}
            }
        }
        None => println!("no move available"),
    }
    Ok(())
}

fn parse_position(board: &str, to_move: Option<char>) -> Result<Position> {
    let position: Position = board.parse().context("invalid board")?;
    match to_move {
        None => Ok(position),
        Some(ch) => match Mark::from_char(ch) {
            Some(mark @ (Mark::X | Mark::O)) => Ok(position.with_to_move(mark)?),
            _ => bail!("--to-move must be X or O, got {ch:?}"),
        },
    }
}
