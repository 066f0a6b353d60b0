//! Gomoku self-play demo
//!
//! Plays the engine against itself on an empty board and prints each move.
//!
//! Usage: `gomoku15 [CONFIG.toml]`. Set `RUST_LOG=gomoku15=debug` to see
//! per-search statistics.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gomoku15::config::EngineConfig;
use gomoku15::{AIEngine, Board, GameStatus, Stone};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(&path).with_context(|| format!("loading config from {path}"))?,
        None => EngineConfig::default(),
    };
    info!(?config, "starting self-play");

    // Each side gets its own engine so difficulty policies draw independent streams
    let mut black = AIEngine::from_config(config.clone())?;
    let mut white = AIEngine::from_config(EngineConfig {
        seed: config.seed.wrapping_add(1),
        ..config
    })?;

    let mut board = Board::new();
    let mut side = Stone::Black;

    while board.status() == GameStatus::Ongoing {
        let engine = if side == Stone::Black { &mut black } else { &mut white };
        let result = engine.get_move_with_stats(&mut board, side);
        let Some(pos) = result.best_move else {
            bail!("engine returned no move for {side:?} on an ongoing board");
        };
        board
            .try_place_at(pos, side)
            .with_context(|| format!("engine chose an illegal move {pos}"))?;

        info!(
            ply = board.move_count(),
            ?side,
            %pos,
            search = ?result.search_type,
            score = result.score,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "move"
        );
        side = side.opponent();
    }

    println!("{board}");
    match board.status() {
        GameStatus::BlackWin => println!("Black (X) wins after {} moves", board.move_count()),
        GameStatus::WhiteWin => println!("White (O) wins after {} moves", board.move_count()),
        GameStatus::Draw => println!("Draw"),
        GameStatus::Ongoing => {}
    }
    Ok(())
}
