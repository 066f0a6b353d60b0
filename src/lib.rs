//! Gomoku AI Engine for freestyle 15x15 Gomoku
//!
//! - 15x15 board, Black moves first
//! - Five or more in a row wins (overlines count)
//! - Full board without a line is a draw
//! - No captures, no forbidden moves
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and scoped apply/undo
//! - [`rules`]: Win detection
//! - [`eval`]: Pattern evaluation and move-ordering heuristics
//! - [`search`]: Candidate generation, alpha-beta, selection policies
//! - [`engine`]: Main AI engine integrating all components
//! - [`config`]: Engine parameters and TOML loading
//!
//! # Quick Start
//!
//! ```
//! use gomoku15::{AIEngine, Board, Stone};
//!
//! let mut board = Board::new();
//! let mut engine = AIEngine::new();
//!
//! board.place(7, 7, Stone::Black);
//!
//! // AI responds as White
//! if let Some(pos) = engine.search_with_depth(&mut board, Stone::White, 2).best_move {
//!     board.place_at(pos, Stone::White);
//!     println!("AI plays at ({}, {})", pos.row, pos.col);
//! }
//! assert_eq!(board.move_count(), 2);
//! ```
//!
//! # Search Priority
//!
//! 1. Empty board: center cell
//! 2. Immediate winning move
//! 3. Block the opponent's five
//! 4. Alpha-Beta search over pruned, ordered candidates

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, GameStatus, PlacedStone, Pos, Stone, BOARD_SIZE};
pub use config::{Difficulty, EngineConfig};
pub use engine::{best_move, AIEngine, MoveResult, SearchType};
pub use error::{ConfigError, MoveError, UndoError};
