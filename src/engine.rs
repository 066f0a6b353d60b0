//! Main AI Engine integrating all search components
//!
//! This module provides the engine facade the match controller talks to.
//! The search follows a priority system:
//!
//! 1. **Opening**: an empty board is answered with the center cell
//! 2. **Immediate win**: any move that completes five is played at once
//! 3. **Forced block**: a single opponent winning cell is blocked at once
//! 4. **Alpha-Beta**: depth- and breadth-limited minimax over candidates
//!
//! The alpha-beta result is a ranked list of root moves; a pluggable
//! [`SelectionPolicy`] picks the move actually played.
//!
//! # Example
//!
//! ```
//! use gomoku15::{AIEngine, Board, Stone};
//!
//! let mut engine = AIEngine::new();
//! let mut board = Board::from_moves(&[(7, 7)]).unwrap();
//!
//! let result = engine.search_with_depth(&mut board, Stone::White, 2);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use tracing::info;

use crate::board::{Board, Pos, Stone};
use crate::config::{Difficulty, EngineConfig};
use crate::error::ConfigError;
use crate::rules::would_win;
use crate::search::{
    generate_candidates, BestMove, DifficultyPolicy, SearchResult, Searcher, SelectionPolicy,
    WIN_SCORE,
};

/// Type of search that produced the result.
///
/// This indicates which phase of the search hierarchy found the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Center cell on an empty board
    Opening,
    /// Completes five in a row
    ImmediateWin,
    /// Blocks the opponent's five in a row
    ForcedBlock,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    /// Best move found; `None` when the game is already over
    pub best_move: Option<Pos>,
    /// Score of the chosen move from the mover's perspective
    pub score: i32,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
    /// Ply budget the move was searched with
    pub depth: u8,
}

impl MoveResult {
    #[inline]
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type: SearchType::AlphaBeta,
            time_ms,
            nodes: 0,
            depth: 0,
        }
    }

    #[inline]
    fn opening(time_ms: u64) -> Self {
        Self {
            best_move: Some(Pos::CENTER),
            score: 0,
            search_type: SearchType::Opening,
            time_ms,
            nodes: 1,
            depth: 0,
        }
    }

    #[inline]
    fn immediate_win(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: WIN_SCORE,
            search_type: SearchType::ImmediateWin,
            time_ms,
            nodes: 1,
            depth: 1,
        }
    }

    #[inline]
    fn forced_block(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            search_type: SearchType::ForcedBlock,
            time_ms,
            nodes: 1,
            depth: 1,
        }
    }

    /// Wrap a searcher result with the move the policy chose.
    fn from_search(result: &SearchResult, chosen: Option<Pos>, time_ms: u64) -> Self {
        let score = chosen
            .and_then(|pos| result.ranked.iter().find(|m| m.pos == pos))
            .map_or(result.score, |m| m.score);
        let search_type = if result.immediate_win {
            SearchType::ImmediateWin
        } else if result.forced_block {
            SearchType::ForcedBlock
        } else {
            SearchType::AlphaBeta
        };
        Self {
            best_move: chosen,
            score,
            search_type,
            time_ms,
            nodes: result.nodes,
            depth: result.depth,
        }
    }
}

/// Main AI Engine for Gomoku.
///
/// Owns a configured [`Searcher`] and a [`SelectionPolicy`]. Each call
/// borrows the caller's board for tentative placements and hands it back
/// unchanged.
///
/// # Example
///
/// ```
/// use gomoku15::{AIEngine, Board, Stone};
/// use gomoku15::config::{Difficulty, EngineConfig};
///
/// let mut engine = AIEngine::from_config(EngineConfig::for_difficulty(Difficulty::Easy)).unwrap();
/// let mut board = Board::from_moves(&[(7, 7), (8, 8)]).unwrap();
/// if let Some(best_move) = engine.get_move(&mut board, Stone::Black) {
///     println!("Play at ({}, {})", best_move.row, best_move.col);
/// }
/// ```
pub struct AIEngine {
    config: EngineConfig,
    searcher: Searcher,
    policy: Box<dyn SelectionPolicy>,
}

impl AIEngine {
    /// Create a new AI engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Create an engine from a validated configuration.
    ///
    /// A configured difficulty installs a seeded [`DifficultyPolicy`];
    /// otherwise the engine always plays the top-ranked move.
    pub fn from_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Preset engine for a difficulty level.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::build(EngineConfig::for_difficulty(difficulty))
    }

    fn build(config: EngineConfig) -> Self {
        let policy: Box<dyn SelectionPolicy> = match config.difficulty {
            Some(difficulty) => Box::new(DifficultyPolicy::new(difficulty, config.seed)),
            None => Box::new(BestMove),
        };
        Self {
            searcher: Searcher::new(&config),
            config,
            policy,
        }
    }

    /// Replace the root move selection policy.
    #[must_use]
    pub fn with_policy(mut self, policy: impl SelectionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the best move at the configured depth.
    #[must_use]
    pub fn get_move(&mut self, board: &mut Board, color: Stone) -> Option<Pos> {
        self.get_move_with_stats(board, color).best_move
    }

    /// Get the best move at the configured depth, with search statistics.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &mut Board, color: Stone) -> MoveResult {
        self.search_with_depth(board, color, self.config.depth)
    }

    /// Search with an explicit ply budget. A budget of 0 is treated as 1.
    ///
    /// # Search Priority
    ///
    /// 0. Finished game: no move
    /// 1. Empty board: center
    /// 2. Immediate winning move
    /// 3. Single opponent winning cell: block it
    /// 4. Alpha-beta search, then the selection policy
    pub fn search_with_depth(&mut self, board: &mut Board, color: Stone, depth: u8) -> MoveResult {
        let start = Instant::now();
        let elapsed_ms = |start: Instant| start.elapsed().as_millis() as u64;
        let depth = depth.max(1);

        if board.status().is_terminal() || color == Stone::Empty {
            return MoveResult::no_move(elapsed_ms(start));
        }

        if board.is_board_empty() {
            info!("empty board, opening at center");
            return MoveResult::opening(elapsed_ms(start));
        }

        if let Some(win) = find_winning_cells(board, color).first().copied() {
            info!(pos = %win, ?color, "immediate win");
            return MoveResult::immediate_win(win, elapsed_ms(start));
        }

        let threats = find_winning_cells(board, color.opponent());
        if let [block] = threats.as_slice() {
            info!(pos = %block, ?color, "blocking opponent five");
            return MoveResult::forced_block(*block, elapsed_ms(start));
        }

        let result = self.searcher.search(board, color, depth);
        let chosen = self.policy.select(&result.ranked);
        MoveResult::from_search(&result, chosen, elapsed_ms(start))
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AIEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AIEngine")
            .field("config", &self.config)
            .field("searcher", &self.searcher)
            .finish_non_exhaustive()
    }
}

/// Empty cells where `color` completes five, in candidate order.
///
/// A winning cell always touches one of `color`'s stones, so the radius-1
/// neighborhood is enough.
fn find_winning_cells(board: &Board, color: Stone) -> Vec<Pos> {
    if color == Stone::Empty || board.is_board_empty() {
        return Vec::new();
    }
    generate_candidates(board, 1)
        .into_iter()
        .filter(|&pos| would_win(board, pos, color))
        .collect()
}

/// Choose a move for `side` with a ply budget of `depth_budget`, using the
/// default engine configuration.
///
/// Returns `None` only if the game is already decided or the board is full.
/// The board is left exactly as it was passed in.
///
/// ```
/// use gomoku15::{best_move, Board, Pos, Stone};
///
/// let mut board = Board::new();
/// assert_eq!(best_move(&mut board, Stone::Black, 1), Some(Pos::CENTER));
/// ```
pub fn best_move(board: &mut Board, side: Stone, depth_budget: u8) -> Option<Pos> {
    AIEngine::new()
        .search_with_depth(board, side, depth_budget)
        .best_move
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::RootMove;

    fn board_with(black: &[(u8, u8)], white: &[(u8, u8)]) -> Board {
        let mut board = Board::new();
        for &(r, c) in black {
            board.place_at(Pos::new(r, c), Stone::Black);
        }
        for &(r, c) in white {
            board.place_at(Pos::new(r, c), Stone::White);
        }
        board
    }

    /// Always plays the lowest-ranked move.
    struct WorstMove;

    impl SelectionPolicy for WorstMove {
        fn select(&mut self, ranked: &[RootMove]) -> Option<Pos> {
            ranked.last().map(|m| m.pos)
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.config(), &EngineConfig::default());
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = EngineConfig {
            radius: 5,
            ..EngineConfig::default()
        };
        assert!(AIEngine::from_config(config).is_err());
    }

    #[test]
    fn test_engine_empty_board() {
        let mut board = Board::new();
        let result = AIEngine::new().search_with_depth(&mut board, Stone::Black, 1);
        assert_eq!(result.best_move, Some(Pos::CENTER));
        assert_eq!(result.search_type, SearchType::Opening);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut board = board_with(&[(9, 0), (9, 1), (9, 2), (9, 3)], &[(3, 3), (4, 4), (5, 5)]);
        let result = AIEngine::new().get_move_with_stats(&mut board, Stone::Black);
        assert_eq!(result.best_move, Some(Pos::new(9, 4)));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_win_preferred_over_block() {
        let mut board = board_with(&[(9, 0), (9, 1), (9, 2), (9, 3)], &[(3, 0), (3, 1), (3, 2), (3, 3)]);
        let result = AIEngine::new().get_move_with_stats(&mut board, Stone::White);
        assert_eq!(result.best_move, Some(Pos::new(3, 4)));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        let mut board = board_with(&[(10, 5)], &[(9, 0), (9, 1), (9, 2), (9, 3)]);
        let result = AIEngine::new().get_move_with_stats(&mut board, Stone::Black);
        assert_eq!(result.best_move, Some(Pos::new(9, 4)));
        assert_eq!(result.search_type, SearchType::ForcedBlock);
    }

    #[test]
    fn test_engine_blocks_open_four() {
        // Two winning cells: the search is narrowed to blocks
        let mut board = board_with(&[(10, 10), (12, 12), (0, 14)], &[(5, 4), (5, 5), (5, 6), (5, 7)]);
        let result = AIEngine::new().search_with_depth(&mut board, Stone::Black, 2);
        let pos = result.best_move.unwrap();
        assert!(pos == Pos::new(5, 3) || pos == Pos::new(5, 8), "did not block: {pos}");
        assert_eq!(result.search_type, SearchType::ForcedBlock);
    }

    #[test]
    fn test_engine_leaves_board_unchanged() {
        let mut board = Board::from_moves(&[(7, 7), (7, 8), (8, 8), (6, 6)]).unwrap();
        let before = board.clone();
        let mut engine = AIEngine::new();
        let _ = engine.search_with_depth(&mut board, Stone::Black, 3);
        assert_eq!(board, before);
    }

    #[test]
    fn test_engine_deterministic() {
        let mut board = Board::from_moves(&[(7, 7), (8, 8), (7, 9)]).unwrap();
        let first = AIEngine::new().search_with_depth(&mut board, Stone::White, 3);
        for _ in 0..3 {
            let again = AIEngine::new().search_with_depth(&mut board, Stone::White, 3);
            assert_eq!(again.best_move, first.best_move);
            assert_eq!(again.score, first.score);
        }
    }

    #[test]
    fn test_custom_policy_is_used() {
        let mut board = Board::from_moves(&[(7, 7), (8, 8), (7, 9)]).unwrap();
        let best = AIEngine::new().search_with_depth(&mut board, Stone::White, 2);
        let worst = AIEngine::new()
            .with_policy(WorstMove)
            .search_with_depth(&mut board, Stone::White, 2);
        assert_eq!(worst.search_type, SearchType::AlphaBeta);
        assert!(worst.score <= best.score);
    }

    #[test]
    fn test_difficulty_engine_plays_legal_moves() {
        let mut board = Board::from_moves(&[(7, 7), (8, 8)]).unwrap();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut engine = AIEngine::for_difficulty(difficulty);
            let pos = engine.get_move(&mut board, Stone::Black).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_zero_depth_treated_as_one() {
        let mut board = Board::from_moves(&[(7, 7)]).unwrap();
        let result = AIEngine::new().search_with_depth(&mut board, Stone::White, 0);
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_finished_game_has_no_move() {
        let mut board = Board::from_moves(&[(7, 3), (0, 0), (7, 4), (0, 1), (7, 5), (0, 2), (7, 6), (0, 3), (7, 7)])
            .unwrap();
        let result = AIEngine::new().search_with_depth(&mut board, Stone::White, 2);
        assert_eq!(result.best_move, None);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_free_function_best_move() {
        let mut board = Board::new();
        assert_eq!(best_move(&mut board, Stone::Black, 1), Some(Pos::CENTER));
    }
}
