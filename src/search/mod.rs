//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate generation around existing stones
//! - Move ordering (win, block, heuristic) and top-K pruning
//! - Alpha-Beta search in negamax form
//! - Root move selection policies

pub mod alphabeta;
pub mod candidates;
pub mod ordering;
pub mod policy;

pub use alphabeta::{SearchResult, SearchStats, Searcher, WIN_SCORE, WIN_THRESHOLD};
pub use candidates::generate_candidates;
pub use ordering::{order_moves, retain_forced, score_move, MoveClass, ScoredMove};
pub use policy::{BestMove, DifficultyPolicy, RootMove, SelectionPolicy};
