//! Evaluation module for Gomoku AI
//!
//! Contains:
//! - Score tiers for run patterns (`patterns`)
//! - Static position evaluation and move-ordering heuristics (`heuristic`)

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, evaluate_patterns, score_cell};
pub use patterns::ScoreTable;
