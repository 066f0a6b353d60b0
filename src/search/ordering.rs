//! Move ordering: win-in-one first, forced blocks next, then heuristic.
//!
//! Good ordering is what makes alpha-beta cut early; it also decides which
//! candidates survive the top-K truncation at interior nodes.

use std::cmp::Reverse;

use crate::board::{Board, Pos, Stone};
use crate::eval::{score_cell, ScoreTable};
use crate::rules::would_win;

/// Ordering class of a candidate, strongest last so `Ord` ranks it highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveClass {
    /// No immediate tactical consequence
    Quiet,
    /// The opponent would complete five here
    Block,
    /// Completes five for the side to move
    Win,
}

/// A candidate with its ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub pos: Pos,
    pub class: MoveClass,
    /// Heuristic value from [`score_cell`]; breaks ties within a class
    pub score: i32,
}

/// Classify and score one empty cell for `color`.
#[inline]
pub fn score_move(board: &Board, pos: Pos, color: Stone, table: &ScoreTable) -> ScoredMove {
    let class = if would_win(board, pos, color) {
        MoveClass::Win
    } else if would_win(board, pos, color.opponent()) {
        MoveClass::Block
    } else {
        MoveClass::Quiet
    };
    ScoredMove {
        pos,
        class,
        score: score_cell(board, pos, color, table),
    }
}

/// Score every candidate and sort descending by `(class, score)`.
///
/// The sort is stable, so equal keys keep generation order and the
/// result is deterministic.
#[must_use]
pub fn order_moves(board: &Board, candidates: &[Pos], color: Stone, table: &ScoreTable) -> Vec<ScoredMove> {
    let mut scored: Vec<ScoredMove> = candidates
        .iter()
        .map(|&pos| score_move(board, pos, color, table))
        .collect();
    scored.sort_by_key(|m| Reverse((m.class, m.score)));
    scored
}

/// Keep only forced blocks when the opponent threatens five and there is no
/// win of our own. Returns `true` if the list was narrowed.
pub fn retain_forced(moves: &mut Vec<ScoredMove>) -> bool {
    let has_win = moves.first().is_some_and(|m| m.class == MoveClass::Win);
    let has_block = moves.iter().any(|m| m.class == MoveClass::Block);
    if has_win || !has_block {
        return false;
    }
    moves.retain(|m| m.class == MoveClass::Block);
    true
}
