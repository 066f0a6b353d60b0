//! Candidate move generation
//!
//! Only empty cells near existing stones are worth searching: every
//! tactically relevant cell touches the neighborhood of a stone already
//! on the board.

use crate::board::{Bitboard, Board, Pos};

/// Empty cells within Chebyshev distance `radius` of any stone.
///
/// Stones are visited in play order and each neighborhood row-major, so
/// the output order is deterministic. An empty board yields only the
/// center cell.
#[must_use]
pub fn generate_candidates(board: &Board, radius: u8) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![Pos::CENTER];
    }

    let r = i32::from(radius);
    let mut seen = Bitboard::new();
    let mut moves = Vec::with_capacity(64);

    for record in board.history() {
        for dr in -r..=r {
            for dc in -r..=r {
                let Some(pos) = record.pos.offset(dr, dc) else {
                    continue;
                };
                if board.is_empty(pos) && seen.insert(pos) {
                    moves.push(pos);
                }
            }
        }
    }

    moves
}
