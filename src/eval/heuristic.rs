//! Heuristic evaluation function for Gomoku board positions
//!
//! This module provides the static evaluator used at the search horizon.
//! It evaluates board positions based on:
//! - Pattern scoring (fives, fours, threes, twos, lone stones)
//! - Positional bonuses (center control)
//!
//! The result is zero-sum: `evaluate(board, Black) == -evaluate(board, White)`.

use crate::board::{Board, Pos, Stone, BOARD_SIZE};
use crate::rules::DIRECTIONS;

use super::patterns::ScoreTable;

/// Maximum Manhattan distance from center on a 15x15 board
pub(crate) const MAX_CENTER_DIST: i32 = (BOARD_SIZE as i32 / 2) * 2;

/// Evaluate the board from the perspective of the given color.
///
/// Returns a score where:
/// - Positive values indicate advantage for `color`
/// - Negative values indicate disadvantage for `color`
///
/// An empty `color` scores 0.
#[must_use]
pub fn evaluate(board: &Board, color: Stone, table: &ScoreTable) -> i32 {
    if color == Stone::Empty {
        return 0;
    }
    let opponent = color.opponent();

    let pattern_score =
        evaluate_patterns(board, color, table) - evaluate_patterns(board, opponent, table);
    let position_score =
        evaluate_positions(board, color, table) - evaluate_positions(board, opponent, table);

    pattern_score + position_score
}

/// Sum the run scores of every maximal run of `color`.
///
/// Each run is scored once, from its first stone along the direction.
pub fn evaluate_patterns(board: &Board, color: Stone, table: &ScoreTable) -> i32 {
    let Some(stones) = board.stones(color) else {
        return 0;
    };

    let mut score = 0;
    for pos in stones.iter_ones() {
        for &(dr, dc) in &DIRECTIONS {
            score += evaluate_line(board, pos, dr, dc, color, table);
        }
    }
    score
}

/// Score the run that starts at `pos` in direction `(dr, dc)`.
///
/// Returns 0 when `pos` is not the first stone of its run, so the same
/// physical run is never counted from several cells.
fn evaluate_line(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone, table: &ScoreTable) -> i32 {
    let before = pos.offset(-dr, -dc);
    if before.is_some_and(|p| board.get(p) == color) {
        return 0;
    }

    let mut open_ends = 0u8;
    if before.is_some_and(|p| board.is_empty(p)) {
        open_ends += 1;
    }

    let mut length = 1;
    let mut cur = pos.offset(dr, dc);
    while let Some(p) = cur {
        if board.get(p) != color {
            break;
        }
        length += 1;
        cur = p.offset(dr, dc);
    }
    if cur.is_some_and(|p| board.is_empty(p)) {
        open_ends += 1;
    }

    table.run_score(length, open_ends)
}

/// Evaluate positional bonuses for a color.
///
/// Stones closer to the center are worth more as they have more
/// potential for creating patterns in multiple directions.
fn evaluate_positions(board: &Board, color: Stone, table: &ScoreTable) -> i32 {
    let Some(stones) = board.stones(color) else {
        return 0;
    };
    stones.iter_ones().map(|pos| center_bonus(pos, table)).sum()
}

#[inline]
fn center_bonus(pos: Pos, table: &ScoreTable) -> i32 {
    (MAX_CENTER_DIST - pos.center_distance()) * table.center_weight
}

/// Length and open-end count of the run `color` would form through the
/// empty cell `pos` along one axis.
fn virtual_run(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> (usize, u8) {
    let mut length = 1;
    let mut open_ends = 0u8;
    for sign in [1, -1] {
        let (sr, sc) = (dr * sign, dc * sign);
        let mut cur = pos.offset(sr, sc);
        while let Some(p) = cur {
            if board.get(p) != color {
                break;
            }
            length += 1;
            cur = p.offset(sr, sc);
        }
        if cur.is_some_and(|p| board.is_empty(p)) {
            open_ends += 1;
        }
    }
    (length, open_ends)
}

/// Local value of playing the empty cell `pos` for `color`, used for move
/// ordering.
///
/// Sums the runs `color` would build through the cell (attack) and the
/// runs the opponent would build there (defense), plus the center bonus.
#[must_use]
pub fn score_cell(board: &Board, pos: Pos, color: Stone, table: &ScoreTable) -> i32 {
    let opponent = color.opponent();
    let mut attack = 0;
    let mut defense = 0;
    for &(dr, dc) in &DIRECTIONS {
        let (len, open) = virtual_run(board, pos, dr, dc, color);
        attack += table.run_score(len, open);
        let (len, open) = virtual_run(board, pos, dr, dc, opponent);
        defense += table.run_score(len, open);
    }
    attack + defense + center_bonus(pos, table)
}
