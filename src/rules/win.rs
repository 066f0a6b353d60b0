//! Win condition checking
//!
//! A win is five or more same-colored stones in a row, horizontally,
//! vertically or along either diagonal. Overlines count.

use crate::board::{Board, GameStatus, Pos, Stone, WIN_LENGTH};

/// Direction vectors for line checking (4 directions)
/// Each direction only needs to be checked once (we scan both ways from each stone)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal down-right
    (1, -1), // Diagonal down-left
];

/// Count contiguous `color` stones starting one step from `pos` along `(dr, dc)`.
#[inline]
fn count_ray(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> usize {
    let mut count = 0;
    let mut cur = pos.offset(dr, dc);
    while let Some(p) = cur {
        if board.get(p) != color {
            break;
        }
        count += 1;
        cur = p.offset(dr, dc);
    }
    count
}

/// Length of the `color` run through `pos` along one axis, counting `pos`
/// itself whether or not it is occupied.
#[inline]
pub fn line_length(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> usize {
    1 + count_ray(board, pos, dr, dc, color) + count_ray(board, pos, -dr, -dc, color)
}

/// Fast five-in-a-row check at a specific position.
///
/// Only checks 4 directions from the given position. No allocation.
/// Much faster than `has_five_in_row` which iterates ALL stones.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    color != Stone::Empty
        && DIRECTIONS
            .iter()
            .any(|&(dr, dc)| line_length(board, pos, dr, dc, color) >= WIN_LENGTH)
}

/// Would `color` complete five by playing the empty cell `pos`?
///
/// Evaluated without touching the board.
#[inline]
pub fn would_win(board: &Board, pos: Pos, color: Stone) -> bool {
    board.is_empty(pos) && has_five_at_pos(board, pos, color)
}

/// Cells of the winning line through `pos`, if any.
pub fn find_five_line_at_pos(board: &Board, pos: Pos, color: Stone) -> Option<Vec<Pos>> {
    if color == Stone::Empty || board.get(pos) != color {
        return None;
    }
    for &(dr, dc) in &DIRECTIONS {
        // Walk back to the first stone of the run, then collect forward
        let mut start = pos;
        while let Some(prev) = start.offset(-dr, -dc) {
            if board.get(prev) != color {
                break;
            }
            start = prev;
        }

        let mut line = vec![start];
        let mut cur = start.offset(dr, dc);
        while let Some(p) = cur {
            if board.get(p) != color {
                break;
            }
            line.push(p);
            cur = p.offset(dr, dc);
        }

        if line.len() >= WIN_LENGTH {
            return Some(line);
        }
    }
    None
}

/// Find the positions of a 5-in-a-row if exists
///
/// Returns Some(Vec<Pos>) with at least 5 positions if a winning line exists,
/// None otherwise.
pub fn find_five_positions(board: &Board, stone: Stone) -> Option<Vec<Pos>> {
    let stones = board.stones(stone)?;
    stones
        .iter_ones()
        .find_map(|pos| find_five_line_at_pos(board, pos, stone))
}

/// Check if there's 5+ in a row for the given color anywhere on the board
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    find_five_positions(board, stone).is_some()
}

/// Full-board verdict, independent of move history.
///
/// [`Board::status`] only looks through the last move; this scans every
/// stone and is meant for boards assembled outside normal play.
pub fn game_status(board: &Board) -> GameStatus {
    if has_five_in_row(board, Stone::Black) {
        GameStatus::BlackWin
    } else if has_five_in_row(board, Stone::White) {
        GameStatus::WhiteWin
    } else if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::Ongoing
    }
}
