//! Board structure with move history

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::bitboard::Bitboard;
use super::{GameStatus, Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::{MoveError, UndoError};
use crate::rules::has_five_at_pos;

/// Game board: two occupancy bitboards, the ordered move history and a
/// move counter.
///
/// Invariant: `black.count() + white.count() == move_count == history.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Black stones bitboard
    pub(crate) black: Bitboard,
    /// White stones bitboard
    pub(crate) white: Bitboard,
    history: Vec<MoveRecord>,
    move_count: usize,
}

/// A played move, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub pos: Pos,
    pub stone: Stone,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
            history: Vec::with_capacity(TOTAL_CELLS),
            move_count: 0,
        }
    }

    /// Build a board by playing `moves` alternately, Black first.
    pub fn from_moves(moves: &[(i32, i32)]) -> Result<Self, MoveError> {
        let mut board = Self::new();
        let mut stone = Stone::Black;
        for &(row, col) in moves {
            board.try_place(row, col, stone)?;
            stone = stone.opponent();
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// All occupied cells
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    /// Place a stone, reporting why the move was rejected.
    ///
    /// On error the board is unchanged.
    pub fn try_place(&mut self, row: i32, col: i32, stone: Stone) -> Result<Pos, MoveError> {
        let pos = Pos::try_new(row, col).ok_or(MoveError::OutOfBounds { row, col })?;
        self.try_place_at(pos, stone)?;
        Ok(pos)
    }

    /// Place a stone at an in-range position.
    pub fn try_place_at(&mut self, pos: Pos, stone: Stone) -> Result<(), MoveError> {
        if stone == Stone::Empty {
            return Err(MoveError::EmptyStone);
        }
        if !self.is_empty(pos) {
            return Err(MoveError::Occupied { pos });
        }
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
        self.history.push(MoveRecord { pos, stone });
        self.move_count += 1;
        Ok(())
    }

    /// Place a stone; `false` (and no mutation) if out of range or occupied.
    #[inline]
    pub fn place(&mut self, row: i32, col: i32, stone: Stone) -> bool {
        self.try_place(row, col, stone).is_ok()
    }

    /// Place a stone at an in-range position; `false` if occupied.
    #[inline]
    pub fn place_at(&mut self, pos: Pos, stone: Stone) -> bool {
        self.try_place_at(pos, stone).is_ok()
    }

    /// Remove the most recently played stone.
    pub fn try_undo(&mut self) -> Result<MoveRecord, UndoError> {
        let record = self.history.pop().ok_or(UndoError::EmptyHistory)?;
        match record.stone {
            Stone::Black => self.black.clear(record.pos),
            Stone::White => self.white.clear(record.pos),
            Stone::Empty => {}
        }
        self.move_count -= 1;
        Ok(record)
    }

    /// Undo the last move; `false` (no-op) when the history is empty.
    #[inline]
    pub fn undo_last(&mut self) -> bool {
        self.try_undo().is_ok()
    }

    /// Tentatively place a stone; the returned guard undoes it when dropped.
    ///
    /// Guards nest through `DerefMut`, so the borrow checker enforces LIFO
    /// undo order. Returns `None` if the cell is occupied.
    pub fn apply(&mut self, pos: Pos, stone: Stone) -> Option<PlacedStone<'_>> {
        if self.place_at(pos, stone) {
            Some(PlacedStone { board: self, pos })
        } else {
            None
        }
    }

    /// Does the stone at `(row, col)` sit on a line of five or more?
    ///
    /// Only the four axes through this cell are examined: a win can only be
    /// created by the stone just played.
    pub fn check_win_through(&self, row: i32, col: i32) -> bool {
        let Some(pos) = Pos::try_new(row, col) else {
            return false;
        };
        match self.get(pos) {
            Stone::Empty => false,
            stone => has_five_at_pos(self, pos, stone),
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.move_count == TOTAL_CELLS
    }

    /// Number of stones played
    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.move_count == 0
    }

    /// Moves in play order
    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.history.last().copied()
    }

    /// Side to move under strict alternation, Black first.
    #[inline]
    pub fn side_to_move(&self) -> Stone {
        if self.move_count % 2 == 0 {
            Stone::Black
        } else {
            Stone::White
        }
    }

    /// Status after the last move. Only the last stone is checked for a
    /// win; use [`crate::rules::game_status`] for a full-board scan.
    pub fn status(&self) -> GameStatus {
        if let Some(last) = self.last_move() {
            if has_five_at_pos(self, last.pos, last.stone) {
                return GameStatus::win_for(last.stone);
            }
        }
        if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{col:>3}")?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            write!(f, "{row:>3}")?;
            for col in 0..BOARD_SIZE {
                let stone = self.get(Pos::new(row as u8, col as u8));
                write!(f, "{:>3}", stone.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Scope guard for a tentative placement; undoes the move on drop.
///
/// Every exit path of a search node, including early pruning breaks and
/// `?`-style returns, restores the board.
#[derive(Debug)]
pub struct PlacedStone<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl PlacedStone<'_> {
    /// Cell occupied by this placement
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for PlacedStone<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for PlacedStone<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for PlacedStone<'_> {
    fn drop(&mut self) {
        let undone = self.board.try_undo();
        debug_assert!(
            matches!(undone, Ok(record) if record.pos == self.pos),
            "scoped placement at {} undone out of order",
            self.pos
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_get() {
        let mut board = Board::new();
        assert!(board.place(7, 7, Stone::Black));
        assert_eq!(board.get(Pos::new(7, 7)), Stone::Black);
        assert_eq!(board.move_count(), 1);
        assert_eq!(board.history().len(), 1);
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_range() {
        let mut board = Board::new();
        assert!(board.place(0, 0, Stone::Black));
        let before = board.clone();

        assert!(!board.place(0, 0, Stone::White));
        assert!(!board.place(-1, 3, Stone::White));
        assert!(!board.place(3, 15, Stone::White));
        assert_eq!(board, before);

        assert_eq!(
            board.try_place(15, 0, Stone::White),
            Err(MoveError::OutOfBounds { row: 15, col: 0 })
        );
        assert_eq!(
            board.try_place(0, 0, Stone::White),
            Err(MoveError::Occupied { pos: Pos::new(0, 0) })
        );
        assert_eq!(board.try_place(1, 1, Stone::Empty), Err(MoveError::EmptyStone));
    }

    #[test]
    fn test_undo_is_lifo() {
        let mut board = Board::new();
        board.place(7, 7, Stone::Black);
        board.place(7, 8, Stone::White);

        assert!(board.undo_last());
        assert!(board.is_empty(Pos::new(7, 8)));
        assert_eq!(board.get(Pos::new(7, 7)), Stone::Black);
        assert!(board.undo_last());
        assert!(board.is_board_empty());
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut board = Board::new();
        assert!(!board.undo_last());
        assert_eq!(board.try_undo(), Err(UndoError::EmptyHistory));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_scoped_apply_restores_board() {
        let mut board = Board::from_moves(&[(7, 7), (7, 8)]).unwrap();
        let before = board.clone();
        {
            let mut outer = board.apply(Pos::new(6, 6), Stone::Black).unwrap();
            assert_eq!(outer.move_count(), 3);
            {
                let inner = outer.apply(Pos::new(6, 7), Stone::White).unwrap();
                assert_eq!(inner.get(Pos::new(6, 7)), Stone::White);
                assert_eq!(inner.move_count(), 4);
            }
            assert!(outer.is_empty(Pos::new(6, 7)));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_on_occupied_returns_none() {
        let mut board = Board::from_moves(&[(7, 7)]).unwrap();
        assert!(board.apply(Pos::new(7, 7), Stone::White).is_none());
        assert_eq!(board.move_count(), 1);
    }

    #[test]
    fn test_side_to_move_alternates() {
        let mut board = Board::new();
        assert_eq!(board.side_to_move(), Stone::Black);
        board.place(7, 7, Stone::Black);
        assert_eq!(board.side_to_move(), Stone::White);
    }

    #[test]
    fn test_status_reports_win() {
        let mut board = Board::new();
        for col in 3..7 {
            board.place(7, col, Stone::Black);
            board.place(8, col, Stone::White);
        }
        assert_eq!(board.status(), GameStatus::Ongoing);
        board.place(7, 7, Stone::Black);
        assert_eq!(board.status(), GameStatus::BlackWin);
    }

    #[test]
    fn test_display_renders_symbols() {
        let board = Board::from_moves(&[(0, 0), (0, 1)]).unwrap();
        let text = board.to_string();
        let first_row = text.lines().nth(1).unwrap();
        assert!(first_row.contains('X'));
        assert!(first_row.contains('O'));
        assert_eq!(text.lines().count(), BOARD_SIZE + 1);
    }
}
