//! Board representation for freestyle Gomoku

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, PlacedStone};

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// Stones needed in a row to win
pub const WIN_LENGTH: usize = 5;

/// Cell contents. Black moves first and is "side A"; White is "side B".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Character used by the text rendering of a board
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Stone::Black => 'X',
            Stone::White => 'O',
            Stone::Empty => '.',
        }
    }
}

/// Outcome of a position, recomputed on demand after each move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    BlackWin,
    WhiteWin,
    Draw,
}

impl GameStatus {
    /// Status for a win by `stone`. `Stone::Empty` maps to `Ongoing`.
    #[inline]
    pub fn win_for(stone: Stone) -> GameStatus {
        match stone {
            Stone::Black => GameStatus::BlackWin,
            Stone::White => GameStatus::WhiteWin,
            Stone::Empty => GameStatus::Ongoing,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    /// Center cell, the canonical opening move
    pub const CENTER: Pos = Pos {
        row: (BOARD_SIZE / 2) as u8,
        col: (BOARD_SIZE / 2) as u8,
    };

    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Checked constructor for coordinates coming from outside the engine.
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        Self::is_valid(row, col).then(|| Self {
            row: row as u8,
            col: col as u8,
        })
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Neighbor at offset `(dr, dc)`, or `None` when it falls off the board.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32) -> Option<Pos> {
        Self::try_new(i32::from(self.row) + dr, i32::from(self.col) + dc)
    }

    /// Manhattan distance to the center cell
    #[inline]
    pub fn center_distance(self) -> i32 {
        let center = Pos::CENTER;
        (i32::from(self.row) - i32::from(center.row)).abs()
            + (i32::from(self.col) - i32::from(center.col)).abs()
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
