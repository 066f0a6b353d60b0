//! Game rules for freestyle Gomoku
//!
//! Five or more stones in a row along any axis wins; a full board with no
//! such line is a draw. There are no captures and no forbidden moves.

pub mod win;

// Re-exports for convenient access
pub use win::{
    find_five_line_at_pos, find_five_positions, game_status, has_five_at_pos, has_five_in_row,
    line_length, would_win, DIRECTIONS,
};
