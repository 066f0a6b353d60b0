//! Error types for board mutation and engine configuration.

use std::path::PathBuf;

use crate::board::Pos;

/// Why a placement was rejected. The board is never modified on error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Coordinates outside the 15x15 grid.
    #[error("({row}, {col}) is off the board")]
    OutOfBounds {
        /// Requested row.
        row: i32,
        /// Requested column.
        col: i32,
    },
    /// The target cell already holds a stone.
    #[error("{pos} is already occupied")]
    Occupied {
        /// The occupied cell.
        pos: Pos,
    },
    /// `Stone::Empty` is not a playable side.
    #[error("cannot place an empty stone")]
    EmptyStone,
}

/// Failure of an undo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UndoError {
    #[error("no moves to undo")]
    EmptyHistory,
}

/// Errors from loading or validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The TOML text is malformed or has wrongly typed fields.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field holds a value the engine cannot use.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_error_display() {
        let err = MoveError::OutOfBounds { row: 15, col: -1 };
        assert_eq!(format!("{err}"), "(15, -1) is off the board");

        let err = MoveError::Occupied { pos: Pos::new(7, 7) };
        assert_eq!(format!("{err}"), "(7, 7) is already occupied");
    }

    #[test]
    fn undo_error_display() {
        assert_eq!(format!("{}", UndoError::EmptyHistory), "no moves to undo");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::Invalid {
            field: "radius",
            reason: "must be 1 or 2, got 3".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "invalid config value for `radius`: must be 1 or 2, got 3"
        );
    }
}
