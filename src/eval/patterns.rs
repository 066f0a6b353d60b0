//! Pattern scores for Gomoku evaluation
//!
//! A run is a maximal line of contiguous same-colored stones. Its value
//! depends on its length and how many of its two ends are open (the next
//! cell is empty and on the board). Gapped shapes such as `XX.XX` are two
//! separate runs; no gap tolerance is applied.

use serde::Deserialize;

use crate::board::TOTAL_CELLS;
use crate::error::ConfigError;
use crate::search::WIN_THRESHOLD;

use super::heuristic::MAX_CENTER_DIST;

/// Runs a single stone can anchor, one per axis
const RUNS_PER_STONE: i64 = 4;

/// Score tiers keyed by `(run length, open ends)`.
///
/// Runs with no open end are dead and score 0 unless they already form
/// five. A lone stone with one open end also scores 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    /// Five or more in a row, any ends
    pub five: i32,
    /// Open four: _XXXX_
    pub open_four: i32,
    /// Closed four: OXXXX_ or _XXXXO
    pub closed_four: i32,
    /// Open three: _XXX_
    pub open_three: i32,
    /// Closed three: OXXX_ or _XXXO
    pub closed_three: i32,
    /// Open two: _XX_
    pub open_two: i32,
    /// Closed two: OXX_ or _XXO
    pub closed_two: i32,
    /// Lone stone with both sides open
    pub open_one: i32,
    /// Positional weight per unit of closeness to the center
    pub center_weight: i32,
}

impl ScoreTable {
    pub const DEFAULT: ScoreTable = ScoreTable {
        five: 100_000,
        open_four: 10_000,
        closed_four: 5_000,
        open_three: 1_000,
        closed_three: 500,
        open_two: 100,
        closed_two: 50,
        open_one: 1,
        center_weight: 1,
    };

    /// Score of a single run.
    #[inline]
    pub fn run_score(&self, length: usize, open_ends: u8) -> i32 {
        match (length, open_ends) {
            (5.., _) => self.five,
            (_, 0) => 0,
            (4, 2) => self.open_four,
            (4, _) => self.closed_four,
            (3, 2) => self.open_three,
            (3, _) => self.closed_three,
            (2, 2) => self.open_two,
            (2, _) => self.closed_two,
            (1, 2) => self.open_one,
            _ => 0,
        }
    }

    /// Upper bound on one side's static score under this table: every cell
    /// anchoring a five on all four axes, each at the top center bonus.
    pub fn max_side_score(&self) -> i64 {
        let cells = TOTAL_CELLS as i64;
        i64::from(self.five) * RUNS_PER_STONE * cells
            + i64::from(MAX_CENTER_DIST) * i64::from(self.center_weight) * cells
    }

    /// Check the tiers are ordered by threat severity and small enough that
    /// no static score reaches the forced-win range.
    ///
    /// Ties between adjacent tiers are allowed; inversions are not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ladder = [
            ("five", self.five),
            ("open_four", self.open_four),
            ("closed_four", self.closed_four),
            ("open_three", self.open_three),
            ("closed_three", self.closed_three),
            ("open_two", self.open_two),
            ("closed_two", self.closed_two),
            ("open_one", self.open_one),
        ];
        for pair in ladder.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            if upper.1 < lower.1 {
                return Err(ConfigError::Invalid {
                    field: "scores",
                    reason: format!(
                        "{} ({}) must not be below {} ({})",
                        upper.0, upper.1, lower.0, lower.1
                    ),
                });
            }
        }
        if self.open_one < 0 || self.center_weight < 0 {
            return Err(ConfigError::Invalid {
                field: "scores",
                reason: "scores and weights must be non-negative".to_string(),
            });
        }
        if self.five <= self.open_four {
            return Err(ConfigError::Invalid {
                field: "scores.five",
                reason: "a completed five must outscore every other pattern".to_string(),
            });
        }
        let bound = self.max_side_score();
        if bound >= i64::from(WIN_THRESHOLD) {
            return Err(ConfigError::Invalid {
                field: "scores",
                reason: format!(
                    "tiers too large: static scores may reach {bound}, must stay below {WIN_THRESHOLD}"
                ),
            });
        }
        Ok(())
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}
