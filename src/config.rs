//! Engine configuration.
//!
//! Every knob that distinguishes one engine strength from another is a
//! field here rather than a separate code path: ply budget, neighbor
//! radius, branching limits, time budget and the score tier table.
//! Configs load from TOML; absent fields take their defaults.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::eval::ScoreTable;

/// Deepest ply budget accepted by [`EngineConfig::validate`].
pub const MAX_DEPTH: u8 = 12;

/// Preset strength levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Ply budget for this level
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }

    /// Candidate radius for this level; harder levels look further out
    pub fn radius(self) -> u8 {
        match self {
            Difficulty::Easy | Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            other => Err(ConfigError::Invalid {
                field: "difficulty",
                reason: format!("unknown level \"{other}\""),
            }),
        }
    }
}

/// Search parameters for [`AIEngine`](crate::AIEngine).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ply budget for the minimax search
    pub depth: u8,
    /// Chebyshev radius of the candidate neighborhood (1 or 2)
    pub radius: u8,
    /// Root candidates searched after ordering
    pub root_width: usize,
    /// Top-K candidates expanded at interior nodes
    pub branch_width: usize,
    /// Wall-clock budget; checked before each root candidate
    pub time_limit_ms: Option<u64>,
    /// Worker threads for root-parallel search (1 = sequential)
    pub threads: usize,
    /// Randomized selection among top root moves; `None` always plays the best
    pub difficulty: Option<Difficulty>,
    /// Seed for the selection policy RNG
    pub seed: u64,
    /// Pattern score tiers
    pub scores: ScoreTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            radius: 2,
            root_width: 20,
            branch_width: 10,
            time_limit_ms: None,
            threads: 1,
            difficulty: None,
            seed: 0,
            scores: ScoreTable::DEFAULT,
        }
    }
}

impl EngineConfig {
    /// Preset for a difficulty level.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            depth: difficulty.depth(),
            radius: difficulty.radius(),
            difficulty: Some(difficulty),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        if let Err(err) = config.validate() {
            warn!(%err, "rejecting engine config");
            return Err(err);
        }
        Ok(config)
    }

    /// Read, parse and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    /// Wall-clock budget, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(ConfigError::Invalid {
                field: "depth",
                reason: format!("must be in 1..={MAX_DEPTH}, got {}", self.depth),
            });
        }
        if !(1..=2).contains(&self.radius) {
            return Err(ConfigError::Invalid {
                field: "radius",
                reason: format!("must be 1 or 2, got {}", self.radius),
            });
        }
        if self.root_width == 0 {
            return Err(ConfigError::Invalid {
                field: "root_width",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.branch_width == 0 {
            return Err(ConfigError::Invalid {
                field: "branch_width",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.threads == 0 {
            return Err(ConfigError::Invalid {
                field: "threads",
                reason: "must be at least 1".to_string(),
            });
        }
        self.scores.validate()
    }
}
