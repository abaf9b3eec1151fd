//! Board configuration, validation, and error types.
//!
//! [`BoardConfig`] is the construction input for a [`Board`](crate::Board).
//! [`validate()`](BoardConfig::validate) reports bad settings as a
//! [`ConfigError`]; the board constructor itself treats the same conditions
//! as programming errors and panics.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{TileType, DEFAULT_BOARD_SIZE, DEFAULT_PALETTE};

/// What to do when a resolved click leaves the board without a valid move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum ShufflePolicy {
    /// Shuffle once, best effort. The result is not checked.
    #[default]
    Once,
    /// Reshuffle until a valid move exists, at most `max_attempts` times.
    #[serde(rename_all = "camelCase")]
    UntilPlayable { max_attempts: u32 },
}

impl ShufflePolicy {
    pub fn max_attempts(self) -> u32 {
        match self {
            ShufflePolicy::Once => 1,
            ShufflePolicy::UntilPlayable { max_attempts } => max_attempts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BoardConfig {
    /// Edge length of the square grid.
    pub size: usize,
    /// Tile types new tiles are drawn from.
    pub palette: Vec<TileType>,
    /// RNG seed. Same seed plus same clicks gives the same game.
    pub seed: u32,
    pub shuffle_policy: ShufflePolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            palette: DEFAULT_PALETTE.to_vec(),
            seed: 1,
            shuffle_policy: ShufflePolicy::Once,
        }
    }
}

impl BoardConfig {
    pub fn new(size: usize, palette: Vec<TileType>, seed: u32) -> Self {
        Self {
            size,
            palette,
            seed,
            shuffle_policy: ShufflePolicy::Once,
        }
    }

    pub fn with_shuffle_policy(mut self, policy: ShufflePolicy) -> Self {
        self.shuffle_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.palette.contains(&TileType::Empty) {
            return Err(ConfigError::EmptyInPalette);
        }
        for (i, kind) in self.palette.iter().enumerate() {
            if self.palette[..i].contains(kind) {
                return Err(ConfigError::DuplicateTileType(*kind));
            }
        }
        if self.shuffle_policy.max_attempts() == 0 {
            return Err(ConfigError::ZeroShuffleAttempts);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Board edge length must be at least 1.
    ZeroSize,
    /// At least one tile type is required.
    EmptyPalette,
    /// The `Empty` sentinel cannot be drawn as a tile.
    EmptyInPalette,
    /// Palette entries must be unique.
    DuplicateTileType(TileType),
    /// `UntilPlayable` needs a budget of at least one shuffle.
    ZeroShuffleAttempts,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "board size must be at least 1"),
            Self::EmptyPalette => write!(f, "palette must contain at least one tile type"),
            Self::EmptyInPalette => write!(f, "palette must not contain the empty sentinel"),
            Self::DuplicateTileType(kind) => {
                write!(f, "palette lists tile type {kind} more than once")
            }
            Self::ZeroShuffleAttempts => {
                write!(f, "shuffle policy must allow at least one attempt")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(BoardConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_size_rejected() {
        let cfg = BoardConfig::new(0, DEFAULT_PALETTE.to_vec(), 1);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSize));
    }

    #[test]
    fn empty_palette_rejected() {
        let cfg = BoardConfig::new(4, Vec::new(), 1);
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn empty_sentinel_rejected() {
        let cfg = BoardConfig::new(4, vec![TileType::Red, TileType::Empty], 1);
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyInPalette));
    }

    #[test]
    fn duplicate_palette_entry_rejected() {
        let cfg = BoardConfig::new(4, vec![TileType::Red, TileType::Blue, TileType::Red], 1);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::DuplicateTileType(TileType::Red))
        );
    }

    #[test]
    fn zero_shuffle_budget_rejected() {
        let cfg = BoardConfig::default()
            .with_shuffle_policy(ShufflePolicy::UntilPlayable { max_attempts: 0 });
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroShuffleAttempts));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg: BoardConfig = serde_json::from_str(r#"{"size": 5, "seed": 9}"#).unwrap();
        assert_eq!(cfg.size, 5);
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.palette, DEFAULT_PALETTE.to_vec());
        assert_eq!(cfg.shuffle_policy, ShufflePolicy::Once);
    }

    #[test]
    fn json_shuffle_policy() {
        let cfg: BoardConfig = serde_json::from_str(
            r#"{"palette": ["red", "blue"], "shufflePolicy": {"mode": "untilPlayable", "maxAttempts": 8}}"#,
        )
        .unwrap();
        assert_eq!(cfg.palette, vec![TileType::Red, TileType::Blue]);
        assert_eq!(
            cfg.shuffle_policy,
            ShufflePolicy::UntilPlayable { max_attempts: 8 }
        );
    }

    #[test]
    fn json_unknown_field_rejected() {
        let res: Result<BoardConfig, _> = serde_json::from_str(r#"{"colours": 3}"#);
        assert!(res.is_err());
    }
}
