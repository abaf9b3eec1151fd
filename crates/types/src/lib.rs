//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic attached, so they can be used
//! by the simulation core, the CLI, and any presentation layer alike.
//!
//! # Coordinates
//!
//! A cell is addressed by [`Position`] `{ row, col }`:
//!
//! - **row**: `0` is the floor, `size - 1` is the top row
//! - **col**: `0` is the leftmost column
//!
//! Gravity pulls tiles toward row 0; new tiles enter from above the top row.
//!
//! # Tile Palette
//!
//! | Variant | Char | Notes |
//! |---------|------|-------|
//! | `Empty` | `.` | sentinel, never part of a palette, never matches |
//! | `Red` | `R` | |
//! | `Green` | `G` | |
//! | `Blue` | `B` | |
//! | `Yellow` | `Y` | |
//! | `Purple` | `P` | |
//! | `Orange` | `O` | |
//!
//! # Examples
//!
//! ```
//! use tile_blast_types::{Position, TileType, DEFAULT_BOARD_SIZE};
//!
//! let kind = TileType::from_str("red").unwrap();
//! assert_eq!(kind, TileType::Red);
//! assert!(kind.matches(TileType::Red));
//! assert!(!TileType::Empty.matches(TileType::Empty));
//!
//! let pos = Position::new(0, 3);
//! assert_eq!(pos.row, 0);
//! assert_eq!(DEFAULT_BOARD_SIZE, 8);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default board edge length (8x8)
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Minimum number of connected tiles a click must hit to be removed
pub const MIN_GROUP_SIZE: usize = 2;

/// Default palette used when no configuration supplies one
pub const DEFAULT_PALETTE: [TileType; 5] = [
    TileType::Red,
    TileType::Green,
    TileType::Blue,
    TileType::Yellow,
    TileType::Purple,
];

/// Kind of tile occupying a cell.
///
/// `Empty` is the "no tile present" sentinel left behind by destruction and
/// consumed by refill. It is never part of a palette.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Empty,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

impl TileType {
    /// Every non-empty tile type, in declaration order.
    pub const ALL: [TileType; 6] = [
        TileType::Red,
        TileType::Green,
        TileType::Blue,
        TileType::Yellow,
        TileType::Purple,
        TileType::Orange,
    ];

    /// Parse tile type from string (case-insensitive).
    ///
    /// Accepts the full name or the single display char.
    ///
    /// ```
    /// use tile_blast_types::TileType;
    ///
    /// assert_eq!(TileType::from_str("Blue"), Some(TileType::Blue));
    /// assert_eq!(TileType::from_str("y"), Some(TileType::Yellow));
    /// assert_eq!(TileType::from_str("."), Some(TileType::Empty));
    /// assert_eq!(TileType::from_str("teal"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "empty" | "." => Some(TileType::Empty),
            "red" | "r" => Some(TileType::Red),
            "green" | "g" => Some(TileType::Green),
            "blue" | "b" => Some(TileType::Blue),
            "yellow" | "y" => Some(TileType::Yellow),
            "purple" | "p" => Some(TileType::Purple),
            "orange" | "o" => Some(TileType::Orange),
            _ => None,
        }
    }

    /// Single-char form used by the textual board dump.
    pub fn as_char(self) -> char {
        match self {
            TileType::Empty => '.',
            TileType::Red => 'R',
            TileType::Green => 'G',
            TileType::Blue => 'B',
            TileType::Yellow => 'Y',
            TileType::Purple => 'P',
            TileType::Orange => 'O',
        }
    }

    /// Lowercase name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TileType::Empty => "empty",
            TileType::Red => "red",
            TileType::Green => "green",
            TileType::Blue => "blue",
            TileType::Yellow => "yellow",
            TileType::Purple => "purple",
            TileType::Orange => "orange",
        }
    }

    pub fn is_empty(self) -> bool {
        self == TileType::Empty
    }

    /// Matching rule: same type, and `Empty` matches nothing (not even itself).
    #[inline]
    pub fn matches(self, other: TileType) -> bool {
        self != TileType::Empty && self == other
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid coordinate of a cell. Row 0 is the floor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Flat row-major index for a board of the given edge length
    #[inline(always)]
    pub const fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Inverse of [`Position::index`]
    #[inline(always)]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_never_matches() {
        assert!(!TileType::Empty.matches(TileType::Empty));
        assert!(!TileType::Empty.matches(TileType::Red));
        assert!(!TileType::Red.matches(TileType::Empty));
    }

    #[test]
    fn test_same_type_matches() {
        for kind in TileType::ALL {
            assert!(kind.matches(kind), "{kind} should match itself");
        }
        assert!(!TileType::Red.matches(TileType::Green));
    }

    #[test]
    fn test_char_and_name_parse_back() {
        for kind in TileType::ALL {
            assert_eq!(TileType::from_str(kind.as_str()), Some(kind));
            assert_eq!(
                TileType::from_str(&kind.as_char().to_string()),
                Some(kind)
            );
        }
    }

    #[test]
    fn test_default_palette_excludes_empty() {
        assert!(DEFAULT_PALETTE.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_position_index() {
        assert_eq!(Position::new(0, 0).index(8), 0);
        assert_eq!(Position::new(1, 0).index(8), 8);
        assert_eq!(Position::new(7, 7).index(8), 63);
        assert_eq!(Position::from_index(10, 8), Position::new(1, 2));
    }

    #[test]
    fn test_tile_type_serde_lowercase() {
        let json = serde_json::to_string(&TileType::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
        let back: TileType = serde_json::from_str("\"orange\"").unwrap();
        assert_eq!(back, TileType::Orange);
    }
}
