//! Tile module - contents of a single grid cell

use crate::types::{Position, TileType};

/// One grid cell.
///
/// The board keeps `position` equal to the tile's slot in the grid: every
/// relocation (compaction swap, refill) rewrites it. `drop_distance` and
/// `has_dropped` describe the most recent fall and exist for the
/// presentation layer only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub(crate) position: Position,
    pub(crate) kind: TileType,
    pub(crate) drop_distance: usize,
    pub(crate) has_dropped: bool,
}

impl Tile {
    pub fn new(position: Position, kind: TileType) -> Self {
        Self {
            position,
            kind,
            drop_distance: 0,
            has_dropped: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> TileType {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// Rows fallen during the last compaction, or the board height for a
    /// tile refilled from above.
    pub fn drop_distance(&self) -> usize {
        self.drop_distance
    }

    pub fn has_dropped(&self) -> bool {
        self.has_dropped
    }

    /// Same-type test used by flood fill and the valid-move scan
    #[inline]
    pub fn matches(&self, other: &Tile) -> bool {
        self.kind.matches(other.kind)
    }

    pub(crate) fn dropped_by(&mut self, rows: usize) {
        if rows > 0 {
            self.drop_distance = rows;
            self.has_dropped = true;
        }
    }

    pub(crate) fn clear_drop(&mut self) {
        self.drop_distance = 0;
        self.has_dropped = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_has_not_dropped() {
        let tile = Tile::new(Position::new(2, 3), TileType::Green);
        assert_eq!(tile.position(), Position::new(2, 3));
        assert_eq!(tile.kind(), TileType::Green);
        assert_eq!(tile.drop_distance(), 0);
        assert!(!tile.has_dropped());
    }

    #[test]
    fn test_dropped_by_zero_keeps_flag_clear() {
        let mut tile = Tile::new(Position::new(0, 0), TileType::Red);
        tile.dropped_by(0);
        assert!(!tile.has_dropped());

        tile.dropped_by(2);
        assert!(tile.has_dropped());
        assert_eq!(tile.drop_distance(), 2);

        tile.clear_drop();
        assert!(!tile.has_dropped());
        assert_eq!(tile.drop_distance(), 0);
    }

    #[test]
    fn test_empty_tiles_do_not_match() {
        let a = Tile::new(Position::new(0, 0), TileType::Empty);
        let b = Tile::new(Position::new(0, 1), TileType::Empty);
        assert!(!a.matches(&b));
    }
}
