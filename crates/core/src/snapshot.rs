//! Snapshot module - owned copy of the type grid

use serde::Serialize;

use crate::types::TileType;

/// Owned copy of a board's type grid, row-major from row 0 (the floor).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BoardSnapshot {
    pub size: usize,
    pub cells: Vec<TileType>,
    pub board_hash: u64,
}

impl BoardSnapshot {
    pub(crate) fn from_cells(size: usize, cells: Vec<TileType>) -> Self {
        let board_hash = fnv1a64(&cells);
        Self {
            size,
            cells,
            board_hash,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<TileType> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    /// Number of cells holding each type, `Empty` included.
    pub fn type_counts(&self) -> std::collections::BTreeMap<TileType, usize> {
        let mut counts = std::collections::BTreeMap::new();
        for &kind in &self.cells {
            *counts.entry(kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|t| t.is_empty()).count()
    }
}

/// FNV-1a 64-bit over the type discriminants.
fn fnv1a64(cells: &[TileType]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &kind in cells {
        h ^= kind as u8 as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_tracks_contents() {
        let a = BoardSnapshot::from_cells(2, vec![TileType::Red; 4]);
        let b = BoardSnapshot::from_cells(2, vec![TileType::Red; 4]);
        let c = BoardSnapshot::from_cells(
            2,
            vec![TileType::Red, TileType::Red, TileType::Red, TileType::Blue],
        );
        assert_eq!(a.board_hash, b.board_hash);
        assert_ne!(a.board_hash, c.board_hash);
    }

    #[test]
    fn get_is_bounds_checked() {
        let snap = BoardSnapshot::from_cells(
            2,
            vec![TileType::Red, TileType::Green, TileType::Blue, TileType::Empty],
        );
        assert_eq!(snap.get(0, 1), Some(TileType::Green));
        assert_eq!(snap.get(1, 0), Some(TileType::Blue));
        assert_eq!(snap.get(2, 0), None);
        assert_eq!(snap.get(0, 2), None);
        assert_eq!(snap.empty_count(), 1);
        assert_eq!(snap.type_counts()[&TileType::Red], 1);
    }
}
