//! Board module - owns the tile grid and resolves clicks
//!
//! The board is a `size x size` grid stored as a flat row-major array of
//! [`Tile`]s. Row 0 is the floor: gravity moves tiles toward it and refilled
//! tiles enter from above the top row (`size - 1`).
//!
//! A click resolves fully before returning:
//! flood fill -> size check -> destroy -> compact -> refill -> deadlock check
//! (-> shuffle). Every cell always holds a tile; a removed tile is a tile whose
//! type is [`TileType::Empty`].

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use arrayvec::ArrayVec;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{BoardConfig, ShufflePolicy};
use crate::events::{BoardEvent, EventLog, EventSink};
use crate::rng::SimpleRng;
use crate::snapshot::BoardSnapshot;
use crate::tile::Tile;
use crate::types::{Position, TileType, MIN_GROUP_SIZE};

/// Result of [`Board::click_at`]. Every variant except `Resolved` means the
/// board was left untouched and no event was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ClickOutcome {
    OutOfBounds,
    EmptyCell,
    /// The clicked group was smaller than [`MIN_GROUP_SIZE`].
    TooSmall,
    Resolved(Resolution),
}

impl ClickOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ClickOutcome::Resolved(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub kind: TileType,
    pub destroyed: usize,
    pub refilled: usize,
    pub shuffles: u32,
}

fn assert_valid(config: &BoardConfig) {
    if let Err(err) = config.validate() {
        panic!("invalid board config: {err}");
    }
}

/// The game board.
#[derive(Debug, Clone)]
pub struct Board<S = EventLog> {
    size: usize,
    /// Flat array of tiles, row-major order (row * size + col)
    tiles: Vec<Tile>,
    palette: Vec<TileType>,
    rng: SimpleRng,
    shuffle_policy: ShufflePolicy,
    sink: S,
}

impl Board<EventLog> {
    /// Create a randomly filled board that records its events.
    ///
    /// Panics if the configuration is invalid (see [`BoardConfig::validate`]).
    pub fn new(config: &BoardConfig) -> Self {
        Self::with_sink(config, EventLog::new())
    }

    /// Create a board from explicit rows; `rows[r]` is row `r`, row 0 is the
    /// floor. No random draws are made, so the RNG stream starts fresh at the
    /// first refill.
    pub fn from_rows<R: AsRef<[TileType]>>(rows: &[R], config: &BoardConfig) -> Self {
        Self::from_rows_with_sink(rows, config, EventLog::new())
    }

    /// Take and clear the events recorded so far.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        self.sink.take()
    }
}

impl<S: EventSink> Board<S> {
    pub fn with_sink(config: &BoardConfig, sink: S) -> Self {
        assert_valid(config);

        let size = config.size;
        let mut rng = SimpleRng::new(config.seed);
        let tiles = (0..size * size)
            .map(|i| Tile::new(Position::from_index(i, size), rng.pick(&config.palette)))
            .collect();

        Self {
            size,
            tiles,
            palette: config.palette.clone(),
            rng,
            shuffle_policy: config.shuffle_policy,
            sink,
        }
    }

    pub fn from_rows_with_sink<R: AsRef<[TileType]>>(
        rows: &[R],
        config: &BoardConfig,
        sink: S,
    ) -> Self {
        assert_valid(config);
        let size = rows.len();
        assert_eq!(size, config.size, "row count must equal configured size");
        assert!(
            rows.iter().all(|r| r.as_ref().len() == size),
            "board rows must form a square grid"
        );

        let tiles = rows
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .as_ref()
                    .iter()
                    .enumerate()
                    .map(move |(col, &kind)| Tile::new(Position::new(row, col), kind))
            })
            .collect();

        Self {
            size,
            tiles,
            palette: config.palette.clone(),
            rng: SimpleRng::new(config.seed),
            shuffle_policy: config.shuffle_policy,
            sink,
        }
    }

    /// Edge length of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn palette(&self) -> &[TileType] {
        &self.palette
    }

    pub fn shuffle_policy(&self) -> ShufflePolicy {
        self.shuffle_policy
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// All tiles, row-major from row 0
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Check if position is inside the grid
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Get tile at (row, col). Returns None if out of bounds
    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.tiles.get(row * self.size + col)
    }

    /// Get tile type at (row, col). Returns None if out of bounds
    pub fn kind_at(&self, row: usize, col: usize) -> Option<TileType> {
        self.tile(row, col).map(Tile::kind)
    }

    pub fn empty_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_empty()).count()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_cells(self.size, self.tiles.iter().map(Tile::kind).collect())
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> usize {
        pos.index(self.size)
    }

    #[inline(always)]
    fn at(&self, pos: Position) -> &Tile {
        &self.tiles[self.index(pos)]
    }

    /// In-grid 4-neighbours of `pos`: left, right, up, down.
    fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        let mut out = ArrayVec::new();
        if pos.col > 0 {
            out.push(Position::new(pos.row, pos.col - 1));
        }
        if pos.col + 1 < self.size {
            out.push(Position::new(pos.row, pos.col + 1));
        }
        if pos.row + 1 < self.size {
            out.push(Position::new(pos.row + 1, pos.col));
        }
        if pos.row > 0 {
            out.push(Position::new(pos.row - 1, pos.col));
        }
        out
    }

    fn has_matching_neighbor(&self, pos: Position) -> bool {
        let tile = self.at(pos);
        self.neighbors(pos)
            .iter()
            .any(|&n| tile.matches(self.at(n)))
    }

    /// Resolve a click at (row, col).
    ///
    /// Out-of-range coordinates, empty cells and groups smaller than
    /// [`MIN_GROUP_SIZE`] are rejected without touching the board.
    pub fn click_at(&mut self, row: usize, col: usize) -> ClickOutcome {
        if !self.in_bounds(row, col) {
            debug!(row, col, size = self.size, "click outside board ignored");
            return ClickOutcome::OutOfBounds;
        }
        let kind = self.at(Position::new(row, col)).kind();
        if kind.is_empty() {
            return ClickOutcome::EmptyCell;
        }

        let group = self.find_connected_group(row, col);
        if group.len() < MIN_GROUP_SIZE {
            return ClickOutcome::TooSmall;
        }
        debug!(row, col, %kind, group = group.len(), "resolving click");

        self.reset_drop_flags();
        self.sink.emit(&BoardEvent::MoveUsed);
        self.destroy_group(&group);
        self.compact_columns();
        let refilled = self.refill_empty_slots();
        let shuffles = self.resolve_deadlock();

        ClickOutcome::Resolved(Resolution {
            kind,
            destroyed: group.len(),
            refilled,
            shuffles,
        })
    }

    /// Breadth-first flood fill over 4-connected tiles of the seed's type.
    ///
    /// Returns positions in discovery order, seed first, without duplicates.
    /// An `Empty` seed yields an empty group.
    pub fn find_connected_group(&self, row: usize, col: usize) -> Vec<Position> {
        assert!(
            self.in_bounds(row, col),
            "find_connected_group({row}, {col}) outside {0}x{0} board",
            self.size
        );
        let seed = Position::new(row, col);
        if self.at(seed).is_empty() {
            return Vec::new();
        }

        let mut visited = vec![false; self.tiles.len()];
        let mut queue = VecDeque::new();
        let mut group = vec![seed];
        visited[self.index(seed)] = true;
        queue.push_back(seed);

        while let Some(current) = queue.pop_front() {
            let tile = self.at(current);
            for next in self.neighbors(current) {
                let idx = self.index(next);
                if visited[idx] || !tile.matches(&self.tiles[idx]) {
                    continue;
                }
                visited[idx] = true;
                group.push(next);
                queue.push_back(next);
            }
        }
        group
    }

    /// Set every tile of `group` to `Empty` and report what was removed.
    ///
    /// The destroyed type is read from the first position; group members
    /// share one type by construction.
    pub fn destroy_group(&mut self, group: &[Position]) {
        let Some(&first) = group.first() else {
            return;
        };
        let kind = self.at(first).kind();
        for &pos in group {
            let idx = self.index(pos);
            self.tiles[idx].kind = TileType::Empty;
        }

        self.sink.emit(&BoardEvent::TilesDestroyed(group.to_vec()));
        let mut amounts = BTreeMap::new();
        amounts.insert(kind, group.len());
        self.sink.emit(&BoardEvent::TileTypeAmountDestroyed(amounts));
    }

    /// Let tiles fall into the empty cells below them.
    ///
    /// Rows are visited from the second-lowest upward, so everything under the
    /// current tile is already settled and the empty run beneath it is exactly
    /// its fall distance. Surviving tiles keep their bottom-to-top order; the
    /// gaps end up as a contiguous run at the top of each column.
    pub fn compact_columns(&mut self) {
        for row in 1..self.size {
            for col in 0..self.size {
                let from = Position::new(row, col);
                if self.at(from).is_empty() {
                    continue;
                }

                let mut landing = row;
                while landing > 0 && self.at(Position::new(landing - 1, col)).is_empty() {
                    landing -= 1;
                }
                let fall = row - landing;
                if fall == 0 {
                    continue;
                }

                let to = Position::new(landing, col);
                self.swap_tiles(from, to);
                let idx = self.index(to);
                self.tiles[idx].dropped_by(fall);
            }
        }
        self.sink.emit(&BoardEvent::TilesDropped);
    }

    /// Swap two slots and rewrite both tiles' stored positions.
    fn swap_tiles(&mut self, a: Position, b: Position) {
        let (ia, ib) = (self.index(a), self.index(b));
        self.tiles.swap(ia, ib);
        self.tiles[ia].position = a;
        self.tiles[ib].position = b;
    }

    /// Give every `Empty` cell a fresh random type, as if dropped in from
    /// above the board. Returns the number of cells filled.
    pub fn refill_empty_slots(&mut self) -> usize {
        let mut filled = Vec::new();
        for idx in 0..self.tiles.len() {
            if !self.tiles[idx].is_empty() {
                continue;
            }
            let pos = Position::from_index(idx, self.size);
            let kind = self.rng.pick(&self.palette);
            let tile = &mut self.tiles[idx];
            tile.kind = kind;
            tile.position = pos;
            tile.drop_distance = self.size;
            tile.has_dropped = true;
            filled.push(pos);
        }

        let count = filled.len();
        self.sink.emit(&BoardEvent::TilesFilledFromAbove(filled));
        count
    }

    /// True if any two 4-adjacent cells share a (non-empty) type.
    pub fn has_any_valid_move(&self) -> bool {
        (0..self.tiles.len())
            .any(|idx| self.has_matching_neighbor(Position::from_index(idx, self.size)))
    }

    /// Fisher-Yates over the flattened tile types. Tiles stay in place; only
    /// their types are permuted. The result is not checked for a valid move.
    pub fn shuffle(&mut self) {
        let mut kinds: Vec<TileType> = self.tiles.iter().map(Tile::kind).collect();
        self.rng.shuffle(&mut kinds);
        for (tile, kind) in self.tiles.iter_mut().zip(kinds) {
            tile.kind = kind;
        }
        self.sink.emit(&BoardEvent::BoardShuffled);
    }

    /// Shuffle per the configured policy while no valid move exists.
    /// Returns the number of shuffles performed.
    fn resolve_deadlock(&mut self) -> u32 {
        let budget = self.shuffle_policy.max_attempts();
        let mut shuffles = 0;
        while shuffles < budget && !self.has_any_valid_move() {
            self.shuffle();
            shuffles += 1;
        }

        if shuffles > 0 {
            info!(shuffles, "no valid move left, board shuffled");
            if matches!(self.shuffle_policy, ShufflePolicy::UntilPlayable { .. })
                && !self.has_any_valid_move()
            {
                warn!(budget, "shuffle budget exhausted without a valid move");
            }
        }
        shuffles
    }

    /// Clear the drop bookkeeping of one tile (after its fall was animated).
    pub fn reset_drop_flag(&mut self, row: usize, col: usize) {
        assert!(self.in_bounds(row, col), "reset_drop_flag({row}, {col}) out of bounds");
        let idx = row * self.size + col;
        self.tiles[idx].clear_drop();
    }

    pub fn reset_drop_flags(&mut self) {
        for tile in &mut self.tiles {
            tile.clear_drop();
        }
    }
}

/// Textual dump, top row first, one char per tile, `\n` after every row.
impl<S> fmt::Display for Board<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.size).rev() {
            let start = row * self.size;
            for tile in &self.tiles[start..start + self.size] {
                write!(f, "{}", tile.kind().as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
