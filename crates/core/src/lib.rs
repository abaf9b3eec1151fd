//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the tile-blast board simulation: flood-fill group
//! discovery, group removal, column compaction, refill, and deadlock
//! shuffling. It has **no** dependencies on rendering, input, or I/O:
//!
//! - **Deterministic**: one seeded RNG drives every random decision, so a
//!   seed plus a click sequence reproduces a game exactly
//! - **Observable**: every state change is reported as a [`BoardEvent`] to an
//!   [`EventSink`] owned by the board
//! - **Testable**: boards can be built from explicit rows
//!
//! # Module Structure
//!
//! - [`board`]: grid ownership and click resolution
//! - [`tile`]: per-cell state (type, position, drop bookkeeping)
//! - [`events`]: notifications and sinks
//! - [`rng`]: seeded LCG
//! - [`config`]: construction settings and validation
//! - [`snapshot`]: owned, hashable copy of the type grid
//!
//! # Game Rules
//!
//! - Clicking a tile removes its 4-connected same-type group if the group
//!   has at least [`MIN_GROUP_SIZE`](types::MIN_GROUP_SIZE) tiles
//! - Tiles above the removed cells fall down; columns never mix
//! - Cells left empty at the top are refilled with random palette types
//! - If no two adjacent tiles share a type, the board is shuffled
//!
//! # Example
//!
//! ```
//! use tile_blast_core::{Board, BoardConfig, BoardEvent, ClickOutcome};
//! use tile_blast_core::types::TileType::{Blue as B, Red as R};
//!
//! let config = BoardConfig::new(3, vec![R, B], 42);
//! let rows = [[R, R, B], [R, B, B], [B, B, R]];
//! let mut board = Board::from_rows(&rows, &config);
//!
//! let outcome = board.click_at(0, 0);
//! assert!(matches!(outcome, ClickOutcome::Resolved(r) if r.destroyed == 3));
//! assert_eq!(board.empty_count(), 0);
//!
//! let events = board.take_events();
//! assert_eq!(events[0], BoardEvent::MoveUsed);
//! ```

pub mod board;
pub mod config;
pub mod events;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use tile_blast_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClickOutcome, Resolution};
pub use config::{BoardConfig, ConfigError, ShufflePolicy};
pub use events::{BoardEvent, EventLog, EventSink, NullSink};
pub use rng::SimpleRng;
pub use snapshot::BoardSnapshot;
pub use tile::Tile;
