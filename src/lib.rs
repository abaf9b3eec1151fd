//! Tile Blast (workspace facade crate).
//!
//! Re-exports the simulation under `tile_blast::{core,types}` and hosts the
//! headless runner used by the `tile-blast` binary. The implementation lives in
//! dedicated crates under `crates/`.

pub mod cli;

pub use tile_blast_core as core;
pub use tile_blast_types as types;
