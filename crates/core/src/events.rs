//! Board notifications and the sinks that receive them.
//!
//! Events are delivered synchronously, in order, while a click resolves.
//! Payloads are owned copies, so a sink can keep them without borrowing
//! from the live grid.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Position, TileType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum BoardEvent {
    /// A removable group (two or more tiles) was clicked.
    MoveUsed,
    /// Positions cleared by the click, in discovery order.
    TilesDestroyed(Vec<Position>),
    /// Destroyed tile count keyed by type.
    TileTypeAmountDestroyed(BTreeMap<TileType, usize>),
    /// Compaction finished for every column.
    TilesDropped,
    /// Positions that received a new tile, in row-major scan order.
    TilesFilledFromAbove(Vec<Position>),
    /// The board had no valid move and its types were reshuffled.
    BoardShuffled,
}

impl BoardEvent {
    /// Stable event name, identical to the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::MoveUsed => "moveUsed",
            BoardEvent::TilesDestroyed(_) => "tilesDestroyed",
            BoardEvent::TileTypeAmountDestroyed(_) => "tileTypeAmountDestroyed",
            BoardEvent::TilesDropped => "tilesDropped",
            BoardEvent::TilesFilledFromAbove(_) => "tilesFilledFromAbove",
            BoardEvent::BoardShuffled => "boardShuffled",
        }
    }
}

/// Receiver of board notifications.
///
/// Implementations observe only; they are handed a shared reference and
/// have no path back into the board.
pub trait EventSink {
    fn emit(&mut self, event: &BoardEvent);
}

/// Sink that records every event until drained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<BoardEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Take and clear the recorded events.
    pub fn take(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name() == name).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &BoardEvent) {
        self.events.push(event.clone());
    }
}

/// Sink that drops everything (benchmarks, headless simulation).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &BoardEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: &BoardEvent) {
        (**self).emit(event);
    }
}
