#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use generator::*;
pub use round::*;
pub use tile::*;
pub use timeline::*;
pub use timer::*;
pub use types::*;

mod error;
mod generator;
mod round;
mod tile;
mod timeline;
mod timer;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub point_count: u32,
    pub click_interval_ms: u32,
}

impl GameConfig {
    pub const DEFAULT_POINT_COUNT: u32 = 5;
    pub const DEFAULT_CLICK_INTERVAL_MS: u32 = 500;
    pub const MIN_CLICK_INTERVAL_MS: u32 = TICK_MS;
    pub const MAX_CLICK_INTERVAL_MS: u32 = 60_000;

    pub const fn new_unchecked(point_count: u32, click_interval_ms: u32) -> Self {
        Self {
            point_count,
            click_interval_ms,
        }
    }

    /// A zero point count is kept as is and produces an empty board.
    pub fn new(point_count: u32, click_interval_ms: u32) -> Self {
        let click_interval_ms =
            click_interval_ms.clamp(Self::MIN_CLICK_INTERVAL_MS, Self::MAX_CLICK_INTERVAL_MS);
        Self::new_unchecked(point_count, click_interval_ms)
    }

    pub const fn with_point_count(self, point_count: u32) -> Self {
        Self::new_unchecked(point_count, self.click_interval_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_POINT_COUNT, Self::DEFAULT_CLICK_INTERVAL_MS)
    }
}

/// Tile positions for one round, `positions[i]` belongs to tile `i + 1`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    positions: Vec<Position>,
}

impl Layout {
    pub fn from_positions(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    pub fn point_count(&self) -> u32 {
        self.positions.len().try_into().unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, id: TileId) -> Option<Position> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.positions.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileId, Position)> + '_ {
        (1..).zip(self.positions.iter().copied())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    /// Right tile, more tiles left to click.
    Advanced,
    /// Right tile and it was the last one, the round now waits for every fade to finish.
    AwaitingClear,
    /// Wrong tile, the round is over.
    Mistake,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            NoChange => false,
            Advanced => true,
            AwaitingClear => true,
            Mistake => true,
        }
    }
}

/// Result of firing one timer of the round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    NoChange,
    Ticked,
    FadeFinished,
    AllCleared,
    AutoClick(ClickOutcome),
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        use TickOutcome::*;
        match self {
            NoChange => false,
            Ticked => true,
            FadeFinished => true,
            AllCleared => true,
            AutoClick(outcome) => outcome.has_update(),
        }
    }
}
