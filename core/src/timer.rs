use serde::{Deserialize, Serialize};

use crate::*;

/// Identity of a periodic timer owned by a round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerKey {
    Clock,
    /// Keyed on the tile it will click, so the timer is re-armed whenever the expected tile changes.
    AutoPlay { next: TileId },
    Fade(TileId),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSpec {
    pub key: TimerKey,
    pub period_ms: u32,
}

impl TimerSpec {
    pub const fn new(key: TimerKey, period_ms: u32) -> Self {
        Self { key, period_ms }
    }
}
