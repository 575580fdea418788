/// Tile number shown to the player, valid ids are `1..=point_count`.
pub type TileId = u32;

/// Period of the game clock and of every fade timer, in milliseconds.
pub const TICK_MS: u32 = 100;

/// Side of the square placement area.
pub const BOARD_SIZE: f32 = 500.0;

/// Side of a single tile's footprint.
pub const TILE_SIZE: f32 = 50.0;

/// Positions are drawn from `[0, PLACEMENT_SPAN)` on both axes so a tile never sticks out of the board.
pub const PLACEMENT_SPAN: f32 = BOARD_SIZE - TILE_SIZE;

/// Two tiles closer than this on both axes count as overlapping.
pub const MIN_SEPARATION: f32 = 10.0;

/// Boards with at least this many tiles get more placement attempts.
pub const DENSE_BOARD_POINTS: u32 = 2000;

pub const DENSE_BOARD_ATTEMPTS: u32 = 5;

pub const SPARSE_BOARD_ATTEMPTS: u32 = 1;

/// Number of fade ticks after a click, 3.0s at [`TICK_MS`].
pub const FADE_TICKS: u8 = 30;

/// Opacity lost on every fade tick.
pub const FADE_OPACITY_STEP: f32 = 0.033;

/// Below this opacity a fading tile switches to its lighter tint.
pub const FADE_TINT_THRESHOLD: f32 = 0.5;

pub const fn ticks_to_secs(ticks: u32) -> f32 {
    ticks as f32 * (TICK_MS as f32 / 1000.0)
}
