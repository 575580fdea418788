use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, point_count: u32) -> Layout;
}

/// How many draws a tile gets before its last draw is accepted even if it overlaps.
pub const fn max_placement_attempts(point_count: u32) -> u32 {
    if point_count >= DENSE_BOARD_POINTS {
        DENSE_BOARD_ATTEMPTS
    } else {
        SPARSE_BOARD_ATTEMPTS
    }
}
