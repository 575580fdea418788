use alloc::vec::Vec;

use super::*;

/// Uniform placement with bounded rejection sampling, tiles may still overlap when the attempt cap is reached.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, point_count: u32) -> Layout {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let max_attempts = max_placement_attempts(point_count);
        log::debug!(
            "generating layout, points: {}, attempts per tile: {}",
            point_count,
            max_attempts
        );

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut positions: Vec<Position> = Vec::with_capacity(point_count as usize);
        let mut forced = 0;

        for id in 1..=point_count {
            let draw = || {
                Position::new(
                    rng.random_range(0.0..PLACEMENT_SPAN),
                    rng.random_range(0.0..PLACEMENT_SPAN),
                )
            };
            let placement = place_tile(&positions, max_attempts, draw);
            if placement.overlapping {
                log::trace!("tile {} placed overlapping after {} attempts", id, max_attempts);
                forced += 1;
            }
            positions.push(placement.position);
        }

        if forced > 0 {
            log::debug!("{} tiles placed overlapping", forced);
        }
        Layout::from_positions(positions)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Placement {
    position: Position,
    /// Attempts ran out and the last draw was taken despite landing near a placed tile.
    overlapping: bool,
}

/// Draws until a candidate clears every placed tile, the last attempt is taken regardless.
fn place_tile(
    placed: &[Position],
    max_attempts: u32,
    mut draw: impl FnMut() -> Position,
) -> Placement {
    let mut attempts = 0;
    loop {
        let position = draw();
        attempts += 1;

        // with a single attempt the draw is always taken, skip the scan
        if max_attempts <= 1 {
            return Placement {
                position,
                overlapping: false,
            };
        }
        let overlapping = placed.iter().any(|p| p.is_near(&position));
        if !overlapping || attempts >= max_attempts {
            return Placement {
                position,
                overlapping,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    #[test]
    fn generates_every_id_inside_the_board() {
        for point_count in [1, 5, 37, 300] {
            let layout = RandomLayoutGenerator::new(7).generate(point_count);

            assert_eq!(layout.point_count(), point_count);
            let ids: BTreeSet<TileId> = layout.iter().map(|(id, _)| id).collect();
            assert_eq!(ids, (1..=point_count).collect());
            assert!(layout.iter().all(|(_, pos)| pos.is_on_board()));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = RandomLayoutGenerator::new(42).generate(20);
        let b = RandomLayoutGenerator::new(42).generate(20);
        let c = RandomLayoutGenerator::new(43).generate(20);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn zero_points_is_an_empty_layout() {
        let layout = RandomLayoutGenerator::new(1).generate(0);
        assert!(layout.is_empty());
        assert_eq!(layout.position(1), None);
    }

    #[test]
    fn positions_are_looked_up_by_tile_id() {
        let layout = RandomLayoutGenerator::new(4).generate(3);

        assert_eq!(layout.position(0), None);
        assert_eq!(layout.position(1), layout.iter().next().map(|(_, pos)| pos));
        assert!(layout.position(3).is_some());
        assert_eq!(layout.position(4), None);
    }

    #[test]
    fn attempt_cap_only_rises_for_dense_boards() {
        assert_eq!(max_placement_attempts(5), 1);
        assert_eq!(max_placement_attempts(1999), 1);
        assert_eq!(max_placement_attempts(2000), 5);
        assert_eq!(max_placement_attempts(10_000), 5);
    }

    #[test]
    fn dense_board_stays_in_bounds() {
        let layout = RandomLayoutGenerator::new(3).generate(DENSE_BOARD_POINTS);

        assert_eq!(layout.point_count(), DENSE_BOARD_POINTS);
        assert!(layout.iter().all(|(_, pos)| pos.is_on_board()));
    }

    fn near_pairs(layout: &Layout) -> usize {
        let positions: Vec<Position> = layout.iter().map(|(_, pos)| pos).collect();
        positions
            .iter()
            .enumerate()
            .map(|(i, a)| positions[i + 1..].iter().filter(|b| a.is_near(b)).count())
            .sum()
    }

    fn scripted(draws: &[Position]) -> impl FnMut() -> Position + '_ {
        let mut draws = draws.iter().copied();
        move || draws.next().unwrap()
    }

    #[test]
    fn near_draw_is_redrawn_while_attempts_remain() {
        let placed = [Position::new(100.0, 100.0)];
        let near = Position::new(105.0, 95.0);
        let clear = Position::new(300.0, 20.0);

        let placement = place_tile(&placed, 5, scripted(&[near, near, clear]));

        assert_eq!(placement.position, clear);
        assert!(!placement.overlapping);
    }

    #[test]
    fn last_attempt_is_taken_even_when_near() {
        let placed = [Position::new(100.0, 100.0)];
        let near = Position::new(105.0, 95.0);

        let placement = place_tile(&placed, 2, scripted(&[near, near, Position::default()]));
        assert_eq!(placement.position, near);
        assert!(placement.overlapping);

        let placement = place_tile(&placed, 1, scripted(&[near]));
        assert_eq!(placement.position, near);
    }

    #[test]
    fn dense_boards_overlap_less_than_sparse_ones() {
        let sparse = RandomLayoutGenerator::new(3).generate(DENSE_BOARD_POINTS - 1);
        let dense = RandomLayoutGenerator::new(3).generate(DENSE_BOARD_POINTS);

        assert!(near_pairs(&dense) < near_pairs(&sparse));
    }
}
