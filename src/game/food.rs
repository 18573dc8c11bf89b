//! Food placement over the free cells of the grid

use rand::Rng;
use rand::seq::IteratorRandom;
use std::collections::HashSet;

use super::state::{Position, Snake};

/// Pick a cell uniformly at random among those not covered by `snake`.
///
/// Returns `None` when the snake fills the whole grid.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    snake: &Snake,
    grid_size: usize,
) -> Option<Position> {
    let occupied: HashSet<Position> = snake.body.iter().copied().collect();
    free_cells(&occupied, grid_size).choose(rng)
}

fn free_cells(
    occupied: &HashSet<Position>,
    grid_size: usize,
) -> impl Iterator<Item = Position> + '_ {
    let size = grid_size as i32;
    (0..size)
        .flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
        .filter(move |pos| !occupied.contains(pos))
}
