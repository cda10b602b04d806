//! CPU steering: greedy one-ply look-ahead scored by ray-cast open space.
//!
//! Every candidate turn is scored by casting four axis rays from the cell it
//! would land on and summing how many free cells each ray crosses. This is
//! an approximation of reachable area, not a flood fill: space that is only
//! reachable around a corner is not counted.

use litebike_core::geometry::{Direction, Vector2I};

use crate::arena::Grid;
use crate::collision::{Obstacles, is_collision};

/// Score given to a candidate whose first step already collides.
pub const UNSAFE: i32 = -1;

/// Steps to evaluate this tick, in the fixed order Right, Left, Down, Up,
/// without the reverse of `heading`.
pub fn candidate_steps(heading: Vector2I, grid: &Grid) -> impl Iterator<Item = Vector2I> {
    let g = grid.grid_size;
    Direction::ALL
        .into_iter()
        .map(move |d| d.step(g))
        .filter(move |step| !step.is_reverse_of(heading))
}

/// Free cells visible from `pos` along the four axes, summed.
pub fn open_space<O: Obstacles + ?Sized>(pos: Vector2I, grid: &Grid, obstacles: &O) -> i32 {
    let mut open = 0;
    for dir in Direction::ALL {
        let step = grid.step(dir);
        let mut probe = pos + step;
        while !is_collision(probe, grid, obstacles) {
            open += 1;
            probe += step;
        }
    }
    open
}

/// Score each candidate step: [`UNSAFE`] when the step itself collides,
/// otherwise the open space around the landing cell.
pub fn score_candidates<O: Obstacles + ?Sized>(
    position: Vector2I,
    heading: Vector2I,
    grid: &Grid,
    obstacles: &O,
) -> Vec<(Vector2I, i32)> {
    candidate_steps(heading, grid)
        .map(|step| {
            let next = position + step;
            let score = if is_collision(next, grid, obstacles) {
                UNSAFE
            } else {
                open_space(next, grid, obstacles)
            };
            (step, score)
        })
        .collect()
}

/// Pick the CPU's heading for this tick. Ties go to the earliest candidate.
/// With no safe candidate the current heading is kept.
pub fn choose_direction<O: Obstacles + ?Sized>(
    position: Vector2I,
    heading: Vector2I,
    grid: &Grid,
    obstacles: &O,
) -> Vector2I {
    let mut best: Option<(Vector2I, i32)> = None;
    for (step, score) in score_candidates(position, heading, grid, obstacles) {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((step, score));
        }
    }

    match best {
        Some((step, score)) if score != UNSAFE => step,
        _ => {
            tracing::trace!(x = position.x, y = position.y, "CPU trapped, holding heading");
            heading
        },
    }
}
