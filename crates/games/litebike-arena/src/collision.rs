use std::collections::HashSet;

use litebike_core::geometry::Vector2I;

use crate::arena::Grid;

/// A set of occupied cells that a move may not enter.
pub trait Obstacles {
    fn is_occupied(&self, cell: Vector2I) -> bool;
}

/// Nothing occupied.
impl Obstacles for () {
    fn is_occupied(&self, _cell: Vector2I) -> bool {
        false
    }
}

/// A single occupied cell.
impl Obstacles for Vector2I {
    fn is_occupied(&self, cell: Vector2I) -> bool {
        *self == cell
    }
}

impl Obstacles for HashSet<Vector2I> {
    fn is_occupied(&self, cell: Vector2I) -> bool {
        self.contains(&cell)
    }
}

impl<T: Obstacles + ?Sized> Obstacles for &T {
    fn is_occupied(&self, cell: Vector2I) -> bool {
        (**self).is_occupied(cell)
    }
}

/// Union of two obstacle sets.
impl<A: Obstacles, B: Obstacles> Obstacles for (A, B) {
    fn is_occupied(&self, cell: Vector2I) -> bool {
        self.0.is_occupied(cell) || self.1.is_occupied(cell)
    }
}

/// Union of three obstacle sets.
impl<A: Obstacles, B: Obstacles, C: Obstacles> Obstacles for (A, B, C) {
    fn is_occupied(&self, cell: Vector2I) -> bool {
        self.0.is_occupied(cell) || self.1.is_occupied(cell) || self.2.is_occupied(cell)
    }
}

/// Cells a bike has left behind, in visiting order. Append-only; membership
/// is answered from a hash set so lookups stay O(1) as the trail grows.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    cells: Vec<Vector2I>,
    occupied: HashSet<Vector2I>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: Vector2I) {
        self.cells.push(cell);
        self.occupied.insert(cell);
    }

    pub fn cells(&self) -> &[Vector2I] {
        &self.cells
    }

    pub fn last(&self) -> Option<Vector2I> {
        self.cells.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Vector2I) -> bool {
        self.occupied.contains(&cell)
    }
}

impl FromIterator<Vector2I> for Trail {
    fn from_iter<I: IntoIterator<Item = Vector2I>>(iter: I) -> Self {
        let mut trail = Trail::new();
        for cell in iter {
            trail.push(cell);
        }
        trail
    }
}

impl Obstacles for Trail {
    fn is_occupied(&self, cell: Vector2I) -> bool {
        self.contains(cell)
    }
}

/// A position collides when it leaves the arena or lands on an occupied cell.
/// Pure; works for real moves and hypothetical look-ahead probes alike.
pub fn is_collision<O: Obstacles + ?Sized>(pos: Vector2I, grid: &Grid, obstacles: &O) -> bool {
    !grid.contains(pos) || obstacles.is_occupied(pos)
}
