use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Integer vector on the arena grid. Used for both positions and headings;
/// a heading is a unit axis vector scaled by the grid step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vector2I {
    pub x: i32,
    pub y: i32,
}

impl Vector2I {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when `other` points the exact opposite way.
    pub fn is_reverse_of(self, other: Self) -> bool {
        self == -other
    }
}

impl Add for Vector2I {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2I {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2I {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector2I {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Vector2I {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Cardinal direction in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed evaluation order: Right, Left, Down, Up.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// Unit axis vector for this direction.
    pub const fn unit(self) -> Vector2I {
        match self {
            Direction::North => Vector2I::new(0, -1),
            Direction::South => Vector2I::new(0, 1),
            Direction::East => Vector2I::new(1, 0),
            Direction::West => Vector2I::new(-1, 0),
        }
    }

    /// Heading vector for one grid step in this direction.
    pub fn step(self, grid_size: i32) -> Vector2I {
        self.unit() * grid_size
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Recover the direction of an axis-aligned heading of any length.
    pub fn from_step(step: Vector2I) -> Option<Direction> {
        match (step.x.signum(), step.y.signum()) {
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (0, 1) => Some(Direction::South),
            (0, -1) => Some(Direction::North),
            _ => None,
        }
    }
}
