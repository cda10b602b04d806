use litebike_core::geometry::{Direction, Vector2I};
use serde::{Deserialize, Serialize};

use crate::config::ArenaConfig;

/// Bounds and cell size of the play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub grid_size: i32,
}

impl Grid {
    pub fn from_config(config: &ArenaConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            grid_size: config.grid_size,
        }
    }

    /// Whether `pos` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, pos: Vector2I) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Round a coordinate down onto the grid.
    pub fn snap(&self, pos: Vector2I) -> Vector2I {
        let g = self.grid_size.max(1);
        Vector2I::new(pos.x - pos.x.rem_euclid(g), pos.y - pos.y.rem_euclid(g))
    }

    /// Heading vector for one step in `dir`.
    pub fn step(&self, dir: Direction) -> Vector2I {
        dir.step(self.grid_size)
    }
}

/// Where a bike enters the arena at round start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Vector2I,
    pub direction: Direction,
}

/// Arena definition: grid plus the two fixed spawns.
#[derive(Debug, Clone, Copy)]
pub struct Arena {
    pub grid: Grid,
    pub player_spawn: SpawnPoint,
    /// CPU start cell. Its heading is drawn per round by the match.
    pub cpu_spawn: Vector2I,
}

/// Player at a quarter of the width facing right, CPU at three quarters,
/// both on the horizontal midline.
pub fn create_arena(config: &ArenaConfig) -> Arena {
    let grid = Grid::from_config(config);
    let mid_y = grid.height / 2;
    Arena {
        grid,
        player_spawn: SpawnPoint {
            position: grid.snap(Vector2I::new(grid.width / 4, mid_y)),
            direction: Direction::East,
        },
        cpu_spawn: grid.snap(Vector2I::new(3 * grid.width / 4, mid_y)),
    }
}
