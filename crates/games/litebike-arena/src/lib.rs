pub mod arena;
pub mod bot;
pub mod collision;
pub mod config;
pub mod progression;
pub mod round;
pub mod scoring;

use litebike_core::geometry::Vector2I;

use collision::Trail;
pub use progression::{Match, MatchStep};
pub use round::{Round, TickReport};

/// One light cycle: where it is, where it is going, and what it left behind.
#[derive(Debug, Clone)]
pub struct Bike {
    pub position: Vector2I,
    /// One grid step in the direction of travel.
    pub heading: Vector2I,
    pub trail: Trail,
}

impl Bike {
    /// A bike at its spawn with an empty trail.
    pub fn new(position: Vector2I, heading: Vector2I) -> Self {
        Self {
            position,
            heading,
            trail: Trail::new(),
        }
    }

    /// Cell the bike will enter on its next step.
    pub fn next_position(&self) -> Vector2I {
        self.position + self.heading
    }
}

/// Round state machine: `Running` until one bike crashes, then terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Running,
    PlayerLost,
    PlayerWon,
}

impl RoundStatus {
    pub fn is_over(self) -> bool {
        self != RoundStatus::Running
    }
}
