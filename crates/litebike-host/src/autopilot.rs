use std::collections::HashSet;

use litebike_arena::arena::Grid;
use litebike_arena::bot;
use litebike_core::game_trait::{FrameView, InputSource, MenuAction};
use litebike_core::geometry::{Direction, Vector2I};
use litebike_core::scores::PlayerTag;

use crate::name_entry::NameEntry;

/// Input source that plays the player's bike with the CPU heuristic.
#[derive(Debug)]
pub struct Autopilot {
    grid: Grid,
    tag: PlayerTag,
    occupied: HashSet<Vector2I>,
}

impl Autopilot {
    pub fn new(grid: Grid, tag: PlayerTag) -> Self {
        Self {
            grid,
            tag,
            occupied: HashSet::new(),
        }
    }
}

impl InputSource for Autopilot {
    fn menu_action(&mut self) -> MenuAction {
        MenuAction::Start
    }

    fn poll_direction(&mut self, view: &FrameView<'_>) -> Option<Direction> {
        self.occupied.clear();
        self.occupied.extend(view.player_trail.iter().copied());
        self.occupied.extend(view.cpu_trail.iter().copied());

        let step = bot::choose_direction(
            view.player_position,
            view.player_heading,
            &self.grid,
            &self.occupied,
        );
        Direction::from_step(step)
    }

    fn enter_name(&mut self, final_score: u32) -> PlayerTag {
        let mut entry = NameEntry::new();
        entry.type_str(self.tag.as_str());
        let tag = entry.submit().unwrap_or(self.tag);
        tracing::info!(tag = %tag, final_score, "Autopilot entered name");
        tag
    }
}
