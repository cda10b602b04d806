use litebike_core::game_trait::FrameView;
use litebike_core::geometry::Direction;

use crate::arena::{Arena, Grid};
use crate::collision::is_collision;
use crate::{Bike, RoundStatus, bot, scoring};

/// What a single tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub status: RoundStatus,
    /// A bike crashed on this tick.
    pub collided: bool,
    pub score: u32,
}

/// One round: both bikes, the running score, and the outcome.
#[derive(Debug, Clone)]
pub struct Round {
    grid: Grid,
    player: Bike,
    cpu: Bike,
    level: u32,
    carried_score: u32,
    score: u32,
    tick: u32,
    status: RoundStatus,
}

impl Round {
    /// Fresh round at the arena spawns. The player always starts on the
    /// arena's player heading; the CPU heading is supplied by the caller.
    pub fn new(arena: &Arena, cpu_direction: Direction, level: u32, carried_score: u32) -> Self {
        let grid = arena.grid;
        let player = Bike::new(
            arena.player_spawn.position,
            grid.step(arena.player_spawn.direction),
        );
        let cpu = Bike::new(arena.cpu_spawn, grid.step(cpu_direction));
        Self::from_parts(grid, player, cpu, level, carried_score)
    }

    /// Round from explicit bikes, e.g. to resume or stage a position.
    pub fn from_parts(grid: Grid, player: Bike, cpu: Bike, level: u32, carried_score: u32) -> Self {
        Self {
            grid,
            player,
            cpu,
            level,
            carried_score,
            score: carried_score,
            tick: 0,
            status: RoundStatus::Running,
        }
    }

    /// Advance one tick.
    ///
    /// The player's request is dropped if it would reverse the bike. The CPU
    /// steers against both trails as they stood before this tick. Each bike is
    /// then tested against its own earlier trail plus the other bike's trail
    /// including that bike's new cell. The player is tested first, so a mutual
    /// crash is a loss.
    pub fn tick(&mut self, requested: Option<Direction>) -> TickReport {
        if self.status.is_over() {
            return self.report(false);
        }
        self.tick += 1;

        if let Some(dir) = requested {
            let step = self.grid.step(dir);
            if !step.is_reverse_of(self.player.heading) {
                self.player.heading = step;
            }
        }
        let player_next = self.player.next_position();

        self.cpu.heading = bot::choose_direction(
            self.cpu.position,
            self.cpu.heading,
            &self.grid,
            &(&self.player.trail, &self.cpu.trail),
        );
        let cpu_next = self.cpu.next_position();

        let player_hit = is_collision(
            player_next,
            &self.grid,
            &(&self.player.trail, &self.cpu.trail, cpu_next),
        );
        let cpu_hit = is_collision(
            cpu_next,
            &self.grid,
            &(&self.cpu.trail, &self.player.trail, player_next),
        );

        self.player.position = player_next;
        self.player.trail.push(player_next);
        self.cpu.position = cpu_next;
        self.cpu.trail.push(cpu_next);

        if player_hit {
            self.status = RoundStatus::PlayerLost;
        } else if cpu_hit {
            self.status = RoundStatus::PlayerWon;
        }
        self.score = scoring::calculate_score(
            self.carried_score,
            self.tick,
            self.status == RoundStatus::PlayerWon,
        );

        if self.status.is_over() {
            tracing::debug!(
                level = self.level,
                tick = self.tick,
                score = self.score,
                status = ?self.status,
                "Round finished"
            );
        }
        self.report(player_hit || cpu_hit)
    }

    fn report(&self, collided: bool) -> TickReport {
        TickReport {
            status: self.status,
            collided,
            score: self.score,
        }
    }

    /// Read-only snapshot for rendering and input.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            player_position: self.player.position,
            player_heading: self.player.heading,
            player_trail: self.player.trail.cells(),
            cpu_position: self.cpu.position,
            cpu_heading: self.cpu.heading,
            cpu_trail: self.cpu.trail.cells(),
            score: self.score,
            level: self.level,
            tick: self.tick,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Bike {
        &self.player
    }

    pub fn cpu(&self) -> &Bike {
        &self.cpu
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u32 {
        self.tick
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use litebike_core::geometry::Vector2I;

    use super::*;
    use crate::arena::create_arena;
    use crate::collision::Trail;
    use crate::config::ArenaConfig;

    fn v(x: i32, y: i32) -> Vector2I {
        Vector2I::new(x, y)
    }

    fn grid() -> Grid {
        Grid::from_config(&ArenaConfig::default())
    }

    /// A bike whose trail is `path`, standing on the last cell and heading
    /// `heading`.
    fn bike_on_path(path: &[(i32, i32)], heading: Direction) -> Bike {
        let trail: Trail = path.iter().map(|&(x, y)| v(x, y)).collect();
        Bike {
            position: trail.last().unwrap(),
            heading: heading.step(10),
            trail,
        }
    }

    fn default_round(cpu_direction: Direction) -> Round {
        Round::new(&create_arena(&ArenaConfig::default()), cpu_direction, 1, 0)
    }

    #[test]
    fn first_tick_on_empty_arena() {
        let mut round = default_round(Direction::West);
        let report = round.tick(None);

        assert_eq!(round.player().position, v(210, 300));
        assert_eq!(report.status, RoundStatus::Running);
        assert!(!report.collided);
        assert_eq!(report.score, 1);
        // Every landing cell ties on open space, so Left wins by order.
        assert_eq!(round.cpu().heading, v(-10, 0));
        assert_eq!(round.cpu().position, v(590, 300));
    }

    #[test]
    fn cpu_heading_recomputed_for_any_start() {
        for dir in Direction::ALL {
            let mut round = default_round(dir);
            let report = round.tick(None);
            assert_eq!(report.status, RoundStatus::Running);
            assert_eq!(report.score, 1);
            assert!(!round.cpu().heading.is_reverse_of(dir.step(10)));
        }
    }

    #[test]
    fn trails_grow_by_one_cell_per_tick() {
        let mut round = default_round(Direction::North);
        for n in 1..=5 {
            round.tick(None);
            assert_eq!(round.player().trail.len(), n);
            assert_eq!(round.cpu().trail.len(), n);
            assert_eq!(round.player().trail.last(), Some(round.player().position));
            assert_eq!(round.cpu().trail.last(), Some(round.cpu().position));
        }
        assert_eq!(round.view().player_trail.len(), 5);
        assert_eq!(round.view().tick, 5);
    }

    #[test]
    fn reversal_request_is_ignored() {
        let mut round = default_round(Direction::West);
        round.tick(Some(Direction::West));
        assert_eq!(round.player().heading, v(10, 0));
        assert_eq!(round.player().position, v(210, 300));
    }

    #[test]
    fn turn_request_applies_before_moving() {
        let mut round = default_round(Direction::West);
        round.tick(Some(Direction::North));
        assert_eq!(round.player().heading, v(0, -10));
        assert_eq!(round.player().position, v(200, 290));
    }

    #[test]
    fn player_into_cpu_trail_loses_without_bonus() {
        // The CPU has already crossed the cell in front of the player.
        let player = bike_on_path(&[(190, 300), (200, 300)], Direction::East);
        let cpu = bike_on_path(&[(210, 280), (210, 290), (210, 300), (210, 310)], Direction::South);
        let mut round = Round::from_parts(grid(), player, cpu, 3, 41);

        let report = round.tick(None);
        assert_eq!(report.status, RoundStatus::PlayerLost);
        assert!(report.collided);
        assert_eq!(report.score, 42, "tick reward only, no bonus");
        assert_eq!(round.player().position, v(210, 300));
    }

    #[test]
    fn head_on_swap_resolves_as_loss() {
        // Player came in from the top-left, CPU from the bottom-right; each
        // is about to step onto the cell the other is standing on.
        let player = bike_on_path(
            &[(110, 90), (100, 90), (90, 90), (90, 100), (100, 100)],
            Direction::East,
        );
        let cpu = bike_on_path(&[(110, 110), (120, 110), (120, 100), (110, 100)], Direction::West);
        let mut round = Round::from_parts(grid(), player, cpu, 1, 0);

        let report = round.tick(None);
        // CPU had no safe option and kept going left into the player.
        assert_eq!(round.cpu().position, v(100, 100));
        assert_eq!(round.player().position, v(110, 100));
        assert_eq!(report.status, RoundStatus::PlayerLost);
        assert_eq!(report.score, 1);
    }

    #[test]
    fn trapped_cpu_crash_awards_bonus() {
        let player = bike_on_path(&[(190, 300), (200, 300)], Direction::East);
        let cpu = bike_on_path(&[(0, 10), (10, 10), (10, 0), (0, 0)], Direction::West);
        let mut round = Round::from_parts(grid(), player, cpu, 2, 120);

        let report = round.tick(None);
        assert_eq!(report.status, RoundStatus::PlayerWon);
        assert!(report.collided);
        assert_eq!(report.score, 120 + 1 + 100);
        assert_eq!(round.cpu().position, v(-10, 0));
    }

    #[test]
    fn player_into_own_trail_loses() {
        // Player loops back onto a cell it visited earlier.
        let player = bike_on_path(
            &[(200, 300), (210, 300), (210, 310), (200, 310)],
            Direction::North,
        );
        let cpu = bike_on_path(&[(600, 300)], Direction::West);
        let mut round = Round::from_parts(grid(), player, cpu, 1, 0);

        assert_eq!(round.tick(None).status, RoundStatus::PlayerLost);
    }

    #[test]
    fn player_leaving_arena_loses() {
        let player = bike_on_path(&[(780, 300), (790, 300)], Direction::East);
        let cpu = bike_on_path(&[(100, 100)], Direction::West);
        let mut round = Round::from_parts(grid(), player, cpu, 1, 0);

        let report = round.tick(None);
        assert_eq!(report.status, RoundStatus::PlayerLost);
        assert_eq!(round.player().position, v(800, 300));
    }

    #[test]
    fn cpu_steers_around_player_trail_from_before_the_tick() {
        // The player's new cell is not visible to the CPU's look-ahead, so
        // both bikes can land on the same cell. The player is checked first.
        let player = bike_on_path(&[(390, 310), (400, 310)], Direction::North);
        let cpu = bike_on_path(&[(420, 280), (420, 290), (410, 290), (400, 290)], Direction::West);
        let mut round = Round::from_parts(grid(), player, cpu, 1, 0);

        let report = round.tick(None);
        assert_eq!(round.player().position, v(400, 300));
        // Candidates: Left (390,290), Down (400,300), Up (400,280). Down looks
        // widest before the player's move is known.
        assert_eq!(round.cpu().heading, v(0, 10));
        assert_eq!(report.status, RoundStatus::PlayerLost);
    }

    #[test]
    fn finished_round_ignores_further_ticks() {
        let player = bike_on_path(&[(780, 300), (790, 300)], Direction::East);
        let cpu = bike_on_path(&[(100, 100)], Direction::West);
        let mut round = Round::from_parts(grid(), player, cpu, 1, 0);
        let first = round.tick(None);
        let again = round.tick(Some(Direction::North));

        assert_eq!(again.status, first.status);
        assert_eq!(again.score, first.score);
        assert!(!again.collided);
        assert_eq!(round.ticks(), 1);
        assert_eq!(round.player().trail.len(), 2 + 1);
    }

    #[test]
    fn round_eventually_completes() {
        for dir in Direction::ALL {
            let mut round = default_round(dir);
            // Straight-running player meets the right wall after 60 ticks.
            for _ in 0..60 {
                if round.tick(None).status.is_over() {
                    break;
                }
            }
            assert!(round.status().is_over(), "cpu start {dir:?}");
            assert_eq!(round.score(), scoring::calculate_score(
                0,
                round.ticks(),
                round.status() == RoundStatus::PlayerWon,
            ));
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_request() -> impl Strategy<Value = Option<Direction>> {
            prop_oneof![
                Just(None),
                Just(Some(Direction::East)),
                Just(Some(Direction::West)),
                Just(Some(Direction::South)),
                Just(Some(Direction::North)),
            ]
        }

        proptest! {
            #[test]
            fn headings_never_reverse(
                cpu_start in 0usize..4,
                requests in proptest::collection::vec(arb_request(), 1..120),
            ) {
                let mut round = default_round(Direction::ALL[cpu_start]);
                for req in requests {
                    let before_player = round.player().heading;
                    let before_cpu = round.cpu().heading;
                    let report = round.tick(req);
                    prop_assert!(!round.player().heading.is_reverse_of(before_player));
                    prop_assert!(!round.cpu().heading.is_reverse_of(before_cpu));
                    if report.status.is_over() {
                        break;
                    }
                }
            }

            #[test]
            fn score_tracks_ticks(
                requests in proptest::collection::vec(arb_request(), 1..120),
            ) {
                let mut round = default_round(Direction::South);
                for req in requests {
                    let report = round.tick(req);
                    let expected = round.ticks()
                        + if report.status == RoundStatus::PlayerWon { scoring::WIN_BONUS } else { 0 };
                    prop_assert_eq!(report.score, expected);
                    if report.status.is_over() {
                        break;
                    }
                }
            }
        }
    }
}
