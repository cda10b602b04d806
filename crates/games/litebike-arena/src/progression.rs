use litebike_core::geometry::Direction;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arena::{Arena, create_arena};
use crate::config::ArenaConfig;
use crate::{Round, RoundStatus};

/// What happens after a round ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStep {
    /// The round has not finished yet.
    Continue,
    /// The CPU crashed: the next round starts at `level` carrying `score`.
    NextRound { level: u32, score: u32 },
    /// The player crashed.
    Over { final_score: u32, levels_cleared: u32 },
}

/// A run of rounds from level 1 until the player loses.
#[derive(Debug)]
pub struct Match {
    arena: Arena,
    level: u32,
    score: u32,
    rng: StdRng,
}

impl Match {
    pub fn new(config: &ArenaConfig, rng: StdRng) -> Self {
        Self {
            arena: create_arena(config),
            level: 1,
            score: 0,
            rng,
        }
    }

    /// Match with a reproducible sequence of CPU start headings.
    pub fn seeded(config: &ArenaConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Reset both bikes to their spawns and draw the CPU's starting heading.
    pub fn start_round(&mut self) -> Round {
        let cpu_direction = Direction::ALL[self.rng.random_range(0..Direction::ALL.len())];
        tracing::debug!(level = self.level, score = self.score, ?cpu_direction, "Starting round");
        Round::new(&self.arena, cpu_direction, self.level, self.score)
    }

    /// Fold a round's outcome into the match.
    pub fn resolve(&mut self, round: &Round) -> MatchStep {
        match round.status() {
            RoundStatus::Running => MatchStep::Continue,
            RoundStatus::PlayerWon => {
                self.level += 1;
                self.score = round.score();
                MatchStep::NextRound {
                    level: self.level,
                    score: self.score,
                }
            },
            RoundStatus::PlayerLost => {
                self.score = round.score();
                MatchStep::Over {
                    final_score: self.score,
                    levels_cleared: self.level - 1,
                }
            },
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use litebike_core::geometry::Vector2I;

    use super::*;
    use crate::Bike;
    use crate::collision::Trail;

    fn cpu_crash_round(m: &Match) -> Round {
        // CPU boxed into the top-left corner; it crashes on the first tick.
        let grid = m.arena().grid;
        let player = Bike::new(Vector2I::new(200, 300), Vector2I::new(10, 0));
        let trail: Trail = [(0, 10), (10, 10), (10, 0), (0, 0)]
            .into_iter()
            .map(|(x, y)| Vector2I::new(x, y))
            .collect();
        let cpu = Bike {
            position: Vector2I::new(0, 0),
            heading: Vector2I::new(-10, 0),
            trail,
        };
        Round::from_parts(grid, player, cpu, m.level(), m.score())
    }

    fn player_crash_round(m: &Match) -> Round {
        let grid = m.arena().grid;
        let player = Bike::new(Vector2I::new(790, 300), Vector2I::new(10, 0));
        let cpu = Bike::new(Vector2I::new(100, 100), Vector2I::new(-10, 0));
        Round::from_parts(grid, player, cpu, m.level(), m.score())
    }

    #[test]
    fn starts_at_level_one_with_zero_score() {
        let mut m = Match::seeded(&ArenaConfig::default(), 7);
        assert_eq!((m.level(), m.score()), (1, 0));
        let round = m.start_round();
        assert_eq!(round.level(), 1);
        assert_eq!(round.score(), 0);
        assert_eq!(round.ticks(), 0);
        assert_eq!(round.status(), RoundStatus::Running);
    }

    #[test]
    fn running_round_continues() {
        let mut m = Match::seeded(&ArenaConfig::default(), 7);
        let round = m.start_round();
        assert_eq!(m.resolve(&round), MatchStep::Continue);
        assert_eq!(m.level(), 1);
    }

    #[test]
    fn win_advances_level_and_adds_bonus() {
        let mut m = Match::seeded(&ArenaConfig::default(), 1);
        let mut round = cpu_crash_round(&m);
        round.tick(None);
        assert_eq!(
            m.resolve(&round),
            MatchStep::NextRound {
                level: 2,
                score: 101
            }
        );
        assert_eq!((m.level(), m.score()), (2, 101));
    }

    #[test]
    fn next_round_resets_bikes_and_carries_score() {
        let mut m = Match::seeded(&ArenaConfig::default(), 1);
        let mut won = cpu_crash_round(&m);
        won.tick(None);
        m.resolve(&won);

        let next = m.start_round();
        assert_eq!(next.level(), 2);
        assert_eq!(next.score(), 101);
        assert!(next.player().trail.is_empty());
        assert!(next.cpu().trail.is_empty());
        assert_eq!(next.player().position, m.arena().player_spawn.position);
        assert_eq!(next.cpu().position, m.arena().cpu_spawn);
        assert_eq!(next.player().heading, Vector2I::new(10, 0));
    }

    #[test]
    fn loss_ends_match_with_carried_score() {
        let mut m = Match::seeded(&ArenaConfig::default(), 1);
        let mut won = cpu_crash_round(&m);
        won.tick(None);
        m.resolve(&won);

        let mut lost = player_crash_round(&m);
        lost.tick(None);
        assert_eq!(
            m.resolve(&lost),
            MatchStep::Over {
                final_score: 102,
                levels_cleared: 1
            }
        );
    }

    #[test]
    fn seeded_matches_draw_same_cpu_headings() {
        let mut a = Match::seeded(&ArenaConfig::default(), 42);
        let mut b = Match::seeded(&ArenaConfig::default(), 42);
        for _ in 0..20 {
            assert_eq!(a.start_round().cpu().heading, b.start_round().cpu().heading);
        }
    }

    #[test]
    fn all_cpu_headings_are_drawn() {
        let mut m = Match::seeded(&ArenaConfig::default(), 3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(m.start_round().cpu().heading);
        }
        assert_eq!(seen.len(), 4);
    }
}
