//! The menu / match / menu loop and its tick pacing.

use std::future::Future;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::MissedTickBehavior;

use litebike_arena::config::ArenaConfig;
use litebike_arena::{Match, MatchStep, Round};
use litebike_core::events::AudioCue;
use litebike_core::game_trait::{AudioSink, FrameSink, InputSource, MenuAction, ScoreStore};
use litebike_core::scores::{HighScoreEntry, HighScoreTable, MENU_TOP_N};

use crate::config::HostConfig;

/// Everything the session talks to.
#[derive(Debug)]
pub struct Collaborators<I, F, A, S> {
    pub input: I,
    pub frames: F,
    pub audio: A,
    pub store: S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    MainMenu,
    Playing,
    MatchOver,
}

/// What the driver should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Continue,
    /// Hold the current screen before stepping again.
    Wait(Duration),
    Quit,
}

/// Owns the high-score table, the collaborators and the match in progress.
pub struct GameSession<I, F, A, S> {
    arena_config: ArenaConfig,
    config: HostConfig,
    table: HighScoreTable,
    io: Collaborators<I, F, A, S>,
    phase: SessionPhase,
    game: Option<Match>,
    round: Option<Round>,
    final_score: u32,
    matches_played: u32,
}

impl<I, F, A, S> GameSession<I, F, A, S>
where
    I: InputSource,
    F: FrameSink,
    A: AudioSink,
    S: ScoreStore,
{
    /// Loads the high-score table from the store. An unreadable store starts
    /// the session with an empty table.
    pub fn new(
        arena_config: ArenaConfig,
        config: HostConfig,
        mut io: Collaborators<I, F, A, S>,
    ) -> Self {
        let table = io.store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not load high scores, starting empty");
            HighScoreTable::new()
        });
        Self {
            arena_config,
            config,
            table,
            io,
            phase: SessionPhase::MainMenu,
            game: None,
            round: None,
            final_score: 0,
            matches_played: 0,
        }
    }

    /// Advance the session by one tick.
    pub fn step(&mut self) -> SessionStep {
        match self.phase {
            SessionPhase::MainMenu => self.step_menu(),
            SessionPhase::Playing => self.step_playing(),
            SessionPhase::MatchOver => self.step_match_over(),
        }
    }

    fn step_menu(&mut self) -> SessionStep {
        if self.config.max_matches != 0 && self.matches_played >= self.config.max_matches {
            tracing::info!(matches = self.matches_played, "Match limit reached");
            return SessionStep::Quit;
        }
        self.io.frames.show_menu(self.table.top(MENU_TOP_N));
        match self.io.input.menu_action() {
            MenuAction::Start => {
                self.game = Some(self.new_match());
                self.round = None;
                self.phase = SessionPhase::Playing;
                SessionStep::Continue
            },
            MenuAction::Quit => SessionStep::Quit,
            MenuAction::Idle => SessionStep::Continue,
        }
    }

    fn new_match(&self) -> Match {
        match self.config.seed {
            Some(seed) => {
                Match::seeded(&self.arena_config, seed.wrapping_add(u64::from(self.matches_played)))
            },
            None => Match::new(&self.arena_config, StdRng::from_os_rng()),
        }
    }

    fn step_playing(&mut self) -> SessionStep {
        let Some(game) = self.game.as_mut() else {
            self.phase = SessionPhase::MainMenu;
            return SessionStep::Continue;
        };

        let Some(round) = self.round.as_mut() else {
            let round = game.start_round();
            tracing::info!(level = round.level(), score = round.score(), "Round started");
            self.io.audio.play(AudioCue::Start);
            self.round = Some(round);
            return SessionStep::Continue;
        };

        let requested = self.io.input.poll_direction(&round.view());
        let report = round.tick(requested);
        self.io.frames.draw_frame(&round.view());
        if report.collided {
            self.io.audio.play(AudioCue::Collision);
        }

        match game.resolve(round) {
            MatchStep::Continue => SessionStep::Continue,
            MatchStep::NextRound { level, score } => {
                tracing::info!(level, score, "Round won");
                self.io.audio.play(AudioCue::Win);
                self.io.frames.show_round_won(level - 1, score);
                self.round = None;
                SessionStep::Wait(self.config.win_pause())
            },
            MatchStep::Over {
                final_score,
                levels_cleared,
            } => {
                tracing::info!(final_score, levels_cleared, "Match over");
                self.io.audio.play(AudioCue::Lose);
                self.final_score = final_score;
                self.round = None;
                self.game = None;
                self.phase = SessionPhase::MatchOver;
                SessionStep::Continue
            },
        }
    }

    fn step_match_over(&mut self) -> SessionStep {
        let name = self.io.input.enter_name(self.final_score);
        let rank = self
            .table
            .insert(HighScoreEntry::new(name, self.final_score));
        tracing::info!(name = %name, score = self.final_score, rank, "High score recorded");
        if let Err(e) = self.io.store.save(&self.table) {
            tracing::warn!(error = %e, "Failed to save high scores, continuing");
        }
        self.io.frames.show_match_over(self.final_score, &self.table);

        self.matches_played += 1;
        self.phase = SessionPhase::MainMenu;
        SessionStep::Wait(self.config.defeat_pause())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn table(&self) -> &HighScoreTable {
        &self.table
    }

    pub fn matches_played(&self) -> u32 {
        self.matches_played
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn tick_interval(&self) -> Duration {
        self.arena_config.tick_interval()
    }

    pub fn collaborators(&self) -> &Collaborators<I, F, A, S> {
        &self.io
    }

    pub fn into_collaborators(self) -> Collaborators<I, F, A, S> {
        self.io
    }
}

/// Drive `session` at the arena tick rate until it quits or `shutdown`
/// resolves. Returns the session so callers can inspect the final state.
pub async fn run_session<I, F, A, S, Sh>(
    mut session: GameSession<I, F, A, S>,
    shutdown: Sh,
) -> GameSession<I, F, A, S>
where
    I: InputSource,
    F: FrameSink,
    A: AudioSink,
    S: ScoreStore,
    Sh: Future,
{
    let mut interval = tokio::time::interval(session.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested");
                break;
            }
            _ = interval.tick() => {
                match session.step() {
                    SessionStep::Continue => {},
                    SessionStep::Wait(pause) => {
                        tokio::select! {
                            _ = &mut shutdown => {
                                tracing::info!("Shutdown requested");
                                break;
                            }
                            _ = tokio::time::sleep(pause) => {},
                        }
                        interval.reset();
                    },
                    SessionStep::Quit => break,
                }
            }
        }
    }

    tracing::info!(matches = session.matches_played(), "Session ended");
    session
}
