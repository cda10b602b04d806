use std::fmt;

use serde::Serialize;

use crate::events::AudioCue;
use crate::geometry::{Direction, Vector2I};
use crate::scores::{HighScoreEntry, HighScoreTable, ParseScoreError, PlayerTag};

/// Read-only snapshot of a running round, handed to the frame and input
/// collaborators once per tick.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrameView<'a> {
    pub player_position: Vector2I,
    pub player_heading: Vector2I,
    pub player_trail: &'a [Vector2I],
    pub cpu_position: Vector2I,
    pub cpu_heading: Vector2I,
    pub cpu_trail: &'a [Vector2I],
    pub score: u32,
    pub level: u32,
    pub tick: u32,
}

/// What the player asked for on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Quit,
    Idle,
}

/// Feeds player intent into the session.
pub trait InputSource {
    /// Polled once per main-menu step.
    fn menu_action(&mut self) -> MenuAction;

    /// The latest direction observed since the previous tick, if any.
    /// Reversals are filtered by the round, not here.
    fn poll_direction(&mut self, view: &FrameView<'_>) -> Option<Direction>;

    /// Name-entry prompt shown when a match ends.
    fn enter_name(&mut self, final_score: u32) -> PlayerTag;
}

/// Presentation of menus and frames. Nothing here feeds back into the core.
pub trait FrameSink {
    fn show_menu(&mut self, top_scores: &[HighScoreEntry]);

    fn draw_frame(&mut self, view: &FrameView<'_>);

    fn show_round_won(&mut self, level_cleared: u32, score: u32);

    fn show_match_over(&mut self, final_score: u32, table: &HighScoreTable);
}

/// Plays (or ignores) audio cues.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

#[derive(Debug)]
pub enum ScoreStoreError {
    Io(std::io::Error),
    Parse(ParseScoreError),
}

impl fmt::Display for ScoreStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "score store i/o error: {e}"),
            Self::Parse(e) => write!(f, "score store parse error: {e}"),
        }
    }
}

impl std::error::Error for ScoreStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ScoreStoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseScoreError> for ScoreStoreError {
    fn from(e: ParseScoreError) -> Self {
        Self::Parse(e)
    }
}

/// Durable leaderboard storage.
pub trait ScoreStore {
    fn load(&mut self) -> Result<HighScoreTable, ScoreStoreError>;

    fn save(&mut self, table: &HighScoreTable) -> Result<(), ScoreStoreError>;
}
