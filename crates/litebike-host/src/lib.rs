pub mod autopilot;
pub mod config;
pub mod error;
pub mod frontend;
pub mod name_entry;
pub mod score_file;
pub mod session;

use litebike_arena::arena::Grid;
use litebike_arena::config::ArenaConfig;

use autopilot::Autopilot;
use config::HostConfig;
use error::HostError;
use frontend::TracingFrontend;
use score_file::ScoreFile;
use session::{Collaborators, GameSession};

/// Session type run by the `litebike` binary.
pub type HeadlessSession = GameSession<Autopilot, TracingFrontend, TracingFrontend, ScoreFile>;

/// Validate both configs and wire the headless collaborators into a session.
pub fn build_session(
    arena_config: ArenaConfig,
    config: HostConfig,
) -> Result<HeadlessSession, HostError> {
    arena_config.validate()?;
    config.validate()?;

    let io = Collaborators {
        input: Autopilot::new(Grid::from_config(&arena_config), config.player_tag()?),
        frames: TracingFrontend,
        audio: TracingFrontend,
        store: ScoreFile::new(&config.high_score_file),
    };
    Ok(GameSession::new(arena_config, config, io))
}
