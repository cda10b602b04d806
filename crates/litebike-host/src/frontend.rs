use litebike_core::events::AudioCue;
use litebike_core::game_trait::{AudioSink, FrameSink, FrameView};
use litebike_core::scores::{HighScoreEntry, HighScoreTable, MENU_TOP_N};

/// Headless frame and audio sink: everything becomes a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFrontend;

impl FrameSink for TracingFrontend {
    fn show_menu(&mut self, top_scores: &[HighScoreEntry]) {
        tracing::info!(entries = top_scores.len(), "Main menu");
        for (rank, entry) in top_scores.iter().enumerate() {
            tracing::info!(rank = rank + 1, name = %entry.name, score = entry.score, "High score");
        }
    }

    fn draw_frame(&mut self, view: &FrameView<'_>) {
        tracing::trace!(
            tick = view.tick,
            level = view.level,
            score = view.score,
            player_x = view.player_position.x,
            player_y = view.player_position.y,
            cpu_x = view.cpu_position.x,
            cpu_y = view.cpu_position.y,
            trail_len = view.player_trail.len(),
            "Frame"
        );
    }

    fn show_round_won(&mut self, level_cleared: u32, score: u32) {
        tracing::info!(level = level_cleared, score, "Level {level_cleared} complete");
    }

    fn show_match_over(&mut self, final_score: u32, table: &HighScoreTable) {
        tracing::info!(final_score, "Game over");
        for (rank, entry) in table.top(MENU_TOP_N).iter().enumerate() {
            tracing::info!(rank = rank + 1, name = %entry.name, score = entry.score, "High score");
        }
    }
}

impl AudioSink for TracingFrontend {
    fn play(&mut self, cue: AudioCue) {
        let tone = cue.tone();
        tracing::debug!(
            cue = cue.name(),
            frequency_hz = tone.frequency_hz,
            duration_secs = tone.duration_secs,
            "Audio cue"
        );
    }
}
