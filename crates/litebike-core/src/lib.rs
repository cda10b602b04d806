pub mod events;
pub mod game_trait;
pub mod geometry;
pub mod scores;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::VecDeque;

    use crate::events::AudioCue;
    use crate::game_trait::{
        AudioSink, FrameSink, FrameView, InputSource, MenuAction, ScoreStore, ScoreStoreError,
    };
    use crate::geometry::Direction;
    use crate::scores::{HighScoreEntry, HighScoreTable, PlayerTag};

    /// Parse a tag literal in tests.
    pub fn tag(s: &str) -> PlayerTag {
        s.parse().expect("test tag must be three letters")
    }

    /// Input source replaying a fixed script. Once a queue runs dry the
    /// menu answers `Quit` and steering answers `None`.
    #[derive(Debug, Default)]
    pub struct ScriptedInput {
        pub menu: VecDeque<MenuAction>,
        pub directions: VecDeque<Option<Direction>>,
        pub name: Option<PlayerTag>,
        pub polls: usize,
    }

    impl ScriptedInput {
        pub fn starting_matches(matches: usize, name: &str) -> Self {
            let mut menu: VecDeque<MenuAction> = VecDeque::new();
            for _ in 0..matches {
                menu.push_back(MenuAction::Start);
            }
            Self {
                menu,
                name: Some(tag(name)),
                ..Self::default()
            }
        }
    }

    impl InputSource for ScriptedInput {
        fn menu_action(&mut self) -> MenuAction {
            self.menu.pop_front().unwrap_or(MenuAction::Quit)
        }

        fn poll_direction(&mut self, _view: &FrameView<'_>) -> Option<Direction> {
            self.polls += 1;
            self.directions.pop_front().flatten()
        }

        fn enter_name(&mut self, _final_score: u32) -> PlayerTag {
            self.name.unwrap_or_else(|| tag("AAA"))
        }
    }

    /// Records every cue played, in order.
    #[derive(Debug, Default)]
    pub struct RecordingAudio {
        pub cues: Vec<AudioCue>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, cue: AudioCue) {
            self.cues.push(cue);
        }
    }

    /// One recorded presentation call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Shown {
        Menu(Vec<HighScoreEntry>),
        Frame { score: u32, level: u32, tick: u32 },
        RoundWon { level: u32, score: u32 },
        MatchOver { final_score: u32 },
    }

    #[derive(Debug, Default)]
    pub struct RecordingFrames {
        pub shown: Vec<Shown>,
    }

    impl RecordingFrames {
        pub fn frames(&self) -> usize {
            self.shown
                .iter()
                .filter(|s| matches!(s, Shown::Frame { .. }))
                .count()
        }
    }

    impl FrameSink for RecordingFrames {
        fn show_menu(&mut self, top_scores: &[HighScoreEntry]) {
            self.shown.push(Shown::Menu(top_scores.to_vec()));
        }

        fn draw_frame(&mut self, view: &FrameView<'_>) {
            self.shown.push(Shown::Frame {
                score: view.score,
                level: view.level,
                tick: view.tick,
            });
        }

        fn show_round_won(&mut self, level_cleared: u32, score: u32) {
            self.shown.push(Shown::RoundWon {
                level: level_cleared,
                score,
            });
        }

        fn show_match_over(&mut self, final_score: u32, _table: &HighScoreTable) {
            self.shown.push(Shown::MatchOver { final_score });
        }
    }

    /// Score store backed by memory; can be told to fail loads or saves.
    #[derive(Debug, Default)]
    pub struct MemoryScoreStore {
        pub table: HighScoreTable,
        pub saves: usize,
        pub fail_loads: bool,
        pub fail_saves: bool,
    }

    impl ScoreStore for MemoryScoreStore {
        fn load(&mut self) -> Result<HighScoreTable, ScoreStoreError> {
            if self.fail_loads {
                return Err(ScoreStoreError::Io(std::io::Error::other(
                    "simulated read failure",
                )));
            }
            Ok(self.table.clone())
        }

        fn save(&mut self, table: &HighScoreTable) -> Result<(), ScoreStoreError> {
            if self.fail_saves {
                return Err(ScoreStoreError::Io(std::io::Error::other(
                    "simulated write failure",
                )));
            }
            self.saves += 1;
            self.table = table.clone();
            Ok(())
        }
    }
}
