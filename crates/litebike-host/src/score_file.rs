use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use litebike_core::game_trait::{ScoreStore, ScoreStoreError};
use litebike_core::scores::HighScoreTable;

/// High scores in a plain-text file, one `NAME,score` record per line.
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for ScoreFile {
    /// A missing file is created empty. Unparseable lines are skipped.
    fn load(&mut self) -> Result<HighScoreTable, ScoreStoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                std::fs::write(&self.path, "")?;
                tracing::info!(path = %self.path.display(), "Created empty high score file");
                return Ok(HighScoreTable::new());
            },
            Err(e) => return Err(e.into()),
        };

        let table = HighScoreTable::parse_records(&text, |line, err| {
            tracing::warn!(
                path = %self.path.display(),
                line,
                error = %err,
                "Skipping unreadable high score record"
            );
        });
        tracing::debug!(path = %self.path.display(), entries = table.len(), "Loaded high scores");
        Ok(table)
    }

    fn save(&mut self, table: &HighScoreTable) -> Result<(), ScoreStoreError> {
        std::fs::write(&self.path, table.to_records())?;
        tracing::debug!(path = %self.path.display(), entries = table.len(), "Saved high scores");
        Ok(())
    }
}
