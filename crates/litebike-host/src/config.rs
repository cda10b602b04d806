use std::io;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use litebike_core::scores::PlayerTag;

use crate::error::HostError;

const CONFIG_FILE: &str = "litebike.toml";

/// Log output format selected for the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(HostError::Config(format!(
                "log_format must be \"pretty\" or \"json\", got {other:?}"
            ))),
        }
    }
}

/// Host configuration, loaded from `litebike.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub high_score_file: String,
    /// Tag the autopilot enters at the name prompt.
    pub player_tag: String,
    /// Matches to play before quitting; 0 plays until interrupted.
    pub max_matches: u32,
    /// Fixed seed for the CPU start headings. Each match uses `seed + n`.
    pub seed: Option<u64>,
    pub win_pause_ms: u64,
    pub defeat_pause_ms: u64,
    pub log_format: LogFormat,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            high_score_file: "highscores.txt".to_string(),
            player_tag: "AAA".to_string(),
            max_matches: 1,
            seed: None,
            win_pause_ms: 2000,
            defeat_pause_ms: 3000,
            log_format: LogFormat::Pretty,
        }
    }
}

impl HostConfig {
    /// Load `litebike.toml` if it exists, then apply `LITEBIKE_*` env vars,
    /// then command-line flags.
    pub fn load() -> Result<Self, HostError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_args(std::env::args().skip(1))?;
        Ok(config)
    }

    /// Read `path`. A missing file gives defaults silently; any other read
    /// error gives defaults with a warning.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not read host config, using defaults"
                );
                Ok(Self::default())
            },
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, HostError> {
        toml::from_str(content).map_err(|e| HostError::Config(format!("{CONFIG_FILE}: {e}")))
    }

    /// Apply environment overrides. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), HostError> {
        if let Some(path) = lookup("LITEBIKE_HIGH_SCORE_FILE")
            && !path.is_empty()
        {
            self.high_score_file = path;
        }
        if let Some(tag) = lookup("LITEBIKE_PLAYER_TAG")
            && !tag.is_empty()
        {
            self.player_tag = tag;
        }
        if let Some(val) = lookup("LITEBIKE_MAX_MATCHES")
            && !val.is_empty()
        {
            self.max_matches = parse_number("LITEBIKE_MAX_MATCHES", &val)?;
        }
        if let Some(val) = lookup("LITEBIKE_SEED")
            && !val.is_empty()
        {
            self.seed = Some(parse_number("LITEBIKE_SEED", &val)?);
        }
        if let Some(val) = lookup("LITEBIKE_WIN_PAUSE_MS")
            && !val.is_empty()
        {
            self.win_pause_ms = parse_number("LITEBIKE_WIN_PAUSE_MS", &val)?;
        }
        if let Some(val) = lookup("LITEBIKE_DEFEAT_PAUSE_MS")
            && !val.is_empty()
        {
            self.defeat_pause_ms = parse_number("LITEBIKE_DEFEAT_PAUSE_MS", &val)?;
        }
        if let Some(val) = lookup("LITEBIKE_LOG_FORMAT")
            && !val.is_empty()
        {
            self.log_format = val.parse()?;
        }
        Ok(())
    }

    /// Apply `--matches=N` and `--seed=N`.
    pub fn apply_args<I>(&mut self, args: I) -> Result<(), HostError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if let Some(n) = arg.strip_prefix("--matches=") {
                self.max_matches = parse_number("--matches", n)?;
            } else if let Some(n) = arg.strip_prefix("--seed=") {
                self.seed = Some(parse_number("--seed", n)?);
            } else {
                return Err(HostError::Config(format!("unknown argument {arg:?}")));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), HostError> {
        if self.high_score_file.trim().is_empty() {
            return Err(HostError::Config("high_score_file must not be empty".into()));
        }
        self.player_tag()?;
        Ok(())
    }

    pub fn player_tag(&self) -> Result<PlayerTag, HostError> {
        self.player_tag
            .parse()
            .map_err(|e| HostError::Config(format!("player_tag: {e}")))
    }

    pub fn win_pause(&self) -> Duration {
        Duration::from_millis(self.win_pause_ms)
    }

    pub fn defeat_pause(&self) -> Duration {
        Duration::from_millis(self.defeat_pause_ms)
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T, HostError> {
    value
        .trim()
        .parse()
        .map_err(|_| {
            HostError::Config(format!("{name} must be a non-negative integer, got {value:?}"))
        })
}
