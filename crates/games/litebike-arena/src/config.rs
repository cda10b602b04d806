use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Largest accepted arena side, in world units.
pub const MAX_ARENA_SIDE: i32 = 100_000;
/// Accepted tick rates, in ticks per second.
pub const MIN_TICK_RATE: f32 = 0.1;
pub const MAX_TICK_RATE: f32 = 1000.0;

/// Data-driven configuration for the arena simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Arena width in world units.
    pub width: i32,
    /// Arena height in world units.
    pub height: i32,
    /// Side length of one grid cell; also the distance a bike moves per tick.
    pub grid_size: i32,
    /// Simulation ticks per second.
    pub tick_rate: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            grid_size: 10,
            tick_rate: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveGrid(i32),
    NonPositiveArena { width: i32, height: i32 },
    ArenaTooLarge { width: i32, height: i32 },
    MisalignedArena { width: i32, height: i32, grid_size: i32 },
    BadTickRate(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveGrid(g) => write!(f, "grid_size must be > 0, got {g}"),
            Self::NonPositiveArena { width, height } => {
                write!(f, "arena must be non-empty, got {width}x{height}")
            },
            Self::ArenaTooLarge { width, height } => write!(
                f,
                "arena sides must be at most {MAX_ARENA_SIDE}, got {width}x{height}"
            ),
            Self::MisalignedArena {
                width,
                height,
                grid_size,
            } => write!(
                f,
                "arena {width}x{height} is not a whole number of {grid_size}-unit cells"
            ),
            Self::BadTickRate(r) => write!(
                f,
                "tick_rate must be between {MIN_TICK_RATE} and {MAX_TICK_RATE}, got {r}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ArenaConfig {
    /// Load config from the file named by `LITEBIKE_ARENA_CONFIG`, then
    /// `config/arena.toml`, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("LITEBIKE_ARENA_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
        {
            match toml::from_str::<Self>(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path, "Loaded arena configuration");
                    return config;
                },
                Err(e) => tracing::warn!(path = %path, error = %e, "Ignoring bad arena config"),
            }
        }
        if let Ok(contents) = std::fs::read_to_string("config/arena.toml") {
            match toml::from_str::<Self>(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded arena configuration from config/arena.toml");
                    return config;
                },
                Err(e) => tracing::warn!(error = %e, "Ignoring bad config/arena.toml"),
            }
        }
        Self::default()
    }

    /// Reject geometry that would put bikes between grid cells.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size <= 0 {
            return Err(ConfigError::NonPositiveGrid(self.grid_size));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::NonPositiveArena {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_ARENA_SIDE || self.height > MAX_ARENA_SIDE {
            return Err(ConfigError::ArenaTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.width % self.grid_size != 0 || self.height % self.grid_size != 0 {
            return Err(ConfigError::MisalignedArena {
                width: self.width,
                height: self.height,
                grid_size: self.grid_size,
            });
        }
        if !(MIN_TICK_RATE..=MAX_TICK_RATE).contains(&self.tick_rate) {
            return Err(ConfigError::BadTickRate(self.tick_rate));
        }
        Ok(())
    }

    /// Wall-clock time between ticks. An out-of-range rate is clamped into
    /// `MIN_TICK_RATE..=MAX_TICK_RATE`.
    pub fn tick_interval(&self) -> Duration {
        let rate = if self.tick_rate.is_nan() {
            Self::default().tick_rate
        } else {
            self.tick_rate.clamp(MIN_TICK_RATE, MAX_TICK_RATE)
        };
        Duration::from_secs_f32(1.0 / rate)
    }
}
