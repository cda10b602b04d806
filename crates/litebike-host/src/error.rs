use std::fmt;

use litebike_arena::config::ConfigError;

/// Failures that stop the host before play starts.
#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    /// Unreadable config file, bad override, or invalid setting.
    Config(String),
    /// Arena geometry rejected by validation.
    Arena(ConfigError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(m) => write!(f, "invalid configuration: {m}"),
            Self::Arena(e) => write!(f, "invalid arena: {e}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(_) => None,
            Self::Arena(e) => Some(e),
        }
    }
}

impl From<ConfigError> for HostError {
    fn from(e: ConfigError) -> Self {
        Self::Arena(e)
    }
}
