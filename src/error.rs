//! Error types for configuration loading
//!
//! Game operations themselves never fail: collisions, reversal requests and
//! a full grid are ordinary outcomes of a tick, not errors.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for a `GameConfig`
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range
    #[error("invalid config: {0}")]
    Invalid(String),
}
