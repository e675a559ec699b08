//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `${VAR}` reference names an unset variable.
    #[error("Environment variable not set: {0}")]
    MissingEnv(String),

    #[error("Bad substitution pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
