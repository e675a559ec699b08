//! Configuration loader.

use std::path::Path;

use regex::{Captures, Regex};

use crate::error::ConfigError;
use crate::schema::Config;

/// Reads TOML configuration, substituting `${VAR}` references from the
/// environment first.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::load_str(&content)
    }

    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        Ok(toml::from_str(&expanded)?)
    }

    /// Replace every `${VAR}` outside comment lines with its value.
    ///
    /// Fails on the first variable that is unset.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let reference = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")?;
        let mut missing = None;

        let lines: Vec<String> = content
            .lines()
            .map(|line| {
                if line.trim_start().starts_with('#') {
                    return line.to_string();
                }
                reference
                    .replace_all(line, |caps: &Captures| match std::env::var(&caps[1]) {
                        Ok(value) => value,
                        Err(_) => {
                            missing.get_or_insert_with(|| caps[1].to_string());
                            String::new()
                        }
                    })
                    .into_owned()
            })
            .collect();

        match missing {
            Some(name) => Err(ConfigError::MissingEnv(name)),
            None => Ok(lines.join("\n")),
        }
    }

    /// Expand a leading `~` in a configured path.
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).into_owned()
    }
}
