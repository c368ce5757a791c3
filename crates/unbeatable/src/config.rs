//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use unbeatable_tictactoe::{COMPUTER_SYMBOL, HUMAN_SYMBOL};

/// Settings for the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Symbol drawn for the human's marks.
    #[serde(default = "default_human_symbol")]
    human_symbol: char,

    /// Symbol drawn for the computer's marks.
    #[serde(default = "default_computer_symbol")]
    computer_symbol: char,

    /// File the interactive game writes its log to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_human_symbol() -> char {
    HUMAN_SYMBOL
}

fn default_computer_symbol() -> char {
    COMPUTER_SYMBOL
}

fn default_log_file() -> PathBuf {
    PathBuf::from("unbeatable.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            human_symbol: default_human_symbol(),
            computer_symbol: default_computer_symbol(),
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(
            human = %config.human_symbol,
            computer = %config.computer_symbol,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks that the symbols can be told apart from each other and from
    /// empty cells.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for symbol in [self.human_symbol, self.computer_symbol] {
            if matches!(symbol, '.' | '-' | '_' | '|')
                || symbol.is_whitespace()
                || symbol.is_ascii_digit()
            {
                return Err(ConfigError::new(format!(
                    "Symbol {:?} is reserved for empty cells",
                    symbol
                )));
            }
        }

        if self.human_symbol.eq_ignore_ascii_case(&self.computer_symbol) {
            return Err(ConfigError::new(format!(
                "Human and computer share the symbol {:?}",
                self.human_symbol
            )));
        }

        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(*config.human_symbol(), 'O');
        assert_eq!(*config.computer_symbol(), 'X');
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write_config("human_symbol = \"@\"\n");
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(*config.human_symbol(), '@');
        assert_eq!(*config.computer_symbol(), 'X');
        assert_eq!(config.log_file(), &PathBuf::from("unbeatable.log"));
    }

    #[test]
    fn test_rejects_shared_symbol() {
        let file = write_config("human_symbol = \"x\"\ncomputer_symbol = \"X\"\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(err.message.contains("share"));
    }

    #[test]
    fn test_rejects_empty_cell_symbol() {
        let file = write_config("computer_symbol = \"7\"\n");
        assert!(AppConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let file = write_config("human_symbol = \n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }
}
