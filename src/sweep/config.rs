//! Sweep configuration.
//!
//! Resolution order: built-in defaults, then a TOML file, then command-line
//! overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::SweepError;
use super::walker::default_max_in_flight;

pub const DEFAULT_LIST_FILE: &str = "tools/delete-files/files_to_delete.txt";
pub const DEFAULT_ROOT: &str = "public/image";

/// How the tree is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WalkMode {
    /// tokio jobs with a cap on in-flight filesystem calls
    #[default]
    Async,
    /// jwalk scanner thread pool feeding a deleter
    Threaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Text file with one target name per line
    pub list_file: PathBuf,
    /// Directory to sweep
    pub root: PathBuf,
    pub mode: WalkMode,
    /// Async mode only
    pub max_in_flight: usize,
    /// Exit non-zero when any entry error was reported
    pub strict: bool,
    /// Suppress the summary line
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            list_file: PathBuf::from(DEFAULT_LIST_FILE),
            root: PathBuf::from(DEFAULT_ROOT),
            mode: WalkMode::Async,
            max_in_flight: default_max_in_flight(),
            strict: false,
            quiet: false,
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub list_file: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub mode: Option<WalkMode>,
    pub max_in_flight: Option<usize>,
    pub strict: bool,
    pub quiet: bool,
}

impl Config {
    /// Default location of the user config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("namesweep").join("config.toml"))
    }

    /// Load from an explicit file, or from the default location when it
    /// exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(list_file) = overrides.list_file {
            self.list_file = list_file;
        }
        if let Some(root) = overrides.root {
            self.root = root;
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(max_in_flight) = overrides.max_in_flight {
            self.max_in_flight = max_in_flight;
        }
        self.strict |= overrides.strict;
        self.quiet |= overrides.quiet;
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        if self.max_in_flight == 0 {
            return Err(SweepError::InvalidConfig {
                message: "max_in_flight must be at least 1".to_string(),
            });
        }
        if self.list_file.as_os_str().is_empty() {
            return Err(SweepError::InvalidConfig {
                message: "list_file must not be empty".to_string(),
            });
        }
        if self.root.as_os_str().is_empty() {
            return Err(SweepError::InvalidConfig {
                message: "root must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
