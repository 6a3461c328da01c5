//! Application configuration.
//!
//! Sources, highest priority first: command line, environment
//! (`VOCAB_DB_PATH`), TOML file (`--config`, `VOCAB_CONFIG_PATH` or
//! `vocab.toml`), built-in defaults.

use crate::error::ConfigError;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "VOCAB_CONFIG_PATH";
pub const DB_PATH_ENV: &str = "VOCAB_DB_PATH";
const DEFAULT_CONFIG_FILE: &str = "vocab.toml";

#[derive(Parser, Debug, Default)]
#[command(name = "vocab")]
#[command(version)]
#[command(about = "Vocabulary trainer with spaced repetition reviews", long_about = None)]
pub struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Whose vocabulary to open
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Schedule against the wall clock instead of the simulated calendar
    #[arg(long)]
    pub system_clock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub db_path: PathBuf,
    pub owner: String,
    /// Use the stored calendar that only moves on "Next Day".
    pub simulate_dates: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("db.sqlite3"),
            owner: "local".to_string(),
            simulate_dates: true,
        }
    }
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        Self::resolve(args, |key| std::env::var_os(key))
    }

    /// Same as `load` with an explicit environment lookup.
    pub fn resolve(
        args: &Args,
        env: impl Fn(&str) -> Option<OsString>,
    ) -> Result<Self, ConfigError> {
        let path = args
            .config
            .clone()
            .or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::from_file(&path)?;

        if let Some(db_path) = env(DB_PATH_ENV) {
            config.db_path = PathBuf::from(db_path);
        }

        if let Some(db_path) = &args.db {
            config.db_path = db_path.clone();
        }
        if let Some(owner) = &args.owner {
            config.owner = owner.clone();
        }
        if args.system_clock {
            config.simulate_dates = false;
        }

        log::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    /// Reads a TOML file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}
