//! Runtime configuration: command-line flags over an optional JSON file.
//!
//! Precedence, highest first: flag, config file value, built-in default.
//!
//! ```json
//! {
//!   "tick_rate": 30,
//!   "max_ticks_per_frame": 5,
//!   "hiscores": "hiscores.dat",
//!   "assets": "assets",
//!   "seed": 42,
//!   "log_file": "sprite-tetris.log",
//!   "bell": true
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::LoopConfig;
use crate::types::{DEFAULT_MAX_TICKS_PER_FRAME, DEFAULT_TICK_RATE_HZ};

pub const DEFAULT_HISCORES_PATH: &str = "hiscores.dat";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_LOG_FILE: &str = "sprite-tetris.log";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "sprite-tetris")]
#[command(about = "Terminal Tetris on a small sprite engine")]
pub struct Args {
    /// JSON config file; flags given here override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Simulation ticks per second
    #[arg(long, value_name = "HZ")]
    pub tick_rate: Option<u32>,

    /// Most ticks run for one rendered frame before backlog is dropped
    #[arg(long, value_name = "N")]
    pub max_ticks_per_frame: Option<u32>,

    /// Hi-score file, read at startup and written on exit
    #[arg(long, value_name = "FILE")]
    pub hiscores: Option<PathBuf>,

    /// Asset directory containing assets.txt
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Seed for piece selection and effects (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log file; pass an empty string to disable logging
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<String>,

    /// Do not ring the terminal bell for sound effects
    #[arg(long)]
    pub no_bell: bool,
}

/// Shape of the JSON config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub tick_rate: Option<u32>,
    pub max_ticks_per_frame: Option<u32>,
    pub hiscores: Option<PathBuf>,
    pub assets: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub bell: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tick_rate_hz: u32,
    pub max_ticks_per_frame: u32,
    pub hiscores_path: PathBuf,
    pub assets_dir: PathBuf,
    pub seed: Option<u64>,
    /// `None` disables logging.
    pub log_file: Option<PathBuf>,
    pub bell: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
            hiscores_path: PathBuf::from(DEFAULT_HISCORES_PATH),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            seed: None,
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            bell: true,
        }
    }
}

impl Config {
    /// Load the file named by `--config` (if any) and apply the flags on top.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(file, args)
    }

    pub fn merge(file: FileConfig, args: &Args) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let tick_rate_hz = args
            .tick_rate
            .or(file.tick_rate)
            .unwrap_or(defaults.tick_rate_hz);
        if tick_rate_hz == 0 {
            return Err(ConfigError::Zero { field: "tick_rate" });
        }

        let max_ticks_per_frame = args
            .max_ticks_per_frame
            .or(file.max_ticks_per_frame)
            .unwrap_or(defaults.max_ticks_per_frame);
        if max_ticks_per_frame == 0 {
            return Err(ConfigError::Zero {
                field: "max_ticks_per_frame",
            });
        }

        let log_file = match args.log_file.clone().map(PathBuf::from).or(file.log_file) {
            Some(path) if path.as_os_str().is_empty() => None,
            Some(path) => Some(path),
            None => defaults.log_file,
        };

        Ok(Self {
            tick_rate_hz,
            max_ticks_per_frame,
            hiscores_path: args
                .hiscores
                .clone()
                .or(file.hiscores)
                .unwrap_or(defaults.hiscores_path),
            assets_dir: args
                .assets
                .clone()
                .or(file.assets)
                .unwrap_or(defaults.assets_dir),
            seed: args.seed.or(file.seed),
            log_file,
            bell: !args.no_bell && file.bell.unwrap_or(defaults.bell),
        })
    }

    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            tick_rate_hz: self.tick_rate_hz,
            max_ticks_per_frame: self.max_ticks_per_frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file_or_flags() {
        let config = Config::merge(FileConfig::default(), &Args::default()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.loop_config(), LoopConfig::default());
    }

    #[test]
    fn flags_override_file() {
        let file = FileConfig {
            tick_rate: Some(60),
            seed: Some(1),
            bell: Some(true),
            ..Default::default()
        };
        let args = Args::parse_from(["sprite-tetris", "--tick-rate", "20", "--no-bell"]);
        let config = Config::merge(file, &args).unwrap();
        assert_eq!(config.tick_rate_hz, 20);
        assert_eq!(config.seed, Some(1));
        assert!(!config.bell);
    }

    #[test]
    fn empty_log_file_disables_logging() {
        let args = Args::parse_from(["sprite-tetris", "--log-file", ""]);
        let config = Config::merge(FileConfig::default(), &args).unwrap();
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let file = FileConfig {
            tick_rate: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            Config::merge(file, &Args::default()),
            Err(ConfigError::Zero { field: "tick_rate" })
        ));
    }

    #[test]
    fn unknown_file_keys_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "tick_rate": 30, "speed": 9 }"#).unwrap();
        assert!(matches!(
            FileConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));

        fs::write(&path, r#"{ "assets": "art", "bell": false }"#).unwrap();
        let file = FileConfig::load(&path).unwrap();
        let config = Config::merge(file, &Args::default()).unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("art"));
        assert!(!config.bell);
    }
}
