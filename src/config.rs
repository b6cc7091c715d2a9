use common::gomoku::DEFAULT_BOARD_SIZE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // Edge length of the board
    pub size: usize,
    pub log_dir: PathBuf,
    pub log_file: String,
    // Print a JSON snapshot of the game after every command
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            size: DEFAULT_BOARD_SIZE,
            log_dir: PathBuf::from("./logs"),
            log_file: "gomoku.log".to_string(),
            json: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    // The first command-line argument, if any, names the config file
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, ConfigError> {
        match args.nth(1) {
            Some(path) => Config::load(Path::new(&path)),
            None => Ok(Config::default()),
        }
    }
}
