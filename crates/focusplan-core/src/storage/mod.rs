mod config;
pub mod distraction_log;

pub use config::{Config, LogConfig, SessionConfig, UiConfig};
pub use distraction_log::{
    read_log, CsvDistractionLog, DistractionRecord, DistractionSink, MemoryDistractionLog,
};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/focusplan/`, creating it if needed.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = dirs::home_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(".config")
        .join("focusplan");

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
