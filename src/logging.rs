//! Tracing subscriber setup
//!
//! The dashboard owns the terminal, so it logs to a file under
//! `~/.roadbook`; one-shot commands log to stderr.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::BaseDirs;
use tracing_subscriber::EnvFilter;

use crate::types::{Result, RoadbookError};

/// Environment variable holding the log filter (e.g. `roadbook=debug`)
pub const LOG_ENV: &str = "ROADBOOK_LOG";

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE: &str = "roadbook.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Directory holding roadbook's own files
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "cannot determine home directory")
    })?;
    Ok(base_dirs.home_dir().join(".roadbook"))
}

/// Log to stderr
pub fn init_stderr() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| RoadbookError::Logging(e.to_string()))
}

/// Log to `~/.roadbook/roadbook.log`, returning the file path
pub fn init_file() -> Result<PathBuf> {
    let dir = data_dir()?;
    fs::create_dir_all(&dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| RoadbookError::Logging(e.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_is_dot_roadbook_under_home() {
        if let Ok(dir) = data_dir() {
            assert!(dir.ends_with(".roadbook"));
            let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
            assert!(dir.starts_with(home));
        }
    }

    #[test]
    fn test_second_subscriber_is_reported() {
        // Whichever call installs the global subscriber, the next one must fail
        let _ = init_stderr();
        let err = init_stderr().unwrap_err();
        assert!(matches!(err, RoadbookError::Logging(_)));
    }
}
