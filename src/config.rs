//! Runtime configuration resolved from command-line flags and environment

use std::path::PathBuf;

use clap::ValueEnum;

use crate::tui::theme::Theme;

/// Database file looked up in the working directory when nothing else is given
pub const DEFAULT_DB_FILE: &str = "roadbook.sqlite";

/// Environment variable naming the database location
pub const DB_ENV: &str = "ROADBOOK_DB";

/// Theme selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeChoice {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

impl ThemeChoice {
    /// Must be called **before** entering raw mode (ratatui::init).
    pub fn resolve(self) -> Theme {
        match self {
            Self::Auto => Theme::detect(),
            Self::Dark => Theme::Dark,
            Self::Light => Theme::Light,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub theme: ThemeChoice,
}

impl Config {
    pub fn new(db_path: impl Into<PathBuf>, theme: ThemeChoice) -> Self {
        Self {
            db_path: db_path.into(),
            theme,
        }
    }
}
