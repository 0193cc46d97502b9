use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, ThemeChoice, DB_ENV, DEFAULT_DB_FILE};
use crate::logging;

mod summary;

pub use summary::SummaryArgs;

/// Distance totals from your roadbook, in the terminal
#[derive(Parser)]
#[command(name = "roadbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the roadbook SQLite database
    #[arg(long, global = true, env = DB_ENV, default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Color theme for the dashboard
    #[arg(long, global = true, value_enum, default_value_t = ThemeChoice::Auto)]
    theme: ThemeChoice,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Print distance totals once
    Summary(SummaryArgs),
}

impl Cli {
    pub fn config(&self) -> Config {
        Config::new(&self.db, self.theme)
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = self.config();
        match self.command {
            None | Some(Commands::Tui) => {
                if let Err(e) = logging::init_file() {
                    eprintln!("[roadbook] Warning: logging disabled: {}", e);
                }
                crate::tui::run(config)
            }
            Some(Commands::Summary(args)) => {
                if let Err(e) = logging::init_stderr() {
                    eprintln!("[roadbook] Warning: logging disabled: {}", e);
                }
                args.run(&config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["roadbook"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.theme, ThemeChoice::Auto);
    }

    #[test]
    fn test_cli_parse_summary() {
        let cli = Cli::try_parse_from(["roadbook", "summary"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Summary(SummaryArgs { json: false }))
        ));
    }

    #[test]
    fn test_cli_parse_summary_json() {
        let cli = Cli::try_parse_from(["roadbook", "summary", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Summary(SummaryArgs { json: true }))
        ));
    }

    #[test]
    fn test_cli_parse_db_after_subcommand() {
        let cli =
            Cli::try_parse_from(["roadbook", "summary", "--db", "/tmp/other.sqlite"]).unwrap();
        assert_eq!(cli.config().db_path, PathBuf::from("/tmp/other.sqlite"));
    }

    #[test]
    fn test_cli_parse_theme() {
        let cli = Cli::try_parse_from(["roadbook", "--theme", "light", "tui"]).unwrap();
        assert_eq!(cli.config().theme, ThemeChoice::Light);
        assert!(matches!(cli.command, Some(Commands::Tui)));
    }

    #[test]
    fn test_cli_rejects_unknown_theme() {
        assert!(Cli::try_parse_from(["roadbook", "--theme", "sepia"]).is_err());
    }
}
