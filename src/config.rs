//! Command-line flags and the runtime settings derived from them.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

use crate::models::FieldLimit;

/// Folder name used beneath the user's home directory for log files.
const DATA_DIR_NAME: &str = ".survival-pack";
/// Subfolder holding rotated logs.
const LOG_DIR_NAME: &str = "logs";

#[derive(Parser, Debug)]
#[command(name = "survival-pack")]
#[command(about = "Interactive survival backpack organizer", long_about = None)]
pub struct Cli {
    /// Write diagnostic logs at this level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Directory for log files [default: ~/.survival-pack/logs]
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Accept names and categories longer than 49 characters
    #[arg(long)]
    pub unbounded_fields: bool,
}

/// Logging destination requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub dir: PathBuf,
}

/// Runtime settings handed to the app.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub field_limit: FieldLimit,
    pub logging: Option<LogSettings>,
}

impl Settings {
    /// Resolve parsed flags. The default log directory is only looked up when
    /// logging was actually requested.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let field_limit = if cli.unbounded_fields {
            FieldLimit::Unbounded
        } else {
            FieldLimit::default()
        };

        let logging = match cli.log_level {
            Some(level) => {
                let dir = match cli.log_dir {
                    Some(dir) => dir,
                    None => default_log_dir()?,
                };
                Some(LogSettings { level, dir })
            }
            None => None,
        };

        Ok(Self {
            field_limit,
            logging,
        })
    }
}

/// Resolve `~/.survival-pack/logs`.
fn default_log_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs
        .home_dir()
        .join(DATA_DIR_NAME)
        .join(LOG_DIR_NAME))
}
