//! File logging bootstrap.
//!
//! The terminal belongs to the TUI, so diagnostics only ever go to rotating
//! files, and only when a level was requested on the command line. Messages are
//! metadata-only `event=... key=value` lines; record names never get logged.

use std::fs;

use anyhow::{anyhow, Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;

use crate::config::LogSettings;

const LOG_FILE_BASENAME: &str = "survival-pack";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Start the file logger. Keep the returned handle alive for the lifetime of
/// the program; dropping it flushes and stops logging.
pub fn init_logging(settings: &LogSettings) -> Result<LoggerHandle> {
    let level = normalize_level(&settings.level)?;

    fs::create_dir_all(&settings.dir).with_context(|| {
        format!(
            "failed to create log directory `{}`",
            settings.dir.display()
        )
    })?;

    let handle = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level `{level}`"))?
        .log_to_file(
            FileSpec::default()
                .directory(settings.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;

    info!(
        "event=app_start module=logging level={} log_dir={} version={}",
        level,
        settings.dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(anyhow!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}
