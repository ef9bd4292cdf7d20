use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Local, NaiveDate};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::EnvFilter;

/// The terminal belongs to the TUI, so log records only go to a daily file.
pub fn init(log_dir: &Path) -> Result<PathBuf> {
    let (path, file) = open_log_file(log_dir, Local::now().date_naive())
        .wrap_err_with(|| format!("failed to open log file in {}", log_dir.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))?;

    Ok(path)
}

fn log_file_name(date: NaiveDate) -> String {
    format!("app_{}.log", date.format("%Y-%m-%d"))
}

fn open_log_file(log_dir: &Path, date: NaiveDate) -> std::io::Result<(PathBuf, File)> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(log_file_name(date));
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}
