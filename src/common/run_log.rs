use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::OffsetDateTime;

use super::{now_local_or_utc, run_log_path};

/// Plain-text log of per-row decisions, one file per run.
///
/// Every line is flushed as it is written so an interrupted run keeps
/// everything logged up to that point.
pub struct RunLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RunLog {
    /// Open (append) the log file for a run that started at `started`
    pub fn create<P: AsRef<Path>>(dir: P, started: OffsetDateTime) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

        let path = run_log_path(dir, started);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open run log: {}", path.display()))?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a line as-is
    pub fn line(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{}", message)
            .and_then(|_| self.writer.flush())
            .with_context(|| format!("Failed to write run log: {}", self.path.display()))
    }

    /// Append a line prefixed with the current local time
    pub fn stamped(&mut self, message: &str) -> Result<()> {
        let line = format!("[{}] {}", timestamp(now_local_or_utc()), message);
        self.line(&line)
    }
}

fn timestamp(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| at.unix_timestamp().to_string())
}
