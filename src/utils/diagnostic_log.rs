//! Append-only diagnostic log file.
//!
//! One file per engine instance, named `waylon_<local timestamp>.log`. Each
//! write opens the file in append mode under a lock, so the log survives
//! across calls and is readable while the host is still running.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use crate::errors::EngineResult;

const FILE_PREFIX: &str = "waylon_";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug)]
pub struct DiagnosticLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl DiagnosticLog {
    /// Log file in `dir`, stamped with the current local time. The file is
    /// created on first write.
    pub fn in_directory(dir: impl AsRef<Path>) -> Self {
        let stamp = Local::now().format(TIMESTAMP_FORMAT);
        Self {
            path: dir.as_ref().join(format!("{FILE_PREFIX}{stamp}.log")),
            lock: Mutex::new(()),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `line` followed by a newline.
    pub fn write_line(&self, line: &str) -> EngineResult<()> {
        let _guard = self.lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
