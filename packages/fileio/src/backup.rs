//! Timestamped backup copies.
//!
//! A backup of `notes.txt` taken at 14:03:09 on 2024-05-01 lands beside it
//! as `notes.txt.20240501140309.bak`. Two backups within the same second
//! share a name, and the later one wins.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::handle::FileHandle;
use crate::options::BackupClock;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

impl FileHandle {
    /// Copy the current text content to a timestamped `.bak` file and
    /// return its path.
    pub fn backup(&self) -> Result<PathBuf> {
        let content = fs::read_to_string(self.path()).map_err(|err| {
            let err = Error::io(self.path(), err);
            log::warn!("Error backing up file: {}", err);
            err
        })?;

        let backup_path = backup_path_for(self.path(), &timestamp(self.options().backup_clock));
        write_backup(&backup_path, &content)?;

        log::debug!(
            "Backed up {} to {}",
            self.path().display(),
            backup_path.display()
        );
        Ok(backup_path)
    }
}

fn write_backup(backup_path: &Path, content: &str) -> Result<()> {
    fs::write(backup_path, content).map_err(|err| {
        let err = Error::io(backup_path, err);
        log::warn!("Error writing backup: {}", err);
        err
    })
}

fn timestamp(clock: BackupClock) -> String {
    match clock {
        BackupClock::Local => chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        BackupClock::Utc => chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string(),
    }
}

fn backup_path_for(path: &Path, timestamp: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(timestamp);
    name.push(".bak");
    PathBuf::from(name)
}
