// src/times.rs
//! Capture a file's creation / modification / access times and stamp them
//! onto another file.

use anyhow::{Context, Result};
use filetime::FileTime;
use log::debug;
use std::{fs, path::Path, time::SystemTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamps {
    /// `None` where the platform or filesystem does not record it.
    /// Only Windows lets us write it back.
    #[cfg_attr(not(windows), allow(dead_code))]
    pub created: Option<SystemTime>,
    pub modified: FileTime,
    pub accessed: FileTime,
}

impl Timestamps {
    /// Must run before the file is read, reads may bump atime.
    pub fn capture(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path)
            .with_context(|| format!("reading metadata for '{}'", path.display()))?;
        Ok(Self {
            created: meta.created().ok(),
            modified: FileTime::from_last_modification_time(&meta),
            accessed: FileTime::from_last_access_time(&meta),
        })
    }

    pub fn apply(&self, path: &Path) -> Result<()> {
        filetime::set_file_times(path, self.accessed, self.modified)
            .with_context(|| format!("restoring timestamps on '{}'", path.display()))?;

        #[cfg(windows)]
        if let Some(created) = self.created {
            set_created(path, created)?;
        }

        debug!("timestamps applied to {}", path.display());
        Ok(())
    }
}

#[cfg(windows)]
fn set_created(path: &Path, created: SystemTime) -> Result<()> {
    use std::fs::{FileTimes, OpenOptions};
    use std::os::windows::fs::FileTimesExt;

    let file = OpenOptions::new()
        .write(true)
        .open(path)
        .with_context(|| format!("opening '{}' to set its creation time", path.display()))?;
    file.set_times(FileTimes::new().set_created(created))
        .with_context(|| format!("setting creation time on '{}'", path.display()))?;
    Ok(())
}
