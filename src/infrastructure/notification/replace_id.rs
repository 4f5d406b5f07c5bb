//! Server-assigned notification ids
//!
//! A freedesktop server only replaces a notification whose id it handed out
//! itself, so the id returned for the last summary is kept and sent back as
//! the replace id next time. The file copy lets one-shot runs share it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

/// File name inside the runtime directory
const REPLACE_ID_FILE_NAME: &str = "teacher-tasks.notification-id";

/// Default location, next to the scheduler PID file
pub fn default_replace_id_path() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(REPLACE_ID_FILE_NAME)
}

/// Last id the notification server assigned to the pending summary
#[derive(Debug, Default)]
pub struct ReplaceIdStore {
    path: Option<PathBuf>,
    cached: Mutex<Option<u32>>,
}

impl ReplaceIdStore {
    /// Keep the id for the lifetime of the process only
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Keep the id in memory and in `path`
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            cached: Mutex::new(None),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The id to replace, if a summary was shown before
    pub fn recorded(&self) -> Option<u32> {
        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if cached.is_none() {
            *cached = self.path.as_deref().and_then(read_id);
        }
        *cached
    }

    /// Remember the id the server assigned. Zero is never a valid id.
    pub fn record(&self, id: u32) {
        if id == 0 {
            return;
        }

        *self.cached.lock().unwrap_or_else(|e| e.into_inner()) = Some(id);

        if let Some(path) = &self.path {
            let written = path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| fs::write(path, id.to_string()));
            match written {
                Ok(()) => debug!(id, path = %path.display(), "recorded notification id"),
                Err(e) => warn!(path = %path.display(), error = %e, "failed to record notification id"),
            }
        }
    }
}

fn read_id(path: &Path) -> Option<u32> {
    let raw = fs::read_to_string(path).ok()?;
    raw.trim().parse().ok().filter(|id| *id != 0)
}
