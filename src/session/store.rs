//! File-backed session store
//!
//! Reads session state from a JSON file that an external login flow keeps
//! fresh. Re-authentication here means reloading that file, so a login
//! performed while a run is in flight is picked up without restarting.

use crate::error::{Error, Result};
use crate::session::{SessionProvider, SessionState};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Default location of the session file
#[must_use]
pub fn default_session_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nullog")
        .join("session.json")
}

/// Session provider backed by a JSON file on disk
pub struct FileSessionStore {
    path: PathBuf,
    cached: RwLock<Option<SessionState>>,
}

impl FileSessionStore {
    /// Create a store reading from `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: RwLock::new(None),
        }
    }

    /// Create a store at the default session path
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(default_session_path())
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write session state to the backing file, creating parent directories
    pub fn save(path: &Path, state: &SessionState) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Session(format!("cannot create {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| Error::Session(format!("cannot serialize session: {e}")))?;
        std::fs::write(path, json)
            .map_err(|e| Error::Session(format!("cannot write {}: {e}", path.display())))
    }

    fn load_from_disk(&self) -> Result<SessionState> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::Session(format!(
                "no session at {} ({e}); log in through the portal and import the cookies",
                self.path.display()
            ))
        })?;
        let state: SessionState = serde_json::from_str(&raw)
            .map_err(|e| Error::Session(format!("malformed session file: {e}")))?;
        if state.cookies.is_empty() {
            return Err(Error::Session("session file contains no cookies".to_string()));
        }
        Ok(state)
    }
}

#[async_trait]
impl SessionProvider for FileSessionStore {
    async fn session(&self) -> Result<SessionState> {
        if let Some(state) = self.cached.read().await.as_ref() {
            return Ok(state.clone());
        }
        let state = self.load_from_disk()?;
        *self.cached.write().await = Some(state.clone());
        Ok(state)
    }

    async fn reauthenticate(&self) -> Result<bool> {
        let fresh = self.load_from_disk()?;
        let mut cached = self.cached.write().await;
        let changed = cached.as_ref() != Some(&fresh);
        *cached = Some(fresh);
        Ok(changed)
    }
}
