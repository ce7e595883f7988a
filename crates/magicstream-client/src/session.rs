// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

use magicstream_core::{Error, Result, SessionUser};
use parking_lot::RwLock;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Local record of who is logged in. Only a hint: the credential itself is a
/// cookie owned by the transport.
pub trait SessionStore: Send + Sync {
    fn current(&self) -> Option<SessionUser>;
    fn save(&self, user: &SessionUser) -> Result<()>;
    fn clear(&self);

    fn is_logged_in(&self) -> bool {
        self.current().is_some()
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    user: RwLock<Option<SessionUser>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: SessionUser) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn current(&self) -> Option<SessionUser> {
        self.user.read().clone()
    }

    fn save(&self, user: &SessionUser) -> Result<()> {
        *self.user.write() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) {
        *self.user.write() = None;
    }
}

/// JSON file holding the logged-in user between runs.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn current(&self) -> Option<SessionUser> {
        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read session file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice(&content) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::error!("Error parsing user data: {}", e);
                self.clear();
                None
            }
        }
    }

    fn save(&self, user: &SessionUser) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Session(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }
        let data = serde_json::to_vec_pretty(user)?;
        std::fs::write(&self.path, data).map_err(|e| {
            Error::Session(format!("failed to write {}: {}", self.path.display(), e))
        })
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    "Failed to remove session file {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}
