//! Session token storage
//!
//! A single optional token string under one fixed location, the analog of
//! one browser-storage key. The trait exists so the client and views can be
//! exercised against an in-memory store in tests.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Session store error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Session store backend error: {0}")]
    Backend(String),
}

/// Persistent home of the session token.
///
/// Two tabs sharing one store can race; last writer wins, which is accepted.
pub trait SessionStore: Send + Sync {
    /// Read the stored token, if any
    fn get(&self) -> Result<Option<String>, StoreError>;

    /// Store a token, overwriting any previous one
    fn set(&self, token: &str) -> Result<(), StoreError>;

    /// Remove the stored token. Idempotent.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory session store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        let token = self
            .token
            .lock()
            .map_err(|e| StoreError::Backend(format!("token lock poisoned: {e}")))?;
        Ok(token.clone())
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        let mut slot = self
            .token
            .lock()
            .map_err(|e| StoreError::Backend(format!("token lock poisoned: {e}")))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self
            .token
            .lock()
            .map_err(|e| StoreError::Backend(format!("token lock poisoned: {e}")))?;
        *slot = None;
        Ok(())
    }
}

/// File-backed session store: one token string in one file.
///
/// Missing file means no session. Parent directories are created on first
/// write.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, token: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
