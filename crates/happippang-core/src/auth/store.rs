//! Session token storage.
//!
//! The session is the access/refresh token pair. It is written by login and
//! refresh, read on every outgoing request, and cleared by logout or a failed
//! refresh. No expiry is tracked here; an expired token is discovered when
//! the server answers 401.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Session file name in the cache directory
const SESSION_FILE: &str = "session.json";

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl StoredTokens {
    pub fn new(access_token: &str, refresh_token: &str) -> Self {
        Self {
            access_token: Some(access_token.to_string()),
            refresh_token: Some(refresh_token.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

// Token values stay out of logs
impl fmt::Debug for StoredTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredTokens")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Persistent home of the session tokens.
///
/// A `set` replaces whatever was there; there is never more than one session
/// per store.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> StoredTokens;

    fn set(&self, access_token: &str, refresh_token: &str) -> Result<()>;

    /// Replace the access token, keeping the refresh token
    fn set_access(&self, access_token: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;

    fn access_token(&self) -> Option<String> {
        self.get().access_token
    }

    fn refresh_token(&self) -> Option<String> {
        self.get().refresh_token
    }
}

/// Process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<StoredTokens>,
}

impl MemoryTokenStore {
    pub fn with_tokens(access_token: &str, refresh_token: &str) -> Self {
        Self {
            tokens: Mutex::new(StoredTokens::new(access_token, refresh_token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> StoredTokens {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        *self.tokens.lock().unwrap_or_else(PoisonError::into_inner) =
            StoredTokens::new(access_token, refresh_token);
        Ok(())
    }

    fn set_access(&self, access_token: &str) -> Result<()> {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token = Some(access_token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.tokens.lock().unwrap_or_else(PoisonError::into_inner) = StoredTokens::default();
        Ok(())
    }
}

/// JSON file store, keyed `access_token` / `refresh_token`.
///
/// Reads are served from memory; every write goes through to disk.
pub struct FileTokenStore {
    path: PathBuf,
    tokens: Mutex<StoredTokens>,
}

impl FileTokenStore {
    /// Open the session file in `dir`, loading any tokens already saved there.
    ///
    /// A file that cannot be read or parsed counts as no session; the next
    /// login overwrites it.
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(SESSION_FILE);
        let tokens = if path.exists() {
            match Self::load(&path) {
                Ok(tokens) => tokens,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Ignoring unreadable session file");
                    StoredTokens::default()
                }
            }
        } else {
            StoredTokens::default()
        };
        Ok(Self {
            path,
            tokens: Mutex::new(tokens),
        })
    }

    fn load(path: &Path) -> Result<StoredTokens> {
        let contents = std::fs::read_to_string(path).context("Failed to read session file")?;
        serde_json::from_str(&contents).context("Failed to parse session file")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, tokens: &StoredTokens) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create session directory")?;
        }
        let contents = serde_json::to_string_pretty(tokens)?;

        // Write then rename so a crash never leaves a half-written session
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).context("Failed to write session file")?;
        std::fs::rename(&tmp, &self.path).context("Failed to replace session file")?;
        Ok(())
    }

    /// Memory only changes once the new tokens are on disk
    fn update(&self, apply: impl FnOnce(&mut StoredTokens)) -> Result<()> {
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = tokens.clone();
        apply(&mut next);
        self.persist(&next)?;
        *tokens = next;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> StoredTokens {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        self.update(|tokens| *tokens = StoredTokens::new(access_token, refresh_token))
    }

    fn set_access(&self, access_token: &str) -> Result<()> {
        self.update(|tokens| tokens.access_token = Some(access_token.to_string()))
    }

    fn clear(&self) -> Result<()> {
        *self.tokens.lock().unwrap_or_else(PoisonError::into_inner) = StoredTokens::default();
        if self.path.exists() {
            std::fs::remove_file(&self.path).context("Failed to remove session file")?;
        }
        Ok(())
    }
}
