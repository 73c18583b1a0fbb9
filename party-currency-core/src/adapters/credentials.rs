//! Credential store adapters
//!
//! - `FileCredentialStore` keeps the token in `credentials.json` in the
//!   data directory, with an expiry, like a browser cookie with a max age.
//! - `MemoryCredentialStore` keeps everything in process memory.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::UserRole;
use crate::ports::{CredentialStore, StoredAuth};

/// Default token lifetime in days when "remember me" is set
pub const ACCESS_TOKEN_DURATION_DAYS: i64 = 14;

const CREDENTIALS_FILE: &str = "credentials.json";

/// On-disk credential layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_type: Option<UserRole>,
}

impl CredentialsFile {
    fn live_token(&self, now: DateTime<Utc>) -> Option<String> {
        match (&self.access_token, self.expires_at) {
            (Some(token), Some(expires_at)) if expires_at > now => Some(token.clone()),
            (Some(token), None) => Some(token.clone()),
            _ => None,
        }
    }
}

fn lock_err(e: impl std::fmt::Display) -> Error {
    Error::Other(format!("Lock poisoned: {}", e))
}

/// File-backed credential store
pub struct FileCredentialStore {
    path: PathBuf,
    token_duration: Duration,
    /// Token stored without "remember me"; gone when the process exits
    session_token: Mutex<Option<String>>,
}

impl FileCredentialStore {
    /// Create a store in `data_dir` with the default token lifetime
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CREDENTIALS_FILE),
            token_duration: Duration::days(ACCESS_TOKEN_DURATION_DAYS),
            session_token: Mutex::new(None),
        }
    }

    /// Create a store whose remembered tokens last `days`
    pub fn with_token_duration(data_dir: &Path, days: i64) -> Result<Self> {
        let token_duration = Duration::try_days(days)
            .ok_or_else(|| Error::config(format!("Token lifetime of {} days is out of range", days)))?;
        Ok(Self {
            token_duration,
            ..Self::new(data_dir)
        })
    }

    /// Use `token` for this process without touching the file
    pub fn with_session_token(self, token: impl Into<String>) -> Self {
        if let Ok(mut session) = self.session_token.lock() {
            *session = Some(token.into());
        }
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<CredentialsFile> {
        if !self.path.exists() {
            return Ok(CredentialsFile::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(CredentialsFile::default());
        }
        // A corrupt file is treated as signed out rather than a hard failure
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    /// Read-modify-write under an exclusive lock on a sidecar lock file
    fn update(&self, f: impl FnOnce(&mut CredentialsFile)) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let lock_path = self.path.with_extension("json.lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        lock_file.lock_exclusive()?;

        let result = (|| {
            let mut contents = self.read()?;
            f(&mut contents);
            self.write(&contents)
        })();

        lock_file.unlock()?;
        result
    }

    fn write(&self, contents: &CredentialsFile) -> Result<()> {
        let json = serde_json::to_string_pretty(contents)?;
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = create_private(&tmp_path)?;
            std::io::Write::write_all(&mut &file, json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<File> {
    File::create(path)
}

impl CredentialStore for FileCredentialStore {
    fn store(&self, access_token: &str, role: UserRole, remember_me: bool) -> Result<()> {
        let expires_at = Utc::now()
            .checked_add_signed(self.token_duration)
            .ok_or_else(|| Error::config("Token expiry is past the supported date range"))?;
        self.update(|c| {
            c.user_type = Some(role);
            if remember_me {
                c.access_token = Some(access_token.to_string());
                c.expires_at = Some(expires_at);
            } else {
                c.access_token = None;
                c.expires_at = None;
            }
        })?;

        let mut session = self.session_token.lock().map_err(lock_err)?;
        *session = if remember_me {
            None
        } else {
            Some(access_token.to_string())
        };
        Ok(())
    }

    fn get(&self) -> Result<StoredAuth> {
        let contents = self.read()?;
        let session = self.session_token.lock().map_err(lock_err)?.clone();
        let (access_token, expires_at) = match session {
            Some(token) => (Some(token), None),
            None => match contents.live_token(Utc::now()) {
                Some(token) => (Some(token), contents.expires_at),
                None => (None, None),
            },
        };
        Ok(StoredAuth {
            access_token,
            role: contents.user_type,
            expires_at,
        })
    }

    fn delete(&self) -> Result<()> {
        *self.session_token.lock().map_err(lock_err)? = None;
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|c| {
            c.access_token = None;
            c.expires_at = None;
        })
    }

    fn clear_all(&self) -> Result<()> {
        *self.session_token.lock().map_err(lock_err)? = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory credential store
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<StoredAuth>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a token
    pub fn with_token(token: impl Into<String>, role: UserRole) -> Self {
        Self {
            inner: Mutex::new(StoredAuth {
                access_token: Some(token.into()),
                role: Some(role),
                expires_at: None,
            }),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn store(&self, access_token: &str, role: UserRole, _remember_me: bool) -> Result<()> {
        let mut inner = self.inner.lock().map_err(lock_err)?;
        inner.access_token = Some(access_token.to_string());
        inner.role = Some(role);
        Ok(())
    }

    fn get(&self) -> Result<StoredAuth> {
        Ok(self.inner.lock().map_err(lock_err)?.clone())
    }

    fn delete(&self) -> Result<()> {
        self.inner.lock().map_err(lock_err)?.access_token = None;
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        *self.inner.lock().map_err(lock_err)? = StoredAuth::default();
        Ok(())
    }
}
