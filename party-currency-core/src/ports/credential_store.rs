//! Credential storage port
//!
//! Holds the access token and role of the signed-in user between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::UserRole;

/// What a store currently knows about the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAuth {
    pub access_token: Option<String>,
    pub role: Option<UserRole>,
    /// Expiry of a persisted token; `None` for session tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredAuth {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Credential store trait
///
/// Implementations keep the token and role. The API client reads the
/// token through this trait before every authenticated request.
pub trait CredentialStore: Send + Sync {
    /// Store a token and role.
    ///
    /// With `remember_me` the token is persisted for the configured token
    /// lifetime. Without it the token only lives as long as the store does
    /// and any previously persisted token is dropped. The role is always
    /// persisted.
    fn store(&self, access_token: &str, role: UserRole, remember_me: bool) -> Result<()>;

    /// Current token and role. Expired tokens read as absent.
    fn get(&self) -> Result<StoredAuth>;

    /// Remove the access token, keeping the role
    fn delete(&self) -> Result<()>;

    /// Remove everything this store holds
    fn clear_all(&self) -> Result<()>;
}
