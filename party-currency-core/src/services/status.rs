//! Status service - who is signed in, and against which backend

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::adapters::http::ApiClient;
use crate::domain::result::Result;
use crate::domain::UserRole;

/// Status service for the local session
pub struct StatusService {
    api: Arc<ApiClient>,
}

impl StatusService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Summarize stored credentials without contacting the backend
    pub fn get_status(&self) -> Result<StatusSummary> {
        let stored = self.api.credentials().get()?;
        let authenticated = stored.is_authenticated();

        Ok(StatusSummary {
            base_url: self.api.base_url().to_string(),
            authenticated,
            role: stored.role,
            token_expires_at: stored.expires_at,
            session_only: authenticated && stored.expires_at.is_none(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub base_url: String,
    pub authenticated: bool,
    pub role: Option<UserRole>,
    pub token_expires_at: Option<DateTime<Utc>>,
    /// Token lives only as long as this process
    pub session_only: bool,
}
