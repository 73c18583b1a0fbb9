//! Nigerian states / LGA lookup client
//!
//! Third-party service, reached without credentials.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::credentials::MemoryCredentialStore;
use crate::adapters::http::{ApiClient, Auth};
use crate::domain::result::Result;

pub const DEFAULT_LOCATION_BASE_URL: &str = "https://nga-states-lga.onrender.com";

#[derive(Debug, Clone)]
pub struct LocationClient {
    api: ApiClient,
}

impl LocationClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let api = ApiClient::with_timeout(
            base_url,
            Arc::new(MemoryCredentialStore::new()),
            timeout,
        )?;
        Ok(Self { api })
    }

    /// All states, as returned by `/fetch`
    pub async fn states(&self) -> Result<Vec<String>> {
        self.api.get("/fetch", Auth::None).await
    }

    /// Local government areas of `state`
    pub async fn lgas(&self, state: &str) -> Result<Vec<String>> {
        self.api
            .get_with_query("/", &[("state", state.to_string())], Auth::None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_lgas_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/").query_param("state", "Lagos");
                then.status(200).json_body(json!(["Ikeja", "Epe"]));
            })
            .await;

        let client = LocationClient::new(&server.base_url()).unwrap();
        let lgas = client.lgas("Lagos").await.unwrap();

        mock.assert_async().await;
        assert_eq!(lgas, vec!["Ikeja", "Epe"]);
    }

    #[tokio::test]
    async fn test_states_sends_no_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/fetch").header_missing("Authorization");
                then.status(200).json_body(json!(["Abia", "Lagos"]));
            })
            .await;

        let client = LocationClient::new(&server.base_url()).unwrap();
        assert_eq!(client.states().await.unwrap().len(), 2);
        mock.assert_async().await;
    }
}
