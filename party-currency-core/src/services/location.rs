//! State and LGA lookups for address forms

use tracing::debug;

use crate::adapters::location::LocationClient;
use crate::domain::result::Result;
use crate::domain::validation::ValidationErrors;

pub struct LocationService {
    client: LocationClient,
}

impl LocationService {
    pub fn new(client: LocationClient) -> Self {
        Self { client }
    }

    /// Nigerian states, sorted
    pub async fn states(&self) -> Result<Vec<String>> {
        let mut states = self.client.states().await?;
        states.sort();
        Ok(states)
    }

    /// Local government areas of a state, sorted
    pub async fn lgas(&self, state: &str) -> Result<Vec<String>> {
        let state = state.trim();
        if state.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("state", "Please select a state");
            return Err(errors.into());
        }

        let mut lgas = self.client.lgas(state).await?;
        debug!(state, count = lgas.len(), "fetched LGAs");
        lgas.sort();
        Ok(lgas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::Error;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_states_sorted() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/fetch");
                then.status(200).json_body(json!(["Lagos", "Abia", "Kano"]));
            })
            .await;

        let service = LocationService::new(LocationClient::new(&server.base_url()).unwrap());
        assert_eq!(service.states().await.unwrap(), vec!["Abia", "Kano", "Lagos"]);
    }

    #[tokio::test]
    async fn test_blank_state_rejected() {
        let service = LocationService::new(LocationClient::new("http://127.0.0.1:9").unwrap());
        assert!(matches!(service.lgas("  ").await, Err(Error::Validation(_))));
    }
}
