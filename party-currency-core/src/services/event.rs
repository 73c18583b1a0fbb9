//! Customer events

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::adapters::http::{resource_path, ApiClient, Auth};
use crate::domain::result::{Error, Result};
use crate::domain::{Event, NewEvent};
use crate::services::take_field;

pub struct EventService {
    api: Arc<ApiClient>,
}

impl EventService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Create an event. Returns the created event.
    pub async fn create(&self, event: &NewEvent) -> Result<Event> {
        let body: JsonValue = self
            .api
            .post("/events/create", &event.to_request_body(), Auth::Required)
            .await?;
        extract_event(body)
    }

    pub async fn get(&self, event_id: &str) -> Result<Event> {
        let body: JsonValue = self
            .api
            .get(&resource_path("/events/get", event_id), Auth::Required)
            .await?;
        extract_event(body)
    }

    /// Events owned by the signed-in user
    pub async fn list(&self) -> Result<Vec<Event>> {
        let body: JsonValue = self.api.get("/events/list", Auth::Required).await?;
        let events = match body {
            JsonValue::Array(_) => body,
            JsonValue::Object(_) => match take_field(body, "events") {
                events @ JsonValue::Array(_) => events,
                _ => JsonValue::Array(vec![]),
            },
            _ => JsonValue::Array(vec![]),
        };
        Ok(serde_json::from_value(events)?)
    }

    /// Currency designs attached to an event
    pub async fn currencies_for_event(&self, event_id: &str) -> Result<JsonValue> {
        self.api
            .get_with_query(
                "/events/get-currency",
                &[("event_id", event_id.to_string())],
                Auth::Required,
            )
            .await
    }

    pub async fn delete(&self, event_id: &str) -> Result<JsonValue> {
        self.api
            .delete(&resource_path("/events/delete", event_id), &[], Auth::Required)
            .await
    }
}

/// The backend wraps single events as `{"event": {...}}`
fn extract_event(body: JsonValue) -> Result<Event> {
    let event = take_field(body, "event");
    if event.is_null() {
        return Err(Error::not_found("event missing from response"));
    }
    Ok(serde_json::from_value(event)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_wrapped_event() {
        let event = extract_event(json!({
            "message": "Event created successfully",
            "event": {"event_id": "E1", "event_name": "Wedding", "LGA": "IKEJA"}
        }))
        .unwrap();
        assert_eq!(event.event_id, "E1");
        assert_eq!(event.lga.as_deref(), Some("IKEJA"));
    }

    #[test]
    fn test_extract_bare_event() {
        let event = extract_event(json!({"event_id": "E2", "event_name": "Naming"})).unwrap();
        assert_eq!(event.event_name, "Naming");
    }

    #[test]
    fn test_extract_null_event() {
        assert!(matches!(extract_event(JsonValue::Null), Err(Error::NotFound(_))));
    }
}
