//! Event domain models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// An event as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub event_name: String,
    #[serde(default)]
    pub event_description: Option<String>,
    #[serde(default)]
    pub event_author: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(rename = "LGA", default)]
    pub lga: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<JsonValue>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub reconciliation: Option<bool>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub delivery_status: Option<String>,
    #[serde(default)]
    pub currency_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Fields for creating an event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEvent {
    pub event_name: String,
    #[serde(default)]
    pub event_description: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    /// Local government area; sent upper-cased as `LGA`
    #[serde(rename = "LGA")]
    pub lga: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub reconciliation_service: bool,
}

impl NewEvent {
    /// Body in the shape the backend expects
    pub fn to_request_body(&self) -> JsonValue {
        let mut body = serde_json::json!({
            "event_name": self.event_name,
            "event_description": self.event_description,
            "street_address": self.street_address,
            "city": self.city,
            "state": self.state,
            "LGA": self.lga.to_uppercase(),
            "start_date": self.start_date,
            "end_date": self.end_date,
            "delivery_address": self.delivery_address,
            "reconciliation_service": self.reconciliation_service,
        });
        if let Some(code) = &self.postal_code {
            body["postal_code"] = JsonValue::String(code.clone());
        }
        body
    }
}

/// Delivery state an admin can move an event to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    #[serde(rename = "pending payment")]
    PendingPayment,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "delivered")]
    Delivered,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 4] = [
        DeliveryStatus::PendingPayment,
        DeliveryStatus::Pending,
        DeliveryStatus::Delivered,
        DeliveryStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::PendingPayment => "pending payment",
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        DeliveryStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "invalid delivery status '{}', expected one of: pending payment, pending, delivered, cancelled",
                    s
                )
            })
    }
}

/// Admin event listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub sort_by: String,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            search: String::new(),
            sort_by: "-created_at".to_string(),
        }
    }
}

impl EventQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
            ("search", self.search.clone()),
            ("sort_by", self.sort_by.clone()),
        ]
    }
}

/// One page of the admin event listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPage {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub filters: EventFilters,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
    #[serde(default)]
    pub next_page: Option<u32>,
    #[serde(default)]
    pub previous_page: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilters {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_uppercases_lga() {
        let event = NewEvent {
            event_name: "Tunde @ 30".to_string(),
            street_address: "12 Allen Avenue".to_string(),
            city: "Ikeja".to_string(),
            state: "Lagos".to_string(),
            lga: "ikeja".to_string(),
            start_date: "2025-03-01".to_string(),
            end_date: "2025-03-02".to_string(),
            ..Default::default()
        };

        let body = event.to_request_body();
        assert_eq!(body["LGA"], json!("IKEJA"));
        assert_eq!(body["reconciliation_service"], json!(false));
        assert!(body.get("lga").is_none());
        assert!(body.get("postal_code").is_none());
    }

    #[test]
    fn test_delivery_status_parsing() {
        assert_eq!("Delivered".parse::<DeliveryStatus>().unwrap(), DeliveryStatus::Delivered);
        assert_eq!(
            "pending-payment".parse::<DeliveryStatus>().unwrap(),
            DeliveryStatus::PendingPayment
        );
        assert!("shipped".parse::<DeliveryStatus>().is_err());
        assert_eq!(
            serde_json::to_value(DeliveryStatus::PendingPayment).unwrap(),
            json!("pending payment")
        );
    }

    #[test]
    fn test_event_query_defaults() {
        let pairs = EventQuery::default().to_query_pairs();
        assert_eq!(pairs[0], ("page", "1".to_string()));
        assert_eq!(pairs[1], ("page_size", "10".to_string()));
        assert_eq!(pairs[3], ("sort_by", "-created_at".to_string()));
    }

    #[test]
    fn test_event_page_parses_backend_shape() {
        let page: EventPage = serde_json::from_value(json!({
            "events": [{
                "event_id": "EVT1",
                "event_name": "Wedding",
                "LGA": "IKEJA",
                "postal_code": 100001,
                "reconciliation": true,
                "transaction_id": null,
                "payment_status": "pending",
                "delivery_status": "pending payment",
                "has_reserved_account": false
            }],
            "pagination": {"current_page": 1, "page_size": 10, "total_pages": 1,
                           "total_count": 1, "has_next": false, "has_previous": false,
                           "next_page": null, "previous_page": null},
            "filters": {"search": "", "sort_by": "-created_at"}
        }))
        .unwrap();

        assert_eq!(page.events.len(), 1);
        assert_eq!(page.events[0].lga.as_deref(), Some("IKEJA"));
        assert_eq!(page.events[0].extra["has_reserved_account"], json!(false));
        assert_eq!(page.pagination.total_count, 1);
    }
}
