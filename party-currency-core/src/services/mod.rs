//! Service layer - one service per backend area
//!
//! Services turn typed inputs into backend calls through the shared
//! [`ApiClient`](crate::adapters::http::ApiClient) and shape the responses
//! into domain types.

mod admin;
mod auth;
mod currency;
mod event;
pub mod feedback;
mod location;
pub mod logging;
mod merchant;
mod payment;
mod profile;
mod status;
mod util;
pub mod validation;

use serde_json::Value as JsonValue;

pub use admin::AdminService;
pub use auth::{AuthService, LoginOutcome, ResetTokenResponse};
pub use currency::CurrencyService;
pub use event::EventService;
pub use feedback::{with_feedback, FeedbackOptions, RecordingNotifier, SilentNotifier};
pub use location::LocationService;
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use merchant::MerchantService;
pub use payment::PaymentService;
pub use profile::{ProfilePicture, ProfileService};
pub use status::{StatusService, StatusSummary};
pub use util::UtilService;

/// `body[key]` when the backend wrapped the payload, else the body itself
pub(crate) fn take_field(body: JsonValue, key: &str) -> JsonValue {
    match body {
        JsonValue::Object(mut map) => match map.remove(key) {
            Some(value) => value,
            None => JsonValue::Object(map),
        },
        other => other,
    }
}
