//! Display formatting for backend error payloads
//!
//! The backend reports failures in several shapes: a bare string, an
//! object with a `message`, or a map of field names to lists of
//! messages (`{"email": ["already taken"]}`). These helpers flatten all
//! of them into a single human readable string.

use serde_json::{Map, Value as JsonValue};

/// Shown when a payload carries nothing printable
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Fields that the signup and login forms map errors onto
const FIELD_ERROR_KEYS: &[&str] = &[
    "email",
    "phone_number",
    "password",
    "first_name",
    "last_name",
    "detail",
];

/// Flatten an error payload into display text.
///
/// - `null` becomes [`UNEXPECTED_ERROR`]
/// - a string is returned as is
/// - an object with a non-empty `message` returns that message
/// - any other object is flattened to `key: value` lines, where array
///   values are joined with `", "` and non-string scalars are skipped
///
/// Object keys keep the order the backend sent them in. The result may
/// be empty when an object has no printable entries; callers that need
/// a guaranteed message should use [`format_error_or`].
pub fn format_error_messages(payload: &JsonValue) -> String {
    match payload {
        JsonValue::Null => UNEXPECTED_ERROR.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Object(map) => {
            if let Some(message) = message_field(map) {
                return message;
            }
            flatten_entries(map.iter().map(|(k, v)| (k.clone(), v)))
        }
        // Arrays are keyed by index, the way the web client rendered them
        JsonValue::Array(items) => {
            flatten_entries(items.iter().enumerate().map(|(i, v)| (i.to_string(), v)))
        }
        JsonValue::Bool(_) | JsonValue::Number(_) => UNEXPECTED_ERROR.to_string(),
    }
}

/// Like [`format_error_messages`] but falls back to `fallback` when the
/// payload flattens to nothing.
pub fn format_error_or(payload: &JsonValue, fallback: &str) -> String {
    let text = format_error_messages(payload);
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

/// Normalize a raw error payload before it is shown against form fields.
///
/// A payload that is itself a JSON document encoded as a string is
/// parsed. When an object's `detail` mentions an email problem and no
/// `email` key exists, the detail is copied under `email` so the email
/// field can show it.
pub fn normalize_error_payload(payload: JsonValue) -> JsonValue {
    let payload = match payload {
        JsonValue::String(s) => match serde_json::from_str::<JsonValue>(&s) {
            Ok(parsed @ JsonValue::Object(_)) => parsed,
            _ => return JsonValue::String(s),
        },
        other => other,
    };

    match payload {
        JsonValue::Object(mut map) => {
            let email_detail = map
                .get("detail")
                .and_then(|d| d.as_str())
                .filter(|d| d.contains("email"))
                .map(str::to_string);
            if let Some(detail) = email_detail {
                map.entry("email").or_insert(JsonValue::String(detail));
            }
            JsonValue::Object(map)
        }
        other => other,
    }
}

/// Whether the payload has errors attached to known form fields
pub fn has_field_errors(payload: &JsonValue) -> bool {
    match payload.as_object() {
        Some(map) => FIELD_ERROR_KEYS
            .iter()
            .any(|key| map.get(*key).is_some_and(is_truthy)),
        None => false,
    }
}

fn message_field(map: &Map<String, JsonValue>) -> Option<String> {
    match map.get("message")? {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Null | JsonValue::String(_) | JsonValue::Bool(false) => None,
        other => Some(render_scalar(other)),
    }
}

fn flatten_entries<'a>(entries: impl Iterator<Item = (String, &'a JsonValue)>) -> String {
    let mut lines = Vec::new();
    for (key, value) in entries {
        match value {
            JsonValue::Array(items) => {
                let joined = items
                    .iter()
                    .map(render_scalar)
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(format!("{}: {}", key, joined));
            }
            JsonValue::String(s) => lines.push(format!("{}: {}", key, s)),
            _ => {}
        }
    }
    lines.join("\n")
}

fn render_scalar(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Array(items) => items
            .iter()
            .map(render_scalar)
            .collect::<Vec<_>>()
            .join(","),
        JsonValue::Object(_) => value.to_string(),
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_payload() {
        assert_eq!(format_error_messages(&JsonValue::Null), UNEXPECTED_ERROR);
    }

    #[test]
    fn test_string_payload() {
        assert_eq!(format_error_messages(&json!("Invalid credentials")), "Invalid credentials");
    }

    #[test]
    fn test_message_wins_over_fields() {
        let payload = json!({"message": "Event not found", "email": ["ignored"]});
        assert_eq!(format_error_messages(&payload), "Event not found");
    }

    #[test]
    fn test_field_list_flattened() {
        let payload = json!({"field": ["msg1", "msg2"]});
        assert_eq!(format_error_messages(&payload), "field: msg1, msg2");
    }

    #[test]
    fn test_multiple_fields_keep_backend_order() {
        let payload = json!({
            "password": ["This password is too short."],
            "email": "user with this email already exists.",
            "code": 400
        });
        assert_eq!(
            format_error_messages(&payload),
            "password: This password is too short.\nemail: user with this email already exists."
        );
    }

    #[test]
    fn test_empty_object_uses_fallback() {
        assert_eq!(format_error_messages(&json!({})), "");
        assert_eq!(format_error_or(&json!({}), "Failed to load data"), "Failed to load data");
    }

    #[test]
    fn test_number_payload() {
        assert_eq!(format_error_messages(&json!(500)), UNEXPECTED_ERROR);
    }

    #[test]
    fn test_normalize_parses_json_string() {
        let raw = JsonValue::String(r#"{"error": "User not found"}"#.to_string());
        assert_eq!(normalize_error_payload(raw), json!({"error": "User not found"}));

        let plain = JsonValue::String("just text".to_string());
        assert_eq!(normalize_error_payload(plain), json!("just text"));
    }

    #[test]
    fn test_normalize_copies_email_detail() {
        let payload = json!({"detail": "No user with this email"});
        let normalized = normalize_error_payload(payload);
        assert_eq!(normalized["email"], json!("No user with this email"));

        let existing = json!({"detail": "bad email", "email": ["taken"]});
        assert_eq!(normalize_error_payload(existing)["email"], json!(["taken"]));
    }

    #[test]
    fn test_has_field_errors() {
        assert!(has_field_errors(&json!({"phone_number": ["invalid"]})));
        assert!(!has_field_errors(&json!({"error": "boom"})));
        assert!(!has_field_errors(&json!({"email": ""})));
        assert!(!has_field_errors(&json!("text")));
    }
}
