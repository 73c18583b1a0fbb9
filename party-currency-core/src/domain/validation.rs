//! Field-level validation errors

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::messages::format_error_messages;

/// Validation failures keyed by form field, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.fields.push((field.to_string(), vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for one field
    pub fn field(&self, field: &str) -> &[String] {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    /// Convert to `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Same shape the backend uses: `{"field": ["msg", ...]}`
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        for (name, messages) in &self.fields {
            map.insert(
                name.clone(),
                JsonValue::Array(messages.iter().cloned().map(JsonValue::String).collect()),
            );
        }
        JsonValue::Object(map)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_error_messages(&self.to_json()))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_messages_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("password", "Password must be at least 8 characters");
        errors.add("email", "Invalid email address");
        errors.add("password", "Passwords don't match");

        assert_eq!(errors.field("password").len(), 2);
        assert_eq!(
            errors.to_string(),
            "password: Password must be at least 8 characters, Passwords don't match\nemail: Invalid email address"
        );
    }

    #[test]
    fn test_empty_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(ValidationErrors::new().field("email").is_empty());
    }
}
