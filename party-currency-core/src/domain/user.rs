//! User domain models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Which part of the service a signed-in user works with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Customer,
    Merchant,
    Admin,
}

impl UserRole {
    /// Derive a role from the profile `type` field.
    ///
    /// The backend sends `"User"`, `"Admin"` or `"Merchant:<business type>"`.
    pub fn from_profile_type(kind: Option<&str>) -> Self {
        let kind = kind.unwrap_or_default().to_lowercase();
        if kind == "admin" {
            UserRole::Admin
        } else if kind.starts_with("merchant") {
            UserRole::Merchant
        } else {
            UserRole::Customer
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Merchant => "merchant",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(UserRole::Customer),
            "merchant" => Ok(UserRole::Merchant),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Profile of the signed-in user (`/users/profile`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub phonenumber: Option<String>,
    #[serde(default)]
    pub total_amount_spent: Option<JsonValue>,
    /// `country/state/city` for merchants
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl UserProfile {
    pub fn role(&self) -> UserRole {
        UserRole::from_profile_type(self.kind.as_deref())
    }

    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.username.clone().or_else(|| self.email.clone()).unwrap_or_default()
        } else {
            parts.join(" ")
        }
    }
}

/// Editable profile fields (`/users/update-profile`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// User row in the admin user list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub total_amount: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Result of an admin lookup by email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLookup {
    #[serde(default)]
    pub message: Option<String>,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Plain `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_from_profile_type() {
        assert_eq!(UserRole::from_profile_type(Some("Admin")), UserRole::Admin);
        assert_eq!(UserRole::from_profile_type(Some("Merchant:Bakery")), UserRole::Merchant);
        assert_eq!(UserRole::from_profile_type(Some("User")), UserRole::Customer);
        assert_eq!(UserRole::from_profile_type(None), UserRole::Customer);
    }

    #[test]
    fn test_role_round_trips_through_str() {
        assert_eq!("MERCHANT".parse::<UserRole>().unwrap(), UserRole::Merchant);
        assert!("owner".parse::<UserRole>().is_err());
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_profile_keeps_unknown_fields() {
        let profile: UserProfile = serde_json::from_value(json!({
            "type": "Merchant:Events",
            "username": "ade",
            "email": "ade@example.com",
            "firstname": "Ade",
            "lastname": "Bola",
            "phonenumber": "+2348012345678",
            "location": "Nigeria/Lagos/Ikeja",
            "referral": "friend"
        }))
        .unwrap();

        assert_eq!(profile.role(), UserRole::Merchant);
        assert_eq!(profile.display_name(), "Ade Bola");
        assert_eq!(profile.extra["referral"], json!("friend"));
    }

    #[test]
    fn test_admin_user_active_flag() {
        let user: AdminUser = serde_json::from_value(json!({
            "username": "kemi",
            "name": "Kemi A",
            "role": "user",
            "isActive": false,
            "last_login": null,
            "total_amount": "₦0"
        }))
        .unwrap();
        assert!(!user.is_active);
        assert_eq!(user.total_amount.as_deref(), Some("₦0"));
    }
}
