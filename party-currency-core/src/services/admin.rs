//! Admin dashboard operations

use std::sync::Arc;

use serde_json::{json, Value as JsonValue};

use crate::adapters::http::{resource_path, ApiClient, Auth};
use crate::domain::result::Result;
use crate::domain::{
    AdminStatistics, AdminTransactionList, AdminUser, DeliveryStatus, EventPage, EventQuery,
    MessageResponse, UserLookup,
};

pub struct AdminService {
    api: Arc<ApiClient>,
}

impl AdminService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn statistics(&self) -> Result<AdminStatistics> {
        self.api
            .get("/admin/get-admin-statistics", Auth::Required)
            .await
    }

    /// All users. The backend returns either a bare list or `{users: [...]}`.
    pub async fn users(&self) -> Result<Vec<AdminUser>> {
        let body: JsonValue = self.api.get("/admin/get-users", Auth::Required).await?;
        Ok(serde_json::from_value(normalize_users(body))?)
    }

    pub async fn user_by_email(&self, email: &str) -> Result<UserLookup> {
        self.api
            .get_with_query(
                "/admin/get-user",
                &[("email", email.to_string())],
                Auth::Required,
            )
            .await
    }

    pub async fn delete_user(&self, email: &str) -> Result<MessageResponse> {
        self.api
            .delete(&resource_path("/admin/delete-user", email), &[], Auth::Required)
            .await
    }

    pub async fn activate_user(&self, email: &str) -> Result<MessageResponse> {
        self.api
            .put(
                &resource_path("/admin/activate-user", email),
                &json!({}),
                Auth::Required,
            )
            .await
    }

    pub async fn suspend_user(&self, email: &str) -> Result<MessageResponse> {
        self.api
            .put(
                &resource_path("/admin/suspend-user", email),
                &json!({}),
                Auth::Required,
            )
            .await
    }

    /// One page of events across all users
    pub async fn events(&self, query: &EventQuery) -> Result<EventPage> {
        let pairs = query.to_query_pairs();
        self.api
            .get_with_query("/admin/get-events", &pairs, Auth::Required)
            .await
    }

    pub async fn change_delivery_status(
        &self,
        event_id: &str,
        status: DeliveryStatus,
    ) -> Result<MessageResponse> {
        self.api
            .post(
                "/admin/change-event-status",
                &json!({ "event_id": event_id, "new_status": status }),
                Auth::Required,
            )
            .await
    }

    pub async fn transactions(&self) -> Result<AdminTransactionList> {
        self.api
            .get("/admin/get-all-transactions", Auth::Required)
            .await
    }
}

fn normalize_users(body: JsonValue) -> JsonValue {
    match body {
        JsonValue::Array(_) => body,
        JsonValue::Object(mut map) => match map.remove("users") {
            Some(users @ JsonValue::Array(_)) => users,
            _ => JsonValue::Array(vec![]),
        },
        _ => JsonValue::Array(vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_users() {
        let user = json!({"username": "ada@example.com", "is_active": true});
        assert_eq!(normalize_users(json!([user.clone()])), json!([user.clone()]));
        assert_eq!(normalize_users(json!({"users": [user.clone()]})), json!([user]));
        assert_eq!(normalize_users(json!({"detail": "x"})), json!([]));
        assert_eq!(normalize_users(json!("nope")), json!([]));
        assert_eq!(normalize_users(JsonValue::Null), json!([]));
    }
}
