//! Signed-in user's profile

use std::path::Path;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

use crate::adapters::http::{ApiClient, Auth};
use crate::domain::result::Result;
use crate::domain::{MessageResponse, ProfileUpdate, UserProfile};
use crate::services::validation::PasswordChange;

/// Response of `/users/get-picture`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePicture {
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

pub struct ProfileService {
    api: Arc<ApiClient>,
}

impl ProfileService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_profile(&self) -> Result<UserProfile> {
        self.api.get("/users/profile", Auth::Required).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<JsonValue> {
        self.api
            .put("/users/update-profile", update, Auth::Required)
            .await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<MessageResponse> {
        change.validate()?;
        self.api
            .put(
                "/users/change-password",
                &json!({
                    "current_password": change.current_password,
                    "new_password": change.new_password,
                }),
                Auth::Required,
            )
            .await
    }

    /// Upload a new profile picture from disk
    pub async fn upload_picture(&self, path: &Path) -> Result<JsonValue> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profile_picture".to_string());
        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime_for(path))?;
        let form = Form::new().part("profile_picture", part);

        self.api
            .request_multipart(Method::PUT, "/users/upload-picture", form, Auth::Required)
            .await
    }

    pub async fn get_picture(&self) -> Result<ProfilePicture> {
        self.api.get("/users/get-picture", Auth::Required).await
    }

    /// Payments made by the signed-in customer
    pub async fn get_user_transactions(&self) -> Result<JsonValue> {
        self.api
            .get("/users/get-user-transactions", Auth::Required)
            .await
    }
}

/// MIME type guessed from the file extension
pub(crate) fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("me.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("note.png")), "image/png");
        assert_eq!(mime_for(Path::new("blob")), "application/octet-stream");
    }
}
