//! Sign-in, sign-up and password recovery

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};
use tracing::{debug, warn};

use crate::adapters::http::{ApiClient, Auth};
use crate::domain::result::Result;
use crate::domain::{MessageResponse, UserProfile, UserRole};
use crate::services::validation::{
    validate_login_identifier, validate_new_password, validate_reset_code, validate_reset_email,
    CelebrantSignup, MerchantSignup,
};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
    #[serde(default)]
    user: Option<UserProfile>,
}

/// Result of a successful sign-in
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    #[serde(skip_serializing)]
    pub token: String,
    pub role: UserRole,
    pub profile: Option<UserProfile>,
}

/// Response of `/auth/password/token`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetTokenResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Sign in with email and password.
    ///
    /// The token is stored, the profile fetched with it, and the token
    /// stored again under the role derived from the profile `type`. If the
    /// profile cannot be fetched the token is removed again.
    pub async fn login(&self, email: &str, password: &str, remember_me: bool) -> Result<LoginOutcome> {
        validate_login_identifier(email)?;

        let response: TokenResponse = self
            .api
            .post(
                "/auth/login",
                &json!({ "email": email, "password": password }),
                Auth::None,
            )
            .await?;

        let credentials = self.api.credentials();
        credentials.store(&response.token, UserRole::Customer, remember_me)?;

        let profile: UserProfile = match self.api.get("/users/profile", Auth::Required).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("profile fetch after login failed, discarding token");
                credentials.delete()?;
                return Err(e);
            }
        };

        let role = profile.role();
        debug!(%role, "signed in");
        credentials.store(&response.token, role, remember_me)?;

        Ok(LoginOutcome {
            token: response.token,
            role,
            profile: Some(profile),
        })
    }

    /// Finish a Google sign-in with the token from the OAuth redirect.
    /// Google accounts are always customers.
    pub async fn login_with_google(&self, oauth_token: &str) -> Result<LoginOutcome> {
        let response: TokenResponse = self
            .api
            .post(
                "/auth/google/callback",
                &json!({ "token": oauth_token }),
                Auth::None,
            )
            .await?;

        self.api
            .credentials()
            .store(&response.token, UserRole::Customer, true)?;

        Ok(LoginOutcome {
            token: response.token,
            role: UserRole::Customer,
            profile: response.user,
        })
    }

    /// URL that starts the Google OAuth flow in a browser
    pub fn google_login_url(&self) -> String {
        self.api.url("/auth/google/login")
    }

    pub async fn signup_celebrant(&self, form: &CelebrantSignup) -> Result<JsonValue> {
        form.validate()?;
        self.api.post("/auth/signup/user", form, Auth::None).await
    }

    pub async fn signup_merchant(&self, form: &MerchantSignup) -> Result<JsonValue> {
        form.validate()?;
        self.api.post("/auth/signup/merchant", form, Auth::None).await
    }

    /// Email a password reset code
    pub async fn request_password_reset_code(&self, email: &str) -> Result<MessageResponse> {
        validate_reset_email(email)?;
        self.api
            .post("/auth/password/code", &json!({ "email": email }), Auth::None)
            .await
    }

    /// Exchange the emailed code for a reset token
    pub async fn get_password_reset_token(&self, email: &str, code: &str) -> Result<ResetTokenResponse> {
        validate_reset_code(code)?;
        self.api
            .post(
                "/auth/password/token",
                &json!({ "email": email, "code": code }),
                Auth::None,
            )
            .await
    }

    pub async fn reset_password(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<MessageResponse> {
        validate_new_password(password, confirm_password)?;
        self.api
            .post(
                "/auth/password/reset",
                &json!({ "email": email, "password": password }),
                Auth::None,
            )
            .await
    }

    /// Forget the token, the role and any session credential
    pub fn logout(&self) -> Result<()> {
        self.api.credentials().clear_all()
    }
}
