//! Party Currency REST client
//!
//! Builds requests against the backend, attaches `Authorization: Token <token>`
//! from the credential store and maps responses onto the core error taxonomy:
//!
//! - missing token on an authenticated endpoint: `Error::Unauthenticated`,
//!   raised before anything is sent
//! - non-2xx: `Error::RequestFailed` with the backend body as sent
//! - network failure: `Error::Transport` carrying the reqwest error
//!
//! There are no retries. A request timeout only applies when configured.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::ports::CredentialStore;

/// Default backend for local development
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the backend URL
pub const BASE_URL_ENV: &str = "PARTY_CURRENCY_BASE_URL";

/// Whether an endpoint needs the stored access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Fail with `Unauthenticated` when no token is stored
    Required,
    /// Attach the token if there is one
    Optional,
    /// Never attach a token
    None,
}

/// Query parameters as (name, value) pairs
pub type Query<'a> = &'a [(&'a str, String)];

/// `prefix/<id>` with `id` percent-encoded as a single path segment.
///
/// IDs and emails come from users; an unescaped `#`, `?` or `/` would
/// address a different resource.
pub fn resource_path(prefix: &str, id: &str) -> String {
    // Form encoding writes a space as '+' and a literal '+' as %2B
    let segment: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        segment.replace('+', "%20")
    )
}

/// Authenticated JSON client for the Party Currency backend
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `base_url` with no request timeout
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        Self::with_timeout(base_url, credentials, None)
    }

    pub fn with_timeout(
        base_url: &str,
        credentials: Arc<dyn CredentialStore>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid base URL '{}': {}", base_url, e)))?;

        let mut builder = Client::builder().user_agent(concat!(
            "party-currency/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send a JSON request and deserialize the JSON response
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&B>,
        auth: Auth,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // Resolve the token first so a missing one never reaches the network
        let token = self.token(auth)?;

        let mut builder = self
            .http
            .request(method.clone(), self.url(path))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = self.send(builder, &method, path, token).await?;
        read_json(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> Result<T> {
        self.request::<JsonValue, T>(Method::GET, path, &[], None, auth)
            .await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
        auth: Auth,
    ) -> Result<T> {
        self.request::<JsonValue, T>(Method::GET, path, query, None, auth)
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, auth: Auth) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, &[], Some(body), auth).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, auth: Auth) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, &[], Some(body), auth).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
        auth: Auth,
    ) -> Result<T> {
        self.request::<JsonValue, T>(Method::DELETE, path, query, None, auth)
            .await
    }

    /// Send a multipart form. reqwest sets the boundary content type.
    pub async fn request_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
        auth: Auth,
    ) -> Result<T> {
        let token = self.token(auth)?;
        let builder = self
            .http
            .request(method.clone(), self.url(path))
            .multipart(form);

        let response = self.send(builder, &method, path, token).await?;
        read_json(response).await
    }

    /// GET a binary body
    pub async fn request_bytes(&self, path: &str, query: Query<'_>, auth: Auth) -> Result<Vec<u8>> {
        let token = self.token(auth)?;
        let mut builder = self.http.get(self.url(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }

        let response = self.send(builder, &Method::GET, path, token).await?;
        Ok(response.bytes().await?.to_vec())
    }

    fn token(&self, auth: Auth) -> Result<Option<String>> {
        if auth == Auth::None {
            return Ok(None);
        }
        let stored = self.credentials.get()?;
        let token = stored.access_token.filter(|t| !t.is_empty());
        if auth == Auth::Required && token.is_none() {
            debug!("no access token stored, refusing authenticated request");
            return Err(Error::Unauthenticated);
        }
        Ok(token)
    }

    async fn send(
        &self,
        mut builder: RequestBuilder,
        method: &Method,
        path: &str,
        token: Option<String>,
    ) -> Result<Response> {
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Token {}", token));
        }

        debug!(%method, path, "sending request");
        let response = builder.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "received response");

        if status.is_success() {
            Ok(response)
        } else {
            Err(failure(status, response).await)
        }
    }
}

/// Build a `RequestFailed` from a non-2xx response
async fn failure(status: StatusCode, response: Response) -> Error {
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => return Error::Transport(e),
    };
    let payload = serde_json::from_str::<JsonValue>(&text)
        .unwrap_or_else(|_| JsonValue::String(status_text(status)));
    Error::request_failed(status.as_u16(), payload)
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(serde_json::from_value(JsonValue::Null)?);
    }
    Ok(serde_json::from_str(&text)?)
}
