//! Feedback pipeline
//!
//! Wraps an async operation with loading/success/error notifications. The
//! operation's value or error is handed back unchanged; notifications and
//! callbacks are side effects only.

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::domain::messages::{format_error_or, normalize_error_payload};
use crate::domain::result::{Error, Result};
use crate::ports::{Notifier, Pending};

pub use crate::domain::messages::{format_error_messages, has_field_errors, UNEXPECTED_ERROR};

type SuccessCallback<'a, T> = Box<dyn FnOnce(&T) + Send + 'a>;
type ErrorCallback<'a> = Box<dyn FnOnce(&Error) + Send + 'a>;

/// How an operation is reported
pub struct FeedbackOptions<'a, T> {
    pub loading_message: String,
    /// Shown on success; `None` clears the loading state silently
    pub success_message: Option<String>,
    /// Shown when the error formats to nothing
    pub error_fallback: String,
    pub show_loading: bool,
    on_success: Option<SuccessCallback<'a, T>>,
    on_error: Option<ErrorCallback<'a>>,
}

impl<T> Default for FeedbackOptions<'_, T> {
    fn default() -> Self {
        Self {
            loading_message: "Loading...".to_string(),
            success_message: None,
            error_fallback: UNEXPECTED_ERROR.to_string(),
            show_loading: true,
            on_success: None,
            on_error: None,
        }
    }
}

impl<'a, T> FeedbackOptions<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form submission preset
    pub fn form_submission() -> Self {
        Self::preset(
            "Submitting form...",
            "Form submitted successfully!",
            "Failed to submit form",
        )
    }

    /// Data loading preset
    pub fn api_request() -> Self {
        Self::preset("Loading data...", "Data loaded successfully!", "Failed to load data")
    }

    /// Sign-in preset
    pub fn auth() -> Self {
        Self::preset(
            "Authenticating...",
            "Authentication successful!",
            "Authentication failed",
        )
    }

    fn preset(loading: &str, success: &str, error: &str) -> Self {
        Self {
            loading_message: loading.to_string(),
            success_message: Some(success.to_string()),
            error_fallback: error.to_string(),
            ..Self::default()
        }
    }

    pub fn loading(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    pub fn success(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    /// Clear the loading state without a success message
    pub fn no_success_message(mut self) -> Self {
        self.success_message = None;
        self
    }

    pub fn error_fallback(mut self, message: impl Into<String>) -> Self {
        self.error_fallback = message.into();
        self
    }

    /// Skip the loading notification
    pub fn quiet(mut self) -> Self {
        self.show_loading = false;
        self
    }

    pub fn on_success(mut self, callback: impl FnOnce(&T) + Send + 'a) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl FnOnce(&Error) + Send + 'a) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }
}

/// Run `operation`, reporting its progress through `notifier`.
///
/// On success the success message (if any) is shown, `on_success` runs
/// once and the value is returned. On failure the error is formatted and
/// shown, `on_error` runs once and the same error is returned.
pub async fn with_feedback<T, F>(
    notifier: &dyn Notifier,
    operation: F,
    options: FeedbackOptions<'_, T>,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let FeedbackOptions {
        loading_message,
        success_message,
        error_fallback,
        show_loading,
        on_success,
        on_error,
    } = options;

    let pending = show_loading.then(|| notifier.loading(&loading_message));

    match operation.await {
        Ok(value) => {
            match (pending, success_message.as_deref()) {
                (Some(pending), message) => pending.succeed(message),
                (None, Some(message)) => notifier.success(message),
                (None, None) => {}
            }
            if let Some(callback) = on_success {
                callback(&value);
            }
            Ok(value)
        }
        Err(error) => {
            let message = error_message(&error, &error_fallback);
            match pending {
                Some(pending) => pending.fail(&message),
                None => notifier.error(&message),
            }
            if let Some(callback) = on_error {
                callback(&error);
            }
            Err(error)
        }
    }
}

/// Display text for an error, with backend payloads flattened
pub fn error_message(error: &Error, fallback: &str) -> String {
    let text = match error {
        Error::RequestFailed { payload, .. } => {
            format_error_or(&normalize_error_payload(payload.clone()), fallback)
        }
        other => other.to_string(),
    };
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

/// Notifier that shows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

struct SilentPending;

impl Pending for SilentPending {
    fn succeed(self: Box<Self>, _message: Option<&str>) {}
    fn fail(self: Box<Self>, _message: &str) {}
}

impl Notifier for SilentNotifier {
    fn loading(&self, _message: &str) -> Box<dyn Pending> {
        Box::new(SilentPending)
    }
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
}

/// A notification as seen by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Loading(String),
    /// A loading state that ended, with its success text if any
    Resolved(Option<String>),
    Success(String),
    Error(String),
    Info(String),
}

/// Notifier that keeps every notification in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    fn push(&self, notification: Notification) {
        if let Ok(mut log) = self.log.lock() {
            log.push(notification);
        }
    }
}

struct RecordingPending(RecordingNotifier);

impl Pending for RecordingPending {
    fn succeed(self: Box<Self>, message: Option<&str>) {
        self.0.push(Notification::Resolved(message.map(str::to_string)));
    }

    fn fail(self: Box<Self>, message: &str) {
        self.0.push(Notification::Error(message.to_string()));
    }
}

impl Notifier for RecordingNotifier {
    fn loading(&self, message: &str) -> Box<dyn Pending> {
        self.push(Notification::Loading(message.to_string()));
        Box::new(RecordingPending(self.clone()))
    }

    fn success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.push(Notification::Info(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_success_path() {
        let notifier = RecordingNotifier::new();
        let mut seen = Vec::new();

        let value = with_feedback(
            &notifier,
            async { Ok(41 + 1) },
            FeedbackOptions::api_request().on_success(|v: &i32| seen.push(*v)),
        )
        .await
        .unwrap();

        assert_eq!(value, 42);
        assert_eq!(seen, vec![42]);
        assert_eq!(
            notifier.notifications(),
            vec![
                Notification::Loading("Loading data...".to_string()),
                Notification::Resolved(Some("Data loaded successfully!".to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn test_error_is_rethrown_and_formatted() {
        let notifier = RecordingNotifier::new();
        let mut calls = 0;

        let err = with_feedback::<(), _>(
            &notifier,
            async {
                Err(Error::request_failed(
                    400,
                    json!({"email": ["taken"], "password": ["too short", "too common"]}),
                ))
            },
            FeedbackOptions::form_submission().on_error(|_| calls += 1),
        )
        .await
        .unwrap_err();

        assert_eq!(calls, 1);
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            notifier.notifications().last(),
            Some(&Notification::Error(
                "email: taken\npassword: too short, too common".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_quiet_without_success_message() {
        let notifier = RecordingNotifier::new();
        with_feedback(&notifier, async { Ok(()) }, FeedbackOptions::new().quiet())
            .await
            .unwrap();
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_quiet_error_reports_directly() {
        let notifier = RecordingNotifier::new();
        let _ = with_feedback::<(), _>(
            &notifier,
            async { Err(Error::Unauthenticated) },
            FeedbackOptions::auth().quiet(),
        )
        .await;
        assert_eq!(notifier.notifications().len(), 1);
        assert!(matches!(notifier.notifications()[0], Notification::Error(_)));
    }

    #[test]
    fn test_error_message_uses_fallback_for_empty_payload() {
        let err = Error::request_failed(500, json!({"code": 12}));
        assert_eq!(error_message(&err, "Failed to load data"), "Failed to load data");
    }

    #[test]
    fn test_error_message_normalizes_string_payload() {
        let err = Error::request_failed(400, json!("{\"detail\": \"Invalid credentials\"}"));
        assert_eq!(error_message(&err, "x"), "detail: Invalid credentials");
    }
}
