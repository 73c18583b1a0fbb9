//! CLI command implementations

pub mod admin;
pub mod auth;
pub mod config;
pub mod currency;
pub mod events;
pub mod image;
pub mod location;
pub mod logs;
pub mod merchant;
pub mod password;
pub mod pay;
pub mod profile;
pub mod signup;
pub mod status;

use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dialoguer::Password;
use party_currency_core::config::DATA_DIR_ENV;
use party_currency_core::ports::Notifier;
use party_currency_core::services::{with_feedback, FeedbackOptions, SilentNotifier};
use party_currency_core::{
    EntryPoint, LogEvent, LoggingService, OperationResult, PartyCurrencyContext,
};
use serde::Serialize;

use crate::output::SpinnerNotifier;

/// Marker for failures already shown to the user
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("command failed")
    }
}

impl std::error::Error for Reported {}

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".party-currency"))
        .context("Could not find home directory; set PARTY_CURRENCY_DIR")
}

/// Get or create the client context
pub fn get_context() -> Result<PartyCurrencyContext> {
    let data_dir = get_data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    PartyCurrencyContext::new(&data_dir).context("Failed to initialize client")
}

/// Spinner for people, nothing for `--json`
pub fn notifier(json: bool) -> Box<dyn Notifier> {
    if json {
        Box::new(SilentNotifier)
    } else {
        Box::new(SpinnerNotifier)
    }
}

/// Run one backend call with feedback and event logging.
///
/// Failures are shown by the notifier (or printed as a JSON
/// `OperationResult` with `--json`) and come back as [`Reported`].
pub async fn track<T, F>(
    command: &str,
    endpoint: &str,
    json: bool,
    operation: F,
    options: FeedbackOptions<'_, T>,
) -> Result<T>
where
    F: Future<Output = party_currency_core::domain::result::Result<T>>,
{
    let logger = get_logger();
    let notifier = notifier(json);

    match with_feedback(notifier.as_ref(), operation, options).await {
        Ok(value) => {
            if let Some(l) = &logger {
                let _ = l.log_completed(command, endpoint);
            }
            Ok(value)
        }
        Err(e) => {
            if let Some(l) = &logger {
                let _ = l.log_api_error(command, endpoint, &e);
            }
            if json {
                print_json(&OperationResult::<()>::from(Err(e)))?;
            } else if e.is_unauthenticated() {
                crate::output::info("Run 'party login' first.");
            }
            Err(Reported.into())
        }
    }
}

/// Print `value` as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Value from a flag, or a hidden prompt
pub fn password_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Password::new().with_prompt(prompt).interact()?),
    }
}
