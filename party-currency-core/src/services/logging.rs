//! Logging service - structured event logging to DuckDB
//!
//! Provides a privacy-safe logging system that stores events in logs.duckdb.
//! Access tokens, passwords and BVNs are never logged; only event names,
//! endpoint paths, commands and error text are recorded.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use duckdb::Connection;
use serde::{Deserialize, Serialize};

use crate::domain::result::Error as CoreError;
use crate::log_migrations::LOG_MIGRATIONS;

/// Counter for generating unique IDs within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique ID based on timestamp + counter
fn generate_id() -> u64 {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    // Use lower 48 bits for timestamp (good for ~8900 years)
    // Use upper 16 bits for counter (65536 unique IDs per millisecond)
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    (timestamp << 16) | counter
}

/// Get current unix timestamp in milliseconds
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Detect the current platform
fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// Entry point for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    Cli,
    /// Embedded use of the core library
    Library,
}

impl EntryPoint {
    fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Library => "library",
        }
    }
}

/// A log event to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl LogEvent {
    /// Create a new log event with just an event name
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            endpoint: None,
            command: None,
            error_message: None,
            error_details: None,
        }
    }

    /// Set the backend endpoint path (no query string)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let path = endpoint.split('?').next().unwrap_or_default().to_string();
        self.endpoint = Some(path);
        self
    }

    /// Set the command context (for CLI events)
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set error information
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Set error details (status code, error kind)
    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }

    /// Record a core error: its display text plus its kind and status
    pub fn with_core_error(self, error: &CoreError) -> Self {
        let details = match error {
            CoreError::Unauthenticated => "unauthenticated".to_string(),
            CoreError::RequestFailed { status, .. } => format!("request_failed status={}", status),
            CoreError::Transport(_) => "transport".to_string(),
            CoreError::Validation(_) => "validation".to_string(),
            CoreError::Config(_) => "config".to_string(),
            CoreError::NotFound(_) => "not_found".to_string(),
            CoreError::Io(_) => "io".to_string(),
            CoreError::Json(_) => "json".to_string(),
            CoreError::Other(_) => "other".to_string(),
        };
        self.with_error(error.to_string()).with_error_details(details)
    }
}

/// A log entry as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub entry_point: String,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub endpoint: Option<String>,
    pub command: Option<String>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
}

/// Service for structured event logging
///
/// This service manages the logs.duckdb database and provides methods
/// for logging events and querying the log history.
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    entry_point: EntryPoint,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Create a new logging service
    ///
    /// Opens or creates logs.duckdb in the data directory and runs
    /// any pending migrations.
    pub fn new(
        data_dir: &Path,
        entry_point: EntryPoint,
        app_version: impl Into<String>,
    ) -> Result<Self> {
        let db_path = data_dir.join("logs.duckdb");
        let conn = Self::open_database(&db_path)?;

        let service = Self {
            conn: Mutex::new(conn),
            db_path,
            entry_point,
            app_version: app_version.into(),
            platform: detect_platform(),
        };

        service.run_migrations()?;

        Ok(service)
    }

    /// Open the logs database, creating it if it doesn't exist
    fn open_database(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path)?;
        Ok(conn)
    }

    /// Run any pending migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        // Check if migrations table exists
        let table_exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM information_schema.tables WHERE table_name = 'sys_migrations'",
                [],
                |row| row.get(0),
            )
            .unwrap_or(false);

        // Bootstrap migrations table if needed
        if !table_exists {
            if let Some((name, sql)) = LOG_MIGRATIONS.iter().find(|(n, _)| *n == "000_migrations.sql")
            {
                conn.execute_batch(sql)?;
                conn.execute(
                    "INSERT INTO sys_migrations (migration_name) VALUES (?)",
                    [name],
                )?;
            }
        }

        // Get applied migrations
        let mut stmt = conn.prepare("SELECT migration_name FROM sys_migrations")?;
        let applied: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        // Apply pending migrations
        for (name, sql) in LOG_MIGRATIONS.iter() {
            if *name == "000_migrations.sql" {
                continue;
            }
            if !applied.contains(&name.to_string()) {
                conn.execute_batch(sql)?;
                conn.execute(
                    "INSERT INTO sys_migrations (migration_name) VALUES (?)",
                    [name],
                )?;
            }
        }

        Ok(())
    }

    /// Log an event
    ///
    /// This is the main method for recording events. The entry_point,
    /// app_version, and platform are automatically added from the service
    /// configuration.
    pub fn log(&self, event: LogEvent) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO sys_logs (
                id, timestamp, entry_point, app_version, platform,
                event, endpoint, command, error_message, error_details
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            duckdb::params![
                generate_id(),
                now_ms(),
                self.entry_point.as_str(),
                &self.app_version,
                self.platform,
                &event.event,
                &event.endpoint,
                &event.command,
                &event.error_message,
                &event.error_details,
            ],
        )?;

        Ok(())
    }

    /// Record a backend call that succeeded, as `<command>_completed`
    pub fn log_completed(&self, command: &str, endpoint: &str) -> Result<()> {
        self.log(
            LogEvent::new(format!("{}_completed", command))
                .with_command(command)
                .with_endpoint(endpoint),
        )
    }

    /// Record a backend call that failed, as `<command>_failed`
    pub fn log_api_error(&self, command: &str, endpoint: &str, error: &CoreError) -> Result<()> {
        self.log(
            LogEvent::new(format!("{}_failed", command))
                .with_command(command)
                .with_endpoint(endpoint)
                .with_core_error(error),
        )
    }

    /// Query recent log entries
    ///
    /// Returns the most recent entries, up to the specified limit.
    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query_entries("", limit)
    }

    /// Query log entries with errors
    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query_entries("WHERE error_message IS NOT NULL", limit)
    }

    fn query_entries(&self, filter: &str, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        let sql = format!(
            r#"
            SELECT id, timestamp, entry_point, app_version, platform,
                   event, endpoint, command, error_message, error_details
            FROM sys_logs
            {}
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
            filter
        );
        let mut stmt = conn.prepare(&sql)?;

        let entries = stmt
            .query_map([limit as i64], |row| {
                Ok(LogEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    entry_point: row.get(2)?,
                    app_version: row.get(3)?,
                    platform: row.get(4)?,
                    event: row.get(5)?,
                    endpoint: row.get(6)?,
                    command: row.get(7)?,
                    error_message: row.get(8)?,
                    error_details: row.get(9)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(entries)
    }

    /// Number of entries that carry an error
    pub fn count_errors(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let count: u64 = conn.query_row(
            "SELECT COUNT(*) FROM sys_logs WHERE error_message IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Get the total number of log entries
    pub fn count(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM sys_logs", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete logs older than the specified timestamp (unix ms)
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let deleted = conn.execute(
            "DELETE FROM sys_logs WHERE timestamp < ?",
            [timestamp_ms],
        )?;
        Ok(deleted as u64)
    }

    /// Export logs to a file for troubleshooting
    ///
    /// Creates a copy of the logs database that can be sent for analysis.
    pub fn export(&self, output_path: &Path) -> Result<PathBuf> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        // Force checkpoint to ensure all data is written
        conn.execute("CHECKPOINT", [])?;

        // Copy the database file
        std::fs::copy(&self.db_path, output_path)?;

        Ok(output_path.to_path_buf())
    }

    /// Get the path to the logs database
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_logging_service_creation() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        assert!(service.db_path().exists());
    }

    #[test]
    fn test_reopen_skips_applied_migrations() {
        let dir = tempdir().unwrap();
        {
            let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();
            service.log(LogEvent::new("first_run")).unwrap();
        }
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.1").unwrap();
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_log_completed() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log_completed("events_list", "/events/list").unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "events_list_completed");
        assert_eq!(entries[0].command.as_deref(), Some("events_list"));
        assert_eq!(entries[0].endpoint.as_deref(), Some("/events/list"));
        assert!(entries[0].error_message.is_none());
        assert_eq!(entries[0].entry_point, "cli");
        assert_eq!(entries[0].app_version, "1.0.0");
    }

    #[test]
    fn test_endpoint_drops_query_string() {
        let event = LogEvent::new("x").with_endpoint("/merchant/transactions?account_reference=REF");
        assert_eq!(event.endpoint.as_deref(), Some("/merchant/transactions"));
    }

    #[test]
    fn test_log_api_error() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Library, "2.0.0").unwrap();

        let error = CoreError::request_failed(400, json!({"email": ["already registered"]}));
        service
            .log_api_error("signup", "/auth/signup/user", &error)
            .unwrap();
        service.log_completed("login", "/auth/login").unwrap();

        let errors = service.get_errors(10).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].event, "signup_failed");
        assert_eq!(errors[0].endpoint.as_deref(), Some("/auth/signup/user"));
        assert_eq!(errors[0].error_message.as_deref(), Some("email: already registered"));
        assert_eq!(errors[0].error_details.as_deref(), Some("request_failed status=400"));
        assert_eq!(errors[0].entry_point, "library");
        assert_eq!(service.count_errors().unwrap(), 1);
    }

    #[test]
    fn test_unauthenticated_error_details() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service
            .log_api_error("profile_show", "/users/profile", &CoreError::Unauthenticated)
            .unwrap();

        let errors = service.get_errors(10).unwrap();
        assert_eq!(errors[0].event, "profile_show_failed");
        assert_eq!(errors[0].error_details.as_deref(), Some("unauthenticated"));
    }

    #[test]
    fn test_count_and_delete() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log(LogEvent::new("event1")).unwrap();
        service.log(LogEvent::new("event2")).unwrap();
        service.log(LogEvent::new("event3")).unwrap();

        assert_eq!(service.count().unwrap(), 3);

        let deleted = service.delete_before(now_ms() + 1000).unwrap();
        assert_eq!(deleted, 3);
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_export() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log(LogEvent::new("test_event")).unwrap();

        let export_path = dir.path().join("export.duckdb");
        service.export(&export_path).unwrap();

        assert!(export_path.exists());
    }
}
