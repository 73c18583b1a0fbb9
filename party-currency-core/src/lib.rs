//! Party Currency Core - typed client for the Party Currency backend
//!
//! This crate follows a hexagonal architecture:
//!
//! - **domain**: Backend resources (Event, Currency, UserProfile, etc.) and the error taxonomy
//! - **ports**: Trait definitions for credential storage and user feedback
//! - **services**: One service per backend area
//! - **adapters**: Concrete implementations (file credentials, reqwest client)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::credentials::FileCredentialStore;
use adapters::http::ApiClient;
use adapters::location::LocationClient;
use config::Config;
use ports::CredentialStore;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use services::{EntryPoint, LogEvent, LoggingService};
pub use domain::{
    Currency, CurrencyBreakdown, Denomination, Event, NewCurrency, NewEvent, UserProfile, UserRole,
};

/// Main context for Party Currency operations
///
/// Holds the configuration, the credential store, the shared API client
/// and every service built on top of it.
pub struct PartyCurrencyContext {
    pub config: Config,
    pub credentials: Arc<dyn CredentialStore>,
    pub api: Arc<ApiClient>,
    pub auth_service: AuthService,
    pub profile_service: ProfileService,
    pub event_service: EventService,
    pub currency_service: CurrencyService,
    pub merchant_service: MerchantService,
    pub payment_service: PaymentService,
    pub admin_service: AdminService,
    pub location_service: LocationService,
    pub util_service: UtilService,
    pub status_service: StatusService,
}

impl PartyCurrencyContext {
    /// Create a context backed by credentials in `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let mut store = FileCredentialStore::with_token_duration(data_dir, config.token_duration_days)?;
        if let Some(token) = &config.env_token {
            store = store.with_session_token(token.clone());
        }

        Self::with_credentials(config, Arc::new(store))
    }

    /// Create a context with a caller-provided credential store
    pub fn with_credentials(config: Config, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let timeout = config.request_timeout();
        let api = Arc::new(ApiClient::with_timeout(
            &config.base_url,
            Arc::clone(&credentials),
            timeout,
        )?);
        let location = LocationClient::with_timeout(&config.location_base_url, timeout)?;

        Ok(Self {
            auth_service: AuthService::new(Arc::clone(&api)),
            profile_service: ProfileService::new(Arc::clone(&api)),
            event_service: EventService::new(Arc::clone(&api)),
            currency_service: CurrencyService::new(Arc::clone(&api)),
            merchant_service: MerchantService::new(Arc::clone(&api)),
            payment_service: PaymentService::new(Arc::clone(&api)),
            admin_service: AdminService::new(Arc::clone(&api)),
            location_service: LocationService::new(location),
            util_service: UtilService::new(Arc::clone(&api)),
            status_service: StatusService::new(Arc::clone(&api)),
            config,
            credentials,
            api,
        })
    }
}
