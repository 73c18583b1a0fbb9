//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Services depend
//! only on these traits, not on concrete implementations.

mod credential_store;
mod notifier;

pub use credential_store::{CredentialStore, StoredAuth};
pub use notifier::{Notifier, Pending};
