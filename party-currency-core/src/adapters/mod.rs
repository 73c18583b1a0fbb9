//! Adapter implementations
//!
//! Adapters implement the port traits and talk to the outside world:
//! - File and in-memory credential stores
//! - The authenticated reqwest client for the Party Currency backend
//! - The third-party states/LGA lookup client

pub mod credentials;
pub mod http;
pub mod location;
