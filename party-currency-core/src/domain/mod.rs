//! Core domain entities
//!
//! Pass-through DTOs for backend resources plus the error taxonomy.
//! These are plain data structures with small helpers - no I/O.

mod account;
pub mod currency;
mod event;
pub mod messages;
pub mod result;
mod statistics;
pub mod transaction;
mod user;
pub mod validation;

pub use account::{NewVirtualAccount, VirtualAccount};
pub use currency::{Currency, CurrencyImage, CurrencyUpdate, Denomination, NewCurrency};
pub use event::{DeliveryStatus, Event, EventFilters, EventPage, EventQuery, NewEvent, Pagination};
pub use statistics::AdminStatistics;
pub use transaction::{
    AdminTransaction, AdminTransactionList, CreateTransactionResponse, CurrencyBreakdown,
    MerchantTransaction, MerchantTransactionList, PayResponse, PayResponseBody,
};
pub use user::{
    AdminUser, MessageResponse, ProfileUpdate, UserLookup, UserProfile, UserRole, UserSummary,
};
pub use validation::ValidationErrors;
