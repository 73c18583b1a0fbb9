//! Merchant virtual account models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A reserved bank account a merchant collects event payments into.
/// Owned by the backend; only the reference is relied upon here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualAccount {
    #[serde(alias = "account_reference")]
    pub account_reference: String,
    #[serde(default, alias = "account_name")]
    pub account_name: Option<String>,
    #[serde(default, alias = "account_number")]
    pub account_number: Option<String>,
    #[serde(default, alias = "bank_name")]
    pub bank_name: Option<String>,
    #[serde(default, alias = "customer_name")]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl VirtualAccount {
    /// Find the reference in any of the shapes the backend returns:
    /// the account itself, or wrapped under `account`/`data`/`responseBody`.
    pub fn from_response(value: &JsonValue) -> Option<Self> {
        if let Ok(account) = serde_json::from_value::<VirtualAccount>(value.clone()) {
            return Some(account);
        }
        ["account", "data", "responseBody", "response"]
            .iter()
            .filter_map(|key| value.get(*key))
            .find_map(Self::from_response)
    }
}

/// Fields for reserving a new virtual account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVirtualAccount {
    pub event_id: String,
    pub customer_name: String,
    /// Bank verification number; never logged
    pub bvn: String,
}
