//! Merchant virtual accounts

use std::sync::Arc;

use serde_json::{json, Value as JsonValue};
use tracing::warn;

use crate::adapters::http::{ApiClient, Auth};
use crate::domain::result::{Error, Result};
use crate::domain::{MerchantTransactionList, NewVirtualAccount};

pub struct MerchantService {
    api: Arc<ApiClient>,
}

impl MerchantService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// The merchant's active reserved account, as returned by the backend
    pub async fn get_virtual_account(&self) -> Result<JsonValue> {
        self.api
            .get("/merchant/get-active-reserved-account", Auth::Required)
            .await
    }

    /// Reserve a new account for an event.
    ///
    /// The payment provider can refuse with a 2xx response; that is
    /// reported as a request failure carrying the whole body.
    pub async fn create_virtual_account(&self, account: &NewVirtualAccount) -> Result<JsonValue> {
        let body: JsonValue = self
            .api
            .post(
                "/merchant/create-reserved-account",
                &json!({
                    "event_id": account.event_id,
                    "customer_name": account.customer_name,
                    "bvn": account.bvn,
                }),
                Auth::Required,
            )
            .await?;
        unwrap_provider_response(body)
    }

    pub async fn delete_virtual_account(&self, account_reference: &str) -> Result<JsonValue> {
        self.api
            .delete(
                "/merchant/delete-reserved-account",
                &[("account_reference", account_reference.to_string())],
                Auth::Required,
            )
            .await
    }

    /// Payments received into the account
    pub async fn transactions(&self, account_reference: &str) -> Result<MerchantTransactionList> {
        self.api
            .get_with_query(
                "/merchant/transactions",
                &[("account_reference", account_reference.to_string())],
                Auth::Required,
            )
            .await
    }
}

/// `response.responseBody`, else `response`, else the whole body
fn unwrap_provider_response(body: JsonValue) -> Result<JsonValue> {
    let Some(response) = body.get("response") else {
        return Ok(body);
    };

    if response.get("requestSuccessful") == Some(&JsonValue::Bool(false)) {
        warn!("provider refused virtual account creation");
        return Err(Error::request_failed(200, body));
    }

    match response.get("responseBody") {
        Some(inner) if !inner.is_null() => Ok(inner.clone()),
        _ if response.is_null() => Ok(body),
        _ => Ok(response.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwraps_response_body() {
        let body = json!({
            "response": {
                "requestSuccessful": true,
                "responseBody": {"accountReference": "REF-1"}
            }
        });
        assert_eq!(
            unwrap_provider_response(body).unwrap(),
            json!({"accountReference": "REF-1"})
        );
    }

    #[test]
    fn test_falls_back_to_response_then_body() {
        let body = json!({"response": {"requestSuccessful": true}});
        assert_eq!(
            unwrap_provider_response(body).unwrap(),
            json!({"requestSuccessful": true})
        );

        let body = json!({"account_reference": "REF-2"});
        assert_eq!(unwrap_provider_response(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_unsuccessful_response_is_an_error() {
        let body = json!({
            "response": {"requestSuccessful": false, "responseMessage": "BVN mismatch"}
        });
        let err = unwrap_provider_response(body.clone()).unwrap_err();
        assert_eq!(err.status(), Some(200));
        assert_eq!(err.payload(), Some(&body));
    }
}
