//! Paying for an event's notes

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::adapters::http::{ApiClient, Auth};
use crate::domain::result::Result;
use crate::domain::validation::ValidationErrors;
use crate::domain::{CreateTransactionResponse, CurrencyBreakdown, PayResponse};

pub struct PaymentService {
    api: Arc<ApiClient>,
}

impl PaymentService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Open a transaction for `breakdown`; the amount is its face value total
    pub async fn create_transaction(
        &self,
        event_id: &str,
        breakdown: &CurrencyBreakdown,
    ) -> Result<CreateTransactionResponse> {
        if breakdown.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("currency", "Select at least one note");
            return Err(errors.into());
        }

        let amount = breakdown.total_json();
        debug!(event_id, %amount, "creating transaction");
        self.api
            .post(
                "/payments/create-transaction",
                &json!({
                    "event_id": event_id,
                    "amount": amount,
                    "currency": breakdown.to_request_value(),
                }),
                Auth::Required,
            )
            .await
    }

    /// Checkout link for an open transaction
    pub async fn generate_payment_link(&self, payment_reference: &str) -> Result<PayResponse> {
        self.api
            .post(
                "/payments/pay",
                &json!({ "payment_reference": payment_reference }),
                Auth::Required,
            )
            .await
    }
}
