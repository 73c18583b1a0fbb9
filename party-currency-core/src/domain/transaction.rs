//! Transaction and payment domain models

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::currency::Denomination;

/// Deserialize an amount that can be a number or a string
pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    parse_amount(&value).map_err(D::Error::custom)
}

/// Optional variant of [`deserialize_amount`]
pub(crate) fn deserialize_optional_amount<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => parse_amount(&v).map(Some).map_err(D::Error::custom),
    }
}

fn parse_amount(value: &JsonValue) -> std::result::Result<Decimal, String> {
    match value {
        JsonValue::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .map_err(|e| format!("invalid decimal: {}", e)),
        JsonValue::String(s) => s
            .trim()
            .trim_start_matches('₦')
            .replace(',', "")
            .parse::<Decimal>()
            .map_err(|e| format!("invalid decimal: {}", e)),
        _ => Err("expected number or string for amount".to_string()),
    }
}

/// Count of notes per denomination for a payment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyBreakdown {
    counts: BTreeMap<Denomination, u32>,
}

impl CurrencyBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of notes for a denomination
    pub fn with(mut self, denomination: Denomination, count: u32) -> Self {
        self.set(denomination, count);
        self
    }

    pub fn set(&mut self, denomination: Denomination, count: u32) {
        if count == 0 {
            self.counts.remove(&denomination);
        } else {
            self.counts.insert(denomination, count);
        }
    }

    pub fn count(&self, denomination: Denomination) -> u32 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of face value times count
    pub fn total(&self) -> Decimal {
        self.counts
            .iter()
            .map(|(denomination, count)| Decimal::from(denomination.value()) * Decimal::from(*count))
            .sum()
    }

    /// [`total`](Self::total) as a JSON number
    pub fn total_json(&self) -> JsonValue {
        let total = self.total();
        match total.to_u64() {
            Some(naira) => JsonValue::from(naira),
            // Face values are whole naira, so this only covers sums past u64
            None => total.to_f64().map(JsonValue::from).unwrap_or(JsonValue::Null),
        }
    }

    /// `{"200": n, "500": n, "1000": n}` as sent to the payments API.
    ///
    /// The payment form always sends the three payable notes, zero or not.
    pub fn to_request_value(&self) -> JsonValue {
        let mut map = Map::new();
        for denomination in Denomination::PAYABLE {
            map.insert(
                denomination.value().to_string(),
                JsonValue::from(self.count(denomination)),
            );
        }
        for (denomination, count) in &self.counts {
            map.entry(denomination.value().to_string())
                .or_insert_with(|| JsonValue::from(*count));
        }
        JsonValue::Object(map)
    }
}

/// Response of `/payments/create-transaction`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    pub payment_reference: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Response of `/payments/pay`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayResponse {
    #[serde(default)]
    pub request_successful: bool,
    #[serde(default)]
    pub response_message: Option<String>,
    #[serde(default)]
    pub response_code: Option<String>,
    #[serde(default)]
    pub response_body: Option<PayResponseBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayResponseBody {
    #[serde(default)]
    pub transaction_reference: Option<String>,
    #[serde(default)]
    pub payment_reference: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub enabled_payment_method: Vec<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl PayResponse {
    pub fn checkout_url(&self) -> Option<&str> {
        self.response_body.as_ref()?.checkout_url.as_deref()
    }
}

/// A payment as listed to admins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminTransaction {
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub payment_reference: Option<String>,
    #[serde(default)]
    pub payment_description: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub contract_code: Option<String>,
    #[serde(default)]
    pub breakdown: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Admin transaction listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminTransactionList {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub transactions: Vec<AdminTransaction>,
}

/// A payment received into a merchant's virtual account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantTransaction {
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantTransactionList {
    #[serde(default)]
    pub transactions: Vec<MerchantTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_breakdown_total() {
        let breakdown = CurrencyBreakdown::new()
            .with(Denomination::N200, 3)
            .with(Denomination::N500, 2)
            .with(Denomination::N1000, 1);
        assert_eq!(breakdown.total(), Decimal::from(2600));
        assert_eq!(breakdown.total_json(), json!(2600));
        assert!(breakdown.total_json().is_u64());
    }

    #[test]
    fn test_breakdown_request_value_has_payable_notes() {
        let breakdown = CurrencyBreakdown::new().with(Denomination::N500, 4);
        assert_eq!(
            breakdown.to_request_value(),
            json!({"200": 0, "500": 4, "1000": 0})
        );
    }

    #[test]
    fn test_zero_count_removes_denomination() {
        let mut breakdown = CurrencyBreakdown::new().with(Denomination::N200, 2);
        breakdown.set(Denomination::N200, 0);
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.total(), Decimal::ZERO);
    }

    #[test]
    fn test_admin_transaction_string_amount() {
        let tx: AdminTransaction = serde_json::from_value(json!({
            "amount": "15000.00",
            "customer_name": "Bisi",
            "status": "success",
            "event_id": "EVT9",
            "customer_email": "bisi@example.com",
            "payment_reference": "PAY-1",
            "payment_description": "Party notes",
            "currency_code": "NGN",
            "contract_code": "123",
            "breakdown": "200:10"
        }))
        .unwrap();
        assert_eq!(tx.amount, Decimal::new(1500000, 2));
    }

    #[test]
    fn test_merchant_transaction_numeric_amount() {
        let tx: MerchantTransaction = serde_json::from_value(json!({
            "amount": 2500.5,
            "currency": "NGN",
            "status": "PAID",
            "reference": "MNFY|1",
            "date": "2025-01-04 10:00:00",
            "description": null,
            "payment_method": "ACCOUNT_TRANSFER"
        }))
        .unwrap();
        assert_eq!(tx.amount, Some(Decimal::new(25005, 1)));
    }

    #[test]
    fn test_pay_response_checkout_url() {
        let response: PayResponse = serde_json::from_value(json!({
            "requestSuccessful": true,
            "responseMessage": "success",
            "responseCode": "0",
            "responseBody": {
                "transactionReference": "MNFY|20",
                "paymentReference": "PAY-1",
                "merchantName": "Party Currency",
                "apiKey": "MK_TEST",
                "redirectUrl": "https://example.com/callback",
                "enabledPaymentMethod": ["CARD", "ACCOUNT_TRANSFER"],
                "checkoutUrl": "https://checkout.example.com/PAY-1"
            }
        }))
        .unwrap();
        assert_eq!(response.checkout_url(), Some("https://checkout.example.com/PAY-1"));
        let body = response.response_body.unwrap();
        assert_eq!(body.enabled_payment_method.len(), 2);
        assert_eq!(body.extra["apiKey"], json!("MK_TEST"));
    }
}
