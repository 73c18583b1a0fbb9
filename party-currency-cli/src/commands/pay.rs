//! Pay command - buy notes for an event and get a checkout link

use anyhow::{bail, Result};
use colored::Colorize;
use party_currency_core::domain::{CurrencyBreakdown, Denomination};
use party_currency_core::services::FeedbackOptions;
use serde_json::json;

use super::{get_context, print_json, track};

pub async fn run(event_id: &str, n200: u32, n500: u32, n1000: u32, json: bool) -> Result<()> {
    let breakdown = CurrencyBreakdown::new()
        .with(Denomination::N200, n200)
        .with(Denomination::N500, n500)
        .with(Denomination::N1000, n1000);
    if breakdown.is_empty() {
        bail!("Choose at least one note, e.g. --n500 4");
    }

    let ctx = get_context()?;
    let total = breakdown.total();

    let transaction = track(
        "pay_create_transaction",
        "/payments/create-transaction",
        json,
        ctx.payment_service.create_transaction(event_id, &breakdown),
        FeedbackOptions::new()
            .loading("Creating transaction...")
            .no_success_message(),
    )
    .await?;

    let payment = track(
        "pay_generate_link",
        "/payments/pay",
        json,
        ctx.payment_service
            .generate_payment_link(&transaction.payment_reference),
        FeedbackOptions::new()
            .loading("Generating payment link...")
            .success("Payment link ready"),
    )
    .await?;

    if json {
        return print_json(&json!({
            "payment_reference": transaction.payment_reference,
            "amount": breakdown.total_json(),
            "payment": payment,
        }));
    }

    println!("Total: ₦{}", total);
    match payment.checkout_url() {
        Some(url) if payment.request_successful => {
            println!("Complete your payment at:");
            println!("  {}", url.cyan());
        }
        _ => {
            bail!(
                "Payment provider refused the request: {}",
                payment.response_message.as_deref().unwrap_or("no reason given")
            );
        }
    }
    Ok(())
}
