//! Merchant command - virtual accounts and received payments

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use party_currency_core::domain::{NewVirtualAccount, VirtualAccount};
use party_currency_core::services::FeedbackOptions;

use super::{get_context, password_or_prompt, print_json, track};
use crate::output::{self, cell, create_table};

#[derive(Subcommand)]
pub enum MerchantCommands {
    /// Show the active virtual account
    Account {
        #[arg(long)]
        json: bool,
    },
    /// Reserve a virtual account for an event
    CreateAccount {
        #[arg(long)]
        event_id: String,
        #[arg(long)]
        customer_name: String,
        /// Bank verification number (prompted when omitted)
        #[arg(long)]
        bvn: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Delete a virtual account
    DeleteAccount {
        account_reference: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        #[arg(long)]
        json: bool,
    },
    /// Payments received into a virtual account
    Transactions {
        /// Account reference (defaults to the active account)
        account_reference: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: MerchantCommands) -> Result<()> {
    let ctx = get_context()?;

    match command {
        MerchantCommands::Account { json } => {
            let account = track(
                "merchant_account",
                "/merchant/get-active-reserved-account",
                json,
                ctx.merchant_service.get_virtual_account(),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&account);
            }
            match VirtualAccount::from_response(&account) {
                Some(account) => print_account(&account),
                None => output::warning("No virtual account found. Create one to get started."),
            }
        }
        MerchantCommands::CreateAccount {
            event_id,
            customer_name,
            bvn,
            json,
        } => {
            let bvn = password_or_prompt(bvn, "BVN")?;
            let account = NewVirtualAccount {
                event_id,
                customer_name,
                bvn,
            };
            let created = track(
                "merchant_create_account",
                "/merchant/create-reserved-account",
                json,
                ctx.merchant_service.create_virtual_account(&account),
                FeedbackOptions::form_submission().success("Virtual account created"),
            )
            .await?;

            if json {
                return print_json(&created);
            }
            if let Some(account) = VirtualAccount::from_response(&created) {
                print_account(&account);
            }
        }
        MerchantCommands::DeleteAccount {
            account_reference,
            force,
            json,
        } => {
            if !force
                && !json
                && !Confirm::new()
                    .with_prompt(format!("Delete virtual account {}?", account_reference))
                    .default(false)
                    .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }

            let response = track(
                "merchant_delete_account",
                "/merchant/delete-reserved-account",
                json,
                ctx.merchant_service.delete_virtual_account(&account_reference),
                FeedbackOptions::new()
                    .loading("Deleting virtual account...")
                    .success("Virtual account deleted"),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        MerchantCommands::Transactions {
            account_reference,
            json,
        } => {
            let reference = match account_reference {
                Some(reference) => reference,
                None => {
                    let account = track(
                        "merchant_account",
                        "/merchant/get-active-reserved-account",
                        json,
                        ctx.merchant_service.get_virtual_account(),
                        FeedbackOptions::api_request().quiet().no_success_message(),
                    )
                    .await?;
                    match VirtualAccount::from_response(&account) {
                        Some(account) => account.account_reference,
                        None => bail!("No virtual accounts found. Create one to get started."),
                    }
                }
            };

            let list = track(
                "merchant_transactions",
                "/merchant/transactions",
                json,
                ctx.merchant_service.transactions(&reference),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&list);
            }
            if list.transactions.is_empty() {
                println!("No transactions yet.");
                return Ok(());
            }

            let mut table = create_table();
            table.set_header(vec!["Date", "Reference", "Amount", "Status", "Method", "Description"]);
            for tx in &list.transactions {
                table.add_row(vec![
                    cell(tx.date.as_deref()),
                    cell(tx.reference.as_deref()),
                    tx.amount
                        .map(|a| format!("{} {}", tx.currency.as_deref().unwrap_or("NGN"), a))
                        .unwrap_or_else(|| "-".to_string()),
                    cell(tx.status.as_deref()),
                    cell(tx.payment_method.as_deref()),
                    cell(tx.description.as_deref()),
                ]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn print_account(account: &VirtualAccount) {
    println!("{}", cell(account.account_name.as_deref()).bold());
    let mut table = create_table();
    table.add_row(vec!["Reference".to_string(), account.account_reference.clone()]);
    table.add_row(vec!["Bank".to_string(), cell(account.bank_name.as_deref())]);
    table.add_row(vec!["Account number".to_string(), cell(account.account_number.as_deref())]);
    table.add_row(vec!["Status".to_string(), cell(account.status.as_deref())]);
    println!("{}", table);
}
