//! Signup command - register a customer or a merchant

use anyhow::Result;
use clap::Subcommand;
use dialoguer::Password;
use party_currency_core::services::validation::{CelebrantSignup, MerchantSignup};
use party_currency_core::services::FeedbackOptions;

use super::{get_context, print_json, track};
use crate::output;

#[derive(Subcommand)]
pub enum SignupCommands {
    /// Register as a customer (celebrant)
    Customer {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// Phone number starting with +234
        #[arg(long)]
        phone: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Register as a merchant
    Merchant {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// Phone number starting with +234
        #[arg(long)]
        phone: String,
        #[arg(long)]
        business_type: String,
        #[arg(long, default_value = "Nigeria")]
        country: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        city: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Password and its confirmation; a flag value confirms itself
fn new_password(value: Option<String>) -> Result<(String, String)> {
    match value {
        Some(password) => Ok((password.clone(), password)),
        None => {
            let password = Password::new().with_prompt("Password").interact()?;
            let confirm = Password::new().with_prompt("Confirm password").interact()?;
            Ok((password, confirm))
        }
    }
}

pub async fn run(command: SignupCommands) -> Result<()> {
    let ctx = get_context()?;

    match command {
        SignupCommands::Customer {
            first_name,
            last_name,
            email,
            phone,
            password,
            json,
        } => {
            let (password, confirm_password) = new_password(password)?;
            let form = CelebrantSignup {
                first_name,
                last_name,
                email,
                password,
                confirm_password,
                phone_number: phone,
            };
            let response = track(
                "signup_customer",
                "/auth/signup/user",
                json,
                ctx.auth_service.signup_celebrant(&form),
                FeedbackOptions::form_submission().success("Account created successfully!"),
            )
            .await?;
            if json {
                return print_json(&response);
            }
        }
        SignupCommands::Merchant {
            first_name,
            last_name,
            email,
            phone,
            business_type,
            country,
            state,
            city,
            password,
            json,
        } => {
            let (password, confirm_password) = new_password(password)?;
            let form = MerchantSignup {
                first_name,
                last_name,
                email,
                password,
                confirm_password,
                business_type,
                country,
                state,
                city,
                phone_number: phone,
            };
            let response = track(
                "signup_merchant",
                "/auth/signup/merchant",
                json,
                ctx.auth_service.signup_merchant(&form),
                FeedbackOptions::form_submission().success("Merchant account created successfully!"),
            )
            .await?;
            if json {
                return print_json(&response);
            }
        }
    }

    output::info("You can now sign in with 'party login'.");
    Ok(())
}
