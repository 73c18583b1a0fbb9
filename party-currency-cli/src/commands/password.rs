//! Password command - forgotten-password flow and password change

use anyhow::Result;
use clap::Subcommand;
use dialoguer::Password;
use party_currency_core::services::validation::PasswordChange;
use party_currency_core::services::FeedbackOptions;

use super::{get_context, password_or_prompt, print_json, track};

#[derive(Subcommand)]
pub enum PasswordCommands {
    /// Email a reset code
    Forgot {
        email: String,
        #[arg(long)]
        json: bool,
    },
    /// Check the emailed code
    Verify {
        email: String,
        code: String,
        #[arg(long)]
        json: bool,
    },
    /// Set a new password after verifying the code
    Reset {
        email: String,
        #[arg(long)]
        json: bool,
    },
    /// Change the password of the signed-in user
    Change {
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: PasswordCommands) -> Result<()> {
    let ctx = get_context()?;

    match command {
        PasswordCommands::Forgot { email, json } => {
            let response = track(
                "password_forgot",
                "/auth/password/code",
                json,
                ctx.auth_service.request_password_reset_code(&email),
                FeedbackOptions::form_submission().success("Reset code sent to your email"),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        PasswordCommands::Verify { email, code, json } => {
            let response = track(
                "password_verify",
                "/auth/password/token",
                json,
                ctx.auth_service.get_password_reset_token(&email, &code),
                FeedbackOptions::form_submission().success("Code verified"),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        PasswordCommands::Reset { email, json } => {
            let password = Password::new().with_prompt("New password").interact()?;
            let confirm = Password::new().with_prompt("Confirm new password").interact()?;
            let response = track(
                "password_reset",
                "/auth/password/reset",
                json,
                ctx.auth_service.reset_password(&email, &password, &confirm),
                FeedbackOptions::form_submission().success("Password reset successfully"),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        PasswordCommands::Change { json } => {
            let change = PasswordChange {
                current_password: password_or_prompt(None, "Current password")?,
                new_password: password_or_prompt(None, "New password")?,
                confirm_password: password_or_prompt(None, "Confirm new password")?,
            };
            let response = track(
                "password_change",
                "/users/change-password",
                json,
                ctx.profile_service.change_password(&change),
                FeedbackOptions::form_submission().success("Password changed successfully"),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
    }

    Ok(())
}
