//! Profile command - view and edit the signed-in user's profile

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use party_currency_core::domain::ProfileUpdate;
use party_currency_core::services::FeedbackOptions;
use serde_json::Value as JsonValue;

use super::{get_context, print_json, track};
use crate::output::{self, cell, create_table};

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Update profile fields
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        business_type: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Upload a new profile picture
    UploadPicture {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Show the profile picture URL
    Picture {
        #[arg(long)]
        json: bool,
    },
    /// List your payments
    Transactions {
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: ProfileCommands) -> Result<()> {
    let ctx = get_context()?;

    match command {
        ProfileCommands::Show { json } => {
            let profile = track(
                "profile_show",
                "/users/profile",
                json,
                ctx.profile_service.get_profile(),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&profile);
            }

            println!("{}", profile.display_name().bold());
            let mut table = create_table();
            table.add_row(vec!["Role".to_string(), profile.role().to_string()]);
            table.add_row(vec!["Email".to_string(), cell(profile.email.as_deref())]);
            table.add_row(vec!["Phone".to_string(), cell(profile.phonenumber.as_deref())]);
            table.add_row(vec!["Location".to_string(), cell(profile.location.as_deref())]);
            if let Some(spent) = &profile.total_amount_spent {
                table.add_row(vec!["Total spent".to_string(), json_text(spent)]);
            }
            println!("{}", table);
        }
        ProfileCommands::Update {
            first_name,
            last_name,
            phone,
            business_type,
            country,
            state,
            city,
            json,
        } => {
            let update = ProfileUpdate {
                firstname: first_name,
                lastname: last_name,
                phonenumber: phone,
                business_type,
                country,
                state,
                city,
            };
            if serde_json::to_value(&update)?.as_object().is_some_and(|o| o.is_empty()) {
                bail!("Nothing to update. Pass at least one field, e.g. --first-name.");
            }

            let response = track(
                "profile_update",
                "/users/update-profile",
                json,
                ctx.profile_service.update_profile(&update),
                FeedbackOptions::form_submission().success("Profile updated"),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        ProfileCommands::UploadPicture { path, json } => {
            let response = track(
                "profile_upload_picture",
                "/users/upload-picture",
                json,
                ctx.profile_service.upload_picture(&path),
                FeedbackOptions::new()
                    .loading("Uploading picture...")
                    .success("Profile picture updated"),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        ProfileCommands::Picture { json } => {
            let picture = track(
                "profile_picture",
                "/users/get-picture",
                json,
                ctx.profile_service.get_picture(),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;
            if json {
                return print_json(&picture);
            }
            match picture.profile_picture {
                Some(url) => println!("{}", url),
                None => output::warning("No profile picture set"),
            }
        }
        ProfileCommands::Transactions { json } => {
            let transactions = track(
                "profile_transactions",
                "/users/get-user-transactions",
                json,
                ctx.profile_service.get_user_transactions(),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;
            if json {
                return print_json(&transactions);
            }
            print_rows(&transactions);
        }
    }

    Ok(())
}

/// Render a list of flat objects as a table, columns from the first row
pub fn print_rows(value: &JsonValue) {
    let rows = match value {
        JsonValue::Array(rows) => rows.as_slice(),
        JsonValue::Object(map) => match map.values().find_map(|v| v.as_array()) {
            Some(rows) => rows.as_slice(),
            None => &[],
        },
        _ => &[],
    };

    let Some(JsonValue::Object(first)) = rows.first() else {
        println!("Nothing to show.");
        return;
    };

    let columns: Vec<String> = first.keys().cloned().collect();
    let mut table = create_table();
    table.set_header(columns.clone());
    for row in rows {
        table.add_row(
            columns
                .iter()
                .map(|c| row.get(c).map(json_text).unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }
    println!("{}", table);
}

/// Display text for a JSON value without string quotes
pub fn json_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => "-".to_string(),
        other => other.to_string(),
    }
}
