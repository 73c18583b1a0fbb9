//! Currency command - design and manage party currency notes

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use party_currency_core::domain::{Currency, CurrencyImage, CurrencyUpdate, Denomination, NewCurrency};
use party_currency_core::services::FeedbackOptions;

use super::{get_context, print_json, track};
use crate::output::{cell, create_table};

#[derive(Subcommand)]
pub enum CurrencyCommands {
    /// List your currency designs
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one design
    Show {
        currency_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Save a new design
    Save {
        #[arg(long)]
        name: String,
        /// Text printed on the front
        #[arg(long)]
        front_text: String,
        /// Text printed on the back
        #[arg(long)]
        back_text: Option<String>,
        #[arg(long)]
        event_id: String,
        /// 100, 200, 500 or 1000
        #[arg(long)]
        denomination: Option<Denomination>,
        /// Front portrait: image file or data URL
        #[arg(long)]
        front_image: Option<String>,
        /// Back portrait: image file or data URL
        #[arg(long)]
        back_image: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Update fields of a design
    Update {
        currency_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        front_text: Option<String>,
        #[arg(long)]
        back_text: Option<String>,
        #[arg(long)]
        event_id: Option<String>,
        #[arg(long)]
        front_image: Option<String>,
        #[arg(long)]
        back_image: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Delete a design
    Delete {
        currency_id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        #[arg(long)]
        json: bool,
    },
}

/// A `data:` URL is decoded inline; anything else is a file path
fn image_arg(value: Option<String>, stem: &str) -> Result<Option<CurrencyImage>> {
    let Some(value) = value else {
        return Ok(None);
    };
    if value.starts_with("data:") {
        let image = CurrencyImage::from_data_url(&value, stem).map_err(|e| anyhow!(e))?;
        Ok(Some(image))
    } else {
        Ok(Some(CurrencyImage::File(PathBuf::from(value))))
    }
}

pub async fn run(command: CurrencyCommands) -> Result<()> {
    let ctx = get_context()?;

    match command {
        CurrencyCommands::List { json } => {
            let currencies = track(
                "currency_list",
                "/currencies/get-all-currencies",
                json,
                ctx.currency_service.list(),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&currencies);
            }
            if currencies.is_empty() {
                println!("No currencies saved yet.");
                return Ok(());
            }
            print_currencies(&currencies);
        }
        CurrencyCommands::Show { currency_id, json } => {
            let currency = track(
                "currency_show",
                "/currencies/get-currency",
                json,
                ctx.currency_service.get(&currency_id),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&currency);
            }
            println!("{}", cell(currency.currency_name.as_deref()).bold());
            let mut table = create_table();
            table.add_row(vec!["ID".to_string(), currency.currency_id.clone()]);
            table.add_row(vec![
                "Denomination".to_string(),
                currency.denomination.map(|d| format!("₦{}", d)).unwrap_or_else(|| "-".to_string()),
            ]);
            table.add_row(vec!["Event".to_string(), cell(currency.event_id.as_deref())]);
            table.add_row(vec!["Front text".to_string(), cell(currency.front_celebration_text.as_deref())]);
            table.add_row(vec!["Back text".to_string(), cell(currency.back_celebration_text.as_deref())]);
            table.add_row(vec!["Front image".to_string(), cell(currency.front_image.as_deref())]);
            table.add_row(vec!["Back image".to_string(), cell(currency.back_image.as_deref())]);
            println!("{}", table);
        }
        CurrencyCommands::Save {
            name,
            front_text,
            back_text,
            event_id,
            denomination,
            front_image,
            back_image,
            json,
        } => {
            let currency = NewCurrency {
                currency_name: name,
                front_celebration_text: front_text,
                back_celebration_text: back_text,
                event_id,
                denomination,
                front_image: image_arg(front_image, "front_image")?,
                back_image: image_arg(back_image, "back_image")?,
            };
            let response = track(
                "currency_save",
                "/currencies/save-currency",
                json,
                ctx.currency_service.save(&currency),
                FeedbackOptions::new()
                    .loading("Saving currency...")
                    .success("Currency saved successfully!"),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        CurrencyCommands::Update {
            currency_id,
            name,
            front_text,
            back_text,
            event_id,
            front_image,
            back_image,
            json,
        } => {
            let update = CurrencyUpdate {
                currency_name: name,
                front_celebration_text: front_text,
                back_celebration_text: back_text,
                event_id,
                front_image: image_arg(front_image, "front_image")?,
                back_image: image_arg(back_image, "back_image")?,
            };
            let response = track(
                "currency_update",
                "/currencies/update-currency",
                json,
                ctx.currency_service.update(&currency_id, &update),
                FeedbackOptions::new()
                    .loading("Updating currency...")
                    .success("Currency updated successfully!"),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        CurrencyCommands::Delete {
            currency_id,
            force,
            json,
        } => {
            if !force
                && !json
                && !Confirm::new()
                    .with_prompt(format!("Delete currency {}?", currency_id))
                    .default(false)
                    .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }

            let response = track(
                "currency_delete",
                "/currencies/delete-currency",
                json,
                ctx.currency_service.delete(&currency_id),
                FeedbackOptions::new()
                    .loading("Deleting currency...")
                    .success("Currency deleted"),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
    }

    Ok(())
}

fn print_currencies(currencies: &[Currency]) {
    let mut table = create_table();
    table.set_header(vec!["ID", "Name", "Denomination", "Event", "Updated"]);
    for currency in currencies {
        table.add_row(vec![
            currency.currency_id.clone(),
            cell(currency.currency_name.as_deref()),
            currency.denomination.map(|d| format!("₦{}", d)).unwrap_or_else(|| "-".to_string()),
            cell(currency.event_id.as_deref()),
            cell(currency.updated_at.as_deref()),
        ]);
    }
    println!("{}", table);
}
