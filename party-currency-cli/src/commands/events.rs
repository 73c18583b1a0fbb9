//! Events command - manage your events

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use party_currency_core::domain::{Event, NewEvent};
use party_currency_core::services::FeedbackOptions;

use super::profile::print_rows;
use super::{get_context, print_json, track};
use crate::output::{cell, create_table};

#[derive(Subcommand)]
pub enum EventCommands {
    /// List your events
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one event
    Show {
        event_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Create an event
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        street_address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        /// Local government area
        #[arg(long)]
        lga: String,
        #[arg(long)]
        postal_code: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end_date: String,
        #[arg(long, default_value = "")]
        delivery_address: String,
        /// Ask the backend to reconcile payments for this event
        #[arg(long)]
        reconciliation: bool,
        #[arg(long)]
        json: bool,
    },
    /// Delete an event
    Delete {
        event_id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        #[arg(long)]
        json: bool,
    },
    /// Currency designs attached to an event
    Currencies {
        event_id: String,
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: EventCommands) -> Result<()> {
    let ctx = get_context()?;

    match command {
        EventCommands::List { json } => {
            let events = track(
                "events_list",
                "/events/list",
                json,
                ctx.event_service.list(),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&events);
            }
            if events.is_empty() {
                println!("No events yet. Create one with 'party events create'.");
                return Ok(());
            }
            print_events(&events);
        }
        EventCommands::Show { event_id, json } => {
            let event = track(
                "events_show",
                "/events/get",
                json,
                ctx.event_service.get(&event_id),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&event);
            }
            print_event(&event);
        }
        EventCommands::Create {
            name,
            description,
            street_address,
            city,
            state,
            lga,
            postal_code,
            start_date,
            end_date,
            delivery_address,
            reconciliation,
            json,
        } => {
            let new_event = NewEvent {
                event_name: name,
                event_description: description,
                street_address,
                city,
                state,
                lga,
                postal_code,
                start_date,
                end_date,
                delivery_address,
                reconciliation_service: reconciliation,
            };
            let event = track(
                "events_create",
                "/events/create",
                json,
                ctx.event_service.create(&new_event),
                FeedbackOptions::form_submission().success("Event created successfully!"),
            )
            .await?;

            if json {
                return print_json(&event);
            }
            println!("Event ID: {}", event.event_id.bold());
        }
        EventCommands::Delete {
            event_id,
            force,
            json,
        } => {
            if !force
                && !json
                && !Confirm::new()
                    .with_prompt(format!("Delete event {}?", event_id))
                    .default(false)
                    .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }

            let response = track(
                "events_delete",
                "/events/delete",
                json,
                ctx.event_service.delete(&event_id),
                FeedbackOptions::new()
                    .loading("Deleting event...")
                    .success("Event deleted"),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        EventCommands::Currencies { event_id, json } => {
            let currencies = track(
                "events_currencies",
                "/events/get-currency",
                json,
                ctx.event_service.currencies_for_event(&event_id),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;
            if json {
                return print_json(&currencies);
            }
            print_rows(&currencies);
        }
    }

    Ok(())
}

pub fn print_events(events: &[Event]) {
    let mut table = create_table();
    table.set_header(vec!["ID", "Name", "City", "LGA", "Start", "End", "Payment", "Delivery"]);
    for event in events {
        table.add_row(vec![
            event.event_id.clone(),
            event.event_name.clone(),
            cell(event.city.as_deref()),
            cell(event.lga.as_deref()),
            cell(event.start_date.as_deref()),
            cell(event.end_date.as_deref()),
            cell(event.payment_status.as_deref()),
            cell(event.delivery_status.as_deref()),
        ]);
    }
    println!("{}", table);
}

fn print_event(event: &Event) {
    println!("{}", event.event_name.bold());
    if let Some(description) = event.event_description.as_deref().filter(|d| !d.is_empty()) {
        println!("{}", description);
    }
    println!();

    let mut table = create_table();
    let address = [
        event.street_address.as_deref(),
        event.city.as_deref(),
        event.lga.as_deref(),
        event.state.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");

    table.add_row(vec!["ID".to_string(), event.event_id.clone()]);
    table.add_row(vec!["Address".to_string(), address]);
    table.add_row(vec!["Dates".to_string(), format!(
        "{} to {}",
        cell(event.start_date.as_deref()),
        cell(event.end_date.as_deref())
    )]);
    table.add_row(vec!["Delivery address".to_string(), cell(event.delivery_address.as_deref())]);
    table.add_row(vec!["Payment".to_string(), cell(event.payment_status.as_deref())]);
    table.add_row(vec!["Delivery".to_string(), cell(event.delivery_status.as_deref())]);
    println!("{}", table);
}
