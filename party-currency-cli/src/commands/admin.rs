//! Admin command - dashboard statistics, users, events and payments

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use party_currency_core::domain::{DeliveryStatus, EventQuery};
use party_currency_core::services::FeedbackOptions;

use super::events::print_events;
use super::{get_context, print_json, track};
use crate::output::{cell, create_table};

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Dashboard statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// List users
    Users {
        #[arg(long)]
        json: bool,
    },
    /// Look up a user by email
    User {
        email: String,
        #[arg(long)]
        json: bool,
    },
    /// Activate a user
    Activate {
        email: String,
        #[arg(long)]
        json: bool,
    },
    /// Suspend a user
    Suspend {
        email: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a user
    DeleteUser {
        email: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        #[arg(long)]
        json: bool,
    },
    /// List events across all users
    Events {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "10")]
        page_size: u32,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "-created_at")]
        sort_by: String,
        #[arg(long)]
        json: bool,
    },
    /// Move an event to a delivery status
    SetStatus {
        event_id: String,
        /// pending payment, pending, delivered or cancelled
        status: DeliveryStatus,
        #[arg(long)]
        json: bool,
    },
    /// List all payments
    Transactions {
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: AdminCommands) -> Result<()> {
    let ctx = get_context()?;
    let admin = &ctx.admin_service;

    match command {
        AdminCommands::Stats { json } => {
            let stats = track(
                "admin_stats",
                "/admin/get-admin-statistics",
                json,
                admin.statistics(),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&stats);
            }

            println!("{}", "Dashboard".bold());
            let mut table = create_table();
            table.set_header(vec!["", "Total", "This week", "Change"]);
            table.add_row(vec![
                "Active users".to_string(),
                stats.total_active_users.to_string(),
                stats.new_active_users_this_week.to_string(),
                format!("{:+.1}%", stats.percentage_increase),
            ]);
            table.add_row(vec![
                "Transactions".to_string(),
                format!(
                    "{} completed / {} pending",
                    stats.total_completed_transactions, stats.total_pending_transactions
                ),
                stats.transactions_this_week.to_string(),
                format!("{:+.1}%", stats.percentage_increase_transactions),
            ]);
            table.add_row(vec![
                "Events".to_string(),
                stats.total_events.to_string(),
                stats.events_this_week.to_string(),
                format!("{:+.1}%", stats.percentage_increase_events),
            ]);
            println!("{}", table);
        }
        AdminCommands::Users { json } => {
            let users = track(
                "admin_users",
                "/admin/get-users",
                json,
                admin.users(),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&users);
            }
            let mut table = create_table();
            table.set_header(vec!["Username", "Name", "Role", "Active", "Last login", "Total"]);
            for user in &users {
                table.add_row(vec![
                    cell(user.username.as_deref()),
                    cell(user.name.as_deref()),
                    cell(user.role.as_deref()),
                    if user.is_active { "yes".green().to_string() } else { "no".red().to_string() },
                    cell(user.last_login.as_deref()),
                    cell(user.total_amount.as_deref()),
                ]);
            }
            println!("{}", table);
            println!("{} user(s)", users.len());
        }
        AdminCommands::User { email, json } => {
            let lookup = track(
                "admin_user",
                "/admin/get-user",
                json,
                admin.user_by_email(&email),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&lookup);
            }
            let user = &lookup.user;
            let mut table = create_table();
            table.add_row(vec!["Email".to_string(), user.email.clone()]);
            table.add_row(vec!["First name".to_string(), cell(user.first_name.as_deref())]);
            table.add_row(vec!["Last name".to_string(), cell(user.last_name.as_deref())]);
            table.add_row(vec!["Phone".to_string(), cell(user.phone_number.as_deref())]);
            table.add_row(vec!["Type".to_string(), cell(user.kind.as_deref())]);
            println!("{}", table);
        }
        AdminCommands::Activate { email, json } => {
            let response = track(
                "admin_activate",
                "/admin/activate-user",
                json,
                admin.activate_user(&email),
                FeedbackOptions::new()
                    .loading("Activating user...")
                    .success(format!("{} activated", email)),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        AdminCommands::Suspend { email, json } => {
            let response = track(
                "admin_suspend",
                "/admin/suspend-user",
                json,
                admin.suspend_user(&email),
                FeedbackOptions::new()
                    .loading("Suspending user...")
                    .success(format!("{} suspended", email)),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        AdminCommands::DeleteUser { email, force, json } => {
            if !force
                && !json
                && !Confirm::new()
                    .with_prompt(format!("Delete user {}? This cannot be undone.", email))
                    .default(false)
                    .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }

            let response = track(
                "admin_delete_user",
                "/admin/delete-user",
                json,
                admin.delete_user(&email),
                FeedbackOptions::new()
                    .loading("Deleting user...")
                    .success(format!("{} deleted", email)),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        AdminCommands::Events {
            page,
            page_size,
            search,
            sort_by,
            json,
        } => {
            let query = EventQuery {
                page,
                page_size,
                search,
                sort_by,
            };
            let page = track(
                "admin_events",
                "/admin/get-events",
                json,
                admin.events(&query),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&page);
            }
            if page.events.is_empty() {
                println!("No events found.");
                return Ok(());
            }
            print_events(&page.events);
            let p = &page.pagination;
            println!(
                "Page {} of {} ({} events)",
                p.current_page, p.total_pages, p.total_count
            );
        }
        AdminCommands::SetStatus {
            event_id,
            status,
            json,
        } => {
            let response = track(
                "admin_set_status",
                "/admin/change-event-status",
                json,
                admin.change_delivery_status(&event_id, status),
                FeedbackOptions::new()
                    .loading("Updating delivery status...")
                    .success(format!("Event {} is now {}", event_id, status)),
            )
            .await?;
            if json {
                print_json(&response)?;
            }
        }
        AdminCommands::Transactions { json } => {
            let list = track(
                "admin_transactions",
                "/admin/get-all-transactions",
                json,
                admin.transactions(),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;

            if json {
                return print_json(&list);
            }
            let mut table = create_table();
            table.set_header(vec!["Reference", "Customer", "Event", "Amount", "Status"]);
            for tx in &list.transactions {
                table.add_row(vec![
                    cell(tx.payment_reference.as_deref()),
                    cell(tx.customer_name.as_deref()),
                    cell(tx.event_id.as_deref()),
                    format!("{} {}", tx.currency_code.as_deref().unwrap_or("NGN"), tx.amount),
                    cell(tx.status.as_deref()),
                ]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}
