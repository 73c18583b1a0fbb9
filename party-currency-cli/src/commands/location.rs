//! Location command - Nigerian states and LGAs

use anyhow::Result;
use clap::Subcommand;
use party_currency_core::services::FeedbackOptions;

use super::{get_context, print_json, track};

#[derive(Subcommand)]
pub enum LocationCommands {
    /// List states
    States {
        #[arg(long)]
        json: bool,
    },
    /// List the local government areas of a state
    Lgas {
        state: String,
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: LocationCommands) -> Result<()> {
    let ctx = get_context()?;

    let (names, json) = match command {
        LocationCommands::States { json } => {
            let states = track(
                "location_states",
                "/fetch",
                json,
                ctx.location_service.states(),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;
            (states, json)
        }
        LocationCommands::Lgas { state, json } => {
            let lgas = track(
                "location_lgas",
                "/",
                json,
                ctx.location_service.lgas(&state),
                FeedbackOptions::api_request().no_success_message(),
            )
            .await?;
            (lgas, json)
        }
    };

    if json {
        return print_json(&names);
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
