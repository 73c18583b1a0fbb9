//! Config command - show and change settings.json

use anyhow::Result;
use clap::Subcommand;
use party_currency_core::config::{Config, SETTING_KEYS};

use super::{get_data_dir, print_json};
use crate::output::{self, create_table};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Change a setting
    Set {
        /// One of baseUrl, locationBaseUrl, tokenDurationDays, requestTimeoutSecs
        key: String,
        value: String,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let data_dir = get_data_dir()?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&data_dir)?;
            let settings = config.to_json();

            if json {
                return print_json(&settings);
            }

            let mut table = create_table();
            table.set_header(vec!["Setting", "Value"]);
            for key in SETTING_KEYS {
                let value = settings
                    .get(key)
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .unwrap_or_default();
                table.add_row(vec![key.to_string(), value]);
            }
            println!("{}", table);
            println!("Settings file: {}", data_dir.join("settings.json").display());
            if config.env_token.is_some() {
                output::info("Using the access token from PARTY_CURRENCY_TOKEN");
            }
        }
        ConfigCommands::Set { key, value } => {
            // File values only; env overrides must not leak into settings.json
            let mut config = Config::load_file(&data_dir)?;
            config.set(&key, &value)?;
            config.save(&data_dir)?;
            output::success(&format!("{} set to {}", key, value));
        }
    }

    Ok(())
}
