//! Party Currency CLI - events, currency designs and payments in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{
    admin, auth, config, currency, events, image, location, logs, merchant, password, pay,
    profile, signup, status, Reported,
};

/// Party Currency - custom party notes for your celebrations
#[derive(Parser)]
#[command(name = "party", version, about, long_about = None)]
struct Cli {
    /// Show debug output from the HTTP client
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show backend and session status
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in with email and password
    #[command(args_conflicts_with_subcommands = true)]
    Login {
        #[command(subcommand)]
        method: Option<LoginMethod>,
        /// Email address (prompted when omitted)
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Keep the token in memory for this command only instead of saving it
        #[arg(long)]
        session: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign out and forget the stored token
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an account
    Signup {
        #[command(subcommand)]
        command: signup::SignupCommands,
    },

    /// Reset or change your password
    Password {
        #[command(subcommand)]
        command: password::PasswordCommands,
    },

    /// View and edit your profile
    Profile {
        #[command(subcommand)]
        command: profile::ProfileCommands,
    },

    /// Manage events
    Events {
        #[command(subcommand)]
        command: events::EventCommands,
    },

    /// Design party currency notes
    Currency {
        #[command(subcommand)]
        command: currency::CurrencyCommands,
    },

    /// Virtual accounts for merchants
    Merchant {
        #[command(subcommand)]
        command: merchant::MerchantCommands,
    },

    /// Buy notes for an event
    Pay {
        event_id: String,
        /// Number of ₦200 notes
        #[arg(long, default_value = "0")]
        n200: u32,
        /// Number of ₦500 notes
        #[arg(long, default_value = "0")]
        n500: u32,
        /// Number of ₦1000 notes
        #[arg(long, default_value = "0")]
        n1000: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Administration
    Admin {
        #[command(subcommand)]
        command: admin::AdminCommands,
    },

    /// Nigerian states and local government areas
    Location {
        #[command(subcommand)]
        command: location::LocationCommands,
    },

    /// Download an image hosted on Google Drive
    Image {
        /// Drive share URL
        url: String,
        /// Where to write the image
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

#[derive(Subcommand)]
enum LoginMethod {
    /// Sign in with Google
    Google {
        /// Token from the Google redirect (prints the sign-in URL when omitted)
        #[arg(long)]
        token: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.downcast_ref::<Reported>().is_none() {
                output::error(&format!("{:#}", e));
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Status { json } => status::run(json),
        Commands::Login {
            method: Some(LoginMethod::Google { token, json }),
            ..
        } => auth::google(token, json).await,
        Commands::Login {
            method: None,
            email,
            password,
            session,
            json,
        } => auth::login(email, password, !session, json).await,
        Commands::Logout { json } => auth::logout(json),
        Commands::Signup { command } => signup::run(command).await,
        Commands::Password { command } => password::run(command).await,
        Commands::Profile { command } => profile::run(command).await,
        Commands::Events { command } => events::run(command).await,
        Commands::Currency { command } => currency::run(command).await,
        Commands::Merchant { command } => merchant::run(command).await,
        Commands::Pay {
            event_id,
            n200,
            n500,
            n1000,
            json,
        } => pay::run(&event_id, n200, n500, n1000, json).await,
        Commands::Admin { command } => admin::run(command).await,
        Commands::Location { command } => location::run(command).await,
        Commands::Image { url, output, json } => image::run(&url, output, json).await,
        Commands::Logs { command } => logs::run(command),
        Commands::Config { command } => config::run(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_login_google_is_a_subcommand() {
        let cli = Cli::try_parse_from(["party", "login", "google", "--token", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Login {
                method: Some(LoginMethod::Google { token: Some(_), .. }),
                ..
            }
        ));

        let cli = Cli::try_parse_from(["party", "login", "ada@example.com", "--session"]).unwrap();
        match cli.command {
            Commands::Login {
                method: None,
                email,
                session,
                ..
            } => {
                assert_eq!(email.as_deref(), Some("ada@example.com"));
                assert!(session);
            }
            _ => panic!("expected login"),
        }
    }

    #[test]
    fn test_login_persists_token_by_default() {
        // Every command is a new process; only a saved token survives
        let cli = Cli::try_parse_from(["party", "login", "ada@example.com"]).unwrap();
        match cli.command {
            Commands::Login { session, .. } => assert!(!session),
            _ => panic!("expected login"),
        }
    }

    #[test]
    fn test_pay_counts_default_to_zero() {
        let cli = Cli::try_parse_from(["party", "pay", "evt-1", "--n500", "4"]).unwrap();
        match cli.command {
            Commands::Pay { n200, n500, n1000, .. } => assert_eq!((n200, n500, n1000), (0, 4, 0)),
            _ => panic!("expected pay"),
        }
    }
}
