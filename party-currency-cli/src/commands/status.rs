//! Status command - show who is signed in

use anyhow::Result;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::{get_context, get_data_dir};

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.status_service.get_status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Party Currency Status".bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec!["Backend".to_string(), status.base_url.clone()]);
    table.add_row(vec!["Data directory".to_string(), get_data_dir()?.display().to_string()]);
    let signed_in = if status.authenticated {
        "yes".green().to_string()
    } else {
        "no".yellow().to_string()
    };
    table.add_row(vec!["Signed in".to_string(), signed_in]);
    if let Some(role) = status.role {
        table.add_row(vec!["Role".to_string(), role.to_string()]);
    }
    if let Some(expires_at) = status.token_expires_at {
        table.add_row(vec![
            "Token expires".to_string(),
            expires_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        ]);
    } else if status.session_only {
        table.add_row(vec!["Token expires".to_string(), "end of session".to_string()]);
    }

    println!("{}", table);

    if !status.authenticated {
        println!();
        println!("Run 'party login' to sign in.");
    }

    Ok(())
}
