//! Login / logout commands

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use party_currency_core::services::FeedbackOptions;

use super::{get_context, get_logger, log_event, password_or_prompt, print_json, track};
use crate::output;
use party_currency_core::LogEvent;

pub async fn login(
    email: Option<String>,
    password: Option<String>,
    remember: bool,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;

    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email").interact_text()?,
    };
    let password = password_or_prompt(password, "Password")?;

    let outcome = track(
        "login",
        "/auth/login",
        json,
        ctx.auth_service.login(&email, &password, remember),
        FeedbackOptions::auth().success("Login successful!"),
    )
    .await?;

    if json {
        return print_json(&outcome);
    }

    let name = outcome
        .profile
        .as_ref()
        .map(|p| p.display_name())
        .unwrap_or_default();
    println!("Signed in as {} ({})", name.bold(), outcome.role);
    if !remember {
        output::warning("Session only: the token was not saved and expires with this command.");
    }
    Ok(())
}

/// Finish a Google sign-in. Without a token, print the URL that starts one.
pub async fn google(token: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let Some(token) = token else {
        let url = ctx.auth_service.google_login_url();
        if json {
            return print_json(&serde_json::json!({ "url": url }));
        }
        println!("Open this URL to sign in with Google:");
        println!("  {}", url.cyan());
        println!("Then run 'party login google --token <token>' with the token from the redirect.");
        return Ok(());
    };

    let outcome = track(
        "login_google",
        "/auth/google/callback",
        json,
        ctx.auth_service.login_with_google(&token),
        FeedbackOptions::auth().success("Successfully logged in with Google!"),
    )
    .await?;

    if json {
        return print_json(&outcome);
    }
    println!("Signed in as {}", outcome.role);
    Ok(())
}

pub fn logout(json: bool) -> Result<()> {
    let ctx = get_context()?;
    ctx.auth_service.logout()?;

    log_event(&get_logger(), LogEvent::new("logout").with_command("logout"));

    if json {
        return print_json(&serde_json::json!({ "success": true }));
    }
    output::success("Signed out");
    Ok(())
}
