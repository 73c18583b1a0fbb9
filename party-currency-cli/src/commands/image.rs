//! Image command - download a currency image stored on Google Drive

use std::path::PathBuf;

use anyhow::{Context, Result};
use party_currency_core::services::FeedbackOptions;

use super::{get_context, print_json, track};
use crate::output::{self, format_size};

pub async fn run(url: &str, output_path: Option<PathBuf>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let bytes = track(
        "image_download",
        "/currencies/download-image",
        json,
        ctx.util_service.download_drive_image(url),
        FeedbackOptions::new()
            .loading("Downloading image...")
            .no_success_message(),
    )
    .await?;

    let path = output_path.unwrap_or_else(|| PathBuf::from("currency-image.png"));
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    if json {
        return print_json(&serde_json::json!({
            "path": path.to_string_lossy(),
            "size_bytes": bytes.len(),
        }));
    }
    output::success(&format!(
        "Saved {} ({})",
        path.display(),
        format_size(bytes.len() as u64)
    ));
    Ok(())
}
