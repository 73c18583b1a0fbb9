//! Currency designs

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::adapters::http::{resource_path, ApiClient, Auth};
use crate::domain::result::Result;
use crate::domain::validation::ValidationErrors;
use crate::domain::{Currency, CurrencyImage, CurrencyUpdate, Denomination, NewCurrency};
use crate::services::profile::mime_for;
use crate::services::take_field;

pub struct CurrencyService {
    api: Arc<ApiClient>,
}

impl CurrencyService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Save a new design. Images are uploaded as `front_image` / `back_image`.
    pub async fn save(&self, currency: &NewCurrency) -> Result<JsonValue> {
        let denomination = currency.denomination.unwrap_or_default();
        let mut form = Form::new()
            .text("currency_name", currency.currency_name.clone())
            .text("front_celebration_text", currency.front_celebration_text.clone())
            .text(
                "back_celebration_text",
                currency.back_celebration_text.clone().unwrap_or_default(),
            )
            .text("event_id", currency.event_id.clone())
            .text("denomination", denomination.to_string());

        if let Some(image) = &currency.front_image {
            form = form.part("front_image", image_part(image, "front_image").await?);
        }
        if let Some(image) = &currency.back_image {
            form = form.part("back_image", image_part(image, "back_image").await?);
        }

        debug!(event_id = %currency.event_id, %denomination, "saving currency");
        self.api
            .request_multipart(Method::POST, "/currencies/save-currency", form, Auth::Required)
            .await
    }

    /// Every design owned by the signed-in user
    pub async fn list(&self) -> Result<Vec<Currency>> {
        let body: JsonValue = self
            .api
            .get("/currencies/get-all-currencies", Auth::Required)
            .await?;
        let currencies = match take_field(body, "currencies") {
            JsonValue::Null => JsonValue::Array(vec![]),
            other => other,
        };
        Ok(serde_json::from_value(currencies)?)
    }

    pub async fn get(&self, currency_id: &str) -> Result<Currency> {
        let body: JsonValue = self
            .api
            .get(
                &resource_path("/currencies/get-currency", currency_id),
                Auth::Required,
            )
            .await?;
        Ok(serde_json::from_value(take_field(body, "currency"))?)
    }

    /// Send only the fields set on `update`
    pub async fn update(&self, currency_id: &str, update: &CurrencyUpdate) -> Result<JsonValue> {
        if update.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("currency", "Nothing to update");
            return Err(errors.into());
        }

        let mut form = Form::new();
        for (name, value) in [
            ("currency_name", &update.currency_name),
            ("front_celebration_text", &update.front_celebration_text),
            ("back_celebration_text", &update.back_celebration_text),
            ("event_id", &update.event_id),
        ] {
            if let Some(value) = value {
                form = form.text(name, value.clone());
            }
        }
        if let Some(image) = &update.front_image {
            form = form.part("front_image", image_part(image, "front_image").await?);
        }
        if let Some(image) = &update.back_image {
            form = form.part("back_image", image_part(image, "back_image").await?);
        }

        self.api
            .request_multipart(
                Method::PUT,
                &resource_path("/currencies/update-currency", currency_id),
                form,
                Auth::Required,
            )
            .await
    }

    pub async fn delete(&self, currency_id: &str) -> Result<JsonValue> {
        self.api
            .delete(
                &resource_path("/currencies/delete-currency", currency_id),
                &[],
                Auth::Required,
            )
            .await
    }

    /// Face values a design can be saved with
    pub fn denominations(&self) -> [Denomination; 4] {
        Denomination::ALL
    }
}

async fn image_part(image: &CurrencyImage, default_name: &str) -> Result<Part> {
    let part = match image {
        CurrencyImage::File(path) => {
            let data = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| default_name.to_string());
            Part::bytes(data).file_name(file_name).mime_str(mime_for(path))?
        }
        CurrencyImage::Bytes {
            file_name,
            mime,
            data,
        } => Part::bytes(data.clone())
            .file_name(file_name.clone())
            .mime_str(mime)?,
    };
    Ok(part)
}
