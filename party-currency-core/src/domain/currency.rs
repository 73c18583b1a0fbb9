//! Party currency (custom banknote design) domain models

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Note face values the service prints
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u32", try_from = "u32")]
pub enum Denomination {
    N100,
    #[default]
    N200,
    N500,
    N1000,
}

impl Denomination {
    pub const ALL: [Denomination; 4] = [
        Denomination::N100,
        Denomination::N200,
        Denomination::N500,
        Denomination::N1000,
    ];

    /// Notes that can be bought through the payment flow
    pub const PAYABLE: [Denomination; 3] =
        [Denomination::N200, Denomination::N500, Denomination::N1000];

    pub fn value(&self) -> u32 {
        match self {
            Denomination::N100 => 100,
            Denomination::N200 => 200,
            Denomination::N500 => 500,
            Denomination::N1000 => 1000,
        }
    }
}

impl From<Denomination> for u32 {
    fn from(d: Denomination) -> Self {
        d.value()
    }
}

impl TryFrom<u32> for Denomination {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Denomination::ALL
            .into_iter()
            .find(|d| d.value() == value)
            .ok_or_else(|| format!("unsupported denomination: {}", value))
    }
}

impl FromStr for Denomination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .trim_start_matches('₦')
            .parse()
            .map_err(|_| format!("unsupported denomination: {}", s))?;
        Denomination::try_from(value)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A saved currency design
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub currency_id: String,
    #[serde(default)]
    pub currency_author: Option<String>,
    #[serde(default)]
    pub denomination: Option<u32>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub currency_name: Option<String>,
    #[serde(default)]
    pub front_celebration_text: Option<String>,
    #[serde(default)]
    pub back_celebration_text: Option<String>,
    #[serde(default)]
    pub front_image: Option<String>,
    #[serde(default)]
    pub back_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Image attached to a currency upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyImage {
    /// Read from disk at upload time
    File(PathBuf),
    /// Inline bytes with a file name and MIME type
    Bytes {
        file_name: String,
        mime: String,
        data: Vec<u8>,
    },
}

impl CurrencyImage {
    /// Decode a `data:<mime>;base64,<payload>` URL, as produced by the
    /// currency editor canvas.
    pub fn from_data_url(data_url: &str, file_stem: &str) -> Result<Self, String> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| "image is not a data URL".to_string())?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| "malformed data URL".to_string())?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| "data URL is not base64 encoded".to_string())?;
        let mime = if mime.is_empty() { "image/png" } else { mime };
        let data = STANDARD
            .decode(payload.trim())
            .map_err(|e| format!("invalid base64 image: {}", e))?;
        let extension = mime.rsplit('/').next().unwrap_or("png");

        Ok(CurrencyImage::Bytes {
            file_name: format!("{}.{}", file_stem, extension),
            mime: mime.to_string(),
            data,
        })
    }
}

/// Fields for saving a new currency design
#[derive(Debug, Clone, Default)]
pub struct NewCurrency {
    pub currency_name: String,
    pub front_celebration_text: String,
    pub back_celebration_text: Option<String>,
    pub event_id: String,
    pub denomination: Option<Denomination>,
    pub front_image: Option<CurrencyImage>,
    pub back_image: Option<CurrencyImage>,
}

/// Partial update of a currency design; unset fields are left alone
#[derive(Debug, Clone, Default)]
pub struct CurrencyUpdate {
    pub currency_name: Option<String>,
    pub front_celebration_text: Option<String>,
    pub back_celebration_text: Option<String>,
    pub event_id: Option<String>,
    pub front_image: Option<CurrencyImage>,
    pub back_image: Option<CurrencyImage>,
}

impl CurrencyUpdate {
    pub fn is_empty(&self) -> bool {
        self.currency_name.is_none()
            && self.front_celebration_text.is_none()
            && self.back_celebration_text.is_none()
            && self.event_id.is_none()
            && self.front_image.is_none()
            && self.back_image.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_denomination_parsing() {
        assert_eq!("500".parse::<Denomination>().unwrap(), Denomination::N500);
        assert_eq!("₦1000".parse::<Denomination>().unwrap(), Denomination::N1000);
        assert!("250".parse::<Denomination>().is_err());
        assert_eq!(Denomination::default(), Denomination::N200);
    }

    #[test]
    fn test_denomination_serde_as_number() {
        assert_eq!(serde_json::to_value(Denomination::N100).unwrap(), json!(100));
        let d: Denomination = serde_json::from_value(json!(200)).unwrap();
        assert_eq!(d, Denomination::N200);
    }

    #[test]
    fn test_image_from_data_url() {
        // "hi" in base64
        let image = CurrencyImage::from_data_url("data:image/jpeg;base64,aGk=", "front").unwrap();
        match image {
            CurrencyImage::Bytes { file_name, mime, data } => {
                assert_eq!(file_name, "front.jpeg");
                assert_eq!(mime, "image/jpeg");
                assert_eq!(data, b"hi");
            }
            other => panic!("unexpected image: {:?}", other),
        }
    }

    #[test]
    fn test_image_from_bad_data_url() {
        assert!(CurrencyImage::from_data_url("https://example.com/a.png", "front").is_err());
        assert!(CurrencyImage::from_data_url("data:image/png,plain", "front").is_err());
    }

    #[test]
    fn test_currency_parses_backend_shape() {
        let currency: Currency = serde_json::from_value(json!({
            "currency_id": "CUR1",
            "currency_author": "ade",
            "denomination": 500,
            "event_id": "EVT1",
            "currency_name": "Ade's Naira",
            "front_celebration_text": "Happy 30th",
            "front_image": "https://drive.google.com/x",
            "back_image": null,
            "back_celebration_text": "Party Currency"
        }))
        .unwrap();
        assert_eq!(currency.denomination, Some(500));
        assert!(currency.back_image.is_none());
    }
}
