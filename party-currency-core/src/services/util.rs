//! Image download proxy

use std::sync::Arc;

use crate::adapters::http::{ApiClient, Auth};
use crate::domain::result::Result;

pub struct UtilService {
    api: Arc<ApiClient>,
}

impl UtilService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetch a Google Drive image through the backend, which adds the
    /// CORS headers Drive does not send. Returns the raw image bytes.
    pub async fn download_drive_image(&self, drive_url: &str) -> Result<Vec<u8>> {
        self.api
            .request_bytes(
                "/currencies/download-image",
                &[("url", drive_url.to_string())],
                Auth::Required,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::credentials::MemoryCredentialStore;
    use crate::domain::UserRole;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_download_encodes_url() {
        let server = MockServer::start_async().await;
        let drive_url = "https://drive.google.com/uc?id=abc&export=view";
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/currencies/download-image")
                    .query_param("url", drive_url)
                    .header("Authorization", "Token t");
                then.status(200).body(vec![0x89, 0x50, 0x4e, 0x47]);
            })
            .await;

        let store = Arc::new(MemoryCredentialStore::with_token("t", UserRole::Customer));
        let api = ApiClient::new(&server.base_url(), store).unwrap();
        let bytes = UtilService::new(Arc::new(api))
            .download_drive_image(drive_url)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(bytes, vec![0x89, 0x50, 0x4e, 0x47]);
    }
}
