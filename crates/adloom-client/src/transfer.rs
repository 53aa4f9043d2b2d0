//! Raw byte transfer to signed upload URLs.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::http::{ensure_success, send_error};

// Signed-URL uploads carry whole video files.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Uploads file bytes to pre-signed URLs.
///
/// The URL itself carries the authorization, so no credentials are attached.
#[derive(Debug, Clone)]
pub struct TransferClient {
    http: Client,
}

impl TransferClient {
    pub fn new() -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .map_err(|e| {
                ClientError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self { http })
    }

    /// PUT raw bytes to a signed URL.
    pub async fn put_bytes(&self, url: &str, bytes: Vec<u8>) -> ClientResult<()> {
        let size = bytes.len();
        let response = self
            .http
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(|e| send_error("Upload", e))?;
        ensure_success(response, "Upload").await?;

        debug!(size, "Upload complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_put_bytes_sends_octet_stream() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/signed/goku.mp4"))
            .and(header("content-type", "application/octet-stream"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = TransferClient::new().unwrap();
        let url = format!("{}/signed/goku.mp4", server.uri());
        client.put_bytes(&url, b"fake video bytes".to_vec()).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_upload_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/signed/goku.mp4"))
            .respond_with(ResponseTemplate::new(403).set_body_string("signature expired"))
            .mount(&server)
            .await;

        let client = TransferClient::new().unwrap();
        let url = format!("{}/signed/goku.mp4", server.uri());
        let err = client
            .put_bytes(&url, b"fake video bytes".to_vec())
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("signature expired"));
    }
}
