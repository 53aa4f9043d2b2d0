//! Shared request/response plumbing for the adapters.

use crate::error::{ClientError, ClientResult};

/// Map a transport error raised while sending a request.
pub(crate) fn send_error(context: &str, err: reqwest::Error) -> ClientError {
    ClientError::RequestFailed(format!("{} request failed: {}", context, err))
}

/// Reject non-2xx responses, preserving the status code and body text.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
    context: &str,
) -> ClientResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::RequestFailed(format!(
        "{} returned {}: {}",
        context, status, body
    )))
}

/// Decode a JSON body, mapping parse failures to `InvalidResponse`.
pub(crate) async fn decode_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> ClientResult<T> {
    response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("{} response: {}", context, e)))
}
