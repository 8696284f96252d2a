//! Shared HTTP response helpers for the REST client.
//!
//! Centralizes status-code checks (non-success → [`RemoteError::Query`]) and
//! body decoding so the client methods stay focused on request construction.

use serde::de::DeserializeOwned;

use crate::error::RemoteError;

/// Error body shape returned by PostgREST-style services.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success, otherwise
/// [`RemoteError::Query`] with the status code and the service's message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(RemoteError::Query {
        status,
        message: error_message(&body),
    })
}

/// Read the body as text and decode it as JSON.
///
/// Any body that does not match `T` is reported as [`RemoteError::Parse`] so a
/// malformed answer is never mistaken for data.
pub async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, RemoteError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(RemoteError::from)
}

/// Best-effort human message from an error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            code,
            details,
        }) => {
            let mut out = message;
            if let Some(code) = code {
                out = format!("{out} [{code}]");
            }
            if let Some(details) = details.filter(|d| !d.is_empty()) {
                out = format!("{out}: {details}");
            }
            out
        }
        _ => body.trim().to_string(),
    }
}
