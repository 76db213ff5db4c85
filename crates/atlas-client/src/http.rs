//! Shared HTTP response checks for Atlas requests.
//!
//! Maps status codes onto [`CatalogError`] so the request code only deals
//! with building bodies and decoding successful responses.

use serde::Deserialize;

use crate::error::CatalogError;

/// Error body returned by the Atlas REST API.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AtlasErrorBody {
    #[serde(default)]
    error_code: String,
    #[serde(default)]
    error_message: String,
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`CatalogError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s).
/// - **409 Conflict** or an `ATLAS-409-*` error code → [`CatalogError::Duplicate`].
/// - **Other non-success status** → [`CatalogError::Api`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
    let status = resp.status();
    if status == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(CatalogError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(classify_failure(status.as_u16(), &body))
}

fn classify_failure(status: u16, body: &str) -> CatalogError {
    let parsed: AtlasErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = if parsed.error_message.is_empty() {
        body.to_string()
    } else {
        parsed.error_message
    };

    if status == 409 || parsed.error_code.starts_with("ATLAS-409") {
        CatalogError::Duplicate { message }
    } else {
        CatalogError::Api { status, message }
    }
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
