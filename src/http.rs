use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ConfigError, ErrorCode};

/// Build the one HTTP client every component shares.
///
/// The cookie store is what makes calls credentialed: the session cookie set
/// by the auth service is replayed on every later request, including issue
/// calls made through a clone of the same client.
pub fn build_client() -> Result<Client, ConfigError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("issue-desk/", env!("CARGO_PKG_VERSION"))),
    );

    Ok(Client::builder()
        .default_headers(headers)
        .cookie_store(true)
        .build()?)
}

/// Wrap a send failure: no response arrived.
pub(crate) fn transport_error(fallback: &str, source: reqwest::Error) -> ApiError {
    ApiError::Transport {
        message: fallback.to_string(),
        source,
    }
}

/// Turn a response into its decoded body, or classify the failure.
///
/// `fallback` is the message used when the service gives none.
pub(crate) async fn read_json<T: DeserializeOwned>(
    resp: Response,
    fallback: &str,
) -> Result<T, ApiError> {
    let status = resp.status();

    if !status.is_success() {
        // A response arrived, so the status is kept even if the body is lost.
        let body = match resp.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(error = %e, %status, "failed to read error body");
                Default::default()
            }
        };
        return Err(remote_error(status, &body, fallback));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|source| transport_error(fallback, source))?;

    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
        message: fallback.to_string(),
        source,
    })
}

/// Build `Remote` from the `{message, error, details}` body the service sends
/// with every non-success status. Each field is read on its own, so one
/// oddly typed field does not discard the others.
fn remote_error(status: StatusCode, body: &[u8], fallback: &str) -> ApiError {
    let parsed: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    let message = parsed
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string());
    let code = match parsed.get("error") {
        Some(Value::String(raw)) if !raw.is_empty() => Some(ErrorCode::parse(raw)),
        Some(Value::Number(raw)) => Some(ErrorCode::parse(&raw.to_string())),
        _ => None,
    };
    let details = parsed.get("details").filter(|d| !d.is_null()).cloned();

    ApiError::Remote {
        message,
        code,
        status,
        details,
    }
}
