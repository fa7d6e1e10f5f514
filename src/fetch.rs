//! Shared HTTP transport helper and the run-scoped error taxonomy.
//!
//! Both the feed reader and the post fetcher are plain `GET body-as-text`
//! calls with the same failure modes, so they share one helper. Telegram
//! dispatch reuses the same [`FetchError`] type for its own transport
//! failures.
//!
//! There is no retry and no timeout beyond the transport default: any
//! failure here is terminal for its unit of work.

use thiserror::Error;
use tracing::debug;

/// Errors from fetching or parsing a remote document.
///
/// `Network` and `HttpStatus` cover the transport; `Parse` covers a
/// malformed document once the bytes have arrived.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, body read).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with a non-2xx status code.
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Document could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Fetch a URL and return the response body as text.
///
/// Fails with [`FetchError::HttpStatus`] on any non-2xx response and
/// [`FetchError::Network`] on transport errors. Redirects follow the
/// client's default policy.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }
    let body = response.text().await?;
    debug!(%url, bytes = body.len(), "Fetched document");
    Ok(body)
}
