//! Minimal session-aware HTTP client with safe logging.
//!
//! - Request options: extra headers and query params per call
//! - Cookie jar enabled, so a login response establishes the session used by
//!   every later request on the same client
//! - Redacts sensitive query params and headers before anything reaches logs
//!
//! There are deliberately no retries and no per-request timeouts: a
//! followcheck run either completes a request or surfaces the failure to the
//! orchestrator, which aborts the run.
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), followcheck_http::HttpError> {
//! let client = followcheck_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", followcheck_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;

/// Header types for callers that attach default headers, so session clients
/// do not need their own `reqwest` dependency.
pub use reqwest::header;

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("client build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}")]
    Api { status: StatusCode, message: String },
}

// ==============================
// Request options
// ==============================

/// Per-request knobs for the HTTP client.
///
/// ```
/// use followcheck_http::RequestOpts;
/// use std::borrow::Cow;
///
/// let opts = RequestOpts {
///     query: Some(vec![("count", Cow::Borrowed("100"))]),
///     ..Default::default()
/// };
/// assert!(opts.headers.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub headers: Option<HeaderMap>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>, // e.g. [("max_id", "42".into())]
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
}

impl HttpClient {
    /// Construct a client anchored to a base URL, with an empty cookie jar.
    pub fn new(base: &str) -> Result<Self, HttpError> {
        Self::with_headers(base, HeaderMap::new())
    }

    /// Like [`HttpClient::new`] but with headers attached to every request
    /// (user agent, device identifiers).
    pub fn with_headers(base: &str, default_headers: HeaderMap) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .cookie_store(true)
            .default_headers(default_headers)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self { base, inner })
    }

    /// GET JSON with per-request options (headers/query).
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let url = self.join(path)?;
        let rb = apply_opts(self.inner.request(Method::GET, url.clone()), &opts);
        self.send_json(Method::GET, url, rb, &opts).await
    }

    /// POST a form-encoded body and decode the JSON response.
    pub async fn post_form<B, T>(
        &self,
        path: &str,
        form: &B,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.join(path)?;
        let rb = apply_opts(self.inner.request(Method::POST, url.clone()).form(form), &opts);
        self.send_json(Method::POST, url, rb, &opts).await
    }

    fn join(&self, path: &str) -> Result<Url, HttpError> {
        self.base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))
    }

    async fn send_json<T>(
        &self,
        method: Method,
        url: Url,
        rb: RequestBuilder,
        opts: &RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let host_path = format!("{}{}", url.domain().unwrap_or("-"), url.path());
        tracing::debug!(
            method=%method,
            host_path=%host_path,
            query=?redact_query(opts.query.as_deref()),
            "http.request.start"
        );

        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(method=%method, host_path=%host_path, message=%message, "http.network_error");
            HttpError::Network(message)
        })?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(method=%method, host_path=%host_path, message=%message, "http.network_error.body");
            HttpError::Network(message)
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        tracing::debug!(
            %status,
            duration_ms=dur_ms,
            body_len=bytes.len(),
            "http.response"
        );

        let snippet = snip_body(&bytes);
        tracing::trace!(body_snippet=%snippet, "http.response.body_snippet");

        if status.is_success() {
            return serde_json::from_slice::<T>(&bytes).map_err(|e| {
                tracing::warn!(
                    serde_line=%e.line(),
                    serde_col=%e.column(),
                    serde_err=%e.to_string(),
                    body_snippet=%snippet,
                    "http.response.decode_error"
                );
                HttpError::Decode(e.to_string(), snippet)
            });
        }

        let message = extract_error_message(&bytes);
        tracing::warn!(
            %status,
            message=%message,
            body_snippet=%snippet,
            "http.error"
        );
        Err(HttpError::Api { status, message })
    }
}

// ==============================
// Helpers
// ==============================

fn apply_opts(mut rb: RequestBuilder, opts: &RequestOpts<'_>) -> RequestBuilder {
    if let Some(q) = &opts.query {
        let pairs: Vec<(&str, &str)> = q.iter().map(|(k, v)| (*k, v.as_ref())).collect();
        rb = rb.query(&pairs);
    }
    if let Some(hdrs) = &opts.headers {
        rb = rb.headers(hdrs.clone());
    }
    rb
}

fn is_secret_param(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "password" | "enc_password" | "access_token" | "authorization" | "auth" | "token"
            | "secret" | "sessionid" | "csrftoken"
    )
}

fn redact_query(query: Option<&[(&str, Cow<'_, str>)]>) -> Vec<(String, String)> {
    query
        .map(|q| {
            q.iter()
                .map(|(k, v)| {
                    let value = if is_secret_param(k) {
                        "<redacted>".to_string()
                    } else {
                        v.as_ref().to_string()
                    };
                    ((*k).to_string(), value)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Extract a human-readable error message from a private-API failure body.
///
/// Shapes seen in the wild: `{"message": "...", "status": "fail"}` and
/// challenge responses carrying `error_title`/`error_type`.
fn extract_error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        error_title: String,
        #[serde(default)]
        error_type: String,
    }

    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        if !m.message.is_empty() {
            return m.message;
        }
        if !m.error_title.is_empty() {
            return m.error_title;
        }
        if !m.error_type.is_empty() {
            return m.error_type;
        }
    }
    snip_body(body)
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        // back off to a char boundary so multibyte text cannot panic truncate
        let mut cut = 500;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_secret_query_params() {
        let query: Vec<(&str, Cow<'_, str>)> = vec![
            ("max_id", "42".into()),
            ("password", "hunter2".into()),
            ("CsrfToken", "abc".into()),
        ];
        let redacted = redact_query(Some(&query));
        assert_eq!(redacted[0], ("max_id".to_string(), "42".to_string()));
        assert_eq!(redacted[1], ("password".to_string(), "<redacted>".to_string()));
        assert_eq!(redacted[2], ("CsrfToken".to_string(), "<redacted>".to_string()));
    }

    #[test]
    fn error_message_prefers_message_field() {
        let body = br#"{"message": "bad_password", "status": "fail"}"#;
        assert_eq!(extract_error_message(body), "bad_password");
    }

    #[test]
    fn error_message_falls_back_to_error_title() {
        let body = br#"{"error_title": "Challenge required", "error_type": "checkpoint"}"#;
        assert_eq!(extract_error_message(body), "Challenge required");
    }

    #[test]
    fn error_message_falls_back_to_snippet_on_non_json() {
        let body = b"<html>gateway timeout</html>";
        assert_eq!(extract_error_message(body), "<html>gateway timeout</html>");
    }

    #[test]
    fn long_bodies_are_snipped() {
        let body = vec![b'x'; 600];
        let snip = snip_body(&body);
        assert_eq!(snip.len(), 503);
        assert!(snip.ends_with("..."));
    }

    #[test]
    fn snipping_respects_multibyte_char_boundaries() {
        // "é" is two bytes and straddles the 500-byte budget at index 499.
        let mut body = "x".repeat(499);
        body.push('é');
        body.push_str(&"y".repeat(100));
        let snip = snip_body(body.as_bytes());
        assert!(snip.ends_with("..."));
        assert_eq!(&snip[..499], "x".repeat(499));
        // the straddling char is dropped whole, never split
        assert!(!snip.contains('\u{FFFD}'));
        assert_eq!(snip.len(), 502);
    }
}
