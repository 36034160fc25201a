//! Minimal JSON-over-HTTP client with safe logging and an opt-in retry budget.
//!
//! - Client-wide timeout and retry budget
//! - Redacts secret JSON body fields (`api_key`, `token`, ...) before any log
//! - Retries 429/5xx with exponential backoff and `Retry-After` support, but
//!   only when the caller grants a retry budget (the default is zero)
//! - Optional *raw* request/response logging via `SCOUT_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), scout_http::HttpError> {
//! let client = scout_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .post_json("v1/items", &serde_json::json!({"q": "x"}))
//!     .await?;
//! # Ok(()) }
//! ```

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::env;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::time::sleep;

const RAW_ENV: &str = "SCOUT_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024;
const SNIPPET_MAX: usize = 500;

const SECRET_KEYS: &[&str] = &[
    "access_token",
    "authorization",
    "auth",
    "key",
    "api_key",
    "apikey",
    "token",
    "secret",
    "client_secret",
    "password",
];

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

fn is_secret_key(key: &str) -> bool {
    SECRET_KEYS.contains(&key.to_ascii_lowercase().as_str())
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
        body_snippet: String,
    },
}

impl HttpError {
    /// HTTP status for API errors, `None` for transport-level failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl HttpClient {
    /// Construct a client anchored to a base URL. A path prefix on the base
    /// (`https://proxy.example/tavily`) is kept when request paths are joined.
    ///
    /// ```no_run
    /// use scout_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(30));
    /// assert_eq!(client.max_retries, 0);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let mut base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(30),
            max_retries: 0,
        })
    }

    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request_json(Method::POST, path, Some(body)).await
    }

    async fn request_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|e| HttpError::Url(e.to_string()))?;

        let body_bytes = match body {
            Some(b) => Some(serde_json::to_vec(b).map_err(|e| HttpError::Build(e.to_string()))?),
            None => None,
        };

        let max_retries = self.max_retries;
        let timeout = self.default_timeout;
        let req_id = uuid::Uuid::new_v4().simple().to_string();
        let host_path = format!("{}{}", url.host_str().unwrap_or("-"), url.path());
        let mut attempt = 0usize;

        loop {
            let mut rb = self
                .inner
                .request(method.clone(), url.clone())
                .timeout(timeout);
            if let Some(bytes) = &body_bytes {
                rb = rb
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(bytes.clone());
            }

            tracing::debug!(
                req_id=%req_id,
                attempt=attempt + 1,
                max_retries,
                method=%method,
                host_path=%host_path,
                timeout_ms=timeout.as_millis() as u64,
                has_body=%body_bytes.is_some(),
                "http.request.start"
            );

            if raw_enabled() {
                let shown = body_bytes
                    .as_deref()
                    .map(redact_json_body)
                    .unwrap_or_default();
                tracing::debug!(target: "http.raw", %req_id, url=%host_path, body=%shown, "request");
            }

            let t0 = Instant::now();
            let outcome = match rb.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    let headers = resp.headers().clone();
                    resp.bytes().await.map(|b| (status, headers, b))
                }
                Err(err) => Err(err),
            };

            let (status, headers, bytes) = match outcome {
                Ok(parts) => parts,
                Err(err) => {
                    let message = err.to_string();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            req_id=%req_id,
                            attempt,
                            max_retries,
                            backoff_ms=delay.as_millis() as u64,
                            message=%message,
                            "http.retrying.network"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(req_id=%req_id, attempt, message=%message, "http.network_error");
                    return Err(HttpError::Network(message));
                }
            };

            let snippet = snip_body(&bytes);
            tracing::debug!(
                req_id=%req_id,
                %status,
                duration_ms=t0.elapsed().as_millis() as u64,
                body_len=bytes.len(),
                "http.response"
            );

            if raw_enabled() {
                let mut raw = bytes.to_vec();
                let truncated = raw.len() > RAW_MAX_BODY;
                raw.truncate(RAW_MAX_BODY);
                tracing::debug!(
                    target: "http.raw",
                    %req_id,
                    %status,
                    body=%String::from_utf8_lossy(&raw),
                    truncated,
                    "response"
                );
            }

            if status.is_success() {
                return serde_json::from_slice::<T>(&bytes).map_err(|e| {
                    tracing::warn!(
                        req_id=%req_id,
                        serde_err=%e,
                        body_snippet=%snippet,
                        "http.response.decode_error"
                    );
                    HttpError::Decode(e.to_string(), snippet)
                });
            }

            let message = extract_error_message(&bytes);
            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();

            if retryable && attempt < max_retries {
                attempt += 1;
                let delay = retry_after(&headers).unwrap_or_else(|| backoff(attempt));
                tracing::warn!(
                    req_id=%req_id,
                    %status,
                    attempt,
                    max_retries,
                    backoff_ms=delay.as_millis() as u64,
                    message=%message,
                    "http.retrying"
                );
                sleep(delay).await;
                continue;
            }

            tracing::warn!(
                req_id=%req_id,
                %status,
                message=%message,
                body_snippet=%snippet,
                "http.error"
            );
            return Err(HttpError::Api {
                status,
                message,
                body_snippet: snippet,
            });
        }
    }
}

fn backoff(attempt: usize) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1 << (attempt.saturating_sub(1)).min(10)))
}

fn retry_after(h: &HeaderMap) -> Option<Duration> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .trim()
        .parse()
        .ok()
        .map(Duration::from_secs)
}

/// Pull a human readable message out of common error envelopes:
/// `{"error":{"message":..}}`, `{"detail":{"error":..}}`, `{"message":..}`,
/// `{"detail":..}` or `{"error":..}`. Falls back to a body snippet.
fn extract_error_message(body: &[u8]) -> String {
    fn as_text(v: &Value) -> Option<String> {
        match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Object(map) => ["message", "error", "detail"]
                .iter()
                .find_map(|k| map.get(*k).and_then(as_text)),
            _ => None,
        }
    }

    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| as_text(&v))
        .unwrap_or_else(|| snip_body(body))
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > SNIPPET_MAX {
        let mut cut = SNIPPET_MAX;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

/// Render a JSON body for logs with secret fields replaced.
fn redact_json_body(bytes: &[u8]) -> String {
    fn scrub(v: &mut Value) {
        match v {
            Value::Object(map) => {
                for (k, val) in map.iter_mut() {
                    if is_secret_key(k) {
                        *val = Value::String("<redacted>".into());
                    } else {
                        scrub(val);
                    }
                }
            }
            Value::Array(items) => items.iter_mut().for_each(scrub),
            _ => {}
        }
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(mut v) => {
            scrub(&mut v);
            let mut s = v.to_string();
            if s.len() > RAW_MAX_BODY {
                s = snip_body(s.as_bytes());
            }
            s
        }
        Err(_) => format!("<{} bytes, not json>", bytes.len()),
    }
}
