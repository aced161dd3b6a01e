use std::time::Duration;

use chrono::Utc;
use paysync_core::dates;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{self, ApiError, ApiResult};

/// Fixed API version negotiated with every request.
pub const API_VERSION: &str = "2023-09-04";
pub const VERSION_HEADER: &str = "Ledger-Version";

const RESET_HEADER: &str = "RateLimit-Reset";

/// Authenticated client for the remote ledger API. Cheap to construct; one
/// instance is shared across a refresh.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Issue a GET and decode the JSON body. Rate-limit responses are
    /// retried internally and never reach the caller.
    pub async fn get_json(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value> {
        let url = self.endpoint(path);
        let body = send_with_backoff(|| {
            self.http
                .get(&url)
                .bearer_auth(&self.token)
                .header(VERSION_HEADER, API_VERSION)
                .query(query)
        })
        .await?;
        decode_body(path, &body)
    }
}

pub(crate) fn decode_body(context: &str, body: &str) -> ApiResult<Value> {
    serde_json::from_str(body).map_err(|err| {
        ApiError::Decode(format!(
            "{context}: {err} (body snippet: {})",
            error::truncate(body, 256)
        ))
    })
}

/// Send a request, transparently absorbing rate-limit responses: read the
/// server-declared reset time, sleep until one second past it, and re-issue
/// the identical request. Retries are unbounded; any other failure is
/// mapped and returned.
pub(crate) async fn send_with_backoff<F>(build: F) -> ApiResult<String>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    loop {
        let response = build().send().await?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let wait = reset_delay(&response);
            warn!(seconds = wait, "rate limited; waiting for server reset");
            tokio::time::sleep(Duration::from_secs(wait)).await;
            continue;
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(error::from_response(status, &body));
        }
        debug!(status = %status, bytes = body.len(), "api response");
        return Ok(body);
    }
}

fn reset_delay(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get(RESET_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| dates::parse_http_date(value).ok())
        .map(|reset| (reset - Utc::now()).num_seconds() + 1)
        .unwrap_or(1)
        .max(1) as u64
}
