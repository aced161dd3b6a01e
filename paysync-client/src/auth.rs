use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::{decode_body, send_with_backoff, API_VERSION, VERSION_HEADER};
use crate::error::{ApiError, ApiResult, AuthFailure};

/// Unauthenticated client for the two-step credential/2FA token exchange.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

/// Result of a login attempt that did not hard-fail: either a bearer token,
/// or a second-factor challenge naming the delivery channel so the host can
/// prompt accordingly.
#[derive(Debug)]
pub enum AuthOutcome {
    Authenticated { access_token: String },
    ChallengeSent { channel: String },
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    one_time_code: Option<&'a str>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Exchange credentials (plus the one-time code on the second step) for
    /// an access token. A pending second factor is a normal outcome, not an
    /// error; invalid credentials and invalid codes are surfaced as
    /// [`AuthFailure`] variants.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        one_time_code: Option<&str>,
    ) -> ApiResult<AuthOutcome> {
        let url = format!("{}/access_tokens", self.base_url.trim_end_matches('/'));
        let request = TokenRequest {
            email,
            password,
            one_time_code,
        };
        let result = send_with_backoff(|| {
            self.http
                .post(&url)
                .header(VERSION_HEADER, API_VERSION)
                .json(&request)
        })
        .await;
        match result {
            Ok(body) => {
                let token: TokenResponse = serde_json::from_value(decode_body("access_tokens", &body)?)
                    .map_err(|err| ApiError::Decode(format!("access_tokens payload: {err}")))?;
                info!("access token issued");
                Ok(AuthOutcome::Authenticated {
                    access_token: token.access_token,
                })
            }
            Err(ApiError::AuthFailed(AuthFailure::CodeRequired { channel })) => {
                info!(channel = %channel, "second factor requested");
                Ok(AuthOutcome::ChallengeSent { channel })
            }
            Err(err) => Err(err),
        }
    }
}
