use serde::Deserialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error surfaced by API calls. Recoverable conditions are their own
/// variants so callers can pattern-match instead of inspecting strings.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Related personal data was erased on the remote side. Callers degrade
    /// the affected fields instead of failing the refresh.
    #[error("related data was removed by the remote party")]
    DataRemoved,
    #[error(transparent)]
    AuthFailed(#[from] AuthFailure),
    #[error("{kind}: {message} ({})", .docs_url.as_deref().unwrap_or("no documentation link"))]
    Remote {
        kind: String,
        message: String,
        docs_url: Option<String>,
    },
    #[error("failed to decode API response: {0}")]
    Decode(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Structured outcome of a failed authentication step. Each variant maps to
/// a distinct host-side reaction (re-prompt, hard failure, code challenge).
#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid one-time code")]
    InvalidCode,
    #[error("a one-time code is required (sent via {channel})")]
    CodeRequired { channel: String },
}

/// Remote error payload: `{ "error": { type, message, reason?, errors: [..],
/// documentation_url } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: RemoteError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoteError {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub reason: Option<String>,
    #[serde(default)]
    pub errors: Vec<RemoteErrorDetail>,
    pub documentation_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoteErrorDetail {
    pub reason: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl RemoteError {
    fn reasons(&self) -> impl Iterator<Item = &str> {
        self.reason
            .as_deref()
            .into_iter()
            .chain(self.errors.iter().filter_map(|detail| detail.reason.as_deref()))
    }

    fn delivery_channel(&self) -> String {
        self.errors
            .iter()
            .filter_map(|detail| detail.metadata.get("delivery_channel"))
            .filter_map(|value| value.as_str())
            .next()
            .unwrap_or("unknown channel")
            .to_string()
    }

    pub fn into_api_error(self) -> ApiError {
        for reason in self.reasons() {
            match reason {
                "customer_data_removed" => return ApiError::DataRemoved,
                "invalid_credentials" => {
                    return ApiError::AuthFailed(AuthFailure::InvalidCredentials)
                }
                "invalid_otp" => return ApiError::AuthFailed(AuthFailure::InvalidCode),
                "otp_required" => {
                    let channel = self.delivery_channel();
                    return ApiError::AuthFailed(AuthFailure::CodeRequired { channel });
                }
                _ => {}
            }
        }
        ApiError::Remote {
            kind: self.kind,
            message: self.message,
            docs_url: self.documentation_url,
        }
    }
}

/// Map a non-success response body to an [`ApiError`]. Bodies that do not
/// carry the documented envelope degrade to a generic remote error.
pub(crate) fn from_response(status: reqwest::StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.into_api_error(),
        Err(_) => ApiError::Remote {
            kind: format!("http_{}", status.as_u16()),
            message: truncate(body, 256),
            docs_url: None,
        },
    }
}

pub(crate) fn truncate(body: &str, max: usize) -> String {
    if body.len() <= max {
        body.to_string()
    } else {
        let mut end = max;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &body[..end])
    }
}
