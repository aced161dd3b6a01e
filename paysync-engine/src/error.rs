use paysync_client::ApiError;
use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

/// Error surfaced by a refresh. Anything that would silently misstate the
/// ledger is fatal rather than dropped.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no charged_back event found for payment {payment}; refusing to book the settlement")]
    MissingChargebackOrigin { payment: String },
    #[error("{kind} {id} is missing its {relation} link")]
    MissingLink {
        kind: &'static str,
        id: String,
        relation: &'static str,
    },
}
