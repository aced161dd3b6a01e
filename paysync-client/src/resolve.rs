use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::{ObjectCache, ResourceKind};
use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};

/// Fetch a single resource by kind and id, cache-first. A miss issues one
/// request for the singular resource path and caches the payload; staleness
/// is never revalidated within a run. Callers that must branch on erased
/// personal data match [`ApiError::DataRemoved`].
pub async fn resolve<T: DeserializeOwned>(
    client: &ApiClient,
    cache: &ObjectCache,
    kind: ResourceKind,
    id: &str,
) -> ApiResult<T> {
    if let Some(cached) = cache.get(kind, id) {
        return decode(kind, cached);
    }
    let body = client
        .get_json(&format!("{}/{id}", kind.path()), &[])
        .await?;
    let object = body.get(kind.path()).cloned().ok_or_else(|| {
        ApiError::Decode(format!(
            "{} response is missing the {} envelope",
            kind.path(),
            kind.path()
        ))
    })?;
    cache.insert(kind, id, object.clone());
    decode(kind, object)
}

fn decode<T: DeserializeOwned>(kind: ResourceKind, value: Value) -> ApiResult<T> {
    serde_json::from_value(value)
        .map_err(|err| ApiError::Decode(format!("{} payload: {err}", kind.path())))
}
