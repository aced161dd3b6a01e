use std::collections::VecDeque;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::cache::{ObjectCache, ResourceKind};
use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};

const PAGE_LIMIT: usize = 500;

/// Pull-based lazy sequence over one paginated collection. Each exhausted
/// buffer triggers one page request; the page's trailing cursor feeds the
/// next request as `after`. Side-loaded objects under the page's `linked`
/// map land in the object cache before the page's items are yielded, so
/// downstream synthesis can resolve relations without extra round trips.
/// Not restartable; build a new pager to walk the collection again.
pub struct Pager<'a, T> {
    client: &'a ApiClient,
    cache: &'a ObjectCache,
    collection: ResourceKind,
    params: Vec<(String, String)>,
    cursor: Option<String>,
    buffer: VecDeque<T>,
    exhausted: bool,
}

impl<'a, T: DeserializeOwned> Pager<'a, T> {
    pub fn new(
        client: &'a ApiClient,
        cache: &'a ObjectCache,
        collection: ResourceKind,
        params: Vec<(String, String)>,
    ) -> Self {
        Self {
            client,
            cache,
            collection,
            params,
            cursor: None,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Next item of the sequence, or `None` once the final (cursor-less)
    /// page has been drained.
    pub async fn next(&mut self) -> ApiResult<Option<T>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if self.exhausted {
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    async fn fetch_page(&mut self) -> ApiResult<()> {
        let mut query = self.params.clone();
        query.push(("limit".to_string(), PAGE_LIMIT.to_string()));
        if let Some(cursor) = &self.cursor {
            query.push(("after".to_string(), cursor.clone()));
        }
        let page = self.client.get_json(self.collection.path(), &query).await?;

        self.stash_linked(&page);

        let items = page
            .get(self.collection.path())
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ApiError::Decode(format!(
                    "page of {} is missing the collection array",
                    self.collection.path()
                ))
            })?;
        for item in items {
            let decoded = serde_json::from_value(item.clone()).map_err(|err| {
                ApiError::Decode(format!("{} item: {err}", self.collection.path()))
            })?;
            self.buffer.push_back(decoded);
        }

        self.cursor = page
            .get("meta")
            .and_then(|meta| meta.get("cursors"))
            .and_then(|cursors| cursors.get("after"))
            .and_then(Value::as_str)
            .map(str::to_string);
        if self.cursor.is_none() {
            self.exhausted = true;
        }
        debug!(
            collection = self.collection.path(),
            buffered = self.buffer.len(),
            more = !self.exhausted,
            "fetched page"
        );
        Ok(())
    }

    fn stash_linked(&self, page: &Value) {
        let Some(linked) = page.get("linked").and_then(Value::as_object) else {
            return;
        };
        for (kind_name, objects) in linked {
            let Some(kind) = ResourceKind::from_path(kind_name) else {
                debug!(kind = %kind_name, "skipping unrecognized side-loaded collection");
                continue;
            };
            let Some(objects) = objects.as_array() else {
                continue;
            };
            for object in objects {
                if let Some(id) = object.get("id").and_then(Value::as_str) {
                    self.cache.insert(kind, id, object.clone());
                }
            }
        }
    }
}
