use chrono::{DateTime, SecondsFormat, Utc};
use paysync_client::{resolve, ApiClient, ApiError, ApiResult, ObjectCache, Pager, ResourceKind};
use paysync_core::{BankAccount, Locale, Mandate, Payment, Refund};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{SyncError, SyncResult};

/// State owned by one refresh invocation: the shared client, a fresh object
/// cache, the creditor being refreshed, and the lower time bound. Dropped
/// wholesale when the refresh ends; nothing carries over to the next run.
pub struct SyncContext<'a> {
    pub client: &'a ApiClient,
    pub cache: ObjectCache,
    pub creditor: String,
    pub since: DateTime<Utc>,
    pub locale: Locale,
}

impl<'a> SyncContext<'a> {
    pub fn new(
        client: &'a ApiClient,
        creditor: impl Into<String>,
        since: DateTime<Utc>,
        locale: Locale,
    ) -> Self {
        Self {
            client,
            cache: ObjectCache::new(),
            creditor: creditor.into(),
            since,
            locale,
        }
    }

    pub fn pager<T: DeserializeOwned>(
        &self,
        collection: ResourceKind,
        params: Vec<(String, String)>,
    ) -> Pager<'_, T> {
        Pager::new(self.client, &self.cache, collection, params)
    }

    pub async fn resolve<T: DeserializeOwned>(&self, kind: ResourceKind, id: &str) -> ApiResult<T> {
        resolve(self.client, &self.cache, kind, id).await
    }

    /// Whether a mandate belongs to the creditor being refreshed.
    pub fn owns(&self, mandate: &Mandate) -> bool {
        mandate.links.creditor.as_deref() == Some(self.creditor.as_str())
    }

    pub async fn mandate_for_payment(&self, payment: &Payment) -> SyncResult<Mandate> {
        let id = payment
            .links
            .mandate
            .as_deref()
            .ok_or_else(|| SyncError::MissingLink {
                kind: "payment",
                id: payment.id.clone(),
                relation: "mandate",
            })?;
        Ok(self.resolve(ResourceKind::Mandates, id).await?)
    }

    /// Refunds may be created without a direct mandate link; the mandate is
    /// then reached through the owning payment. The origin payment is
    /// returned alongside so synthesis can reference it.
    pub async fn mandate_for_refund(
        &self,
        refund: &Refund,
    ) -> SyncResult<(Mandate, Option<Payment>)> {
        let origin = match refund.links.payment.as_deref() {
            Some(payment_id) => Some(
                self.resolve::<Payment>(ResourceKind::Payments, payment_id)
                    .await?,
            ),
            None => None,
        };
        if let Some(mandate_id) = refund.links.mandate.as_deref() {
            let mandate = self.resolve(ResourceKind::Mandates, mandate_id).await?;
            return Ok((mandate, origin));
        }
        let payment = origin.as_ref().ok_or_else(|| SyncError::MissingLink {
            kind: "refund",
            id: refund.id.clone(),
            relation: "mandate",
        })?;
        let mandate = self.mandate_for_payment(payment).await?;
        Ok((mandate, origin))
    }

    /// Customer-side bank account behind a mandate. Erased personal data is
    /// a recognized condition and degrades to `None` instead of failing the
    /// refresh.
    pub async fn customer_account(&self, mandate: &Mandate) -> SyncResult<Option<BankAccount>> {
        let Some(id) = mandate.links.customer_bank_account.as_deref() else {
            return Ok(None);
        };
        match self.resolve(ResourceKind::CustomerBankAccounts, id).await {
            Ok(account) => Ok(Some(account)),
            Err(ApiError::DataRemoved) => {
                debug!(mandate = %mandate.id, "customer bank account erased; omitting personal fields");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Timestamp rendering for `created_at[gte]` filters.
pub(crate) fn iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
