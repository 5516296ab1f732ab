//! Time-to-live cache in front of an exchange rate provider

use shared::RateTable;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::AppResult;
use crate::external::RateProvider;

/// Last good rate table and when it was fetched
#[derive(Debug, Clone)]
struct Snapshot {
    value: RateTable,
    fetched_at: Instant,
}

/// Memoizes one provider's rate table for `ttl`.
///
/// The lock only guards the snapshot and is never held across a fetch, so
/// concurrent misses may each hit the provider; the last one to finish wins.
pub struct RateCache {
    provider: Arc<dyn RateProvider>,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl RateCache {
    pub fn new(provider: Arc<dyn RateProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached table while fresh, otherwise a new fetch
    pub async fn get(&self) -> AppResult<RateTable> {
        if let Some(rates) = self.fresh().await {
            tracing::debug!(provider = self.provider.name(), "exchange rate cache hit");
            return Ok(rates);
        }
        self.refresh().await
    }

    /// Fetch now, regardless of age.
    ///
    /// A failed fetch leaves the previous snapshot in place.
    pub async fn refresh(&self) -> AppResult<RateTable> {
        let provider = self.provider.name();
        tracing::info!(provider, "refreshing exchange rates");

        let rates = match self.provider.fetch_rates().await {
            Ok(rates) => rates,
            Err(e) => {
                tracing::warn!(provider, error = %e, "exchange rate refresh failed");
                return Err(e);
            }
        };

        *self.snapshot.write().await = Some(Snapshot {
            value: rates.clone(),
            fetched_at: Instant::now(),
        });
        tracing::info!(provider, count = rates.len(), "exchange rates updated");
        Ok(rates)
    }

    /// Last good table, however old
    pub async fn cached(&self) -> Option<RateTable> {
        self.snapshot.read().await.as_ref().map(|s| s.value.clone())
    }

    /// Age of the cached table, if any
    pub async fn age(&self) -> Option<Duration> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(|s| s.fetched_at.elapsed())
    }

    /// Forget the cached table
    pub async fn clear(&self) {
        *self.snapshot.write().await = None;
    }

    async fn fresh(&self) -> Option<RateTable> {
        let guard = self.snapshot.read().await;
        guard
            .as_ref()
            .filter(|s| s.fetched_at.elapsed() < self.ttl)
            .map(|s| s.value.clone())
    }
}
