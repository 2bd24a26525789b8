//! Time-boxed in-memory memoization of fetch results.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::data_source::HistoryResult;
use crate::{DateRange, Ticker, TradingDate};

/// Identity of one cached fetch: the three user inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub ticker: Ticker,
    pub start: TradingDate,
    pub end: TradingDate,
}

impl QueryKey {
    pub fn new(ticker: Ticker, range: &DateRange) -> Self {
        Self {
            ticker,
            start: range.start(),
            end: range.end(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: Arc<HistoryResult>,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    map: HashMap<QueryKey, CacheEntry>,
    ttl: Duration,
}

impl CacheInner {
    fn new(ttl: Duration) -> Self {
        Self {
            map: HashMap::new(),
            ttl,
        }
    }

    fn get(&self, key: &QueryKey) -> Option<Arc<HistoryResult>> {
        self.map.get(key).and_then(|entry| {
            if Instant::now() <= entry.expires_at {
                Some(Arc::clone(&entry.snapshot))
            } else {
                None
            }
        })
    }

    fn put(&mut self, key: QueryKey, snapshot: Arc<HistoryResult>) {
        let expires_at = Instant::now() + self.ttl;
        self.map.insert(
            key,
            CacheEntry {
                snapshot,
                expires_at,
            },
        );
    }

    fn clear_expired(&mut self) {
        let now = Instant::now();
        self.map.retain(|_, entry| entry.expires_at > now);
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// Thread-safe TTL cache keyed by [`QueryKey`].
///
/// A hit returns the same shared snapshot that was stored; entries are
/// never mutated in place and expire after the fixed TTL.
#[derive(Debug, Clone)]
pub struct HistoryCache {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl HistoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner::new(ttl))),
        }
    }

    /// Cache with the default 5-minute TTL.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(300))
    }

    /// Disabled cache: every lookup misses, every put is a no-op.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub async fn get(&self, key: &QueryKey) -> Option<Arc<HistoryResult>> {
        let store = self.inner.read().await;
        store.get(key)
    }

    pub async fn put(&self, key: QueryKey, snapshot: Arc<HistoryResult>) {
        let mut store = self.inner.write().await;
        if store.ttl == Duration::ZERO {
            return;
        }
        store.put(key, snapshot);
    }

    pub async fn clear_expired(&self) {
        let mut store = self.inner.write().await;
        store.clear_expired();
    }

    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PriceSeries;

    fn key(ticker: &str) -> QueryKey {
        QueryKey::new(
            Ticker::parse(ticker).expect("valid ticker"),
            &DateRange::parse("2023-01-01", "2023-01-10").expect("valid range"),
        )
    }

    fn snapshot(ticker: &str) -> Arc<HistoryResult> {
        let ticker = Ticker::parse(ticker).expect("valid ticker");
        Arc::new(HistoryResult {
            series: PriceSeries::new(ticker, Vec::new()).expect("valid series"),
            company_name: String::from("Test Co"),
        })
    }

    #[tokio::test]
    async fn hit_returns_same_snapshot() {
        let cache = HistoryCache::new(Duration::from_secs(1));
        assert!(cache.get(&key("AAPL")).await.is_none());

        let stored = snapshot("AAPL");
        cache.put(key("AAPL"), Arc::clone(&stored)).await;

        let hit = cache.get(&key("AAPL")).await.expect("must hit");
        assert!(Arc::ptr_eq(&hit, &stored));
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = HistoryCache::new(Duration::from_millis(50));
        cache.put(key("AAPL"), snapshot("AAPL")).await;
        assert!(cache.get(&key("AAPL")).await.is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(cache.get(&key("AAPL")).await.is_none());
    }

    #[tokio::test]
    async fn keys_distinguish_ticker_and_range() {
        let cache = HistoryCache::new(Duration::from_secs(60));
        cache.put(key("AAPL"), snapshot("AAPL")).await;

        assert!(cache.get(&key("MSFT")).await.is_none());

        let other_range = QueryKey::new(
            Ticker::parse("AAPL").expect("valid ticker"),
            &DateRange::parse("2023-01-01", "2023-02-01").expect("valid range"),
        );
        assert!(cache.get(&other_range).await.is_none());
    }

    #[tokio::test]
    async fn clear_expired_drops_stale_entries() {
        let cache = HistoryCache::new(Duration::from_millis(50));
        cache.put(key("AAPL"), snapshot("AAPL")).await;
        cache.put(key("MSFT"), snapshot("MSFT")).await;
        assert_eq!(cache.len().await, 2);

        tokio::time::sleep(Duration::from_millis(80)).await;
        cache.clear_expired().await;
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn disabled_cache_never_stores() {
        let cache = HistoryCache::disabled();
        cache.put(key("AAPL"), snapshot("AAPL")).await;
        assert!(cache.get(&key("AAPL")).await.is_none());
        assert_eq!(cache.len().await, 0);
    }
}
