use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StoreError;

/// Hot tier in front of the reference database.
///
/// Routes, profiles and shipment histories share one moka cache keyed by
/// `key_patterns`, so values are held as their JSON encoding rather than one
/// typed cache per lookup. An entry that no longer decodes as the requested
/// type is dropped and reported as a miss; the caller reloads it from SQLite.
pub struct MemoryCache {
    inner: Cache<String, String>,
}

impl MemoryCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = self.inner.get(key).await?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Dropping undecodable hot-cache entry");
                self.inner.invalidate(key).await;
                None
            }
        }
    }

    pub async fn insert<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.inner.insert(key.to_string(), json).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airintel_models::CompanyProfile;
    use chrono::Utc;

    fn cache(ttl: Duration) -> MemoryCache {
        MemoryCache::new(100, ttl)
    }

    #[tokio::test]
    async fn typed_values_round_trip_through_one_cache() {
        let cache = cache(Duration::from_secs(60));
        let profile = CompanyProfile {
            company_name: "LG Electronics".to_string(),
            likely_air_shipper: true,
            air_confidence_score: Some(90),
            updated_at: Utc::now(),
        };
        cache.insert("profile:lg electronics", &Some(profile.clone())).await.unwrap();
        cache.insert("routes:lg", &Vec::<String>::new()).await.unwrap();

        let hit: Option<Option<CompanyProfile>> = cache.get("profile:lg electronics").await;
        assert_eq!(hit, Some(Some(profile)));
        let routes: Option<Vec<String>> = cache.get("routes:lg").await;
        assert_eq!(routes, Some(vec![]));
    }

    #[tokio::test]
    async fn get_missing() {
        let cache = cache(Duration::from_secs(60));
        assert_eq!(cache.get::<Vec<String>>("routes:nobody").await, None);
    }

    #[tokio::test]
    async fn wrong_shape_is_a_miss_and_is_evicted() {
        let cache = cache(Duration::from_secs(60));
        cache.insert("ocean:acme", &"not a list").await.unwrap();

        assert_eq!(cache.get::<Vec<u32>>("ocean:acme").await, None);
        assert_eq!(cache.get::<String>("ocean:acme").await, None);
    }

    #[tokio::test]
    async fn ttl_expiration() {
        let cache = cache(Duration::from_millis(50));
        cache.insert("routes:lg", &Vec::<u32>::new()).await.unwrap();
        assert!(cache.get::<Vec<u32>>("routes:lg").await.is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get::<Vec<u32>>("routes:lg").await.is_none());
    }
}
