//! 对象缓存层
//!
//! 后端以插件形式注册（见 `register`），启动时按 `cache.type` 选择。
//! 目前用于缓存已认证调用方（`Principal`），键为 `principal:{token}`。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端不可用或数据损坏
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为 0 时使用默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(json) => match serde_json::from_str::<T>(&json) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    tracing::debug!("Dropping undecodable cache entry '{}': {}", key, e);
                    self.remove(key).await;
                    CacheResult::ExistsButNoValue
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    pub async fn insert_json<T: Serialize + ?Sized>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(json) => self.insert_raw(key, json, ttl).await,
            Err(e) => tracing::warn!("Failed to serialize cache entry '{}': {}", key, e),
        }
    }
}

/// 声明缓存插件，程序加载时自动注册到插件表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        <$ty>::new()
                            .map(|cache| {
                                Box::new(cache) as Box<dyn $crate::cache::ObjectCache>
                            })
                            .map_err($crate::errors::TrainHubError::cache_connection)
                    })
                }),
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_json_helpers_round_trip_and_remove() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(16, 60));
        cache
            .insert_json("principal:abc".to_string(), &vec![1, 2, 3], 0)
            .await;

        assert_eq!(
            cache.get_json::<Vec<i32>>("principal:abc").await,
            CacheResult::Found(vec![1, 2, 3])
        );

        cache.remove("principal:abc").await;
        assert_eq!(
            cache.get_json::<Vec<i32>>("principal:abc").await,
            CacheResult::NotFound
        );
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_dropped() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(16, 60));
        cache
            .insert_raw("broken".to_string(), "{not json".to_string(), 0)
            .await;

        assert_eq!(
            cache.get_json::<Vec<i32>>("broken").await,
            CacheResult::ExistsButNoValue
        );
        assert_eq!(cache.get_raw("broken").await, CacheResult::NotFound);
    }
}
