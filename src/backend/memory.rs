//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了进程内缓存后端的实现。

use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};
use crate::utils::redaction::redact_cache_key;
use tracing::{debug, instrument};

/// 单个条目的最长有效期，更长的TTL按此截断
pub const MAX_ENTRY_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// 缓存条目：序列化后的值及其绝对过期时间
#[derive(Clone)]
struct StoredValue {
    bytes: Vec<u8>,
    expires_at: Instant,
}

/// 每个条目按写入时携带的TTL过期
struct PerEntryExpiry;

impl Expiry<String, StoredValue> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        created_at: Instant,
    ) -> Option<Duration> {
        Some(value.expires_at.saturating_duration_since(created_at))
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.expires_at.saturating_duration_since(updated_at))
    }
}

/// 内存缓存后端
///
/// 基于Moka实现。同一键的并发写入以最后生效的一次为准，
/// 该次写入的TTL决定新的过期时间。
#[derive(Clone)]
pub struct MemoryBackend {
    cache: Cache<String, StoredValue>,
}

impl MemoryBackend {
    /// 创建新的内存缓存后端
    ///
    /// # 参数
    ///
    /// * `max_capacity` - 最大条目数
    pub fn new(max_capacity: u64) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(PerEntryExpiry)
                .build(),
        }
    }

    /// 读取缓存值
    ///
    /// 过期条目即使尚未被物理清除，也按不存在处理。
    #[instrument(skip(self, key), level = "debug", fields(key = %redact_cache_key(key)))]
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.cache.get(key).await {
            Some(entry) if Instant::now() < entry.expires_at => {
                debug!("memory get: found=true");
                Some(entry.bytes)
            }
            Some(_) => {
                debug!("memory get: expired=true");
                None
            }
            None => {
                debug!("memory get: found=false");
                None
            }
        }
    }

    /// 写入缓存值，覆盖已有条目
    ///
    /// # 参数
    ///
    /// * `key` - 缓存键
    /// * `value` - 序列化后的值
    /// * `ttl` - 相对写入时刻的过期时长，超过 [`MAX_ENTRY_TTL`] 时截断
    #[instrument(skip(self, key, value), level = "debug", fields(key = %redact_cache_key(key)))]
    pub async fn insert(&self, key: &str, value: Vec<u8>, ttl: Duration) {
        debug!("memory insert: value_len={}, ttl={:?}", value.len(), ttl);
        let entry = StoredValue {
            bytes: value,
            expires_at: Instant::now() + ttl.min(MAX_ENTRY_TTL),
        };
        self.cache.insert(key.to_string(), entry).await;
    }
}
