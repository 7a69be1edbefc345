//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存旁路存储的接口和实现。
//!
//! 约定：
//! - `set` 对同一键是最后写入者胜出，每次写入以自己的TTL重新计时；
//! - TTL到期后 `try_get` 返回 `None`，不论条目是否已被物理清除；
//! - 读取要么得到某次 `set` 写入的完整值，要么得到 `None`。

pub mod memory;

use crate::error::Result;
use crate::serialization::JsonSerializer;
use crate::utils::redaction::redact_cache_key;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::instrument;

pub use memory::MemoryCache;

/// 缓存扩展特征
///
/// 在字节接口之上提供类型安全的读写
#[async_trait]
pub trait CacheExt: CacheOps {
    /// 读取并反序列化缓存值，未命中或已过期时返回 `None`
    #[instrument(skip(self, key), level = "debug", fields(key = %redact_cache_key(key)))]
    async fn try_get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        match self.get_bytes(key).await? {
            Some(data) => Ok(Some(self.serializer().deserialize(&data)?)),
            None => Ok(None),
        }
    }

    /// 序列化并写入缓存值
    #[instrument(skip(self, key, value), level = "debug", fields(key = %redact_cache_key(key)))]
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        let bytes = self.serializer().serialize(value)?;
        self.set_bytes(key, bytes, ttl).await
    }
}

impl<T: CacheOps + ?Sized> CacheExt for T {}

/// 缓存操作特征
///
/// 服务通过 `Arc<dyn CacheOps>` 持有缓存，测试中可替换为任意实现
#[async_trait]
pub trait CacheOps: Send + Sync {
    /// 获取缓存值
    ///
    /// # 参数
    ///
    /// * `key` - 缓存键
    ///
    /// # 返回值
    ///
    /// 返回缓存值，如果不存在或已过期则返回None
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// 设置缓存值，无条件覆盖已有条目
    ///
    /// # 参数
    ///
    /// * `key` - 缓存键
    /// * `value` - 缓存值
    /// * `ttl` - 相对写入时刻的过期时长
    async fn set_bytes(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// 获取序列化器
    fn serializer(&self) -> &JsonSerializer;
}
