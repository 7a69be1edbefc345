//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了进程内缓存客户端的实现。

use super::CacheOps;
use crate::backend::memory::MemoryBackend;
use crate::error::Result;
use crate::metrics::GLOBAL_METRICS;
use crate::serialization::JsonSerializer;
use crate::utils::redaction::redact_cache_key;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// 进程内缓存客户端
///
/// 在进程启动时创建一次，通过 `Arc` 注入到服务中共享
pub struct MemoryCache {
    /// 服务名称，用于指标标签
    service_name: String,
    backend: Arc<MemoryBackend>,
    serializer: JsonSerializer,
}

impl MemoryCache {
    pub fn new(
        service_name: impl Into<String>,
        backend: Arc<MemoryBackend>,
        serializer: JsonSerializer,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            backend,
            serializer,
        }
    }

    /// 以默认JSON序列化器创建指定容量的缓存
    pub fn with_capacity(service_name: impl Into<String>, max_capacity: u64) -> Self {
        Self::new(
            service_name,
            Arc::new(MemoryBackend::new(max_capacity)),
            JsonSerializer::default(),
        )
    }
}

#[async_trait]
impl CacheOps for MemoryCache {
    #[instrument(skip(self, key), level = "debug", fields(service = %self.service_name, key = %redact_cache_key(key)))]
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.backend.get(key).await {
            Some(bytes) => {
                GLOBAL_METRICS.record_request(&self.service_name, "cache", "get", "hit");
                Ok(Some(bytes))
            }
            None => {
                GLOBAL_METRICS.record_request(&self.service_name, "cache", "get", "miss");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, key, value), level = "debug", fields(service = %self.service_name, key = %redact_cache_key(key)))]
    async fn set_bytes(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let start = std::time::Instant::now();
        self.backend.insert(key, value, ttl).await;
        GLOBAL_METRICS.record_request(&self.service_name, "cache", "set", "success");
        GLOBAL_METRICS.record_duration(
            &self.service_name,
            "cache",
            "set",
            start.elapsed().as_secs_f64(),
        );
        Ok(())
    }

    fn serializer(&self) -> &JsonSerializer {
        &self.serializer
    }
}
