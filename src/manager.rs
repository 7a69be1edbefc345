//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了服务管理器，负责在进程启动时创建缓存、仓储与服务。

use crate::backend::memory::MemoryBackend;
use crate::cache::{CacheOps, MemoryCache};
use crate::config::Config;
use crate::error::{CandidateError, Result};
use crate::repository::{CandidateRepository, SeaOrmCandidateRepository};
use crate::serialization::JsonSerializer;
use crate::service::CandidateService;
use std::sync::Arc;
use tracing::{info, instrument};

/// 服务管理器
///
/// 持有进程级共享的缓存与仓储，生命周期与进程一致。
pub struct ServiceManager {
    config: Config,
    repository: Arc<dyn CandidateRepository>,
    service: CandidateService,
}

impl ServiceManager {
    /// 根据配置初始化
    ///
    /// 连接数据库（必要时建表），创建进程内缓存，并组装服务
    #[instrument(skip(config), level = "info", fields(service = %config.global.service_name))]
    pub async fn init(config: Config) -> Result<Self> {
        config.validate().map_err(CandidateError::ConfigError)?;

        let repository: Arc<dyn CandidateRepository> =
            Arc::new(SeaOrmCandidateRepository::connect(&config.database).await?);
        Ok(Self::with_repository(config, repository))
    }

    /// 使用给定仓储组装服务（测试或嵌入场景）
    pub fn with_repository(config: Config, repository: Arc<dyn CandidateRepository>) -> Self {
        let serializer = JsonSerializer::from_compression(config.cache.compress);
        let cache: Arc<dyn CacheOps> = Arc::new(MemoryCache::new(
            config.global.service_name.clone(),
            Arc::new(MemoryBackend::new(config.cache.max_capacity)),
            serializer,
        ));

        let service = CandidateService::new(
            config.global.service_name.as_str(),
            repository.clone(),
            cache,
            config.cache.ttl(),
        );

        info!(
            "ServiceManager ready: cache ttl={}s, capacity={}",
            config.cache.ttl_secs, config.cache.max_capacity
        );

        Self {
            config,
            repository,
            service,
        }
    }

    pub fn service(&self) -> &CandidateService {
        &self.service
    }

    pub fn repository(&self) -> &Arc<dyn CandidateRepository> {
        &self.repository
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
