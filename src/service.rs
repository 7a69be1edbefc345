//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 候选人新增或更新服务。
//!
//! 流程：缓存 → (未命中)仓储 → 新建或修改 → 仓储写入 → 刷新缓存。
//! 读取与写入之间不加锁，同一新邮箱的并发请求可能都走插入分支，
//! 后到者收到仓储返回的 `Conflict`，不做合并。

use crate::cache::{CacheExt, CacheOps};
use crate::error::Result;
use crate::metrics::GLOBAL_METRICS;
use crate::model::{cache_key, normalize_email, CandidateInput, CandidateRecord, NewCandidate};
use crate::repository::CandidateRepository;
use crate::utils::redaction::RedactedEmail;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// 候选人服务
///
/// 仓储与缓存在构造时注入；克隆成本低，可在并发请求间共享。
#[derive(Clone)]
pub struct CandidateService {
    service_name: Arc<str>,
    repository: Arc<dyn CandidateRepository>,
    cache: Arc<dyn CacheOps>,
    cache_ttl: Duration,
}

impl CandidateService {
    pub fn new(
        service_name: impl Into<Arc<str>>,
        repository: Arc<dyn CandidateRepository>,
        cache: Arc<dyn CacheOps>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            repository,
            cache,
            cache_ttl,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// 新增或更新候选人
    ///
    /// 输入必须已通过校验。每次成功调用恰好产生一次仓储写入
    /// （插入或替换）和一次缓存写入；缓存命中时不读取仓储。
    ///
    /// # 错误
    ///
    /// 仓储和缓存的错误原样返回，不重试。
    #[instrument(
        skip(self, input),
        level = "info",
        fields(service = %self.service_name, email = %RedactedEmail(&input.email))
    )]
    pub async fn add_or_update(&self, input: &CandidateInput) -> Result<CandidateRecord> {
        let start = Instant::now();
        let email = normalize_email(&input.email);
        let key = cache_key(&email);

        let existing = match self.cache.try_get::<CandidateRecord>(&key).await? {
            Some(cached) => {
                debug!("cache hit, id={}", cached.id());
                Some(cached)
            }
            None => {
                debug!("cache miss, loading from repository");
                self.observe(
                    "find",
                    self.repository.find_by_normalized_email(&email).await,
                )?
            }
        };

        let record = match existing {
            Some(mut record) => {
                record.apply(input);
                self.observe("replace", self.repository.replace(&record).await)?;
                info!("updated candidate id={}", record.id());
                record
            }
            None => {
                let record = self.observe(
                    "insert",
                    self.repository
                        .insert(NewCandidate::from_input(input))
                        .await,
                )?;
                info!("created candidate id={}", record.id());
                record
            }
        };

        self.cache.set(&key, &record, self.cache_ttl).await?;

        GLOBAL_METRICS.record_duration(
            &self.service_name,
            "service",
            "upsert",
            start.elapsed().as_secs_f64(),
        );
        Ok(record)
    }

    // 仓储调用计数，失败原样返回
    fn observe<T>(&self, op: &str, result: Result<T>) -> Result<T> {
        let outcome = if result.is_ok() { "success" } else { "error" };
        GLOBAL_METRICS.record_request(&self.service_name, "repository", op, outcome);
        result
    }
}
