//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 新增或更新流程的集成测试

#[path = "../common/mod.rs"]
mod common;

use async_trait::async_trait;
use candidate_cache::cache::{CacheExt, CacheOps};
use candidate_cache::error::{CandidateError, Result};
use candidate_cache::metrics::GLOBAL_METRICS;
use candidate_cache::model::{CandidateRecord, NewCandidate};
use candidate_cache::repository::{CandidateRepository, InMemoryCandidateRepository};
use candidate_cache::service::CandidateService;
use common::{
    generate_unique_service_name, minimal_input, sample_input, setup_logging, CountingRepository,
    RecordingCache,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Barrier;

const TEN_MINUTES: Duration = Duration::from_secs(600);

fn build(
    service_name: &str,
    ttl: Duration,
) -> (CandidateService, Arc<CountingRepository>, Arc<RecordingCache>) {
    let repository = Arc::new(CountingRepository::new());
    let cache = Arc::new(RecordingCache::new(service_name));
    let service = CandidateService::new(service_name, repository.clone(), cache.clone(), ttl);
    (service, repository, cache)
}

/// 首次调用：插入一次，不替换，字段与输入一致
#[tokio::test]
async fn test_first_upsert_creates_once() {
    setup_logging();
    let (service, repository, cache) = build("upsert_create", TEN_MINUTES);

    let input = sample_input("john_doe@test.com");
    let record = service.add_or_update(&input).await.unwrap();

    assert_eq!(repository.finds(), 1);
    assert_eq!(repository.inserts(), 1);
    assert_eq!(repository.replaces(), 0);
    assert_eq!(repository.stored(), 1);

    assert_eq!(record.email(), "john_doe@test.com");
    assert_eq!(record.first_name, input.first_name);
    assert_eq!(record.phone_number, input.phone_number);
    assert_eq!(record.start_call_time, input.start_call_time);
    assert_eq!(record.github_profile_url, input.github_profile_url);

    assert_eq!(
        cache.writes(),
        vec![("candidate:john_doe@test.com".to_string(), TEN_MINUTES)]
    );
}

/// 第二次调用：同一记录原地更新
#[tokio::test]
async fn test_second_upsert_updates_in_place() {
    setup_logging();
    let (service, repository, _cache) = build("upsert_update", TEN_MINUTES);

    let created = service
        .add_or_update(&sample_input("john_doe@test.com"))
        .await
        .unwrap();

    let mut changed = sample_input("john_doe@test.com");
    changed.last_name = "Smith".to_string();
    changed.phone_number = None;
    changed.start_call_time = None;
    changed.end_call_time = None;
    let updated = service.add_or_update(&changed).await.unwrap();

    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.email(), created.email());
    assert_eq!(updated.last_name, "Smith");
    assert_eq!(updated.phone_number, None);
    assert_eq!(updated.start_call_time, None);
    assert_eq!(updated.end_call_time, None);

    assert_eq!(repository.inserts(), 1);
    assert_eq!(repository.replaces(), 1);
    assert_eq!(repository.stored(), 1);
}

/// 缓存命中时不读取仓储
#[tokio::test]
async fn test_cache_hit_skips_repository_read() {
    setup_logging();
    let (service, repository, _cache) = build("upsert_cache_hit", TEN_MINUTES);

    service
        .add_or_update(&sample_input("john_doe@test.com"))
        .await
        .unwrap();
    assert_eq!(repository.finds(), 1);

    service
        .add_or_update(&sample_input("john_doe@test.com"))
        .await
        .unwrap();
    assert_eq!(repository.finds(), 1);
    assert_eq!(repository.replaces(), 1);
}

/// 每次调用恰好一次缓存写入，TTL固定
#[tokio::test]
async fn test_every_call_refreshes_cache_once() {
    setup_logging();
    let (service, _repository, cache) = build("upsert_refresh", TEN_MINUTES);

    for _ in 0..3 {
        service
            .add_or_update(&sample_input("john_doe@test.com"))
            .await
            .unwrap();
    }

    let writes = cache.writes();
    assert_eq!(writes.len(), 3);
    assert!(writes
        .iter()
        .all(|(key, ttl)| key == "candidate:john_doe@test.com" && *ttl == TEN_MINUTES));
}

/// 大小写不同的邮箱解析为同一记录
#[tokio::test]
async fn test_email_case_variants_resolve_to_one_record() {
    setup_logging();
    let (service, repository, cache) = build("upsert_case", TEN_MINUTES);

    let created = service
        .add_or_update(&minimal_input("John.Doe@Example.com", "John"))
        .await
        .unwrap();
    assert_eq!(created.email(), "john.doe@example.com");

    let updated = service
        .add_or_update(&minimal_input("JOHN.DOE@EXAMPLE.COM", "Jon"))
        .await
        .unwrap();

    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.email(), "john.doe@example.com");
    assert_eq!(updated.first_name, "Jon");
    assert_eq!(repository.stored(), 1);

    let cached: Option<CandidateRecord> = cache
        .try_get("candidate:john.doe@example.com")
        .await
        .unwrap();
    assert_eq!(cached, Some(updated));
}

/// 缓存过期后重新从仓储读取
#[tokio::test]
async fn test_expired_entry_falls_back_to_repository() {
    setup_logging();
    let (service, repository, _cache) = build("upsert_expiry", Duration::from_millis(50));

    let created = service
        .add_or_update(&sample_input("john_doe@test.com"))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;

    let updated = service
        .add_or_update(&sample_input("john_doe@test.com"))
        .await
        .unwrap();

    assert_eq!(updated.id(), created.id());
    assert_eq!(repository.finds(), 2);
    assert_eq!(repository.inserts(), 1);
}

/// 不同邮箱得到不同标识
#[tokio::test]
async fn test_distinct_emails_get_distinct_ids() {
    setup_logging();
    let (service, repository, _cache) = build("upsert_distinct", TEN_MINUTES);

    let first = service
        .add_or_update(&sample_input("first@test.com"))
        .await
        .unwrap();
    let second = service
        .add_or_update(&sample_input("second@test.com"))
        .await
        .unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(repository.stored(), 2);
}

/// 两个请求都在查找之后才写入的仓储
struct RacingRepository {
    inner: InMemoryCandidateRepository,
    barrier: Barrier,
}

#[async_trait]
impl CandidateRepository for RacingRepository {
    async fn find_by_normalized_email(&self, email: &str) -> Result<Option<CandidateRecord>> {
        let found = self.inner.find_by_normalized_email(email).await;
        self.barrier.wait().await;
        found
    }

    async fn insert(&self, candidate: NewCandidate) -> Result<CandidateRecord> {
        self.inner.insert(candidate).await
    }

    async fn replace(&self, candidate: &CandidateRecord) -> Result<()> {
        self.inner.replace(candidate).await
    }
}

/// 同一新邮箱的并发请求：一个成功，另一个收到冲突
#[tokio::test]
async fn test_concurrent_first_upserts_conflict() {
    setup_logging();
    let repository = Arc::new(RacingRepository {
        inner: InMemoryCandidateRepository::new(),
        barrier: Barrier::new(2),
    });
    let cache = Arc::new(RecordingCache::new("upsert_race"));
    let service = CandidateService::new("upsert_race", repository.clone(), cache.clone(), TEN_MINUTES);

    let first = tokio::spawn({
        let service = service.clone();
        async move { service.add_or_update(&sample_input("race@test.com")).await }
    });
    let second = tokio::spawn({
        let service = service.clone();
        async move { service.add_or_update(&sample_input("Race@Test.com")).await }
    });

    let results = vec![first.await.unwrap(), second.await.unwrap()];
    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.is_conflict()))
        .count();

    assert_eq!(succeeded, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(repository.inner.len(), 1);
    assert_eq!(cache.writes().len(), 1);
}

/// 缓存写入失败原样返回
struct FailingCache {
    inner: RecordingCache,
}

#[async_trait]
impl CacheOps for FailingCache {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get_bytes(key).await
    }

    async fn set_bytes(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<()> {
        Err(CandidateError::Cache("cache unavailable".to_string()))
    }

    fn serializer(&self) -> &candidate_cache::serialization::JsonSerializer {
        self.inner.serializer()
    }
}

#[tokio::test]
async fn test_cache_write_failure_is_propagated_after_durable_write() {
    setup_logging();
    let repository = Arc::new(CountingRepository::new());
    let cache = Arc::new(FailingCache {
        inner: RecordingCache::new("upsert_cache_failure"),
    });
    let service = CandidateService::new("upsert_cache_failure", repository.clone(), cache, TEN_MINUTES);

    let err = service
        .add_or_update(&sample_input("john_doe@test.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, CandidateError::Cache(_)));
    assert_eq!(repository.stored(), 1);
}

/// 指标按服务名称记录
#[tokio::test]
async fn test_metrics_are_recorded_per_service() {
    setup_logging();
    let name = generate_unique_service_name("upsert_metrics");
    let repository = Arc::new(CountingRepository::new());
    let cache = Arc::new(candidate_cache::cache::MemoryCache::with_capacity(name.as_str(), 16));
    let service = CandidateService::new(name.as_str(), repository, cache, TEN_MINUTES);

    service
        .add_or_update(&sample_input("john_doe@test.com"))
        .await
        .unwrap();
    service
        .add_or_update(&sample_input("john_doe@test.com"))
        .await
        .unwrap();

    assert_eq!(GLOBAL_METRICS.request_count(&name, "cache", "get", "miss"), 1);
    assert_eq!(GLOBAL_METRICS.request_count(&name, "cache", "get", "hit"), 1);
    assert_eq!(GLOBAL_METRICS.request_count(&name, "cache", "set", "success"), 2);
    assert_eq!(GLOBAL_METRICS.request_count(&name, "repository", "insert", "success"), 1);
    assert_eq!(GLOBAL_METRICS.request_count(&name, "repository", "replace", "success"), 1);
}
