//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了基于DashMap的内存仓储。

use super::CandidateRepository;
use crate::error::{CandidateError, Result};
use crate::model::{normalize_email, CandidateId, CandidateRecord, NewCandidate};
use crate::utils::redaction::RedactedEmail;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use tracing::{debug, instrument};

/// 内存仓储
///
/// 以规范化邮箱为键保存记录，标识从1开始递增。
/// 邮箱写入后不再变化，因此按标识替换等价于按邮箱定位后比对标识。
#[derive(Debug)]
pub struct InMemoryCandidateRepository {
    records: DashMap<String, CandidateRecord>,
    next_id: AtomicI32,
}

impl Default for InMemoryCandidateRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCandidateRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CandidateRepository for InMemoryCandidateRepository {
    #[instrument(skip(self, email), level = "debug", fields(email = %RedactedEmail(email)))]
    async fn find_by_normalized_email(&self, email: &str) -> Result<Option<CandidateRecord>> {
        let found = self
            .records
            .get(&normalize_email(email))
            .map(|entry| entry.value().clone());
        debug!("memory repository find: found={}", found.is_some());
        Ok(found)
    }

    #[instrument(skip(self, candidate), level = "debug", fields(email = %RedactedEmail(candidate.email())))]
    async fn insert(&self, candidate: NewCandidate) -> Result<CandidateRecord> {
        match self.records.entry(candidate.email().to_string()) {
            Entry::Occupied(_) => Err(CandidateError::Conflict(
                "UNIQUE constraint failed: candidates.email".to_string(),
            )),
            Entry::Vacant(slot) => {
                let id = CandidateId(self.next_id.fetch_add(1, Ordering::SeqCst));
                let record = candidate.into_record(id);
                slot.insert(record.clone());
                debug!("memory repository insert: id={}", id);
                Ok(record)
            }
        }
    }

    #[instrument(skip(self, candidate), level = "debug", fields(id = %candidate.id()))]
    async fn replace(&self, candidate: &CandidateRecord) -> Result<()> {
        match self.records.get_mut(candidate.email()) {
            Some(mut existing) if existing.id() == candidate.id() => {
                *existing = candidate.clone();
                Ok(())
            }
            _ => Err(CandidateError::NotFound(candidate.id())),
        }
    }
}
